// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Lifecycle of the HTTP server: bind, serve, graceful shutdown.

use std::{
	net::SocketAddr,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};

use kondate_type::{
	Result, error,
	error::diagnostic::server::{address_unavailable, bind_failed},
};
use parking_lot::RwLock;
use tokio::{net::TcpListener, sync::oneshot};

use crate::{config::HttpConfig, routes::router, state::AppState};

/// HTTP server subsystem.
///
/// ```ignore
/// let mut http = HttpSubsystem::new(HttpConfig::new("0.0.0.0:8080"), state);
/// http.start().await?;
/// // accepting connections
/// http.shutdown().await;
/// ```
pub struct HttpSubsystem {
	config: HttpConfig,
	/// Actual bound address (available after start).
	actual_addr: RwLock<Option<SocketAddr>>,
	state: AppState,
	running: Arc<AtomicBool>,
	shutdown_tx: Option<oneshot::Sender<()>>,
	shutdown_complete_rx: Option<oneshot::Receiver<()>>,
}

impl HttpSubsystem {
	pub fn new(config: HttpConfig, state: AppState) -> Self {
		Self {
			config,
			actual_addr: RwLock::new(None),
			state,
			running: Arc::new(AtomicBool::new(false)),
			shutdown_tx: None,
			shutdown_complete_rx: None,
		}
	}

	pub fn bind_addr(&self) -> &str {
		&self.config.bind_addr
	}

	/// Get the actual bound address (available after start).
	pub fn local_addr(&self) -> Option<SocketAddr> {
		*self.actual_addr.read()
	}

	pub fn port(&self) -> Option<u16> {
		self.local_addr().map(|a| a.port())
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	/// Binds the listener and starts serving in the background. Calling it
	/// on a started subsystem is a no-op.
	pub async fn start(&mut self) -> Result<()> {
		if self.shutdown_tx.is_some() {
			return Ok(());
		}

		let addr = self.config.bind_addr.clone();
		let listener = TcpListener::bind(&addr).await.map_err(|e| error!(bind_failed(&addr, e)))?;

		let actual_addr = listener.local_addr().map_err(|e| error!(address_unavailable(e)))?;
		*self.actual_addr.write() = Some(actual_addr);
		tracing::info!("HTTP server bound to {}", actual_addr);

		let (shutdown_tx, shutdown_rx) = oneshot::channel();
		let (complete_tx, complete_rx) = oneshot::channel();

		let app = router(self.state.clone(), &self.config);
		let running = self.running.clone();
		running.store(true, Ordering::SeqCst);

		tokio::spawn(async move {
			let server = axum::serve(listener, app).with_graceful_shutdown(async {
				shutdown_rx.await.ok();
				tracing::info!("HTTP server received shutdown signal");
			});

			if let Err(e) = server.await {
				tracing::error!("HTTP server error: {}", e);
			}

			running.store(false, Ordering::SeqCst);
			let _ = complete_tx.send(());
			tracing::info!("HTTP server stopped");
		});

		self.shutdown_tx = Some(shutdown_tx);
		self.shutdown_complete_rx = Some(complete_rx);
		Ok(())
	}

	/// Stops accepting connections and waits for in-flight requests.
	pub async fn shutdown(&mut self) {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(());
		}
		if let Some(rx) = self.shutdown_complete_rx.take() {
			let _ = rx.await;
		}
	}
}
