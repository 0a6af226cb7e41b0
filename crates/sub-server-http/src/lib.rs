// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! HTTP surface of the Kondate API.
//!
//! An axum server over [`kondate_engine::Engine`]. Reads are public; writes
//! require `X-Api-Key` when a key is configured.
//!
//! # Endpoints
//!
//! - `GET /health`
//! - `GET|POST /v1/menus`, `GET /v1/menus/{id}`
//! - `GET|POST /v1/menus/{id}/dishes`
//! - `GET /v1/dishes`, `GET /v1/dishes/{id}`
//! - `GET|PUT /v1/dishes/{id}/allergens`
//! - `GET|POST /v1/allergens`
//! - `GET|POST /v1/cities`, `GET /v1/cities/{code}`
//!
//! Errors are `{"code": "...", "error": "..."}` with the status derived from
//! the error kind.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod subsystem;

pub use config::HttpConfig;
pub use error::{AppError, AuthError, ErrorResponse};
pub use routes::router;
pub use state::AppState;
pub use subsystem::HttpSubsystem;
