// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Structured logging setup for Kondate processes.

pub mod builder;
pub mod factory;

pub use builder::{Format, TracingBuilder, TracingError};
pub use factory::{TracingConfigurator, TracingFactory};
