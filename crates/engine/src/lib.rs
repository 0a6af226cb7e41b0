// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Use cases of the Kondate API, independent of transport and storage.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod engine;
pub mod request;
pub mod validate;

pub use config::EngineConfig;
pub use engine::{Engine, EngineInner};
pub use kondate_type::Result;
