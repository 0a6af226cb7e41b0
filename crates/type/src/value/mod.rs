// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

pub mod date;
pub mod id;

pub use date::Date;
pub use id::{DishId, MenuId};
