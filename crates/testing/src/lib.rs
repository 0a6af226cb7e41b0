// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Helpers shared by the workspace's tests.

pub mod fixture;
pub mod tempdir;
