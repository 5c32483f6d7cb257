// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: photo loading, image export and design sheets.

pub mod export;
pub mod media;
pub mod serialization;
