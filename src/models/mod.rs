// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor data model.

pub mod annotation;
pub mod editor;
pub mod palette;
pub mod sticker;
pub mod tag;
