// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Yonkoma: illustrated four-panel glossary comics.
//!
//! The crate renders a glossary document into a DOM-like page and keeps its navigation index in
//! sync with what the reader is looking at. [`page`] is host-agnostic; [`tui`] hosts it in a
//! terminal.

pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod page;
pub mod render;
pub mod tui;
