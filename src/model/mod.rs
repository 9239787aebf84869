// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A load produces one [`EntryCollection`]; entries own their panels and sources and never refer
//! to each other.

mod collection;
mod entry;
#[cfg(test)]
pub(crate) mod fixtures;
mod ids;

pub use collection::EntryCollection;
pub use entry::{Entry, Panel, Source};
pub use ids::{EntryId, IdError, ANCHOR_PREFIX};
