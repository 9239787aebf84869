// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::markup::Element;
use crate::model::EntryCollection;

pub const NAV_BUTTON_CLASS: &str = "nav-btn";
pub const ACTIVE_CLASS: &str = "active";

/// Builds one selectable control per entry, in collection order.
///
/// Controls are built inactive. Marking one active is the page's job.
pub fn build_nav(entries: &EntryCollection) -> Vec<Element> {
    entries
        .iter()
        .map(|entry| {
            Element::new("button")
                .with_class(NAV_BUTTON_CLASS)
                .with_attr("data-id", entry.id().as_str())
                .with_text(entry.term())
        })
        .collect()
}
