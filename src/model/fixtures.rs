// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Entry, EntryCollection, EntryId, Panel, Source};

pub(crate) fn id(value: &str) -> EntryId {
    EntryId::new(value).expect("entry id")
}

/// The single-entry document used throughout the page tests.
pub(crate) fn cache_entry() -> Entry {
    Entry::new(id("cache"), "キャッシュ")
        .with_description("よく使うデータを手元に置いておく仕組み。")
        .with_panels(vec![
            Panel::new().with_caption("a"),
            Panel::new().with_image("x.png").with_caption("b"),
        ])
}

pub(crate) fn sourced_entry() -> Entry {
    Entry::new(id("cdn"), "CDN")
        .with_full_name("Content Delivery Network")
        .with_description("利用者の近くから配信する。")
        .with_panels(vec![
            Panel::new().with_caption("遠い"),
            Panel::new().with_caption("近い"),
            Panel::new(),
            Panel::new().with_caption("速い"),
        ])
        .with_data_as_of("2025-01")
        .with_sources(vec![
            Source::new("RFC 3466").with_note("A Model for CDI"),
            Source::new("社内資料"),
        ])
}

pub(crate) fn three_entries() -> EntryCollection {
    EntryCollection::new(vec![
        cache_entry(),
        sourced_entry(),
        Entry::new(id("dns"), "DNS").with_description("名前解決。"),
    ])
    .expect("unique ids")
}
