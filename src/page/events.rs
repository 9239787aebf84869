// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tokio::sync::mpsc;

use super::images::{LoadedImage, PanelKey};
use super::scroll::ViewportSnapshot;
use crate::error::ResourceLoadError;
use crate::model::EntryId;

/// Everything that can change the page after it has loaded.
///
/// Events are handled one at a time by [`super::Page::handle`]; background work (image
/// acquisition, the deep-link timer) reaches the page only through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A navigation control was activated (click, key).
    NavActivated(EntryId),
    /// The viewport moved or the layout changed.
    Viewport(ViewportSnapshot),
    ImageSettled {
        key: PanelKey,
        outcome: Result<LoadedImage, ResourceLoadError>,
    },
    /// The post-load settle delay for a deep link elapsed.
    DeepLinkSettled(EntryId),
}

/// Work the host has to carry out on the page's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEffect {
    /// Smoothly bring the card at this entry position into the focal band.
    ScrollIntoView { card: usize },
}

pub type EventSender = mpsc::UnboundedSender<PageEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PageEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
