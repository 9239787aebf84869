// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Progressive panel images.
//!
//! Every panel owns a [`PanelImage`] state machine:
//!
//! ```text
//! NoImage                       (terminal, placeholder forever)
//! Loading ──ok──▶ Loaded        (placeholder swapped for the image)
//!         └─err─▶ Failed        (placeholder kept)
//! ```
//!
//! Acquisition is a single fire-and-forget task per panel. There is no retry and no
//! cancellation; an outcome that arrives for a panel that is not `Loading` is ignored.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use memchr::memmem;
use tracing::debug;

use super::events::{EventSender, PageEvent};
use crate::error::{ResourceLoadError, TransportError};
use crate::fetch::{Fetcher, PageBase};

/// Address of one panel: entry position and 0-based panel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelKey {
    pub card: usize,
    pub panel: usize,
}

impl PanelKey {
    pub fn new(card: usize, panel: usize) -> Self {
        Self { card, panel }
    }

    /// 1-based display ordinal.
    pub fn ordinal(&self) -> usize {
        self.panel + 1
    }
}

/// An acquired image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    location: String,
    media_type: &'static str,
    byte_len: usize,
}

impl LoadedImage {
    pub fn new(location: impl Into<String>, media_type: &'static str, byte_len: usize) -> Self {
        Self {
            location: location.into(),
            media_type,
            byte_len,
        }
    }

    /// The location as written in the entry, used verbatim as the image source.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelImage {
    NoImage,
    Loading { location: String },
    Loaded(LoadedImage),
    Failed(ResourceLoadError),
}

/// What settling an outcome did to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// The placeholder must be replaced by this image.
    Swapped(LoadedImage),
    /// Acquisition failed; the placeholder stays.
    Retained(ResourceLoadError),
    /// The panel was not waiting for an image.
    Ignored,
}

impl PanelImage {
    /// Initial state for a panel with or without an image location.
    pub fn planned(location: Option<String>) -> Self {
        match location {
            Some(location) => Self::Loading { location },
            None => Self::NoImage,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading { .. })
    }

    pub fn settle(&mut self, outcome: Result<LoadedImage, ResourceLoadError>) -> Settled {
        if self.is_terminal() {
            return Settled::Ignored;
        }
        match outcome {
            Ok(image) => {
                *self = Self::Loaded(image.clone());
                Settled::Swapped(image)
            }
            Err(err) => {
                *self = Self::Failed(err.clone());
                Settled::Retained(err)
            }
        }
    }
}

/// Per-panel image states for the whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlots {
    slots: BTreeMap<PanelKey, PanelImage>,
}

impl ImageSlots {
    pub fn insert(&mut self, key: PanelKey, state: PanelImage) {
        self.slots.insert(key, state);
    }

    pub fn get(&self, key: PanelKey) -> Option<&PanelImage> {
        self.slots.get(&key)
    }

    pub fn settle(
        &mut self,
        key: PanelKey,
        outcome: Result<LoadedImage, ResourceLoadError>,
    ) -> Settled {
        match self.slots.get_mut(&key) {
            Some(state) => state.settle(outcome),
            None => Settled::Ignored,
        }
    }

    pub fn pending(&self) -> usize {
        self.slots.values().filter(|state| !state.is_terminal()).count()
    }
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn acquire(&self, location: &str) -> Result<LoadedImage, ResourceLoadError>;
}

/// Acquires images through a [`Fetcher`], resolving locations against the page base.
#[derive(Debug, Clone)]
pub struct FetchImageSource<F> {
    base: PageBase,
    fetcher: F,
}

impl<F> FetchImageSource<F> {
    pub fn new(base: PageBase, fetcher: F) -> Self {
        Self { base, fetcher }
    }
}

#[async_trait]
impl<F: Fetcher> ImageSource for FetchImageSource<F> {
    async fn acquire(&self, location: &str) -> Result<LoadedImage, ResourceLoadError> {
        let resolved = self
            .base
            .resolve(location)
            .map_err(|err| ResourceLoadError::Transport {
                location: location.to_owned(),
                message: err.to_string(),
            })?;

        let bytes = self
            .fetcher
            .fetch_bytes(&resolved)
            .await
            .map_err(|err| match err {
                TransportError::Status { status } => ResourceLoadError::Status {
                    location: location.to_owned(),
                    status,
                },
                other => ResourceLoadError::Transport {
                    location: location.to_owned(),
                    message: other.to_string(),
                },
            })?;

        let media_type = sniff_media_type(&bytes).ok_or_else(|| ResourceLoadError::Undecodable {
            location: location.to_owned(),
        })?;
        Ok(LoadedImage::new(location, media_type, bytes.len()))
    }
}

/// Media type from a known image signature.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    if bytes.starts_with(PNG) {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"BM") {
        return Some("image/bmp");
    }

    let head = &bytes[..bytes.len().min(1024)];
    let text = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let text = &text[text.iter().take_while(|b| b.is_ascii_whitespace()).count()..];
    if text.starts_with(b"<") && memmem::find(text, b"<svg").is_some() {
        return Some("image/svg+xml");
    }
    None
}

/// Spawns one acquisition task per panel and reports outcomes as [`PageEvent::ImageSettled`].
#[derive(Clone)]
pub struct ImageLoader {
    source: Arc<dyn ImageSource>,
    events: EventSender,
}

impl ImageLoader {
    pub fn new(source: Arc<dyn ImageSource>, events: EventSender) -> Self {
        Self { source, events }
    }

    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, key: PanelKey, location: String) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = source.acquire(&location).await;
            if events
                .send(PageEvent::ImageSettled { key, outcome })
                .is_err()
            {
                debug!(?key, "page closed before image settled");
            }
        });
    }
}
