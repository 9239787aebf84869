// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visibility observation against the focal band.
//!
//! The synchronizer never polls. The host reports a [`ViewportSnapshot`] whenever the viewport
//! moves or the layout changes, and the synchronizer answers with the cards whose intersection
//! state changed.

use serde::Deserialize;
use thiserror::Error;
use tracing::trace;

/// Fractions of the viewport height ignored at the top and bottom when deciding which card is
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocalBand {
    pub top_inset: f64,
    pub bottom_inset: f64,
}

impl Default for FocalBand {
    fn default() -> Self {
        Self {
            top_inset: 0.30,
            bottom_inset: 0.60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("focal band insets must be within [0, 1) and leave a non-empty band (top {top}, bottom {bottom})")]
pub struct InvalidFocalBand {
    pub top: f64,
    pub bottom: f64,
}

impl FocalBand {
    pub fn validate(&self) -> Result<(), InvalidFocalBand> {
        let in_range = |v: f64| (0.0..1.0).contains(&v);
        if in_range(self.top_inset)
            && in_range(self.bottom_inset)
            && self.top_inset + self.bottom_inset < 1.0
        {
            Ok(())
        } else {
            Err(InvalidFocalBand {
                top: self.top_inset,
                bottom: self.bottom_inset,
            })
        }
    }

    /// Document-space `(top, bottom)` of the band for `viewport`.
    pub fn region(&self, viewport: Viewport) -> (f64, f64) {
        let top = viewport.top + viewport.height * self.top_inset;
        let bottom = viewport.top + viewport.height * (1.0 - self.bottom_inset);
        (top, bottom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub top: f64,
    pub height: f64,
}

/// Vertical extent of one card in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    fn overlaps(&self, (band_top, band_bottom): (f64, f64)) -> bool {
        self.height > 0.0 && self.top < band_bottom && self.top + self.height > band_top
    }
}

/// Viewport position plus the extent of every observed card, indexed by entry position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportSnapshot {
    pub viewport: Viewport,
    pub cards: Vec<Extent>,
}

/// One visibility-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub target: usize,
    pub intersecting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    band: FocalBand,
    // `None` until the first snapshot after `observe`.
    states: Vec<Option<bool>>,
    connected: bool,
}

impl ScrollSync {
    pub fn new(band: FocalBand) -> Self {
        Self {
            band,
            states: Vec::new(),
            connected: false,
        }
    }

    pub fn band(&self) -> FocalBand {
        self.band
    }

    /// Starts observing `count` cards. The next snapshot notifies every card once.
    pub fn observe(&mut self, count: usize) {
        self.states = vec![None; count];
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        self.states.clear();
        self.connected = false;
    }

    pub fn is_observing(&self) -> bool {
        self.connected
    }

    /// Notifications for every observed card whose intersection with the focal band changed,
    /// in document order.
    pub fn on_snapshot(&mut self, snapshot: &ViewportSnapshot) -> Vec<Visibility> {
        if !self.connected || snapshot.viewport.height <= 0.0 {
            return Vec::new();
        }

        let region = self.band.region(snapshot.viewport);
        let mut changes = Vec::new();
        for (target, state) in self.states.iter_mut().enumerate() {
            let Some(extent) = snapshot.cards.get(target) else {
                continue;
            };
            let intersecting = extent.overlaps(region);
            if *state != Some(intersecting) {
                *state = Some(intersecting);
                changes.push(Visibility {
                    target,
                    intersecting,
                });
            }
        }

        trace!(?region, changes = changes.len(), "focal band evaluated");
        changes
    }
}
