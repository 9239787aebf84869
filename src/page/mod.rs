// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The rendering and navigation-synchronization engine.
//!
//! A [`Page`] owns the live [`Document`] together with everything derived from it: the anchor
//! index, the active marker, the scroll synchronizer and the per-panel image states. It is built
//! by [`load_page`] and afterwards changes only through [`Page::handle`], one [`PageEvent`] at a
//! time.

use tracing::{debug, warn};

pub mod active;
pub mod anchors;
pub mod deep_link;
pub mod document;
pub mod events;
pub mod images;
mod orchestrator;
pub mod scroll;
#[cfg(test)]
mod tests;

pub use active::ActiveMarker;
pub use anchors::AnchorIndex;
pub use deep_link::Fragment;
pub use document::{Document, MountPoint};
pub use events::{event_channel, EventReceiver, EventSender, PageEffect, PageEvent};
pub use images::{
    FetchImageSource, ImageLoader, ImageSlots, ImageSource, LoadedImage, PanelImage, PanelKey,
};
pub use orchestrator::{load_page, PageContext};
pub use scroll::{Extent, FocalBand, ScrollSync, Viewport, ViewportSnapshot};

use crate::error::MissingElementError;
use crate::model::EntryId;
use crate::render::card::PANELS_GRID_CLASS;
use crate::render::panel::{panel_image, IMAGE_WRAP_CLASS};
use crate::render::{Card, Element, Node};
use images::Settled;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug)]
pub struct Page {
    document: Document,
    status: PageStatus,
    anchors: AnchorIndex,
    marker: ActiveMarker,
    scroll: ScrollSync,
    images: ImageSlots,
}

impl Page {
    pub(crate) fn new(document: Document, band: FocalBand) -> Self {
        Self {
            document,
            status: PageStatus::Loading,
            anchors: AnchorIndex::new(),
            marker: ActiveMarker::new(),
            scroll: ScrollSync::new(band),
            images: ImageSlots::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn anchors(&self) -> &AnchorIndex {
        &self.anchors
    }

    pub fn scroll(&self) -> &ScrollSync {
        &self.scroll
    }

    pub fn images(&self) -> &ImageSlots {
        &self.images
    }

    pub fn image(&self, key: PanelKey) -> Option<&PanelImage> {
        self.images.get(key)
    }

    /// Entry position whose control is currently active.
    pub fn active_position(&self) -> Option<usize> {
        let control = self.marker.current()?;
        (0..self.anchors.len()).find(|&position| self.anchors.control(position) == Some(control))
    }

    pub fn active_id(&self) -> Option<&EntryId> {
        self.active_position()
            .and_then(|position| self.anchors.id(position))
    }

    /// The rendered card for an entry position.
    pub fn card(&self, position: usize) -> Option<&Element> {
        let index = self.anchors.card(position)?;
        self.document.mount(MountPoint::Comics).ok()?.child_element(index)
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<PageEffect> {
        match event {
            PageEvent::NavActivated(id) => self.on_nav_activated(&id),
            PageEvent::Viewport(snapshot) => {
                for change in self.scroll.on_snapshot(&snapshot) {
                    if change.intersecting {
                        debug!(target = change.target, "card entered focal band");
                        self.activate(change.target);
                    }
                }
                Vec::new()
            }
            PageEvent::ImageSettled { key, outcome } => {
                self.on_image_settled(key, outcome);
                Vec::new()
            }
            PageEvent::DeepLinkSettled(id) => self.on_deep_link_settled(&id),
        }
    }

    /// Stops visibility observation. Called once when the host tears the page down.
    pub fn teardown(&mut self) {
        self.scroll.disconnect();
    }

    fn on_nav_activated(&mut self, id: &EntryId) -> Vec<PageEffect> {
        let Some(position) = self.anchors.position(id.as_str()) else {
            debug!(%id, "activation for unknown entry");
            return Vec::new();
        };
        self.activate(position);
        vec![PageEffect::ScrollIntoView { card: position }]
    }

    fn on_deep_link_settled(&mut self, id: &EntryId) -> Vec<PageEffect> {
        let Some(position) = self.anchors.position(id.as_str()) else {
            return Vec::new();
        };
        debug!(%id, "deep link settled");
        self.activate(position);
        vec![PageEffect::ScrollIntoView { card: position }]
    }

    /// The one path to the active marker, shared by activation, scroll and deep link.
    fn activate(&mut self, position: usize) -> bool {
        let Some(control) = self.anchors.control(position) else {
            return false;
        };
        match self.document.mount_mut(MountPoint::Nav) {
            Ok(nav) => self.marker.set_active(nav, control),
            Err(_) => false,
        }
    }

    fn on_image_settled(
        &mut self,
        key: PanelKey,
        outcome: Result<LoadedImage, crate::error::ResourceLoadError>,
    ) {
        match self.images.settle(key, outcome) {
            Settled::Swapped(image) => {
                let Some(wrap) = self.panel_image_wrap_mut(key) else {
                    warn!(?key, "loaded image has no panel to attach to");
                    return;
                };
                wrap.replace_children(vec![Node::Element(panel_image(
                    image.location(),
                    key.ordinal(),
                ))]);
                debug!(
                    ?key,
                    location = image.location(),
                    media_type = image.media_type(),
                    bytes = image.byte_len(),
                    "image swapped in"
                );
            }
            Settled::Retained(err) => {
                warn!(?key, error = %err, "image unavailable, keeping placeholder");
            }
            Settled::Ignored => debug!(?key, "ignoring outcome for settled panel"),
        }
    }

    fn panel_image_wrap_mut(&mut self, key: PanelKey) -> Option<&mut Element> {
        let index = self.anchors.card(key.card)?;
        self.document
            .mount_mut(MountPoint::Comics)
            .ok()?
            .child_element_mut(index)?
            .find_by_class_mut(PANELS_GRID_CLASS)?
            .child_element_mut(key.panel)?
            .find_by_class_mut(IMAGE_WRAP_CLASS)
    }

    /// Appends the nav controls, recording their element indices.
    fn attach_nav(&mut self, controls: Vec<Element>) -> Result<Vec<usize>, MissingElementError> {
        let nav = self.document.mount_mut(MountPoint::Nav)?;
        let offset = nav.child_elements().count();
        let count = controls.len();
        for control in controls {
            nav.push(control);
        }
        Ok((offset..offset + count).collect())
    }

    /// Appends a card and plans its panel images. Returns the keys that need acquisition.
    fn attach_card(
        &mut self,
        card: Card,
        control: usize,
    ) -> Result<Vec<(PanelKey, String)>, MissingElementError> {
        let (id, element, panel_images) = card.into_parts();
        let comics = self.document.mount_mut(MountPoint::Comics)?;
        let index = comics.child_elements().count();
        comics.push(element);

        let position = self.anchors.push(id, index, control);
        let mut pending = Vec::new();
        for (panel, location) in panel_images.into_iter().enumerate() {
            let key = PanelKey::new(position, panel);
            if let Some(location) = &location {
                pending.push((key, location.clone()));
            }
            self.images.insert(key, PanelImage::planned(location));
        }
        Ok(pending)
    }
}
