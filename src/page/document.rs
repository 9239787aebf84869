// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::error::MissingElementError;
use crate::render::labels::LOADING_TEXT;
use crate::render::Element;

/// Elements the page expects to find in its shell before rendering anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPoint {
    Loading,
    ErrorMessage,
    Nav,
    Comics,
}

impl MountPoint {
    pub const ALL: [MountPoint; 4] = [
        MountPoint::Loading,
        MountPoint::ErrorMessage,
        MountPoint::Nav,
        MountPoint::Comics,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::ErrorMessage => "error-msg",
            Self::Nav => "term-nav",
            Self::Comics => "comics-container",
        }
    }
}

/// The live document: a shell with mount points that the page fills in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// The standard shell: nav index in the header, then loading indicator, hidden error
    /// message and the comics container.
    pub fn new() -> Self {
        let body = Element::new("body")
            .with_child(
                Element::new("header").with_class("site-header").with_child(
                    Element::new("nav")
                        .with_id(MountPoint::Nav.id())
                        .with_class("term-nav"),
                ),
            )
            .with_child(
                Element::new("main")
                    .with_child(
                        Element::new("div")
                            .with_id(MountPoint::Loading.id())
                            .with_class("loading")
                            .with_text(LOADING_TEXT),
                    )
                    .with_child(
                        Element::new("p")
                            .with_id(MountPoint::ErrorMessage.id())
                            .with_class("error-msg")
                            .with_hidden(true),
                    )
                    .with_child(
                        Element::new("div")
                            .with_id(MountPoint::Comics.id())
                            .with_class("comics-container"),
                    ),
            );
        Self { body }
    }

    /// Wraps a custom shell. Mount points are checked when the page loads.
    pub fn from_body(body: Element) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn mount(&self, mount: MountPoint) -> Result<&Element, MissingElementError> {
        self.body.find_by_id(mount.id()).ok_or_else(|| missing(mount))
    }

    pub fn mount_mut(&mut self, mount: MountPoint) -> Result<&mut Element, MissingElementError> {
        self.body
            .find_by_id_mut(mount.id())
            .ok_or_else(|| missing(mount))
    }

    pub fn require_mounts(&self) -> Result<(), MissingElementError> {
        for mount in MountPoint::ALL {
            self.mount(mount)?;
        }
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.body.find_by_id(MountPoint::Loading.id()).is_some()
    }

    /// Detaches the loading indicator. Returns `false` when it was already gone.
    pub fn remove_loading(&mut self) -> bool {
        self.body.remove_by_id(MountPoint::Loading.id()).is_some()
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> Result<(), MissingElementError> {
        let element = self.mount_mut(MountPoint::ErrorMessage)?;
        element.set_text(message);
        element.set_hidden(false);
        Ok(())
    }

    /// The visible error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.mount(MountPoint::ErrorMessage)
            .ok()
            .filter(|element| !element.is_hidden())
            .map(Element::text_content)
    }

    pub fn nav_controls(&self) -> impl Iterator<Item = &Element> {
        self.mount(MountPoint::Nav)
            .into_iter()
            .flat_map(|mount| mount.child_elements())
    }

    pub fn cards(&self) -> impl Iterator<Item = &Element> {
        self.mount(MountPoint::Comics)
            .into_iter()
            .flat_map(|mount| mount.child_elements())
    }

    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}

fn missing(mount: MountPoint) -> MissingElementError {
    MissingElementError {
        id: mount.id().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, MountPoint};
    use crate::error::MissingElementError;
    use crate::render::Element;

    #[test]
    fn default_shell_has_every_mount_point() {
        let document = Document::new();
        document.require_mounts().unwrap();
        assert!(document.is_loading());
        assert_eq!(document.error_message(), None);
        assert_eq!(document.nav_controls().count(), 0);
        assert_eq!(document.cards().count(), 0);
    }

    #[test]
    fn custom_shell_without_nav_is_rejected() {
        let document = Document::from_body(
            Element::new("body")
                .with_child(Element::new("div").with_id("loading"))
                .with_child(Element::new("p").with_id("error-msg"))
                .with_child(Element::new("div").with_id("comics-container")),
        );
        assert_eq!(
            document.require_mounts(),
            Err(MissingElementError {
                id: "term-nav".to_owned()
            })
        );
        assert!(document.mount(MountPoint::Comics).is_ok());
    }

    #[test]
    fn removing_loading_is_idempotent() {
        let mut document = Document::new();
        assert!(document.remove_loading());
        assert!(!document.remove_loading());
        assert!(!document.is_loading());
    }

    #[test]
    fn show_error_unhides_the_message() {
        let mut document = Document::new();
        document.show_error("boom").unwrap();
        assert_eq!(document.error_message().as_deref(), Some("boom"));
        assert!(document.to_html().contains(r#"<p id="error-msg" class="error-msg">boom</p>"#));
    }
}
