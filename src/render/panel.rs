// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::labels::{panel_name, placeholder_text, PLACEHOLDER_ICON};
use super::markup::{Element, Node};
use crate::model::Panel;

pub const PANEL_CLASS: &str = "panel";
pub const IMAGE_WRAP_CLASS: &str = "panel-image-wrap";

/// Builds one grid cell. The image wrap always starts out holding the placeholder; swapping in
/// the image is the image loader's job.
pub fn build_panel(panel: &Panel, ordinal: usize) -> Element {
    Element::new("div")
        .with_class(PANEL_CLASS)
        .with_child(
            Element::new("span")
                .with_class("panel-number")
                .with_child(Node::Number(ordinal)),
        )
        .with_child(
            Element::new("div")
                .with_class(IMAGE_WRAP_CLASS)
                .with_child(placeholder(ordinal)),
        )
        .with_child(
            Element::new("div")
                .with_class("panel-caption")
                .with_text(panel.caption().unwrap_or_default()),
        )
}

pub fn placeholder(ordinal: usize) -> Element {
    Element::new("div")
        .with_class("placeholder")
        .with_child(
            Element::new("span")
                .with_class("placeholder-icon")
                .with_text(PLACEHOLDER_ICON),
        )
        .with_child(
            Element::new("span")
                .with_class("placeholder-text")
                .with_text(placeholder_text(ordinal)),
        )
}

/// The element that replaces the placeholder once the image is acquired.
pub fn panel_image(location: &str, ordinal: usize) -> Element {
    Element::new("img")
        .with_attr("alt", panel_name(ordinal))
        .with_attr("loading", "lazy")
        .with_attr("src", location)
}
