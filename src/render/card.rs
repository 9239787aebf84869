// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::labels::{AS_OF_PREFIX, DESCRIPTION_LABEL, SOURCES_TITLE};
use super::markup::Element;
use super::panel::build_panel;
use crate::model::{Entry, EntryId, Source};

pub const CARD_CLASS: &str = "comic-card";
pub const PANELS_GRID_CLASS: &str = "panels-grid";
pub const SOURCES_CLASS: &str = "comic-sources";

/// A detached card plus the image location of each of its panels, in panel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: EntryId,
    element: Element,
    panel_images: Vec<Option<String>>,
}

impl Card {
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn panel_images(&self) -> &[Option<String>] {
        &self.panel_images
    }

    pub fn into_parts(self) -> (EntryId, Element, Vec<Option<String>>) {
        (self.id, self.element, self.panel_images)
    }
}

/// Maps one entry to its card: header, panel grid, description and, when the entry cites
/// anything, a sources block.
pub fn build_card(entry: &Entry, card_label: &str) -> Card {
    let mut element = Element::new("article")
        .with_class(CARD_CLASS)
        .with_id(entry.id().anchor())
        .with_child(build_header(entry, card_label))
        .with_child(build_grid(entry))
        .with_child(
            Element::new("div")
                .with_class("comic-description")
                .with_child(
                    Element::new("div")
                        .with_class("desc-label")
                        .with_text(DESCRIPTION_LABEL),
                )
                .with_child(Element::new("p").with_text(entry.description())),
        );

    if !entry.sources().is_empty() {
        element.push(build_sources(entry.data_as_of(), entry.sources()));
    }

    Card {
        id: entry.id().clone(),
        element,
        panel_images: entry
            .panels()
            .iter()
            .map(|panel| panel.image().map(str::to_owned))
            .collect(),
    }
}

fn build_header(entry: &Entry, card_label: &str) -> Element {
    let mut title_group = Element::new("div").with_class("term-title-group");
    if let Some(full_name) = entry.full_name() {
        title_group.push(
            Element::new("span")
                .with_class("term-fullname")
                .with_text(full_name),
        );
    }
    title_group.push(Element::new("h2").with_text(card_label));

    Element::new("div")
        .with_class("comic-header")
        .with_child(
            Element::new("span")
                .with_class("term-badge")
                .with_text(entry.term()),
        )
        .with_child(title_group)
}

fn build_grid(entry: &Entry) -> Element {
    let mut grid = Element::new("div").with_class(PANELS_GRID_CLASS);
    for (i, panel) in entry.panels().iter().enumerate() {
        grid.push(build_panel(panel, i + 1));
    }
    grid
}

fn build_sources(data_as_of: Option<&str>, sources: &[Source]) -> Element {
    let mut header = Element::new("div").with_class("sources-header").with_child(
        Element::new("span")
            .with_class("sources-title")
            .with_text(SOURCES_TITLE),
    );
    if let Some(date) = data_as_of {
        header.push(
            Element::new("span")
                .with_class("sources-date")
                .with_text(format!("{AS_OF_PREFIX}{date}")),
        );
    }

    let mut list = Element::new("ul").with_class("sources-list");
    for source in sources {
        let mut item = Element::new("li").with_class("source-item").with_child(
            Element::new("span")
                .with_class("source-label")
                .with_text(source.label()),
        );
        if let Some(note) = source.note() {
            item.push(Element::new("span").with_class("source-note").with_text(note));
        }
        list.push(item);
    }

    Element::new("div")
        .with_class(SOURCES_CLASS)
        .with_child(header)
        .with_child(list)
}

#[cfg(test)]
mod tests {
    use super::{build_card, PANELS_GRID_CLASS, SOURCES_CLASS};
    use crate::model::fixtures::{cache_entry, id, sourced_entry};
    use crate::model::{Entry, Source};
    use crate::render::labels::DEFAULT_CARD_LABEL;

    #[test]
    fn card_carries_anchor_and_header() {
        let card = build_card(&sourced_entry(), DEFAULT_CARD_LABEL);
        let element = card.element();

        assert_eq!(element.id(), Some("comic-cdn"));
        assert_eq!(element.find_by_class("term-badge").unwrap().text_content(), "CDN");
        assert_eq!(
            element.find_by_class("term-fullname").unwrap().text_content(),
            "Content Delivery Network"
        );
        let title = element.find(&|e| e.tag() == "h2").unwrap();
        assert_eq!(title.text_content(), "四コマ");
    }

    #[test]
    fn full_name_is_omitted_when_absent() {
        let card = build_card(&cache_entry(), "label");
        assert!(card.element().find_by_class("term-fullname").is_none());
        let title = card.element().find(&|e| e.tag() == "h2").unwrap();
        assert_eq!(title.text_content(), "label");
    }

    #[test]
    fn grid_preserves_panel_order_and_ordinals() {
        let card = build_card(&sourced_entry(), DEFAULT_CARD_LABEL);
        let grid = card.element().find_by_class(PANELS_GRID_CLASS).unwrap();
        let numbers: Vec<String> = grid
            .child_elements()
            .map(|panel| panel.find_by_class("panel-number").unwrap().text_content())
            .collect();
        assert_eq!(numbers, ["1", "2", "3", "4"]);

        let captions: Vec<String> = grid
            .child_elements()
            .map(|panel| panel.find_by_class("panel-caption").unwrap().text_content())
            .collect();
        assert_eq!(captions, ["遠い", "近い", "", "速い"]);
    }

    #[test]
    fn panel_image_plan_follows_panels() {
        let card = build_card(&cache_entry(), DEFAULT_CARD_LABEL);
        assert_eq!(card.panel_images(), [None, Some("x.png".to_owned())]);
    }

    #[test]
    fn sources_block_lists_labels_notes_and_date() {
        let card = build_card(&sourced_entry(), DEFAULT_CARD_LABEL);
        let sources = card.element().find_by_class(SOURCES_CLASS).unwrap();
        assert_eq!(
            sources.find_by_class("sources-date").unwrap().text_content(),
            "情報時点: 2025-01"
        );
        assert_eq!(sources.count_class("source-item"), 2);
        assert_eq!(sources.count_class("source-note"), 1);
    }

    #[test]
    fn sources_block_is_omitted_for_empty_sources() {
        let entry = Entry::new(id("x"), "X").with_sources(Vec::new());
        let html = build_card(&entry, DEFAULT_CARD_LABEL).element().to_html();
        assert!(!html.contains("comic-sources"));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn date_is_omitted_when_absent() {
        let entry = Entry::new(id("x"), "X").with_sources(vec![Source::new("s")]);
        let card = build_card(&entry, DEFAULT_CARD_LABEL);
        assert!(card.element().find_by_class(SOURCES_CLASS).is_some());
        assert!(card.element().find_by_class("sources-date").is_none());
    }

    #[test]
    fn missing_description_and_panels_degrade_to_empty_output() {
        let card = build_card(&Entry::new(id("x"), "X"), DEFAULT_CARD_LABEL);
        let grid = card.element().find_by_class(PANELS_GRID_CLASS).unwrap();
        assert!(grid.children().is_empty());
        let description = card.element().find(&|e| e.tag() == "p").unwrap();
        assert_eq!(description.text_content(), "");
    }

    #[test]
    fn free_text_is_escaped_in_markup() {
        let entry = Entry::new(id("x"), "<T>")
            .with_full_name("A & B")
            .with_description("\"quoted\"")
            .with_sources(vec![Source::new("<l>").with_note("n&")]);
        let html = build_card(&entry, "<label>").element().to_html();
        assert!(html.contains("&lt;T&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(html.contains("&lt;label&gt;"));
        assert!(html.contains("&lt;l&gt;"));
        assert!(html.contains("n&amp;"));
        assert!(!html.contains("<T>"));
    }
}
