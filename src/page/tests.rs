// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rstest::{fixture, rstest};

use super::{
    event_channel, load_page, Document, EventReceiver, Extent, FocalBand, Fragment, LoadedImage,
    Page, PageContext, PageEffect, PageEvent, PageStatus, PanelImage, PanelKey, Viewport,
    ViewportSnapshot,
};
use super::orchestrator::deliver_deep_link;
use crate::error::{ResourceLoadError, TransportError};
use crate::fetch::{Fetcher, PageBase, ResolvedLocation};
use crate::model::fixtures::id;
use crate::page::images::ImageSource;
use crate::render::nav::ACTIVE_CLASS;
use crate::render::Element;

const THREE: &str = r#"[
  {"id": "cache", "term": "キャッシュ", "description": "...", "panels": [{"caption": "a"}, {"image": "x.png", "caption": "b"}]},
  {"id": "cdn", "term": "CDN", "description": "...", "sources": [{"label": "RFC"}]},
  {"id": "dns", "term": "DNS", "description": "...", "sources": []}
]"#;

enum Reply {
    Body(&'static str),
    Status(u16),
}

struct StubFetcher {
    reply: Reply,
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch_bytes(&self, _location: &ResolvedLocation) -> Result<Vec<u8>, TransportError> {
        match self.reply {
            Reply::Body(body) => Ok(body.as_bytes().to_vec()),
            Reply::Status(status) => Err(TransportError::Status { status }),
        }
    }
}

#[derive(Default)]
struct StubImages {
    available: HashMap<&'static str, usize>,
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageSource for StubImages {
    async fn acquire(&self, location: &str) -> Result<LoadedImage, ResourceLoadError> {
        self.requested.lock().unwrap().push(location.to_owned());
        match self.available.get(location) {
            Some(len) => Ok(LoadedImage::new(location, "image/png", *len)),
            None => Err(ResourceLoadError::Status {
                location: location.to_owned(),
                status: 404,
            }),
        }
    }
}

struct Harness {
    images: Arc<StubImages>,
    events: EventReceiver,
    ctx: PageContext,
}

impl Harness {
    fn new(reply: Reply, available: &[&'static str]) -> Self {
        let images = Arc::new(StubImages {
            available: available.iter().map(|location| (*location, 64)).collect(),
            ..StubImages::default()
        });
        let (tx, rx) = event_channel();
        let ctx = PageContext {
            base: PageBase::default(),
            data_src: "data/comics.json".to_owned(),
            card_label: "四コマ".to_owned(),
            focal_band: FocalBand::default(),
            deep_link_settle: Duration::from_millis(1),
            fragment: None,
            fetcher: Arc::new(StubFetcher { reply }),
            images: images.clone(),
            events: tx,
        };
        Self {
            images,
            events: rx,
            ctx,
        }
    }

    fn with_fragment(mut self, address: &str) -> Self {
        self.ctx.fragment = Fragment::parse(address);
        self
    }

    async fn load(&self) -> Page {
        load_page(Document::new(), &self.ctx).await.expect("mount points")
    }

    /// Waits for the next background event and feeds it to the page.
    async fn pump(&mut self, page: &mut Page) -> Vec<PageEffect> {
        let event = tokio::time::timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("event before timeout")
            .expect("channel open");
        page.handle(event)
    }

    fn requested(&self) -> Vec<String> {
        self.images.requested.lock().unwrap().clone()
    }
}

#[fixture]
fn three() -> Harness {
    Harness::new(Reply::Body(THREE), &["x.png"])
}

fn active_controls(page: &Page) -> Vec<String> {
    page.document()
        .nav_controls()
        .filter(|control| control.has_class(ACTIVE_CLASS))
        .filter_map(|control| control.attr("data-id").map(str::to_owned))
        .collect()
}

// Cards of 20 rows stacked from row 0.
fn snapshot(top: f64, cards: usize) -> PageEvent {
    PageEvent::Viewport(ViewportSnapshot {
        viewport: Viewport { top, height: 40.0 },
        cards: (0..cards)
            .map(|i| Extent {
                top: i as f64 * 20.0,
                height: 20.0,
            })
            .collect(),
    })
}

#[rstest]
#[tokio::test]
async fn renders_one_card_and_control_per_entry(three: Harness) {
    let page = three.load().await;

    assert_eq!(page.status(), PageStatus::Ready);
    assert!(!page.document().is_loading());
    assert_eq!(page.document().error_message(), None);

    let control_ids: Vec<_> = page
        .document()
        .nav_controls()
        .map(|control| control.attr("data-id").unwrap().to_owned())
        .collect();
    let card_ids: Vec<_> = page
        .document()
        .cards()
        .map(|card| card.id().unwrap().to_owned())
        .collect();
    assert_eq!(control_ids, ["cache", "cdn", "dns"]);
    assert_eq!(card_ids, ["comic-cache", "comic-cdn", "comic-dns"]);
}

#[rstest]
#[tokio::test]
async fn exactly_one_control_is_active_after_load(three: Harness) {
    let page = three.load().await;
    assert_eq!(active_controls(&page), ["cache"]);
    assert_eq!(page.active_id().map(|id| id.as_str()), Some("cache"));
}

#[tokio::test]
async fn empty_collection_has_no_active_control() {
    let harness = Harness::new(Reply::Body("[]"), &[]);
    let page = harness.load().await;
    assert_eq!(page.status(), PageStatus::Ready);
    assert!(active_controls(&page).is_empty());
    assert_eq!(page.document().cards().count(), 0);
}

#[tokio::test]
async fn http_failure_shows_one_message_and_nothing_else() {
    let harness = Harness::new(Reply::Status(500), &[]);
    let page = harness.load().await;

    assert_eq!(page.status(), PageStatus::Failed);
    assert!(!page.document().is_loading());
    let message = page.document().error_message().expect("error shown");
    assert!(message.contains("HTTP 500"), "{message}");
    assert!(message.starts_with("データの読み込みに失敗しました: "));
    assert_eq!(page.document().nav_controls().count(), 0);
    assert_eq!(page.document().cards().count(), 0);
}

#[tokio::test]
async fn malformed_document_is_reported_like_a_transport_failure() {
    let harness = Harness::new(Reply::Body(r#"[{"id": "x"}]"#), &[]);
    let page = harness.load().await;

    assert_eq!(page.status(), PageStatus::Failed);
    assert!(page.document().error_message().is_some());
    assert_eq!(page.document().cards().count(), 0);
}

#[tokio::test]
async fn missing_mount_point_is_fatal() {
    let harness = Harness::new(Reply::Body(THREE), &[]);
    let shell = Element::new("body").with_child(Element::new("div").with_id("loading"));
    let err = load_page(Document::from_body(shell), &harness.ctx)
        .await
        .unwrap_err();
    assert_eq!(err.id, "error-msg");
}

#[tokio::test]
async fn image_scenario_swaps_only_the_panel_with_an_image() {
    let mut harness = Harness::new(
        Reply::Body(
            r#"[{"id":"cache","term":"キャッシュ","description":"...","panels":[{"caption":"a"},{"image":"x.png","caption":"b"}]}]"#,
        ),
        &["x.png"],
    );
    let mut page = harness.load().await;

    let first = PanelKey::new(0, 0);
    let second = PanelKey::new(0, 1);
    assert_eq!(page.image(first), Some(&PanelImage::NoImage));
    assert!(matches!(page.image(second), Some(PanelImage::Loading { .. })));
    assert_eq!(page.card(0).unwrap().count_class("placeholder"), 2);

    harness.pump(&mut page).await;

    assert!(matches!(
        page.image(second),
        Some(PanelImage::Loaded(image)) if image.byte_len() == 64
    ));
    assert_eq!(page.image(first), Some(&PanelImage::NoImage));
    assert_eq!(harness.requested(), ["x.png"]);

    let card = page.card(0).unwrap();
    assert_eq!(card.count_class("placeholder"), 1);
    let html = card.to_html();
    assert!(html.contains(r#"<img alt="コマ2" loading="lazy" src="x.png">"#), "{html}");
}

#[tokio::test]
async fn failed_image_keeps_its_placeholder() {
    let mut harness = Harness::new(Reply::Body(THREE), &[]);
    let mut page = harness.load().await;

    let effects = harness.pump(&mut page).await;

    assert!(effects.is_empty());
    assert!(matches!(page.image(PanelKey::new(0, 1)), Some(PanelImage::Failed(_))));
    assert_eq!(page.card(0).unwrap().count_class("placeholder"), 2);
    assert_eq!(page.images().pending(), 0);
}

#[rstest]
#[tokio::test]
async fn late_duplicate_outcomes_are_ignored(three: Harness) {
    let mut harness = three;
    let mut page = harness.load().await;
    harness.pump(&mut page).await;
    let before = page.card(0).unwrap().to_html();

    page.handle(PageEvent::ImageSettled {
        key: PanelKey::new(0, 1),
        outcome: Err(ResourceLoadError::Status {
            location: "x.png".to_owned(),
            status: 500,
        }),
    });

    assert!(matches!(page.image(PanelKey::new(0, 1)), Some(PanelImage::Loaded(_))));
    assert_eq!(page.card(0).unwrap().to_html(), before);
}

#[rstest]
#[tokio::test]
async fn activation_scrolls_and_marks_the_control(three: Harness) {
    let mut page = three.load().await;

    let effects = page.handle(PageEvent::NavActivated(id("dns")));

    assert_eq!(
        effects,
        [PageEffect::ScrollIntoView { card: 2 }]
    );
    assert_eq!(active_controls(&page), ["dns"]);
}

#[rstest]
#[tokio::test]
async fn unknown_activation_is_a_no_op(three: Harness) {
    let mut page = three.load().await;
    assert!(page.handle(PageEvent::NavActivated(id("nope"))).is_empty());
    assert_eq!(active_controls(&page), ["cache"]);
}

#[rstest]
#[tokio::test]
async fn last_activation_wins_over_interleaved_scroll(three: Harness) {
    let mut page = three.load().await;

    page.handle(PageEvent::NavActivated(id("cache")));
    page.handle(snapshot(0.0, 3));
    page.handle(snapshot(25.0, 3));
    page.handle(PageEvent::NavActivated(id("cdn")));

    assert_eq!(active_controls(&page), ["cdn"]);
}

#[rstest]
#[tokio::test]
async fn scrolling_moves_the_marker_through_the_focal_band(three: Harness) {
    let mut page = three.load().await;

    // Band spans rows 12..16: card 0.
    page.handle(snapshot(0.0, 3));
    assert_eq!(active_controls(&page), ["cache"]);

    // Band spans rows 32..36: card 1.
    page.handle(snapshot(20.0, 3));
    assert_eq!(active_controls(&page), ["cdn"]);

    // Band spans rows 52..56: card 2.
    page.handle(snapshot(40.0, 3));
    assert_eq!(active_controls(&page), ["dns"]);

    page.handle(snapshot(0.0, 3));
    assert_eq!(active_controls(&page), ["cache"]);
}

#[rstest]
#[tokio::test]
async fn scroll_without_transition_keeps_a_clicked_control(three: Harness) {
    let mut page = three.load().await;
    page.handle(snapshot(0.0, 3));

    page.handle(PageEvent::NavActivated(id("dns")));
    page.handle(snapshot(2.0, 3));

    assert_eq!(active_controls(&page), ["dns"]);
}

#[rstest]
#[tokio::test]
async fn at_most_one_control_is_ever_active(three: Harness) {
    let mut page = three.load().await;
    let events = [
        snapshot(0.0, 3),
        PageEvent::NavActivated(id("dns")),
        snapshot(40.0, 3),
        snapshot(7.0, 3),
        PageEvent::NavActivated(id("cache")),
        snapshot(33.0, 3),
    ];
    for event in events {
        page.handle(event);
        assert_eq!(active_controls(&page).len(), 1);
    }
}

#[tokio::test]
async fn deep_link_scrolls_to_and_activates_its_card() {
    let mut harness = Harness::new(Reply::Body(THREE), &[]).with_fragment("index.html#dns");
    let mut page = harness.load().await;

    // The image failure and the deep-link timer race; handle both.
    let mut effects = harness.pump(&mut page).await;
    effects.extend(harness.pump(&mut page).await);

    assert_eq!(
        effects,
        [PageEffect::ScrollIntoView { card: 2 }]
    );
    assert_eq!(active_controls(&page), ["dns"]);
}

#[tokio::test]
async fn unknown_fragment_does_nothing() {
    let mut harness = Harness::new(Reply::Body(THREE), &[]).with_fragment("#missing");
    let mut page = harness.load().await;

    assert!(harness.pump(&mut page).await.is_empty());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(harness.events.try_recv().is_err());
    assert_eq!(active_controls(&page), ["cache"]);
    assert_eq!(page.status(), PageStatus::Ready);
}

#[rstest]
#[tokio::test]
async fn sources_block_only_for_non_empty_sources(three: Harness) {
    let page = three.load().await;
    assert!(page.card(0).unwrap().find_by_class("comic-sources").is_none());
    assert!(page.card(1).unwrap().find_by_class("comic-sources").is_some());
    assert!(page.card(2).unwrap().find_by_class("comic-sources").is_none());
    assert!(!page.card(2).unwrap().to_html().contains("<ul"));
}

#[rstest]
#[tokio::test]
async fn teardown_stops_scroll_synchronization(three: Harness) {
    let mut page = three.load().await;
    assert!(page.scroll().is_observing());
    page.teardown();
    page.handle(snapshot(40.0, 3));
    assert_eq!(active_controls(&page), ["cache"]);
}

#[test]
fn deep_link_after_the_page_closed_is_dropped() {
    let (events, receiver) = event_channel();
    assert!(deliver_deep_link(&events, id("dns")));

    drop(receiver);
    assert!(!deliver_deep_link(&events, id("dns")));
}
