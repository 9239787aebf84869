// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::deep_link::{self, Fragment};
use super::events::{EventSender, PageEvent};
use super::images::{ImageLoader, ImageSource};
use super::scroll::FocalBand;
use super::{Page, PageStatus};
use crate::config::PageConfig;
use crate::error::{LoadError, MissingElementError, TransportError};
use crate::fetch::{Fetcher, PageBase};
use crate::model::EntryId;
use crate::render::labels::load_failure_message;
use crate::render::{build_card, build_nav};

/// Collaborators and settings for one page load.
#[derive(Clone)]
pub struct PageContext {
    pub base: PageBase,
    pub data_src: String,
    pub card_label: String,
    pub focal_band: FocalBand,
    pub deep_link_settle: Duration,
    pub fragment: Option<Fragment>,
    pub fetcher: Arc<dyn Fetcher>,
    pub images: Arc<dyn ImageSource>,
    pub events: EventSender,
}

impl PageContext {
    pub fn from_config(
        config: &PageConfig,
        base: PageBase,
        fetcher: Arc<dyn Fetcher>,
        images: Arc<dyn ImageSource>,
        events: EventSender,
    ) -> Self {
        Self {
            base,
            data_src: config.data_src.clone(),
            card_label: config.card_label.clone(),
            focal_band: config.focal_band,
            deep_link_settle: config.deep_link_settle(),
            fragment: None,
            fetcher,
            images,
            events,
        }
    }

    pub fn with_fragment(mut self, fragment: Option<Fragment>) -> Self {
        self.fragment = fragment;
        self
    }
}

/// Loads the comics document into `document` and wires up the page.
///
/// Runs strictly in order: fetch, nav index, cards (each card starts its image acquisitions as
/// it is attached), deep link, scroll synchronization. A fetch or decode failure leaves the page
/// in [`PageStatus::Failed`] with the loading indicator removed and one error message shown; it
/// is not an `Err`. Only a missing mount point is.
pub async fn load_page(
    document: super::Document,
    ctx: &PageContext,
) -> Result<Page, MissingElementError> {
    document.require_mounts()?;
    let mut page = Page::new(document, ctx.focal_band);

    let entries = match fetch(ctx).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "comics document unavailable");
            page.document.remove_loading();
            page.document.show_error(load_failure_message(&err))?;
            page.status = PageStatus::Failed;
            return Ok(page);
        }
    };
    info!(entries = entries.len(), "comics document loaded");

    page.document.remove_loading();

    let controls = page.attach_nav(build_nav(&entries))?;

    let loader = ImageLoader::new(Arc::clone(&ctx.images), ctx.events.clone());
    for (entry, control) in entries.iter().zip(controls) {
        let pending = page.attach_card(build_card(entry, &ctx.card_label), control)?;
        for (key, location) in pending {
            loader.spawn(key, location);
        }
    }

    if !page.anchors.is_empty() {
        page.activate(0);
    }

    if let Some(fragment) = &ctx.fragment {
        schedule_deep_link(&page, fragment, ctx);
    }

    page.scroll.observe(page.anchors.len());
    page.status = PageStatus::Ready;
    Ok(page)
}

async fn fetch(ctx: &PageContext) -> Result<crate::model::EntryCollection, LoadError> {
    let location = ctx
        .base
        .resolve(&ctx.data_src)
        .map_err(TransportError::from)?;
    ctx.fetcher.fetch_entries(&location).await
}

fn schedule_deep_link(page: &Page, fragment: &Fragment, ctx: &PageContext) {
    let Some(position) = deep_link::resolve(fragment, &page.anchors) else {
        warn!(%fragment, "fragment names no entry");
        return;
    };
    let Some(id) = page.anchors.id(position).cloned() else {
        return;
    };

    let events = ctx.events.clone();
    let delay = ctx.deep_link_settle;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        deliver_deep_link(&events, id);
    });
}

/// Hands the settled deep link to the page; false when the page closed first.
pub(super) fn deliver_deep_link(events: &EventSender, id: EntryId) -> bool {
    match events.send(PageEvent::DeepLinkSettled(id)) {
        Ok(()) => true,
        Err(err) => {
            debug!(event = ?err.0, "page closed before deep link settled");
            false
        }
    }
}
