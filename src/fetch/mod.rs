// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Retrieval of the comics document and of panel image bytes.
//!
//! Locations are resolved against a [`PageBase`] first; [`DefaultFetcher`] then reads URLs over
//! HTTP and everything else from the local filesystem.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{LoadError, TransportError};
use crate::model::EntryCollection;

mod location;

pub use location::{LocationError, PageBase, ResolvedLocation};

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_bytes(&self, location: &ResolvedLocation) -> Result<Vec<u8>, TransportError>;

    /// Fetches and decodes the entry collection.
    async fn fetch_entries(
        &self,
        location: &ResolvedLocation,
    ) -> Result<EntryCollection, LoadError> {
        let bytes = self.fetch_bytes(location).await?;
        Ok(EntryCollection::from_json_slice(&bytes)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for DefaultFetcher {
    async fn fetch_bytes(&self, location: &ResolvedLocation) -> Result<Vec<u8>, TransportError> {
        debug!(%location, "fetching");
        match location {
            ResolvedLocation::Url(url) => {
                let request_error = |source| TransportError::Request {
                    url: url.to_string(),
                    source,
                };
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(request_error)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(TransportError::Status {
                        status: status.as_u16(),
                    });
                }
                let body = response.bytes().await.map_err(request_error)?;
                Ok(body.to_vec())
            }
            ResolvedLocation::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| TransportError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}
