// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid location `{location}`: {source}")]
pub struct LocationError {
    pub location: String,
    #[source]
    pub source: url::ParseError,
}

/// What relative locations are resolved against, like a document URL in a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBase {
    Url(Url),
    Dir(PathBuf),
}

/// A location ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLocation {
    Url(Url),
    Path(PathBuf),
}

impl PageBase {
    /// Parses a configured base. Non-URL bases are directories relative to `relative_to`.
    pub fn parse(raw: &str, relative_to: &Path) -> Result<Self, LocationError> {
        if is_http_url(raw) {
            return parse_url(raw).map(Self::Url);
        }
        Ok(Self::Dir(relative_to.join(raw)))
    }

    pub fn resolve(&self, location: &str) -> Result<ResolvedLocation, LocationError> {
        if is_http_url(location) {
            return parse_url(location).map(ResolvedLocation::Url);
        }
        match self {
            Self::Url(base) => base
                .join(location)
                .map(ResolvedLocation::Url)
                .map_err(|source| LocationError {
                    location: location.to_owned(),
                    source,
                }),
            Self::Dir(dir) => Ok(ResolvedLocation::Path(dir.join(location))),
        }
    }
}

impl Default for PageBase {
    fn default() -> Self {
        Self::Dir(PathBuf::from("."))
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn parse_url(raw: &str) -> Result<Url, LocationError> {
    Url::parse(raw).map_err(|source| LocationError {
        location: raw.to_owned(),
        source,
    })
}
