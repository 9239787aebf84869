// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error taxonomy shared by the loader, the page engine and the image pipeline.
//!
//! Only [`LoadError`] reaches the reader (as one localized message). [`MissingElementError`] is a
//! markup defect and is returned to the caller as-is. [`ResourceLoadError`] never leaves the
//! panel it belongs to.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::LocationError;
use crate::model::EntryId;

/// Failure to obtain or decode the entry collection.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    Status { status: u16 },
    #[error("{url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Location(#[from] LocationError),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid comics document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate entry id `{0}`")]
    DuplicateId(EntryId),
}

/// An expected mount point is absent from the document shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mount point `#{id}` is missing from the document")]
pub struct MissingElementError {
    pub id: String,
}

/// A single panel image could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceLoadError {
    #[error("{location}: HTTP {status}")]
    Status { location: String, status: u16 },
    #[error("{location}: {message}")]
    Transport { location: String, message: String },
    #[error("{location}: not a supported image")]
    Undecodable { location: String },
}

impl ResourceLoadError {
    pub fn location(&self) -> &str {
        match self {
            Self::Status { location, .. }
            | Self::Transport { location, .. }
            | Self::Undecodable { location } => location,
        }
    }
}
