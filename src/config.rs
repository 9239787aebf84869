// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page configuration.
//!
//! Settings come from a TOML file (`--config <path>`, or `yonkoma.toml` in the working directory
//! when present) and fall back to defaults field by field:
//!
//! ```toml
//! data_src = "data/comics.json"
//! card_label = "四コマ"
//! base = "https://example.com/glossary/"   # optional; defaults to the config directory
//! deep_link_settle_ms = 100
//!
//! [focal_band]
//! top_inset = 0.30
//! bottom_inset = 0.60
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::fetch::{LocationError, PageBase};
use crate::page::scroll::{FocalBand, InvalidFocalBand};
use crate::render::labels::DEFAULT_CARD_LABEL;

pub const DEFAULT_CONFIG_FILENAME: &str = "yonkoma.toml";
pub const DEFAULT_DATA_SRC: &str = "data/comics.json";
const DEFAULT_DEEP_LINK_SETTLE_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    FocalBand(#[from] InvalidFocalBand),
    #[error("invalid base: {0}")]
    Base(#[from] LocationError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Location of the comics document, relative to the base.
    pub data_src: String,
    /// Section title shown in every card header.
    pub card_label: String,
    /// Directory or URL that relative locations resolve against.
    pub base: Option<String>,
    pub focal_band: FocalBand,
    pub deep_link_settle_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            data_src: DEFAULT_DATA_SRC.to_owned(),
            card_label: DEFAULT_CARD_LABEL.to_owned(),
            base: None,
            focal_band: FocalBand::default(),
            deep_link_settle_ms: DEFAULT_DEEP_LINK_SETTLE_MS,
        }
    }
}

impl PageConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Loads `explicit` if given, else `yonkoma.toml` in `cwd` if it exists, else defaults.
    ///
    /// Also returns the directory the configuration is anchored to.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, PathBuf), ConfigError> {
        let path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILENAME);
                if !candidate.is_file() {
                    return Ok((Self::default(), cwd.to_path_buf()));
                }
                candidate
            }
        };
        let config = Self::load(&path)?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        Ok((config, dir))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.focal_band.validate()?;
        Ok(())
    }

    pub fn page_base(&self, config_dir: &Path) -> Result<PageBase, ConfigError> {
        match &self.base {
            Some(raw) => Ok(PageBase::parse(raw, config_dir)?),
            None => Ok(PageBase::Dir(config_dir.to_path_buf())),
        }
    }

    pub fn deep_link_settle(&self) -> Duration {
        Duration::from_millis(self.deep_link_settle_ms)
    }
}
