// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::anchors::AnchorIndex;

/// The fragment part of the page address, taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Accepts a full address (`index.html#cache`), a bare fragment (`#cache`) or just the id.
    /// Returns `None` for an empty fragment.
    pub fn parse(address: &str) -> Option<Self> {
        let value = match address.split_once('#') {
            Some((_, fragment)) => fragment,
            None => address,
        };
        (!value.is_empty()).then(|| Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entry position named by `fragment`, if the page has such an entry.
pub fn resolve(fragment: &Fragment, anchors: &AnchorIndex) -> Option<usize> {
    anchors.position(fragment.as_str())
}
