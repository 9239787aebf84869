// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::entry::Entry;
use crate::error::DecodeError;

/// The immutable, ordered set of entries produced by one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCollection {
    entries: Vec<Entry>,
}

impl EntryCollection {
    /// Builds a collection, rejecting duplicate ids.
    pub fn new(entries: Vec<Entry>) -> Result<Self, DecodeError> {
        {
            let mut seen = HashSet::with_capacity(entries.len());
            for entry in &entries {
                if !seen.insert(entry.id().as_str()) {
                    return Err(DecodeError::DuplicateId(entry.id().clone()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Decodes the JSON array served as the comics document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let entries: Vec<Entry> = serde_json::from_slice(bytes)?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::EntryCollection;
    use crate::error::DecodeError;

    #[test]
    fn decodes_in_document_order() {
        let collection = EntryCollection::from_json_slice(
            br#"[{"id": "b", "term": "B"}, {"id": "a", "term": "A"}]"#,
        )
        .unwrap();
        let ids: Vec<_> = collection.iter().map(|entry| entry.id().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = EntryCollection::from_json_slice(
            br#"[{"id": "a", "term": "A"}, {"id": "a", "term": "A2"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateId(id) if id.as_str() == "a"));
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = EntryCollection::from_json_slice(br#"{"id": "a"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn empty_array_is_a_valid_collection() {
        assert!(EntryCollection::from_json_slice(b"[]").unwrap().is_empty());
    }
}
