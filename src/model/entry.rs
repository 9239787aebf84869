// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Deserializer, Serialize};

use super::ids::EntryId;

/// One glossary item: a term, its illustrated panels and an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    id: EntryId,
    term: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_null")]
    description: String,
    #[serde(default, deserialize_with = "list_or_null")]
    panels: Vec<Panel>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    data_as_of: Option<String>,
    #[serde(default, deserialize_with = "list_or_null", skip_serializing_if = "Vec::is_empty")]
    sources: Vec<Source>,
}

impl Entry {
    pub fn new(id: EntryId, term: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            full_name: None,
            description: String::new(),
            panels: Vec::new(),
            data_as_of: None,
            sources: Vec::new(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into()).filter(|name| !name.is_empty());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_panels(mut self, panels: Vec<Panel>) -> Self {
        self.panels = panels;
        self
    }

    pub fn with_data_as_of(mut self, data_as_of: impl Into<String>) -> Self {
        self.data_as_of = Some(data_as_of.into()).filter(|date| !date.is_empty());
        self
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn data_as_of(&self) -> Option<&str> {
        self.data_as_of.as_deref()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

/// One illustrated step of an [`Entry`].
///
/// The display ordinal is the 1-based position in [`Entry::panels`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into()).filter(|image| !image.is_empty());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into()).filter(|caption| !caption.is_empty());
        self
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

/// A reference backing the facts stated in an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    label: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Source {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into()).filter(|note| !note.is_empty());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

// Optional text fields treat `""` like a missing value.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn list_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
