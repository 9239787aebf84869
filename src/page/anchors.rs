// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use crate::model::EntryId;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AnchorSlot {
    id: EntryId,
    card: usize,
    control: usize,
}

/// Identifier → rendered handles, built once while the page attaches its content.
///
/// Positions are entry positions (collection order). `card` and `control` are element indices
/// inside the comics container and the nav mount respectively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorIndex {
    slots: Vec<AnchorSlot>,
    by_id: HashMap<EntryId, usize>,
}

impl AnchorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the next entry; returns its position.
    pub fn push(&mut self, id: EntryId, card: usize, control: usize) -> usize {
        let position = self.slots.len();
        self.by_id.insert(id.clone(), position);
        self.slots.push(AnchorSlot { id, card, control });
        position
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn id(&self, position: usize) -> Option<&EntryId> {
        self.slots.get(position).map(|slot| &slot.id)
    }

    pub fn card(&self, position: usize) -> Option<usize> {
        self.slots.get(position).map(|slot| slot.card)
    }

    pub fn control(&self, position: usize) -> Option<usize> {
        self.slots.get(position).map(|slot| slot.control)
    }
}
