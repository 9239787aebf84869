// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Builders that turn entries into detached element trees.
//!
//! Nothing here touches the live document: cards and nav controls are attached by the page.

pub mod card;
pub mod escape;
pub mod labels;
pub mod markup;
pub mod nav;
pub mod panel;

pub use card::{build_card, Card};
pub use markup::{Element, Node};
pub use nav::build_nav;
