// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reader-facing strings.

/// Section title shown in every card header unless configured otherwise.
pub const DEFAULT_CARD_LABEL: &str = "四コマ";
pub const DESCRIPTION_LABEL: &str = "解説";
pub const SOURCES_TITLE: &str = "参考情報";
pub const AS_OF_PREFIX: &str = "情報時点: ";
pub const PLACEHOLDER_ICON: &str = "🖼️";
pub const LOADING_TEXT: &str = "読み込み中…";
pub const LOAD_FAILURE_PREFIX: &str = "データの読み込みに失敗しました: ";

/// Name of the `ordinal`-th panel, used as image alt text.
pub fn panel_name(ordinal: usize) -> String {
    format!("コマ{ordinal}")
}

pub fn placeholder_text(ordinal: usize) -> String {
    format!("コマ{ordinal} (画像準備中)")
}

pub fn load_failure_message(detail: impl std::fmt::Display) -> String {
    format!("{LOAD_FAILURE_PREFIX}{detail}")
}
