// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

const ACCENT_ENV: &str = "YONKOMA_ACCENT";
const DEFAULT_ACCENT: Color = Color::Rgb(0xe0, 0x6c, 0x4f);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Styles for the painted page, keyed by the element classes they stand in for.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Theme {
    accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT,
        }
    }
}

impl Theme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(ACCENT_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: ACCENT_ENV,
                    value: "<non-unicode>".to_owned(),
                })
            }
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let accent = parse_hex_color(trimmed).ok_or_else(|| ThemeError::InvalidEnv {
            name: ACCENT_ENV,
            value: trimmed.to_owned(),
        })?;
        Ok(Self { accent })
    }

    pub(crate) fn accent(&self) -> Color {
        self.accent
    }

    pub(crate) fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub(crate) fn nav(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    /// Style for text inside an element carrying `class`. Unknown classes inherit.
    pub(crate) fn for_class(&self, class: &str) -> Option<Style> {
        let style = match class {
            "term-badge" => Style::default()
                .fg(Color::Black)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD),
            "term-fullname" | "sources-date" | "source-note" => {
                Style::default().fg(Color::DarkGray)
            }
            "panel-number" => Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            "placeholder" => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            "desc-label" | "sources-title" => {
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
            }
            "loading" => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            "error-msg" => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            _ => return None,
        };
        Some(style)
    }

    pub(crate) fn for_tag(&self, tag: &str) -> Option<Style> {
        match tag {
            "h2" => Some(Style::default().add_modifier(Modifier::BOLD)),
            "img" => Some(Style::default().fg(Color::Green)),
            _ => None,
        }
    }
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}
