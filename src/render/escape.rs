// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use memchr::{memchr, memchr3};

/// Appends `text` to `out` with `&`, `<`, `>` and `"` escaped, so it can sit inside element
/// content or a double-quoted attribute value.
pub fn push_escaped(out: &mut String, text: &str) {
    match first_special(text.as_bytes()) {
        None => out.push_str(text),
        Some(first) => {
            out.push_str(&text[..first]);
            push_escaped_tail(out, &text[first..]);
        }
    }
}

fn first_special(bytes: &[u8]) -> Option<usize> {
    match (memchr3(b'&', b'<', b'>', bytes), memchr(b'"', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

fn push_escaped_tail(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
