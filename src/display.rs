// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fallbacks for category colors and icons that cannot be rendered as stored.

use crate::models::Category;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").expect("valid regex"));

pub const DEFAULT_COLOR: Rgba = Rgba {
    r: 0x67,
    g: 0x50,
    b: 0xA4,
    a: 0xFF,
};

pub const DEFAULT_ICON: &str = "category";

/// Icon keys the presentation layer knows how to draw.
pub const ICONS: &[&str] = &[
    "restaurant",
    "directions_car",
    "movie",
    "local_hospital",
    "shopping_cart",
    "school",
    "build",
    "account_balance",
    "work",
    "category",
    "home",
    "flight",
    "fitness_center",
    "sports_esports",
    "pets",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`.
pub fn parse_color(raw: &str) -> Option<Rgba> {
    let raw = raw.trim();
    if !HEX_COLOR.is_match(raw) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&raw[i..i + 2], 16).ok();
    Some(Rgba {
        r: byte(1)?,
        g: byte(3)?,
        b: byte(5)?,
        a: if raw.len() == 9 { byte(7)? } else { 0xFF },
    })
}

pub fn is_valid_color(raw: &str) -> bool {
    parse_color(raw).is_some()
}

pub fn category_color(category: &Category) -> Rgba {
    parse_color(&category.color).unwrap_or(DEFAULT_COLOR)
}

pub fn is_known_icon(key: &str) -> bool {
    ICONS.contains(&key.trim())
}

pub fn category_icon(category: &Category) -> &'static str {
    let key = category.icon.trim();
    ICONS
        .iter()
        .copied()
        .find(|k| *k == key)
        .unwrap_or(DEFAULT_ICON)
}
