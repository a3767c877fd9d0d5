//! Color literal mining over raw HTML/CSS text

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::ColorLib;
use crate::models::{ColorInfo, Rgb};

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})(?-u:\b)").unwrap());
static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})").unwrap()
});

/// Pure white and black are page chrome, not palette
const IGNORED: [&str; 4] = ["#ffffff", "#000000", "#fff", "#000"];

/// Expand `#rgb` to `#rrggbb`, lowercase
fn normalize_hex(literal: &str) -> String {
    let lower = literal.to_lowercase();
    let digits = &lower[1..];

    if digits.len() == 3 {
        let mut expanded = String::with_capacity(7);
        expanded.push('#');
        for c in digits.chars() {
            expanded.push(c);
            expanded.push(c);
        }
        expanded
    } else {
        lower
    }
}

/// Occurrence counts per color, in first-seen order
#[derive(Debug, Default)]
struct Tally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, hex: String) {
        if IGNORED.contains(&hex.as_str()) {
            return;
        }
        match self.counts.get_mut(&hex) {
            Some(count) => *count += 1,
            None => {
                self.order.push(hex.clone());
                self.counts.insert(hex, 1);
            }
        }
    }

    /// Most frequent first; equal counts keep first-seen order
    fn ranked(self) -> Vec<(String, usize)> {
        let Tally { order, counts } = self;
        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|hex| {
                let count = counts.get(&hex).copied().unwrap_or(0);
                (hex, count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Count every hex and `rgb()`/`rgba()` literal in `text`, keep the `limit`
/// most frequent and weight them by occurrence.
///
/// Percentages are rounded independently and may not sum to exactly 100.
/// Returns an empty list when nothing survives filtering.
pub fn mine_css_colors(text: &str, limit: usize) -> Vec<ColorInfo> {
    let mut tally = Tally::default();

    for m in HEX_RE.find_iter(text) {
        tally.add(normalize_hex(m.as_str()));
    }

    for caps in RGB_RE.captures_iter(text) {
        let channels: Vec<u16> = (1..=3)
            .filter_map(|i| caps.get(i)?.as_str().parse().ok())
            .collect();

        if let [r, g, b] = channels[..] {
            if r <= 255 && g <= 255 && b <= 255 {
                tally.add(ColorLib::rgb_to_hex(Rgb::new(r as u8, g as u8, b as u8)));
            }
        }
    }

    let top: Vec<(String, usize)> = tally.ranked().into_iter().take(limit).collect();
    let total: usize = top.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    top.into_iter()
        .filter_map(|(hex, count)| {
            let rgb = ColorLib::hex_to_rgb(&hex)?;
            let percentage = (count as f64 / total as f64 * 100.0).round() as u8;
            Some(ColorLib::create_color_info(rgb, Some(percentage)))
        })
        .collect()
}
