// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell label contrast.
//!
//! Cell labels are drawn black or white depending on how bright the cell fill is.

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde_json::Value;

/// Label color used on bright fills.
pub const DARK_TEXT: &str = "#000";
/// Label color used on dark fills.
pub const LIGHT_TEXT: &str = "#FFF";

/// Luma at or above which a fill counts as bright.
pub const BRIGHT_LUMA: f64 = 165.0;

// Three 8-bit channels plus an opaque alpha of 1.
const MAX_CHANNEL_SUM: f64 = 766.0;

/// Returns the Rec. 709 luma of a color, in `0..=255`.
///
/// Accepts a `#RGB` / `#RRGGBB` string or a four-element `[r, g, b, a]` list of
/// numbers (alpha is ignored). Anything else, including lists with non-numeric
/// entries and colors whose channels sum outside `0..=766`, gives `0`.
pub fn luminosity(color: &Value) -> f64 {
    let rgb = match color {
        Value::String(hex) => parse_hex(hex),
        Value::Array(components) => numeric_rgb(components),
        _ => None,
    };
    rgb.map_or(0.0, rec709_luma)
}

/// Returns the Rec. 709 luma of a `#RGB` / `#RRGGBB` color string, or `0`.
pub fn hex_luminosity(hex: &str) -> f64 {
    parse_hex(hex).map_or(0.0, rec709_luma)
}

/// Picks the label color that reads best on a fill of the given luma.
pub fn contrasting_color(luma: f64) -> &'static str {
    if luma >= BRIGHT_LUMA {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Returns the label color for a cell with the given fill.
pub fn label_color(fill: &str) -> &'static str {
    contrasting_color(hex_luminosity(fill))
}

/// Formats a color as a lowercase `#rrggbb` string.
pub fn to_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn parse_hex(hex: &str) -> Option<[f64; 3]> {
    let digits = hex.strip_prefix('#')?;
    if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let color = parse_color(hex).ok()?.to_alpha_color::<Srgb>();
    let rgba = color.to_rgba8();
    checked_rgb([f64::from(rgba.r), f64::from(rgba.g), f64::from(rgba.b)])
}

fn numeric_rgb(components: &[Value]) -> Option<[f64; 3]> {
    let [r, g, b, _alpha] = components else {
        return None;
    };
    checked_rgb([r.as_f64()?, g.as_f64()?, b.as_f64()?])
}

fn checked_rgb(rgb: [f64; 3]) -> Option<[f64; 3]> {
    let sum: f64 = rgb.iter().sum();
    (0.0..=MAX_CHANNEL_SUM).contains(&sum).then_some(rgb)
}

fn rec709_luma([r, g, b]: [f64; 3]) -> f64 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;
    use serde_json::json;

    use super::*;

    #[test]
    fn black_and_white_bound_the_range() {
        assert_eq!(luminosity(&json!("#000")), 0.0);
        let white = luminosity(&json!("#FFF"));
        assert!(white.is_finite());
        assert!(white <= 255.0);
        assert!((white - 255.0).abs() < 1e-9);
    }

    #[test]
    fn short_and_long_hex_agree() {
        assert!((hex_luminosity("#abc") - hex_luminosity("#aabbcc")).abs() < 1e-9);
        assert!(hex_luminosity("#00FF00") > hex_luminosity("#FF0000"));
    }

    #[test]
    fn unparseable_colors_give_zero() {
        assert_eq!(luminosity(&json!("white")), 0.0);
        assert_eq!(luminosity(&json!("#GGGGGG")), 0.0);
        assert_eq!(luminosity(&json!("#FFFF")), 0.0);
        assert_eq!(luminosity(&json!("rgb(255, 255, 255)")), 0.0);
        assert_eq!(luminosity(&json!(42)), 0.0);
        assert_eq!(luminosity(&Value::Null), 0.0);
    }

    #[test]
    fn component_lists_need_four_numbers_in_range() {
        assert!((luminosity(&json!([255, 255, 255, 1])) - 255.0).abs() < 1e-9);
        assert_eq!(luminosity(&json!(["a", "n", "j", "d"])), 0.0);
        assert_eq!(luminosity(&json!([{}, {}, {}, {}])), 0.0);
        assert_eq!(luminosity(&json!([255, 255, 255])), 0.0);
        assert_eq!(luminosity(&json!([300, 300, 300, 1])), 0.0);
        assert_eq!(luminosity(&json!([-10, -10, -10, 1])), 0.0);
    }

    #[test]
    fn contrast_threshold_is_inclusive() {
        assert_eq!(contrasting_color(164.0), LIGHT_TEXT);
        assert_eq!(contrasting_color(165.0), DARK_TEXT);
        assert_eq!(contrasting_color(1000.0), DARK_TEXT);
        assert_eq!(contrasting_color(30.0), LIGHT_TEXT);
    }

    #[test]
    fn labels_contrast_with_fill() {
        assert_eq!(label_color("#FFFFFF"), DARK_TEXT);
        assert_eq!(label_color("#1a237e"), LIGHT_TEXT);
        assert_eq!(label_color("not a color"), LIGHT_TEXT);
    }

    #[test]
    fn hex_output_round_trips() {
        assert_eq!(to_hex(css::WHITE), "#ffffff");
        assert_eq!(to_hex(Color::from_rgb8(0x1a, 0x23, 0x7e)), "#1a237e");
    }
}
