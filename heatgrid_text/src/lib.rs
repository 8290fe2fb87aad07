// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for heat-map layout.
//!
//! The heat-map layout pass decides margins, label rotation and label skipping from
//! measured label extents. Shaping and glyph layout belong to whatever engine
//! actually draws the chart, so layout code only depends on the tiny
//! [`TextMeasurer`] interface defined here.
//!
//! Implementations can be heuristic ([`HeuristicTextMeasurer`]), fixed-advance
//! ([`FixedAdvanceMeasurer`], handy for tests and headless sizing), or backed by a
//! real engine's text metrics.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// A minimal text measurement interface used by the layout pass.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; no wrapping is performed.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Returns the bounding size of a single line of text.
    fn size(&self, text: &str, style: &TextStyle) -> Size {
        self.measure(text, style).size()
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a sans-serif, normal-weight `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
///
/// Serialized as the CSS family string (`"sans-serif"`, `"Inter"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    #[default]
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(String),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

impl From<String> for FontFamily {
    fn from(value: String) -> Self {
        match value.trim() {
            "serif" => Self::Serif,
            "sans-serif" => Self::SansSerif,
            "monospace" => Self::Monospace,
            _ => Self::Named(value),
        }
    }
}

impl From<FontFamily> for String {
    fn from(value: FontFamily) -> Self {
        match value {
            FontFamily::Named(name) => name,
            generic => generic.as_css_family().to_owned(),
        }
    }
}

/// CSS-style font weights.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns the bounding box as `advance_width x line_height`.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.advance_width, self.line_height())
    }
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let em = style.font_size.max(0.0);
        // Bold glyphs run roughly 10% wider.
        let weight_scale = if style.font_weight >= FontWeight::BOLD {
            1.1
        } else {
            1.0
        };
        TextMetrics {
            advance_width: 0.6 * em * weight_scale * text.chars().count() as f64,
            ascent: 0.8 * em,
            descent: 0.2 * em,
            leading: 0.0,
        }
    }
}

/// A measurer where every character has the same advance and every line the same
/// height, independent of the style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance width of a single character.
    pub advance: f64,
    /// Height of a line.
    pub line_height: f64,
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer with the given per-character advance and line height.
    #[must_use]
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: self.advance * text.chars().count() as f64,
            ascent: self.line_height,
            descent: 0.0,
            leading: 0.0,
        }
    }
}
