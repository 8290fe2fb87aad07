// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text fitting: does a label fit its slot?

use heatgrid_text::{TextMeasurer, TextStyle};
use kurbo::Size;

use crate::label::{format_label_with, format_value};

/// Measures labels in one text style.
///
/// Nothing is cached: metrics depend on the live style and are re-measured on
/// every layout pass.
#[derive(Clone, Copy)]
pub struct TextFit<'a> {
    measurer: &'a dyn TextMeasurer,
    style: &'a TextStyle,
    max_label_chars: usize,
}

impl core::fmt::Debug for TextFit<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextFit")
            .field("style", &self.style)
            .field("max_label_chars", &self.max_label_chars)
            .finish_non_exhaustive()
    }
}

impl<'a> TextFit<'a> {
    /// Creates an oracle over `measurer` for text in `style`.
    pub fn new(measurer: &'a dyn TextMeasurer, style: &'a TextStyle, max_label_chars: usize) -> Self {
        Self {
            measurer,
            style,
            max_label_chars,
        }
    }

    /// Measures raw text.
    pub fn measure(&self, text: &str) -> Size {
        self.measurer.size(text, self.style)
    }

    /// Measures an axis category as it will be displayed (formatted).
    pub fn measure_label(&self, category: &str) -> Size {
        self.measure(&format_label_with(category, self.max_label_chars))
    }

    /// Returns the size of the widest displayed category.
    ///
    /// The first of equally wide labels wins; no labels give a zero size.
    pub fn widest<'c>(&self, categories: impl IntoIterator<Item = &'c str>) -> Size {
        categories
            .into_iter()
            .map(|c| self.measure_label(c))
            .fold(None, |widest: Option<Size>, size| match widest {
                Some(w) if w.width >= size.width => Some(w),
                _ => Some(size),
            })
            .unwrap_or(Size::ZERO)
    }

    /// Returns `true` when `text` fits inside `slot` in both directions.
    pub fn fits(&self, text: &str, slot: Size) -> bool {
        let size = self.measure(text);
        size.width <= slot.width && size.height <= slot.height
    }

    /// Returns the text to draw inside a cell: the value if it fits, else nothing.
    pub fn cell_label(&self, value: Option<f64>, cell: Size) -> String {
        let Some(value) = value else {
            return String::new();
        };
        let text = format_value(value);
        if self.fits(&text, cell) {
            text
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use heatgrid_text::FixedAdvanceMeasurer;

    use super::*;

    const MEASURER: FixedAdvanceMeasurer = FixedAdvanceMeasurer {
        advance: 10.0,
        line_height: 10.0,
    };

    #[test]
    fn labels_are_measured_after_formatting() {
        let style = TextStyle::default();
        let fit = TextFit::new(&MEASURER, &style, 20);
        assert_eq!(fit.measure_label("London   "), Size::new(60.0, 10.0));
        assert_eq!(
            fit.measure_label("A category name that is far too long"),
            Size::new(200.0, 10.0)
        );
    }

    #[test]
    fn widest_prefers_the_first_of_ties() {
        let style = TextStyle::default();
        let fit = TextFit::new(&MEASURER, &style, 20);
        assert_eq!(fit.widest(["ab", "abc", "xyz", "a"]), Size::new(30.0, 10.0));
        assert_eq!(fit.widest(core::iter::empty()), Size::ZERO);
    }

    #[test]
    fn cell_labels_only_when_they_fit() {
        let style = TextStyle::default();
        let fit = TextFit::new(&MEASURER, &style, 20);
        let cell = Size::new(20.0, 20.0);
        assert_eq!(fit.cell_label(Some(19.0), cell), "19");
        assert_eq!(fit.cell_label(Some(1234.0), cell), "");
        assert_eq!(fit.cell_label(Some(7.0), Size::new(20.0, 9.0)), "");
        assert_eq!(fit.cell_label(None, cell), "");
    }
}
