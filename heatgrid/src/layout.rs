// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive grid layout.
//!
//! Every time the engine rebuilds its model, the layout pass sizes the grid
//! margins from the measured axis labels and decides, per axis, whether labels
//! must be rotated or thinned out to avoid overlapping:
//!
//! 1. Reserve room for the widest x label (above the grid) and the widest y label
//!    (left of the grid).
//! 2. If the widest x label is wider than a column, turn x labels vertical; if
//!    they are then taller than a column is wide, show only every n-th label and
//!    re-measure the labels that stay visible.
//! 3. Apply the same thinning to the y labels against the row height.
//! 4. When cells get very small, drop cell borders and split lines.
//!
//! There is no iteration to a fixed point: each axis is measured at most twice.

use heatgrid_text::{TextMeasurer, TextStyle};
use kurbo::{Rect, Size};

use crate::config::{HeatmapConfig, Margins};
use crate::engine::LayoutPass;
use crate::fit::TextFit;
use crate::label::every_nth;
use crate::option::HeatmapOption;

/// Rotation of horizontal labels, in degrees.
pub const HORIZONTAL: f64 = 0.0;
/// Rotation of vertical (bottom-to-top reading) labels, in degrees.
pub const VERTICAL: f64 = -90.0;

/// Label placement decided for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLabelLayout {
    /// Rotation in degrees, [`HORIZONTAL`] or [`VERTICAL`].
    pub rotate: f64,
    /// Labels hidden between two shown labels (`0` shows every label).
    pub interval: usize,
}

impl Default for AxisLabelLayout {
    fn default() -> Self {
        Self {
            rotate: HORIZONTAL,
            interval: 0,
        }
    }
}

/// Result of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutState {
    /// Final grid margins.
    pub grid: Margins,
    /// X-axis labels.
    pub x_label: AxisLabelLayout,
    /// Y-axis labels.
    pub y_label: AxisLabelLayout,
    /// Cell border width (`0` or `1`).
    pub border_width: f64,
    /// Whether split lines are drawn.
    pub split_lines: bool,
    /// Width and height of one cell.
    pub cell: Size,
}

impl LayoutState {
    /// Writes the layout into the render options.
    pub fn apply(&self, option: &mut HeatmapOption) {
        option.grid.top = self.grid.top;
        option.grid.left = self.grid.left;
        option.grid.right = self.grid.right;
        option.grid.bottom = self.grid.bottom;
        option.x_axis.axis_label.rotate = self.x_label.rotate;
        option.x_axis.axis_label.interval = self.x_label.interval;
        option.y_axis.axis_label.rotate = self.y_label.rotate;
        option.y_axis.axis_label.interval = self.y_label.interval;
        option.x_axis.split_line.show = self.split_lines;
        option.y_axis.split_line.show = self.split_lines;
        option.series.item_style.border_width = self.border_width;
    }

    /// Returns the rectangle covered by cells within a view of the given size.
    pub fn plot_rect(&self, view: Size) -> Rect {
        Rect::new(
            self.grid.left,
            self.grid.top,
            view.width - self.grid.right,
            view.height - self.grid.bottom,
        )
    }
}

/// Extent of one category slot along an axis.
///
/// `extent` is the view width (or height), `start` and `end` the margins before
/// and after the grid.
pub fn band_width(extent: f64, start: f64, end: f64, count: usize) -> f64 {
    (extent - start - end) / count as f64
}

/// Number of labels to hide between shown labels, given how many times a label's
/// thickness fits into its band (`ratio = label thickness / band`).
///
/// - `0 <= ratio <= 1`: every label fits, hide none.
/// - `ratio > 1`: hide `floor(ratio)` labels between shown ones.
/// - `ratio < 0` (the band is negative) or infinite (the band is empty): hide
///   `count`, i.e. only the first label is shown.
/// - NaN: hide none.
#[allow(
    clippy::cast_possible_truncation,
    reason = "ratio is finite and > 1 where cast; saturating is fine"
)]
pub fn label_interval(ratio: f64, count: usize) -> usize {
    if ratio.is_nan() {
        0
    } else if ratio < 0.0 || ratio.is_infinite() {
        count
    } else if ratio <= 1.0 {
        0
    } else {
        ratio.floor() as usize
    }
}

/// The adaptive layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveLayout {
    margins: Margins,
    label_style: TextStyle,
    fine_grid_threshold: f64,
}

impl AdaptiveLayout {
    /// Creates the pass from the widget configuration.
    pub fn new(config: &HeatmapConfig) -> Self {
        Self {
            margins: config.margins,
            label_style: config.axis_label_style.clone(),
            fine_grid_threshold: config.fine_grid_threshold,
        }
    }

    /// Computes the layout of `option` in a view of the given size.
    ///
    /// Categories, label margins and the label character limit are read from
    /// `option`; `option` itself is left untouched.
    #[tracing::instrument(skip_all, fields(width = view.width, height = view.height))]
    pub fn compute(
        &self,
        option: &HeatmapOption,
        view: Size,
        measurer: &dyn TextMeasurer,
    ) -> LayoutState {
        let base = self.margins;
        let x = option.x_categories();
        let y = option.y_categories();
        let x_margin = option.x_axis.axis_label.margin;
        let y_margin = option.y_axis.axis_label.margin;
        let x_fit = TextFit::new(measurer, &self.label_style, option.x_axis.axis_label.max_chars);
        let y_fit = TextFit::new(measurer, &self.label_style, option.y_axis.axis_label.max_chars);

        let label_x = x_fit.widest(x.iter().map(String::as_str));
        let label_y = y_fit.widest(y.iter().map(String::as_str));

        let mut top = base.top + label_x.height + x_margin;
        let mut left = base.left + label_y.width + y_margin;
        let mut x_label = AxisLabelLayout::default();
        let mut y_label = AxisLabelLayout::default();

        let x_band = band_width(view.width, left, base.right, x.len());
        if label_x.width > x_band {
            // A vertical label is as tall as it was wide.
            x_label.rotate = VERTICAL;
            top = base.top + label_x.width + x_margin;
            x_label.interval = label_interval(label_x.height / x_band, x.len());
            if x_label.interval > 0 {
                let shown = every_nth(x, x_label.interval.saturating_add(1));
                top = base.top + x_fit.widest(shown).width + x_margin;
            }
            tracing::debug!(x_band, interval = x_label.interval, top, "x labels rotated");
        }

        let y_band = band_width(view.height, top, base.bottom, y.len());
        y_label.interval = label_interval(label_y.height / y_band, y.len());
        if y_label.interval > 0 {
            let shown = every_nth(y, y_label.interval.saturating_add(1));
            left = base.left + y_fit.widest(shown).width + y_margin;
            tracing::debug!(y_band, interval = y_label.interval, left, "y labels thinned");
        }

        let x_band = band_width(view.width, left, base.right, x.len());
        let fine = x_band.min(y_band) <= self.fine_grid_threshold;
        if fine {
            tracing::debug!(x_band, y_band, "fine grid; hiding borders and split lines");
        }

        LayoutState {
            grid: Margins::new(top, left, base.right, base.bottom),
            x_label,
            y_label,
            border_width: if fine { 0.0 } else { 1.0 },
            split_lines: !fine,
            cell: Size::new(x_band, y_band),
        }
    }
}

impl LayoutPass for AdaptiveLayout {
    fn process(
        &self,
        option: &mut HeatmapOption,
        view: Size,
        measurer: &dyn TextMeasurer,
    ) -> LayoutState {
        let state = self.compute(option, view, measurer);
        state.apply(option);
        state
    }
}
