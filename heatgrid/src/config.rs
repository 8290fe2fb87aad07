// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration.

use heatgrid_text::TextStyle;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::label::DEFAULT_MAX_LABEL_CHARS;
use crate::shape::MalformedRecordPolicy;

/// Per-side pixel margins around the cell grid.
///
/// Sides left out of a JSON object keep the base margins of [`Margins::default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
}

impl Margins {
    /// Creates margins from explicit values.
    #[must_use]
    pub fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }
}

impl Default for Margins {
    /// Five pixels on the left and at the bottom, nothing elsewhere.
    fn default() -> Self {
        Self::new(0.0, 5.0, 0.0, 5.0)
    }
}

/// Heat-map widget settings.
///
/// Every field has a default, so a partial JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatmapConfig {
    /// Base margins; measured axis labels are added on top of these.
    pub margins: Margins,
    /// Gap between the x-axis labels and the grid.
    pub x_label_margin: f64,
    /// Gap between the y-axis labels and the grid.
    pub y_label_margin: f64,
    /// Style used to measure and draw axis labels.
    pub axis_label_style: TextStyle,
    /// Style used to fit and draw per-cell value labels.
    ///
    /// It becomes the series label of the render option, so the engine fits cell
    /// labels with whatever style the option it renders carries.
    pub cell_label_style: TextStyle,
    /// Axis labels longer than this many characters are truncated.
    pub max_label_chars: usize,
    /// Cells whose smaller side is at or below this many pixels are drawn without
    /// borders or split lines.
    pub fine_grid_threshold: f64,
    /// What to do with records that have no category for an axis.
    pub malformed_records: MalformedRecordPolicy,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            x_label_margin: 8.0,
            y_label_margin: 8.0,
            axis_label_style: TextStyle::new(12.0),
            cell_label_style: TextStyle::new(12.0),
            max_label_chars: DEFAULT_MAX_LABEL_CHARS,
            fine_grid_threshold: 5.0,
            malformed_records: MalformedRecordPolicy::default(),
        }
    }
}

impl HeatmapConfig {
    /// Parses a configuration from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every pixel quantity is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("margins.top", self.margins.top),
            ("margins.left", self.margins.left),
            ("margins.right", self.margins.right),
            ("margins.bottom", self.margins.bottom),
            ("xLabelMargin", self.x_label_margin),
            ("yLabelMargin", self.y_label_margin),
            ("axisLabelStyle.fontSize", self.axis_label_style.font_size),
            ("cellLabelStyle.fontSize", self.cell_label_style.font_size),
            ("fineGridThreshold", self.fine_grid_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Sets the base margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the gap between axis labels and the grid for both axes.
    #[must_use]
    pub fn with_label_margins(mut self, x: f64, y: f64) -> Self {
        self.x_label_margin = x;
        self.y_label_margin = y;
        self
    }

    /// Sets the axis label style.
    #[must_use]
    pub fn with_axis_label_style(mut self, style: TextStyle) -> Self {
        self.axis_label_style = style;
        self
    }

    /// Sets the cell label style.
    #[must_use]
    pub fn with_cell_label_style(mut self, style: TextStyle) -> Self {
        self.cell_label_style = style;
        self
    }

    /// Sets the axis label character limit.
    #[must_use]
    pub fn with_max_label_chars(mut self, max_label_chars: usize) -> Self {
        self.max_label_chars = max_label_chars;
        self
    }

    /// Sets the cell size at or below which borders and split lines are hidden.
    #[must_use]
    pub fn with_fine_grid_threshold(mut self, threshold: f64) -> Self {
        self.fine_grid_threshold = threshold;
        self
    }

    /// Sets the malformed-record policy.
    #[must_use]
    pub fn with_malformed_records(mut self, policy: MalformedRecordPolicy) -> Self {
        self.malformed_records = policy;
        self
    }
}
