// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render option object handed to the chart engine.
//!
//! Field names serialize in the engine's `camelCase` vocabulary, so the option can
//! cross a JS bridge as-is.

use heatgrid_text::TextStyle;
use serde::{Deserialize, Serialize};

use crate::config::HeatmapConfig;
use crate::record::Record;
use crate::shape::Cell;

/// Grid line and cell border color.
pub const GRID_LINE_COLOR: &str = "#FFF";
/// Background of alternate rows.
pub const ROW_BAND_COLOR: &str = "#F1F1F1";

/// Complete render options for the heat map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapOption {
    /// Grid placement.
    pub grid: GridOption,
    /// Horizontal axis (row categories).
    pub x_axis: AxisOption,
    /// Vertical axis (column categories).
    pub y_axis: AxisOption,
    /// Value-to-color mapping.
    pub visual_map: VisualMapOption,
    /// The heat-map series.
    pub series: SeriesOption,
}

impl HeatmapOption {
    /// Creates the option template with no data.
    pub fn new(config: &HeatmapConfig) -> Self {
        let mut x_axis = AxisOption::category(AxisPosition::Top, config);
        x_axis.axis_label.margin = config.x_label_margin;
        let mut y_axis = AxisOption::category(AxisPosition::Left, config);
        y_axis.axis_label.margin = config.y_label_margin;
        y_axis.split_area.area_style.color = ROW_BAND_COLOR.to_owned();
        Self {
            grid: GridOption {
                contain_label: false,
                top: config.margins.top,
                left: config.margins.left,
                right: config.margins.right,
                bottom: config.margins.bottom,
            },
            x_axis,
            y_axis,
            visual_map: VisualMapOption::default(),
            series: SeriesOption {
                label: SeriesLabel {
                    show: true,
                    style: config.cell_label_style.clone(),
                },
                ..SeriesOption::default()
            },
        }
    }

    /// Returns the categories along the x axis.
    pub fn x_categories(&self) -> &[String] {
        &self.x_axis.data
    }

    /// Returns the categories along the y axis.
    pub fn y_categories(&self) -> &[String] {
        &self.y_axis.data
    }
}

/// Grid margins around the cell area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOption {
    /// Whether the engine should grow the grid to contain labels itself.
    pub contain_label: bool,
    /// Top margin.
    pub top: f64,
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
}

/// Axis type; heat-map axes are always categorical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Discrete categories.
    #[default]
    Category,
}

/// Side of the grid an axis sits on.
///
/// Category labels always sit above the grid (x) or left of it (y).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    /// Above the grid.
    Top,
    /// Left of the grid.
    Left,
}

/// A `{ "show": bool }` switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    /// Whether the element is drawn.
    pub show: bool,
}

/// Fill style of a split area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaStyle {
    /// Fill color.
    pub color: String,
}

/// Alternating background bands behind each category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitArea {
    /// Whether bands are drawn.
    pub show: bool,
    /// Band fill.
    pub area_style: AreaStyle,
}

/// Stroke style of split lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke width.
    pub width: f64,
    /// Stroke color.
    pub color: String,
}

/// Lines between categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    /// Whether the lines are drawn.
    pub show: bool,
    /// Line stroke.
    pub line_style: LineStyle,
}

/// Axis tick label placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabelOption {
    /// Labels hidden between two shown labels (`0` shows every label).
    pub interval: usize,
    /// Label rotation in degrees.
    pub rotate: f64,
    /// Gap between labels and the grid.
    pub margin: f64,
    /// Label font size.
    pub font_size: f64,
    /// Labels are truncated to this many characters.
    pub max_chars: usize,
}

/// A categorical axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOption {
    /// Axis type.
    #[serde(rename = "type")]
    pub kind: AxisKind,
    /// Side of the grid.
    pub position: AxisPosition,
    /// Whether the axis is drawn at all.
    pub show: bool,
    /// Axis baseline.
    pub axis_line: Toggle,
    /// Tick marks.
    pub axis_tick: Toggle,
    /// Background bands.
    pub split_area: SplitArea,
    /// Lines between categories.
    pub split_line: SplitLine,
    /// Tick labels.
    pub axis_label: AxisLabelOption,
    /// Category labels, in order.
    pub data: Vec<String>,
}

impl AxisOption {
    /// A category axis with hidden baseline and ticks and white split lines.
    pub fn category(position: AxisPosition, config: &HeatmapConfig) -> Self {
        Self {
            kind: AxisKind::Category,
            position,
            show: true,
            axis_line: Toggle { show: false },
            axis_tick: Toggle { show: false },
            split_area: SplitArea {
                show: true,
                area_style: AreaStyle {
                    color: "transparent".to_owned(),
                },
            },
            split_line: SplitLine {
                show: true,
                line_style: LineStyle {
                    width: 1.0,
                    color: GRID_LINE_COLOR.to_owned(),
                },
            },
            axis_label: AxisLabelOption {
                interval: 0,
                rotate: 0.0,
                margin: 8.0,
                font_size: config.axis_label_style.font_size,
                max_chars: config.max_label_chars,
            },
            data: Vec::new(),
        }
    }
}

/// Colors of the metric gradient.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InRange {
    /// Gradient stops, low to high.
    pub color: Vec<String>,
}

/// Maps the value dimension of each datum onto the color gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMapOption {
    /// Whether a legend is drawn for the mapping.
    pub show: bool,
    /// Domain minimum.
    pub min: f64,
    /// Domain maximum.
    pub max: f64,
    /// Gradient.
    pub in_range: InRange,
    /// Position of the value inside each datum's `value` tuple.
    pub dimension: usize,
}

impl Default for VisualMapOption {
    fn default() -> Self {
        Self {
            show: false,
            min: 0.0,
            max: 0.0,
            in_range: InRange::default(),
            dimension: 2,
        }
    }
}

/// Series type; always a heat map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Heat-map cells.
    #[default]
    Heatmap,
}

/// Hover emphasis of a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emphasis {
    /// Shadow blur radius.
    pub shadow_blur: f64,
    /// Shadow color.
    pub shadow_color: String,
}

/// Cell borders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesItemStyle {
    /// Border color.
    pub border_color: String,
    /// Border width; `0` hides borders.
    pub border_width: f64,
    /// Hover emphasis.
    pub emphasis: Emphasis,
}

/// The heat-map series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOption {
    /// Series name.
    pub name: String,
    /// Series type.
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    /// Cell value labels.
    pub label: SeriesLabel,
    /// Cell borders and emphasis.
    pub item_style: SeriesItemStyle,
    /// One datum per record.
    pub data: Vec<SeriesDatum>,
}

impl Default for SeriesOption {
    fn default() -> Self {
        Self {
            name: "Heat Map".to_owned(),
            kind: SeriesKind::Heatmap,
            label: SeriesLabel::default(),
            item_style: SeriesItemStyle {
                border_color: GRID_LINE_COLOR.to_owned(),
                border_width: 1.0,
                emphasis: Emphasis {
                    shadow_blur: 10.0,
                    shadow_color: "rgba(0, 0, 0, 0.5)".to_owned(),
                },
            },
            data: Vec::new(),
        }
    }
}

/// Cell value labels of the series.
///
/// Serializes flat, as `{ "show": true, "fontSize": 12, ... }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesLabel {
    /// Whether labels are drawn at all; each shown label must still fit its cell.
    pub show: bool,
    /// Style the labels are fitted and drawn with.
    #[serde(flatten)]
    pub style: TextStyle,
}

impl Default for SeriesLabel {
    fn default() -> Self {
        Self {
            show: true,
            style: TextStyle::default(),
        }
    }
}

/// `[row, column, value, record]`, with `-1` for an unplaced row or column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatumValue(pub i64, pub i64, pub Option<f64>, pub Record);

/// Color of a datum's label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatumLabel {
    /// Label color.
    pub color: String,
}

/// Fill of a datum's cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatumItemStyle {
    /// Fill color.
    pub color: String,
}

/// One cell as the engine sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDatum {
    /// Position, value and originating record.
    pub value: DatumValue,
    /// Label color.
    pub label: DatumLabel,
    /// Fill color.
    pub item_style: DatumItemStyle,
}

impl SeriesDatum {
    /// Returns the row index, if placed.
    pub fn row(&self) -> Option<usize> {
        usize::try_from(self.value.0).ok()
    }

    /// Returns the column index, if placed.
    pub fn column(&self) -> Option<usize> {
        usize::try_from(self.value.1).ok()
    }

    /// Returns the metric value.
    pub fn metric(&self) -> Option<f64> {
        self.value.2
    }

    /// Returns the originating record.
    pub fn record(&self) -> &Record {
        &self.value.3
    }
}

impl From<&Cell<'_>> for SeriesDatum {
    fn from(cell: &Cell<'_>) -> Self {
        let index = |i: Option<usize>| i.and_then(|i| i64::try_from(i).ok()).unwrap_or(-1);
        Self {
            value: DatumValue(
                index(cell.row),
                index(cell.column),
                cell.value,
                cell.record.clone(),
            ),
            label: DatumLabel {
                color: cell.label_color.to_owned(),
            },
            item_style: DatumItemStyle {
                color: cell.fill.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn template_serializes_in_engine_vocabulary() {
        let option = HeatmapOption::new(&HeatmapConfig::default());
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["xAxis"]["type"], "category");
        assert_eq!(json["xAxis"]["position"], "top");
        assert_eq!(json["yAxis"]["position"], "left");
        assert_eq!(json["xAxis"]["axisLine"]["show"], false);
        assert_eq!(json["yAxis"]["splitArea"]["areaStyle"]["color"], ROW_BAND_COLOR);
        assert_eq!(json["xAxis"]["splitArea"]["areaStyle"]["color"], "transparent");
        assert_eq!(json["grid"]["containLabel"], false);
        assert_eq!(json["grid"]["left"], 5.0);
        assert_eq!(json["visualMap"]["dimension"], 2);
        assert_eq!(json["series"]["type"], "heatmap");
        assert_eq!(json["series"]["itemStyle"]["borderColor"], GRID_LINE_COLOR);
        assert_eq!(json["series"]["label"], json!({
            "show": true,
            "fontSize": 12.0,
            "fontFamily": "sans-serif",
            "fontWeight": 400,
        }));
    }

    #[test]
    fn series_label_takes_the_configured_cell_style() {
        let style = TextStyle::new(9.0).with_weight(heatgrid_text::FontWeight::BOLD);
        let config = HeatmapConfig::default().with_cell_label_style(style.clone());
        let option = HeatmapOption::new(&config);
        assert!(option.series.label.show);
        assert_eq!(option.series.label.style, style);
        assert_eq!(option.x_axis.axis_label.font_size, 12.0);
    }

    #[test]
    fn unplaced_cells_serialize_with_sentinel_index() {
        let record = Record::new(["London", "UK"], json!({ "count": 19, "metrics": null }));
        let cell = Cell {
            row: Some(0),
            column: None,
            value: Some(19.0),
            fill: "#123456".to_owned(),
            label_color: "#FFF",
            record: &record,
        };
        let datum = SeriesDatum::from(&cell);
        let json = serde_json::to_value(&datum).unwrap();
        assert_eq!(json["value"][0], 0);
        assert_eq!(json["value"][1], -1);
        assert_eq!(json["value"][2], 19.0);
        assert_eq!(json["value"][3]["group"], json!(["London", "UK"]));
        assert_eq!(json["itemStyle"]["color"], "#123456");
        assert_eq!(json["label"]["color"], "#FFF");
        assert_eq!(datum.row(), Some(0));
        assert_eq!(datum.column(), None);
    }
}
