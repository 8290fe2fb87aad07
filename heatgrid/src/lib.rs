// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heat-map widget core for dashboard chart plugins.
//!
//! A host dashboard hands the widget pre-aggregated records, each carrying a group
//! path (row category, column category, ...) and an aggregation payload. This
//! crate turns them into a categorical heat map and keeps it readable at any size:
//!
//! - **Shaping** ([`build_category_set`], [`build_series`]) derives the axis
//!   categories and one positioned [`Cell`] per record.
//! - **Metrics** ([`extract_value`]) pick the number a cell shows.
//! - **Layout** ([`AdaptiveLayout`]) sizes the grid margins from measured labels
//!   and rotates or thins out axis labels that would overlap. It runs as a
//!   [`LayoutPass`] every time the engine rebuilds its model.
//! - **Tooltips** ([`build_tooltip_html`]) describe the hovered cell.
//!
//! The chart engine that draws, the host's color scale and its query
//! configuration are capabilities ([`ChartEngine`], [`ColorAccessor`],
//! [`QueryConfig`], [`Host`]) passed in explicitly. [`HeadlessEngine`] is an
//! engine that positions everything without painting, for sizing and tests.
//!
//! ```
//! use heatgrid::{HeadlessEngine, HeatmapConfig, HeatmapWidget, Size};
//! use heatgrid_text::HeuristicTextMeasurer;
//!
//! let engine = HeadlessEngine::new(HeuristicTextMeasurer, Size::new(640.0, 480.0));
//! let widget = HeatmapWidget::new(engine, HeatmapConfig::default());
//! assert!(widget.option().series.data.is_empty());
//! ```

mod color;
mod config;
mod engine;
mod error;
mod fit;
mod host;
mod label;
mod layout;
mod metric;
mod option;
mod record;
mod shape;
mod tooltip;
mod widget;

pub use color::{
    BRIGHT_LUMA, DARK_TEXT, LIGHT_TEXT, contrasting_color, hex_luminosity, label_color,
    luminosity, to_hex,
};
pub use config::{HeatmapConfig, Margins};
pub use engine::{
    ChartEngine, HeadlessEngine, LayoutPass, PointerEvent, RenderedCell, RenderedLabel, Scene,
};
pub use error::{ConfigError, RecordIssue};
pub use fit::TextFit;
pub use host::{
    ColorAccessor, FieldDef, GroupDef, Host, MenuRequest, MetricDef, QueryConfig, StaticQuery,
    TooltipRequest,
};
pub use label::{
    DEFAULT_MAX_LABEL_CHARS, OMISSION, every_nth, format_label, format_label_with, format_value,
};
pub use layout::{
    AdaptiveLayout, AxisLabelLayout, HORIZONTAL, LayoutState, VERTICAL, band_width,
    label_interval,
};
pub use metric::{cell_value, extract_value};
pub use option::{
    AreaStyle, AxisKind, AxisLabelOption, AxisOption, AxisPosition, DatumItemStyle, DatumLabel,
    DatumValue, Emphasis, GRID_LINE_COLOR, GridOption, HeatmapOption, InRange, LineStyle,
    ROW_BAND_COLOR, SeriesDatum, SeriesItemStyle, SeriesKind, SeriesLabel, SeriesOption,
    SplitArea, SplitLine, Toggle, VisualMapOption,
};
pub use record::{Record, category_label, is_present, parse_records};
pub use shape::{
    COLUMN_GROUP, Cell, MalformedRecordPolicy, ROW_GROUP, build_category_set, build_series,
    validate_category,
};
pub use tooltip::{VOLUME_LABEL, build_tooltip_html, column_label, escape_markup};
pub use widget::HeatmapWidget;

pub use heatgrid_text::{
    FixedAdvanceMeasurer, FontFamily, FontWeight, HeuristicTextMeasurer, TextMeasurer,
    TextMetrics, TextStyle,
};
pub use kurbo::{Point, Rect, Size};
