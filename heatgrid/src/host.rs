// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities provided by the host dashboard.
//!
//! The host hands the widget a single controller object. Here it is split into
//! the narrow capabilities each component needs, and those are passed explicitly.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// The host's color scale for the metric driving the heat map.
pub trait ColorAccessor {
    /// Returns the `(min, max)` metric domain covered by the color range.
    fn domain(&self) -> (f64, f64);

    /// Returns the color stops of the gradient, low to high.
    fn color_range(&self) -> Vec<String>;

    /// Returns the fill color of a record's cell.
    fn color(&self, record: &Record) -> String;

    /// Returns the display text of a record's metric value.
    fn formatted(&self, record: &Record) -> String;
}

/// One configured grouping of the host query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDef {
    /// Display label of the grouping (e.g. `"City"`).
    pub label: Option<String>,
}

/// The field a compound metric aggregates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    /// Display label of the field.
    pub label: Option<String>,
}

/// One configured metric of the host query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricDef {
    /// Plain display label (e.g. `"Volume"`).
    pub label: Option<String>,
    /// Aggregated field, for compound metrics.
    pub field: Option<FieldDef>,
    /// Aggregation function name, for compound metrics (e.g. `"sum"`).
    pub function: Option<String>,
}

impl MetricDef {
    /// Returns `"field (function)"` when both parts are configured.
    pub fn compound_label(&self) -> Option<String> {
        let field = self.field.as_ref()?.label.as_deref()?;
        let function = self.function.as_deref()?;
        Some(format!("{field} ({function})"))
    }
}

/// The host's current query configuration.
pub trait QueryConfig {
    /// Returns the configured groupings, outermost first.
    fn groups(&self) -> &[GroupDef];

    /// Returns the configured metrics.
    fn metrics(&self) -> &[MetricDef];
}

/// A query configuration held as plain data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticQuery {
    /// Configured groupings.
    pub groups: Vec<GroupDef>,
    /// Configured metrics.
    pub metrics: Vec<MetricDef>,
}

impl QueryConfig for StaticQuery {
    fn groups(&self) -> &[GroupDef] {
        &self.groups
    }

    fn metrics(&self) -> &[MetricDef] {
        &self.metrics
    }
}

/// A tooltip display request.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRequest {
    /// Pointer x in client coordinates.
    pub x: f64,
    /// Pointer y in client coordinates.
    pub y: f64,
    /// HTML fragment to display.
    pub content: String,
}

/// A context-menu display request.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuRequest {
    /// Pointer x in client coordinates.
    pub x: f64,
    /// Pointer y in client coordinates.
    pub y: f64,
    /// The record under the pointer.
    pub record: Record,
}

/// Everything the widget needs from the host dashboard.
pub trait Host {
    /// Returns the color scale.
    fn colors(&self) -> &dyn ColorAccessor;

    /// Returns the query configuration.
    fn query(&self) -> &dyn QueryConfig;

    /// Shows (or replaces) the tooltip.
    fn show_tooltip(&mut self, request: TooltipRequest);

    /// Hides the tooltip.
    fn hide_tooltip(&mut self);

    /// Shows the context menu.
    fn show_menu(&mut self, request: MenuRequest);
}
