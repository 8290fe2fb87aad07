// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget controller binding shaping, layout and tooltips to host events.

use serde_json::Value;

use crate::config::HeatmapConfig;
use crate::engine::{ChartEngine, PointerEvent};
use crate::host::{Host, MenuRequest, TooltipRequest};
use crate::layout::AdaptiveLayout;
use crate::option::{HeatmapOption, SeriesDatum};
use crate::record::parse_records;
use crate::shape::{COLUMN_GROUP, ROW_GROUP, build_category_set, build_series};
use crate::tooltip::{build_tooltip_html, column_label};

/// A heat-map widget driving a chart engine.
///
/// The widget owns the render options; the engine keeps its own laid-out copy.
#[derive(Debug)]
pub struct HeatmapWidget<E> {
    engine: E,
    config: HeatmapConfig,
    option: HeatmapOption,
}

impl<E: ChartEngine> HeatmapWidget<E> {
    /// Creates a widget and registers the adaptive layout pass with `engine`.
    pub fn new(mut engine: E, config: HeatmapConfig) -> Self {
        engine.register_layout_pass(Box::new(AdaptiveLayout::new(&config)));
        Self {
            option: HeatmapOption::new(&config),
            engine,
            config,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the engine mutably, e.g. to change its view size before [`Self::on_resize`].
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Returns the widget configuration.
    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Returns the render options as last handed to the engine (before layout).
    pub fn option(&self) -> &HeatmapOption {
        &self.option
    }

    /// Replaces the chart data with a new payload of records.
    ///
    /// Categories and cells are rebuilt from scratch.
    #[tracing::instrument(skip_all)]
    pub fn on_data_update(&mut self, host: &dyn Host, payload: &Value) {
        let colors = host.colors();
        let (min, max) = colors.domain();
        self.option.visual_map.min = min;
        self.option.visual_map.max = max;
        self.option.visual_map.in_range.color = colors.color_range();

        let records = parse_records(payload);
        let policy = self.config.malformed_records;
        let rows = build_category_set(&records, ROW_GROUP, policy);
        let columns = build_category_set(&records, COLUMN_GROUP, policy);
        let data: Vec<SeriesDatum> = build_series(&records, &rows, &columns, colors)
            .iter()
            .map(SeriesDatum::from)
            .collect();
        tracing::debug!(
            records = records.len(),
            rows = rows.len(),
            columns = columns.len(),
            "data updated"
        );

        self.option.x_axis.data = rows;
        self.option.y_axis.data = columns;
        self.option.series.data = data;
        self.engine.set_option(&self.option);
    }

    /// Re-lays out the chart after the container changed size.
    pub fn on_resize(&mut self) {
        self.engine.resize();
    }

    /// Shows the tooltip for the cell under the pointer.
    pub fn on_mouse_move(&self, host: &mut dyn Host, event: &PointerEvent) {
        let column = event.record().as_ref().and_then(column_label);
        let content = build_tooltip_html(event, column.as_deref(), host.query(), host.colors());
        host.show_tooltip(TooltipRequest {
            x: event.x,
            y: event.y,
            content,
        });
    }

    /// Hides the tooltip.
    pub fn on_mouse_out(&self, host: &mut dyn Host) {
        host.hide_tooltip();
    }

    /// Hides the tooltip and opens the context menu for the clicked record.
    pub fn on_click(&self, host: &mut dyn Host, event: &PointerEvent) {
        host.hide_tooltip();
        let Some(record) = event.record() else {
            tracing::debug!(x = event.x, y = event.y, "click outside any cell");
            return;
        };
        host.show_menu(MenuRequest {
            x: event.x,
            y: event.y,
            record,
        });
    }
}
