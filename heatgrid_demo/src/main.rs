// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless heat-map demo.
//!
//! Usage: `heatgrid_demo [records.json] [config.json]`
//!
//! Feeds records (sample data when no file is given) to the widget, lays the chart
//! out at several container sizes and writes `heatgrid_demo.json` with the
//! laid-out render options plus one SVG preview per size. Set `RUST_LOG=debug` to
//! see the layout decisions.

mod svg;

use anyhow::{Context, Result};
use heatgrid::{
    ColorAccessor, GroupDef, HeadlessEngine, HeatmapConfig, HeatmapOption, HeatmapWidget, Host,
    LayoutState, MenuRequest, MetricDef, QueryConfig, Record, StaticQuery, TooltipRequest,
    cell_value, parse_records, to_hex,
};
use heatgrid_text::HeuristicTextMeasurer;
use kurbo::Size;
use peniko::Color;
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const VIEWS: [Size; 4] = [
    Size::new(900.0, 420.0),
    Size::new(480.0, 320.0),
    Size::new(240.0, 200.0),
    Size::new(120.0, 90.0),
];

const CITIES: [&str; 12] = [
    "London",
    "Calgary",
    "Oslo",
    "Saint Petersburg",
    "Rio de Janeiro",
    "Greater Los Angeles Metropolitan Area",
    "Lagos",
    "Kyoto",
    "Montevideo",
    "Reykjavik",
    "Ulaanbaatar",
    "Wellington",
];

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A linear two-stop color scale over the observed metric range.
#[derive(Debug)]
struct Gradient {
    domain: (f64, f64),
    low: Color,
    high: Color,
}

impl Gradient {
    fn from_records(records: &[Record]) -> Self {
        let domain = records
            .iter()
            .filter_map(cell_value)
            .fold(None, |range: Option<(f64, f64)>, v| match range {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
            .unwrap_or((0.0, 0.0));
        Self {
            domain,
            low: Color::from_rgb8(0xf7, 0xfb, 0xff),
            high: Color::from_rgb8(0x08, 0x30, 0x6b),
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "t is clamped to [0, 1]; f32 precision is plenty for a color"
    )]
    fn at(&self, value: f64) -> Color {
        let (min, max) = self.domain;
        let t = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        let [r0, g0, b0, _] = self.low.components;
        let [r1, g1, b1, _] = self.high.components;
        Color::new([
            r0 + (r1 - r0) * t,
            g0 + (g1 - g0) * t,
            b0 + (b1 - b0) * t,
            1.0,
        ])
    }
}

impl ColorAccessor for Gradient {
    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn color_range(&self) -> Vec<String> {
        vec![to_hex(self.low), to_hex(self.high)]
    }

    fn color(&self, record: &Record) -> String {
        to_hex(self.at(cell_value(record).unwrap_or(self.domain.0)))
    }

    fn formatted(&self, record: &Record) -> String {
        cell_value(record).map_or_else(String::new, heatgrid::format_value)
    }
}

/// A host that logs tooltip and menu requests.
#[derive(Debug)]
struct DemoHost {
    colors: Gradient,
    query: StaticQuery,
}

impl Host for DemoHost {
    fn colors(&self) -> &dyn ColorAccessor {
        &self.colors
    }

    fn query(&self) -> &dyn QueryConfig {
        &self.query
    }

    fn show_tooltip(&mut self, request: TooltipRequest) {
        tracing::info!(x = request.x, y = request.y, content = %request.content, "tooltip");
    }

    fn hide_tooltip(&mut self) {
        tracing::info!("tooltip hidden");
    }

    fn show_menu(&mut self, request: MenuRequest) {
        tracing::info!(
            x = request.x,
            y = request.y,
            record = ?request.record.group,
            "context menu"
        );
    }
}

#[derive(Serialize)]
struct LayoutDump<'a> {
    view: [f64; 2],
    layout: LayoutSummary,
    option: &'a HeatmapOption,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutSummary {
    x_rotate: f64,
    x_interval: usize,
    y_interval: usize,
    border_width: f64,
    cell: [f64; 2],
}

impl From<&LayoutState> for LayoutSummary {
    fn from(layout: &LayoutState) -> Self {
        Self {
            x_rotate: layout.x_label.rotate,
            x_interval: layout.x_label.interval,
            y_interval: layout.y_label.interval,
            border_width: layout.border_width,
            cell: [layout.cell.width, layout.cell.height],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
        .with(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let payload = match args.next() {
        Some(path) => {
            let text =
                std::fs::read_to_string(&path).with_context(|| format!("read records {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parse records {path}"))?
        }
        None => sample_payload(),
    };
    let config = match args.next() {
        Some(path) => {
            let text =
                std::fs::read_to_string(&path).with_context(|| format!("read config {path}"))?;
            HeatmapConfig::from_json(&text).with_context(|| format!("load config {path}"))?
        }
        None => HeatmapConfig::default(),
    };

    let records = parse_records(&payload);
    let mut host = DemoHost {
        colors: Gradient::from_records(&records),
        query: StaticQuery {
            groups: vec![
                GroupDef {
                    label: Some("City".into()),
                },
                GroupDef {
                    label: Some("Weekday".into()),
                },
            ],
            metrics: vec![MetricDef {
                label: Some("Orders".into()),
                field: Some(heatgrid::FieldDef {
                    label: Some("Order total".into()),
                }),
                function: Some("sum".into()),
            }],
        },
    };

    let engine = HeadlessEngine::new(HeuristicTextMeasurer, VIEWS[0]);
    let mut widget = HeatmapWidget::new(engine, config);
    widget.on_data_update(&host, &payload);

    let mut models = Vec::with_capacity(VIEWS.len());
    for view in VIEWS {
        widget.engine_mut().set_view_size(view);
        widget.on_resize();
        let engine = widget.engine();
        let (Some(model), Some(layout)) = (engine.model(), engine.layout()) else {
            tracing::warn!(width = view.width, height = view.height, "nothing laid out");
            continue;
        };
        tracing::info!(
            width = view.width,
            height = view.height,
            top = layout.grid.top,
            left = layout.grid.left,
            x_rotate = layout.x_label.rotate,
            x_interval = layout.x_label.interval,
            y_interval = layout.y_label.interval,
            border_width = layout.border_width,
            "laid out"
        );

        let svg_path = format!("heatgrid_demo_{}x{}.svg", view.width, view.height);
        let svg = svg::to_svg_string(engine.scene(), model, view);
        std::fs::write(&svg_path, svg).with_context(|| format!("write {svg_path}"))?;
        models.push(serde_json::to_value(LayoutDump {
            view: [view.width, view.height],
            layout: LayoutSummary::from(layout),
            option: model,
        })?);
    }

    // Hover and click the first drawn cell, as the engine would on pointer input.
    let target = widget
        .engine()
        .scene()
        .cells
        .first()
        .map(|cell| cell.rect.center());
    if let Some(point) = target {
        let event = widget.engine().pointer_event(point.x, point.y);
        widget.on_mouse_move(&mut host, &event);
        widget.on_mouse_out(&mut host);
        widget.on_click(&mut host, &event);
    }

    let out = serde_json::to_string_pretty(&Value::Array(models))?;
    std::fs::write("heatgrid_demo.json", out).context("write heatgrid_demo.json")?;
    println!("wrote heatgrid_demo.json");
    Ok(())
}

fn sample_payload() -> Value {
    let mut records = Vec::with_capacity(CITIES.len() * DAYS.len());
    for (i, city) in CITIES.iter().enumerate() {
        for (j, day) in DAYS.iter().enumerate() {
            let count = (i * 7 + j * 13) % 23 + 1;
            // Every third city reports order totals on top of the plain count.
            let metrics = if i % 3 == 0 {
                json!({ "order_total": { "sum": count * 42 } })
            } else {
                Value::Null
            };
            records.push(json!({
                "group": [city, day],
                "current": { "count": count, "metrics": metrics },
            }));
        }
    }
    Value::Array(records)
}
