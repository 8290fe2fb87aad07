// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering engine seam.
//!
//! The widget does not draw. It hands [`HeatmapOption`]s to a [`ChartEngine`],
//! which runs the registered [`LayoutPass`]es on its own copy every time it
//! rebuilds its model, then draws. [`HeadlessEngine`] is a reference engine that
//! positions cells and labels without painting them.

use heatgrid_text::TextMeasurer;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::fit::TextFit;
use crate::label::format_label_with;
use crate::layout::LayoutState;
use crate::option::{HeatmapOption, SeriesDatum};
use crate::record::Record;

/// A processing step run on the engine's model before every draw.
pub trait LayoutPass {
    /// Adjusts `option` in place for a view of size `view` and returns the layout.
    fn process(
        &self,
        option: &mut HeatmapOption,
        view: Size,
        measurer: &dyn TextMeasurer,
    ) -> LayoutState;
}

/// The chart engine capability.
pub trait ChartEngine {
    /// Registers a pass to run every time the model is rebuilt.
    fn register_layout_pass(&mut self, pass: Box<dyn LayoutPass>);

    /// Replaces the model with `option` and redraws.
    fn set_option(&mut self, option: &HeatmapOption);

    /// Re-lays out and redraws the current model at the current container size.
    fn resize(&mut self);
}

/// A pointer event emitted by the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerEvent {
    /// Pointer x in client coordinates.
    pub x: f64,
    /// Pointer y in client coordinates.
    pub y: f64,
    /// Category name of the item under the pointer.
    pub name: Option<String>,
    /// Fill color of the item under the pointer.
    pub color: Option<String>,
    /// The datum under the pointer, as `{ "value": [...] }`.
    pub data: Option<Value>,
}

impl PointerEvent {
    /// Creates an event that hit nothing.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Returns the datum's value tuple.
    pub fn value_tuple(&self) -> Option<&[Value]> {
        self.data
            .as_ref()?
            .get("value")?
            .as_array()
            .map(Vec::as_slice)
    }

    /// Returns the record carried as the last element of the value tuple.
    pub fn record(&self) -> Option<Record> {
        let last = self.value_tuple()?.last()?;
        if !last.is_object() {
            return None;
        }
        Record::deserialize(last).ok()
    }
}

/// A cell positioned by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell {
    /// Index of the datum in the series.
    pub datum: usize,
    /// Cell bounds.
    pub rect: Rect,
    /// Fill color.
    pub fill: String,
    /// Border width.
    pub border_width: f64,
    /// Value label; empty when it does not fit.
    pub label: String,
    /// Value label color.
    pub label_color: String,
}

/// An axis label positioned by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedLabel {
    /// Displayed (formatted) text.
    pub text: String,
    /// Anchor point next to the grid.
    pub anchor: Point,
    /// Rotation in degrees.
    pub rotate: f64,
}

/// Everything the engine would draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Placed cells; unplaced data are not drawn.
    pub cells: Vec<RenderedCell>,
    /// Visible x-axis labels.
    pub x_labels: Vec<RenderedLabel>,
    /// Visible y-axis labels.
    pub y_labels: Vec<RenderedLabel>,
}

/// A [`ChartEngine`] that lays out and positions without painting.
pub struct HeadlessEngine<M> {
    measurer: M,
    view: Size,
    passes: Vec<Box<dyn LayoutPass>>,
    model: Option<HeatmapOption>,
    layout: Option<LayoutState>,
    scene: Scene,
}

impl<M> core::fmt::Debug for HeadlessEngine<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeadlessEngine")
            .field("view", &self.view)
            .field("passes", &self.passes.len())
            .field("model", &self.model.is_some())
            .field("layout", &self.layout)
            .field("scene", &self.scene.cells.len())
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasurer> HeadlessEngine<M> {
    /// Creates an engine drawing into a container of size `view`.
    pub fn new(measurer: M, view: Size) -> Self {
        Self {
            measurer,
            view,
            passes: Vec::new(),
            model: None,
            layout: None,
            scene: Scene::default(),
        }
    }

    /// Changes the container size; takes effect on the next rebuild.
    pub fn set_view_size(&mut self, view: Size) {
        self.view = view;
    }

    /// Returns the container size.
    pub fn view_size(&self) -> Size {
        self.view
    }

    /// Returns the model after the last layout.
    pub fn model(&self) -> Option<&HeatmapOption> {
        self.model.as_ref()
    }

    /// Returns the last layout.
    pub fn layout(&self) -> Option<&LayoutState> {
        self.layout.as_ref()
    }

    /// Returns what was drawn last.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Hit-tests a point and builds the pointer event for it.
    pub fn pointer_event(&self, x: f64, y: f64) -> PointerEvent {
        let point = Point::new(x, y);
        let hit = self
            .scene
            .cells
            .iter()
            .find(|cell| cell.rect.contains(point));
        let (Some(cell), Some(model)) = (hit, self.model.as_ref()) else {
            return PointerEvent::at(x, y);
        };
        let Some(datum) = model.series.data.get(cell.datum) else {
            return PointerEvent::at(x, y);
        };
        PointerEvent {
            x,
            y,
            name: datum
                .row()
                .and_then(|row| model.x_categories().get(row))
                .cloned(),
            color: Some(datum.item_style.color.clone()),
            data: serde_json::to_value(&datum.value)
                .ok()
                .map(|value| json!({ "value": value })),
        }
    }

    fn rebuild(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        let mut layout = None;
        for pass in &self.passes {
            layout = Some(pass.process(model, self.view, &self.measurer));
        }
        if layout.is_none() {
            tracing::debug!("no layout pass registered; nothing positioned");
        }
        self.layout = layout;
        self.scene = match (&self.model, &self.layout) {
            (Some(model), Some(layout)) => {
                let style = &model.series.label.style;
                render(model, layout, self.view, &TextFit::new(&self.measurer, style, usize::MAX))
            }
            _ => Scene::default(),
        };
    }
}

impl<M: TextMeasurer> ChartEngine for HeadlessEngine<M> {
    fn register_layout_pass(&mut self, pass: Box<dyn LayoutPass>) {
        self.passes.push(pass);
    }

    fn set_option(&mut self, option: &HeatmapOption) {
        self.model = Some(option.clone());
        self.rebuild();
    }

    fn resize(&mut self) {
        self.rebuild();
    }
}

fn render(option: &HeatmapOption, layout: &LayoutState, view: Size, fit: &TextFit<'_>) -> Scene {
    let plot = layout.plot_rect(view);
    let cell = layout.cell;
    if !(cell.width > 0.0 && cell.height > 0.0 && cell.is_finite()) {
        return Scene::default();
    }

    let cells = option
        .series
        .data
        .iter()
        .enumerate()
        .filter_map(|(index, datum)| {
            let rect = cell_rect(plot, cell, datum)?;
            let label = if option.series.label.show {
                fit.cell_label(datum.metric(), cell)
            } else {
                String::new()
            };
            Some(RenderedCell {
                datum: index,
                rect,
                fill: datum.item_style.color.clone(),
                border_width: option.series.item_style.border_width,
                label,
                label_color: datum.label.color.clone(),
            })
        })
        .collect();

    let x_label = &option.x_axis.axis_label;
    let x_labels = shown_labels(option.x_categories(), x_label.interval)
        .map(|(i, category)| RenderedLabel {
            text: format_label_with(category, x_label.max_chars),
            anchor: Point::new(plot.x0 + (i as f64 + 0.5) * cell.width, plot.y0 - x_label.margin),
            rotate: x_label.rotate,
        })
        .collect();

    let y_label = &option.y_axis.axis_label;
    let y_labels = shown_labels(option.y_categories(), y_label.interval)
        .map(|(i, category)| RenderedLabel {
            text: format_label_with(category, y_label.max_chars),
            anchor: Point::new(plot.x0 - y_label.margin, plot.y1 - (i as f64 + 0.5) * cell.height),
            rotate: y_label.rotate,
        })
        .collect();

    Scene {
        cells,
        x_labels,
        y_labels,
    }
}

// Rows run left to right from the plot's left edge, columns bottom to top.
fn cell_rect(plot: Rect, cell: Size, datum: &SeriesDatum) -> Option<Rect> {
    let row = datum.row()? as f64;
    let column = datum.column()? as f64;
    let x0 = plot.x0 + row * cell.width;
    let y1 = plot.y1 - column * cell.height;
    Some(Rect::new(x0, y1 - cell.height, x0 + cell.width, y1))
}

fn shown_labels(
    categories: &[String],
    interval: usize,
) -> impl Iterator<Item = (usize, &String)> {
    categories
        .iter()
        .enumerate()
        .step_by(interval.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use heatgrid_text::{FixedAdvanceMeasurer, HeuristicTextMeasurer};
    use serde_json::json;

    use super::*;
    use crate::config::HeatmapConfig;
    use crate::layout::AdaptiveLayout;
    use crate::option::{DatumItemStyle, DatumLabel, DatumValue};

    fn datum(row: i64, column: i64, value: f64) -> SeriesDatum {
        SeriesDatum {
            value: DatumValue(
                row,
                column,
                Some(value),
                Record::new(["r", "c"], json!({ "count": value, "metrics": null })),
            ),
            label: DatumLabel {
                color: "#FFF".to_owned(),
            },
            item_style: DatumItemStyle {
                color: "#336699".to_owned(),
            },
        }
    }

    fn engine() -> HeadlessEngine<FixedAdvanceMeasurer> {
        let mut engine =
            HeadlessEngine::new(FixedAdvanceMeasurer::new(10.0, 10.0), Size::new(400.0, 300.0));
        engine.register_layout_pass(Box::new(AdaptiveLayout::new(&HeatmapConfig::default())));
        engine
    }

    fn two_by_two() -> HeatmapOption {
        let mut option = HeatmapOption::new(&HeatmapConfig::default());
        option.x_axis.data = vec!["A".into(), "B".into()];
        option.y_axis.data = vec!["R1".into(), "R2".into()];
        option.series.data = vec![datum(0, 0, 1.0), datum(1, 1, 12345.0), datum(0, -1, 3.0)];
        option
    }

    #[test]
    fn set_option_runs_layout_on_a_copy() {
        let mut engine = engine();
        let option = two_by_two();
        engine.set_option(&option);
        assert_eq!(option.grid.top, 0.0);
        let model = engine.model().unwrap();
        assert_eq!(model.grid.top, 18.0);
        assert_eq!(model.grid.left, 33.0);
        assert!(engine.layout().is_some());
    }

    #[test]
    fn cells_are_placed_on_the_grid() {
        let mut engine = engine();
        engine.set_option(&two_by_two());
        let cells = &engine.scene().cells;
        // The datum with an unplaced column is not drawn.
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].rect, Rect::new(33.0, 156.5, 216.5, 295.0));
        assert_eq!(cells[1].rect, Rect::new(216.5, 18.0, 400.0, 156.5));
        assert_eq!(cells[0].label, "1");
        assert_eq!(cells[1].label, "12345");
        assert_eq!(cells[0].border_width, 1.0);
    }

    #[test]
    fn cell_labels_that_do_not_fit_are_dropped() {
        let mut engine = engine();
        engine.set_view_size(Size::new(120.0, 300.0));
        engine.set_option(&two_by_two());
        // 120 - 33 leaves 43.5px per cell: "12345" needs 50.
        let cells = &engine.scene().cells;
        assert_eq!(cells[0].label, "1");
        assert_eq!(cells[1].label, "");
    }

    #[test]
    fn cell_labels_are_fitted_with_the_series_label_style() {
        let mut engine = HeadlessEngine::new(HeuristicTextMeasurer, Size::new(400.0, 300.0));
        engine.register_layout_pass(Box::new(AdaptiveLayout::new(&HeatmapConfig::default())));

        let mut option = two_by_two();
        engine.set_option(&option);
        assert_eq!(engine.scene().cells[1].label, "12345");

        // At 80px "12345" is 240px wide; the cells are about 186px.
        option.series.label.style.font_size = 80.0;
        engine.set_option(&option);
        let cells = &engine.scene().cells;
        assert_eq!(cells[0].label, "1");
        assert_eq!(cells[1].label, "");
    }

    #[test]
    fn resize_relays_out_the_current_model() {
        let mut engine = engine();
        engine.set_option(&two_by_two());
        let before = engine.layout().copied().unwrap();
        engine.set_view_size(Size::new(800.0, 300.0));
        engine.resize();
        let after = engine.layout().copied().unwrap();
        assert_eq!(after.cell.width, 383.5);
        assert!(after.cell.width > before.cell.width);
    }

    #[test]
    fn thinned_axes_draw_fewer_labels() {
        let mut engine = engine();
        let mut option = HeatmapOption::new(&HeatmapConfig::default());
        option.x_axis.data = (0..100).map(|i| format!("{i:02}")).collect();
        option.y_axis.data = vec!["R".into()];
        engine.set_option(&option);
        let scene = engine.scene();
        assert_eq!(scene.x_labels.len(), 34);
        assert_eq!(scene.x_labels[1].text, "03");
        assert_eq!(scene.x_labels[0].rotate, -90.0);
        assert_eq!(scene.y_labels.len(), 1);
    }

    #[test]
    fn pointer_events_carry_the_datum() {
        let mut engine = engine();
        engine.set_option(&two_by_two());
        let event = engine.pointer_event(300.0, 50.0);
        assert_eq!(event.name.as_deref(), Some("B"));
        assert_eq!(event.color.as_deref(), Some("#336699"));
        let tuple = event.value_tuple().unwrap();
        assert_eq!(tuple.len(), 4);
        assert_eq!(tuple[2], 12345.0);
        assert_eq!(event.record().unwrap().last_category().as_deref(), Some("c"));

        let miss = engine.pointer_event(5.0, 5.0);
        assert_eq!(miss, PointerEvent::at(5.0, 5.0));
        assert_eq!(miss.record(), None);
    }

    #[test]
    fn pointer_events_deserialize_from_engine_json() {
        let event: PointerEvent = serde_json::from_value(json!({
            "x": 10, "y": 20, "name": "London", "color": "#fff",
            "data": { "value": [0, 1, 19, { "group": ["London", "UK"] }] }
        }))
        .unwrap();
        assert_eq!(event.value_tuple().map(<[Value]>::len), Some(4));
        assert_eq!(event.record().unwrap().category(1).as_deref(), Some("UK"));
    }
}
