// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a headless heat-map scene.

use heatgrid::{GRID_LINE_COLOR, HeatmapOption, RenderedLabel, Scene, escape_markup};
use kurbo::Size;

pub(crate) fn to_svg_string(scene: &Scene, option: &HeatmapOption, view: Size) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}" preserveAspectRatio="xMinYMin meet">"#,
        w = view.width,
        h = view.height,
    ));
    out.push('\n');

    let cell_font_size = option.series.label.style.font_size;
    for cell in &scene.cells {
        let r = cell.rect;
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            escape_markup(&cell.fill),
        ));
        if cell.border_width > 0.0 {
            out.push_str(&format!(
                r#" stroke="{GRID_LINE_COLOR}" stroke-width="{}""#,
                cell.border_width
            ));
        }
        out.push_str("/>\n");
        if !cell.label.is_empty() {
            let center = r.center();
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="middle" text-anchor="middle" fill="{}">{}</text>"#,
                center.x,
                center.y,
                cell_font_size,
                escape_markup(&cell.label_color),
                escape_markup(&cell.label),
            ));
            out.push('\n');
        }
    }

    let font_size = option.x_axis.axis_label.font_size;
    for label in &scene.x_labels {
        // Vertical labels read bottom to top and end at the grid.
        let anchor = if label.rotate == 0.0 { "middle" } else { "start" };
        write_label(&mut out, label, font_size, anchor, "alphabetic");
    }
    let font_size = option.y_axis.axis_label.font_size;
    for label in &scene.y_labels {
        write_label(&mut out, label, font_size, "end", "middle");
    }

    out.push_str("</svg>\n");
    out
}

fn write_label(out: &mut String, label: &RenderedLabel, font_size: f64, anchor: &str, baseline: &str) {
    let p = label.anchor;
    out.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="{font_size}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
        p.x, p.y
    ));
    if label.rotate != 0.0 {
        out.push_str(&format!(r#" transform="rotate({} {} {})""#, label.rotate, p.x, p.y));
    }
    out.push('>');
    out.push_str(&escape_markup(&label.text));
    out.push_str("</text>\n");
}
