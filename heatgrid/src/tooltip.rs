// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content for a hovered cell.

use serde_json::Value;
use smallvec::SmallVec;

use crate::engine::PointerEvent;
use crate::host::{ColorAccessor, MetricDef, QueryConfig};
use crate::label::format_value;
use crate::record::Record;

/// Label of the row showing a record's raw count next to a detail metric.
pub const VOLUME_LABEL: &str = "Volume";

/// Length of a datum's value tuple: `[row, column, value, record]`.
const VALUE_TUPLE_LEN: usize = 4;

/// One label/value line of the tooltip table.
#[derive(Clone, Debug, PartialEq)]
struct TooltipRow<'a> {
    label: &'a str,
    value: String,
    swatch: Option<&'a str>,
}

impl TooltipRow<'_> {
    fn write_html(&self, out: &mut String) {
        out.push_str(r#"<div class="zd_tooltip_info_table_row">"#);
        out.push_str(r#"<div class="zd_tooltip_info_table_row_label">"#);
        push_escaped(out, self.label);
        out.push_str(r#"</div><div class="zd_tooltip_info_table_row_value">"#);
        if let Some(color) = self.swatch {
            out.push_str(r#"<div class="color_icon active" style="background-color: "#);
            push_escaped(out, color);
            out.push_str(r#";"></div>"#);
        }
        push_escaped(out, &self.value);
        out.push_str("</div></div>");
    }
}

/// Builds the tooltip HTML for the cell under the pointer.
///
/// `column_label` is the hovered record's column category. Returns an empty
/// string when the event has no `name` or `color`, when its value tuple does not
/// have four elements, or when there is no column label.
pub fn build_tooltip_html(
    event: &PointerEvent,
    column_label: Option<&str>,
    query: &dyn QueryConfig,
    colors: &dyn ColorAccessor,
) -> String {
    let (Some(name), Some(color), Some(column_label)) =
        (event.name.as_deref(), event.color.as_deref(), column_label)
    else {
        return String::new();
    };
    if event.value_tuple().map(<[Value]>::len) != Some(VALUE_TUPLE_LEN) {
        return String::new();
    }

    let groups = query.groups();
    let group_label = |i: usize| {
        groups
            .get(i)
            .and_then(|g| g.label.as_deref())
            .unwrap_or_default()
    };

    // A tuple whose last element is not a record has no metric rows.
    let record = event.record();
    let compound: String;
    let mut rows: SmallVec<[TooltipRow<'_>; 4]> = SmallVec::new();
    rows.push(TooltipRow {
        label: group_label(0),
        value: name.to_owned(),
        swatch: None,
    });
    rows.push(TooltipRow {
        label: group_label(1),
        value: column_label.to_owned(),
        swatch: None,
    });

    if let Some(record) = &record {
        let metric = query.metrics().first();
        let label = if record.has_metrics() {
            rows.push(TooltipRow {
                label: VOLUME_LABEL,
                value: record.count().map(display_count).unwrap_or_default(),
                swatch: None,
            });
            compound = metric.and_then(MetricDef::compound_label).unwrap_or_default();
            compound.as_str()
        } else {
            metric.and_then(|m| m.label.as_deref()).unwrap_or_default()
        };
        rows.push(TooltipRow {
            label,
            value: colors.formatted(record),
            swatch: Some(color),
        });
    }

    let mut html = String::from(
        r#"<div class="zd_tooltip_info_group customized"><div class="zd_tooltip_info_table">"#,
    );
    for row in &rows {
        row.write_html(&mut html);
    }
    html.push_str("</div></div>");
    html
}

/// Returns the column label shown for a hovered record: its innermost category.
pub fn column_label(record: &Record) -> Option<String> {
    record.last_category()
}

fn display_count(count: &Value) -> String {
    match count {
        Value::Number(n) => n.as_f64().map(format_value).unwrap_or_default(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// Escapes `text` for use in HTML or XML text and attribute values.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
