// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metric value extraction from aggregation payloads.

use serde_json::Value;

use crate::record::{Record, is_present};

/// Returns the numeric value a payload contributes to its cell.
///
/// The payload must carry both a `count` and a `metrics` key. A set `metrics`
/// mapping takes precedence: the value is the leaf at its first key's first key
/// (`{ "price": { "sum": 1200 } }` gives `1200`), or `0` when either lookup misses
/// or the leaf is not a number. An unset `metrics` falls back to `count`. Every
/// other shape gives `0`.
pub fn extract_value(current: &Value) -> f64 {
    let Some(payload) = current.as_object() else {
        return 0.0;
    };
    let (Some(count), Some(metrics)) = (payload.get("count"), payload.get("metrics")) else {
        return 0.0;
    };
    if is_present(metrics) {
        first_leaf(metrics).unwrap_or(0.0)
    } else {
        count.as_f64().unwrap_or(0.0)
    }
}

/// Returns the cell value of a record: `None` without a payload, otherwise
/// [`extract_value`] of it.
pub fn cell_value(record: &Record) -> Option<f64> {
    record.current().map(extract_value)
}

fn first_leaf(metrics: &Value) -> Option<f64> {
    let (_, metric) = metrics.as_object()?.iter().next()?;
    let (_, leaf) = metric.as_object()?.iter().next()?;
    leaf.as_f64()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn count_is_used_when_metrics_are_unset() {
        assert_eq!(extract_value(&json!({ "count": 10, "metrics": null, "na": false })), 10.0);
        assert_eq!(extract_value(&json!({ "count": 7, "metrics": false })), 7.0);
        assert_eq!(extract_value(&json!({ "count": "7", "metrics": null })), 0.0);
    }

    #[test]
    fn metrics_take_precedence_over_count() {
        let current = json!({ "count": 50, "metrics": { "price": { "sum": 1200 } } });
        assert_eq!(extract_value(&current), 1200.0);
    }

    #[test]
    fn first_keys_are_taken_in_payload_order() {
        let current = json!({
            "count": 50,
            "metrics": { "tax": { "max": 3.5, "sum": 9 }, "price": { "sum": 1200 } }
        });
        assert_eq!(extract_value(&current), 3.5);
    }

    #[test]
    fn incomplete_metrics_give_zero() {
        assert_eq!(extract_value(&json!({ "count": 50, "metrics": { "price": {} } })), 0.0);
        assert_eq!(extract_value(&json!({ "count": 50, "metrics": {} })), 0.0);
        assert_eq!(extract_value(&json!({ "count": 50, "metrics": { "price": 1200 } })), 0.0);
        assert_eq!(
            extract_value(&json!({ "count": 50, "metrics": { "price": { "sum": "x" } } })),
            0.0
        );
    }

    #[test]
    fn other_shapes_give_zero() {
        assert_eq!(extract_value(&json!({})), 0.0);
        assert_eq!(extract_value(&json!({ "count": 10, "na": false })), 0.0);
        assert_eq!(extract_value(&json!({ "metrics": { "price": 1200 } })), 0.0);
        assert_eq!(extract_value(&json!("kdjfjfj")), 0.0);
        assert_eq!(extract_value(&json!([1, 2])), 0.0);
        assert_eq!(extract_value(&Value::Null), 0.0);
    }

    #[test]
    fn missing_payload_has_no_cell_value() {
        assert_eq!(cell_value(&Record::default()), None);
        let record = Record::new(["a", "b"], json!({ "count": 4, "metrics": null }));
        assert_eq!(cell_value(&record), Some(4.0));
    }
}
