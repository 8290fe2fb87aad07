// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host data records.
//!
//! Records arrive pre-aggregated from the host query layer. Their shape is only
//! loosely guaranteed, so the fields that vary stay as JSON values and the
//! accessors here decide what counts as usable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One aggregated datum: a group path plus its aggregation payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Ordered category labels; index 0 is the row category, index 1 the column category.
    #[serde(default)]
    pub group: Value,
    /// Aggregation payload: `{ "count": n, "metrics": { id: { fn: value } } | null }`.
    #[serde(default)]
    pub current: Value,
    /// Any other fields the host attached, kept so the record can be handed back verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Creates a record from a group path and a payload.
    pub fn new<I, S>(group: I, current: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group: Value::Array(group.into_iter().map(|s| Value::String(s.into())).collect()),
            current,
            extra: Map::new(),
        }
    }

    /// Returns the group list, if `group` is a list.
    pub fn group_list(&self) -> Option<&[Value]> {
        self.group.as_array().map(Vec::as_slice)
    }

    /// Returns the category label at `index` of the group list.
    pub fn category(&self, index: usize) -> Option<String> {
        self.group_list()?.get(index).and_then(category_label)
    }

    /// Returns the label of the last group entry (the innermost grouping).
    pub fn last_category(&self) -> Option<String> {
        self.group_list()?.last().and_then(category_label)
    }

    /// Returns the aggregation payload, or `None` when it is absent or null.
    pub fn current(&self) -> Option<&Value> {
        match &self.current {
            Value::Null => None,
            current => Some(current),
        }
    }

    /// Returns `true` when the payload carries a detail `metrics` mapping.
    pub fn has_metrics(&self) -> bool {
        self.current
            .get("metrics")
            .is_some_and(is_present)
    }

    /// Returns the raw `count` of the payload.
    pub fn count(&self) -> Option<&Value> {
        self.current.get("count")
    }
}

/// Converts one group entry into a category label.
///
/// Non-empty strings are used as-is and non-zero numbers are rendered as text.
/// Everything else (null, empty strings, zero, booleans, nested values) is not a
/// usable category.
pub fn category_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns whether a payload value counts as set.
///
/// Null, `false`, zero and the empty string are unset; every other value,
/// including empty objects and lists, is set.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a host data payload into records.
///
/// A payload that is not a list yields no records. List elements that are not
/// objects become empty records so that record positions stay aligned with the
/// payload; downstream shaping treats them as malformed.
pub fn parse_records(payload: &Value) -> Vec<Record> {
    let Some(items) = payload.as_array() else {
        tracing::warn!(kind = value_kind(payload), "data payload is not a list; ignoring it");
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(_) => Record::deserialize(item).unwrap_or_else(|err| {
                tracing::warn!(record = index, %err, "unreadable record");
                Record::default()
            }),
            other => {
                tracing::warn!(record = index, kind = value_kind(other), "record is not an object");
                Record::default()
            }
        })
        .collect()
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
