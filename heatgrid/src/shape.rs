// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data shaping: records into axis categories and positioned cells.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::color::label_color;
use crate::error::RecordIssue;
use crate::host::ColorAccessor;
use crate::metric::cell_value;
use crate::record::Record;

/// Group index holding the row category (laid out along the x axis).
pub const ROW_GROUP: usize = 0;
/// Group index holding the column category (laid out along the y axis).
pub const COLUMN_GROUP: usize = 1;

/// How [`build_category_set`] treats a record without a category for the axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedRecordPolicy {
    /// Leave the record out of the axis and keep going.
    #[default]
    SkipRecord,
    /// Drop the whole axis: the first malformed record empties the category set.
    DiscardAxis,
}

/// Validates that a record has a category at `axis` of its group list.
///
/// `position` is the record's index in the payload, used for reporting.
pub fn validate_category(
    record: &Record,
    position: usize,
    axis: usize,
) -> Result<String, RecordIssue> {
    if record.group_list().is_none() {
        return Err(RecordIssue::MissingGroup { record: position });
    }
    record.category(axis).ok_or(RecordIssue::MissingCategory {
        record: position,
        axis,
    })
}

/// Collects the distinct categories at group index `axis`, in first-seen order.
pub fn build_category_set(
    records: &[Record],
    axis: usize,
    policy: MalformedRecordPolicy,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for (position, record) in records.iter().enumerate() {
        match validate_category(record, position, axis) {
            Ok(category) => {
                if seen.insert(category.clone()) {
                    categories.push(category);
                }
            }
            Err(issue) => match policy {
                MalformedRecordPolicy::SkipRecord => {
                    tracing::warn!(%issue, "skipping record for axis {axis}");
                }
                MalformedRecordPolicy::DiscardAxis => {
                    tracing::error!(%issue, "discarding categories for axis {axis}");
                    return Vec::new();
                }
            },
        }
    }
    categories
}

/// One heat-map cell, derived from a record.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<'a> {
    /// Position of the record's row category, or `None` if it is not a known category.
    pub row: Option<usize>,
    /// Position of the record's column category, or `None` if it is not a known category.
    pub column: Option<usize>,
    /// The metric value; `None` when the record has no payload.
    pub value: Option<f64>,
    /// Fill color from the host color scale.
    pub fill: String,
    /// Label color contrasting with `fill`.
    pub label_color: &'static str,
    /// The originating record.
    pub record: &'a Record,
}

impl Cell<'_> {
    /// Returns `true` when both indices point into the category sets.
    pub fn is_placed(&self) -> bool {
        self.row.is_some() && self.column.is_some()
    }
}

/// Lookup from category label to its position.
#[derive(Debug)]
struct CategoryIndex<'c>(HashMap<&'c str, usize>);

impl<'c> CategoryIndex<'c> {
    fn new(categories: &'c [String]) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            index.entry(category.as_str()).or_insert(position);
        }
        Self(index)
    }

    fn position(&self, record: &Record, axis: usize) -> Option<usize> {
        let category = record.category(axis)?;
        self.0.get(category.as_str()).copied()
    }
}

/// Builds one cell per record, in record order.
///
/// Records whose row or column category is missing from `rows` / `columns` are
/// still emitted, with `None` for that index.
pub fn build_series<'a>(
    records: &'a [Record],
    rows: &[String],
    columns: &[String],
    colors: &dyn ColorAccessor,
) -> Vec<Cell<'a>> {
    let row_index = CategoryIndex::new(rows);
    let column_index = CategoryIndex::new(columns);
    records
        .iter()
        .map(|record| {
            let fill = colors.color(record);
            Cell {
                row: row_index.position(record, ROW_GROUP),
                column: column_index.position(record, COLUMN_GROUP),
                value: cell_value(record),
                label_color: label_color(&fill),
                fill,
                record,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::record::parse_records;

    struct Flat(&'static str);

    impl ColorAccessor for Flat {
        fn domain(&self) -> (f64, f64) {
            (0.0, 100.0)
        }

        fn color_range(&self) -> Vec<String> {
            vec![self.0.to_owned()]
        }

        fn color(&self, _record: &Record) -> String {
            self.0.to_owned()
        }

        fn formatted(&self, _record: &Record) -> String {
            String::new()
        }
    }

    fn cities() -> Vec<Record> {
        parse_records(&json!([
            { "group": ["London", "UK"], "current": { "count": 19, "metrics": null } },
            { "group": ["Calgary", "CA"], "current": { "count": 11, "metrics": null } },
            { "group": ["London", "CA"], "current": { "count": 4, "metrics": null } },
        ]))
    }

    #[test]
    fn categories_are_unique_in_first_seen_order() {
        let records = cities();
        let policy = MalformedRecordPolicy::default();
        assert_eq!(build_category_set(&records, ROW_GROUP, policy), ["London", "Calgary"]);
        assert_eq!(build_category_set(&records, COLUMN_GROUP, policy), ["UK", "CA"]);
    }

    #[test]
    fn malformed_records_are_skipped_by_default() {
        let mut records = cities();
        records.insert(1, Record::new(["Oslo"], json!({ "count": 1 })));
        records.push(Record::default());
        let rows = build_category_set(&records, ROW_GROUP, MalformedRecordPolicy::SkipRecord);
        let columns =
            build_category_set(&records, COLUMN_GROUP, MalformedRecordPolicy::SkipRecord);
        assert_eq!(rows, ["London", "Oslo", "Calgary"]);
        assert_eq!(columns, ["UK", "CA"]);
    }

    #[test]
    fn discard_policy_empties_the_axis() {
        let mut records = cities();
        records.push(Record::new(["Oslo"], json!({ "count": 1 })));
        let policy = MalformedRecordPolicy::DiscardAxis;
        assert!(build_category_set(&records, COLUMN_GROUP, policy).is_empty());
        assert_eq!(
            build_category_set(&records, ROW_GROUP, policy),
            ["London", "Calgary", "Oslo"]
        );
    }

    #[test]
    fn validation_names_the_problem() {
        assert_eq!(
            validate_category(&Record::default(), 3, ROW_GROUP),
            Err(RecordIssue::MissingGroup { record: 3 })
        );
        let record = Record::new(["London", ""], json!(null));
        assert_eq!(
            validate_category(&record, 0, COLUMN_GROUP),
            Err(RecordIssue::MissingCategory { record: 0, axis: 1 })
        );
        assert_eq!(validate_category(&record, 0, ROW_GROUP).as_deref(), Ok("London"));
    }

    #[test]
    fn series_marks_unknown_categories() {
        let records = cities();
        let rows = build_category_set(&records, ROW_GROUP, MalformedRecordPolicy::default());
        let cells = build_series(&records, &rows, &[], &Flat("#FFFFFF"));
        assert_eq!(cells.len(), records.len());
        assert_eq!(cells[0].row, Some(0));
        assert_eq!(cells[0].column, None);
        assert_eq!(cells[0].value, Some(19.0));
        assert!(!cells[0].is_placed());
        assert_eq!(cells[1].row, Some(1));
        assert_eq!(cells[2].row, Some(0));
        assert!(core::ptr::eq(cells[1].record, &records[1]));
    }

    #[test]
    fn series_colors_come_from_the_host() {
        let records = cities();
        let cells = build_series(&records, &[], &[], &Flat("#FFFFFF"));
        assert!(cells.iter().all(|c| c.fill == "#FFFFFF" && c.label_color == "#000"));
        let cells = build_series(&records, &[], &[], &Flat("#101010"));
        assert!(cells.iter().all(|c| c.label_color == "#FFF"));
    }

    #[test]
    fn series_without_payload_has_no_value() {
        let records = parse_records(&json!([{ "group": ["a", "b"] }, "junk"]));
        let rows = vec!["a".to_owned()];
        let columns = vec!["b".to_owned()];
        let cells = build_series(&records, &rows, &columns, &Flat("#000"));
        assert_eq!(cells.len(), 2);
        assert!(cells[0].is_placed());
        assert_eq!(cells[0].value, None);
        assert_eq!((cells[1].row, cells[1].column, cells[1].value), (None, None, None));
    }

    #[test]
    fn non_list_payload_gives_empty_series() {
        let records = parse_records(&json!({ "group": ["a", "b"] }));
        assert!(build_series(&records, &[], &[], &Flat("#000")).is_empty());
    }

    proptest! {
        #[test]
        fn category_sets_never_repeat(
            groups in proptest::collection::vec(
                proptest::collection::vec("[a-d]{0,2}", 0..3),
                0..40,
            )
        ) {
            let records: Vec<Record> = groups
                .iter()
                .map(|g| Record::new(g.iter().cloned(), json!({ "count": 1, "metrics": null })))
                .collect();
            let set = build_category_set(&records, ROW_GROUP, MalformedRecordPolicy::SkipRecord);
            let unique: HashSet<&String> = set.iter().collect();
            prop_assert_eq!(unique.len(), set.len());
            drop(unique);

            // First-occurrence order: each category appears where it was first seen.
            let mut expected: Vec<String> = Vec::new();
            for record in &records {
                if let Some(c) = record.category(ROW_GROUP)
                    && !expected.contains(&c)
                {
                    expected.push(c);
                }
            }
            prop_assert_eq!(set, expected);
        }
    }
}
