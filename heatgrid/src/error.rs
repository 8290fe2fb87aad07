// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Shaping, layout and tooltip operations never fail outward; these types name the
//! reason something was skipped so it can be logged.

use thiserror::Error;

/// Why a record could not contribute a category to an axis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIssue {
    /// The record's `group` field is missing or not a list.
    #[error("record {record} has no group list")]
    MissingGroup {
        /// Position of the record in the input payload.
        record: usize,
    },
    /// The record's `group` list has no usable label at the axis position.
    #[error("record {record} has no category at group index {axis}")]
    MissingCategory {
        /// Position of the record in the input payload.
        record: usize,
        /// The group index that was looked up.
        axis: usize,
    },
}

/// Errors returned when loading a [`HeatmapConfig`](crate::HeatmapConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or does not match the expected shape.
    #[error("invalid heat-map configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric setting is negative or not finite.
    #[error("`{field}` must be a finite, non-negative number (got {value})")]
    OutOfRange {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}
