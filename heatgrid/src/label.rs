// Copyright 2025 the Heatgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and cell label text.

/// Default axis label character limit.
pub const DEFAULT_MAX_LABEL_CHARS: usize = 20;

/// Marker appended to truncated labels.
pub const OMISSION: &str = "...";

/// Formats an axis category for display with the default character limit.
///
/// Trailing whitespace is trimmed; labels longer than 20 characters are cut and
/// end in [`OMISSION`], so the result is never longer than 20 characters.
pub fn format_label(text: &str) -> String {
    format_label_with(text, DEFAULT_MAX_LABEL_CHARS)
}

/// Formats an axis category for display, keeping at most `max_chars` characters.
pub fn format_label_with(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim_end();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_owned();
    }
    let omission_len = OMISSION.chars().count();
    if max_chars <= omission_len {
        return OMISSION.chars().take(max_chars).collect();
    }
    let mut out: String = trimmed.chars().take(max_chars - omission_len).collect();
    out.push_str(OMISSION);
    out
}

/// Keeps the categories whose position is a multiple of `step`.
///
/// These are the labels that remain visible when an axis shows one label every
/// `step` ticks. A `step` of zero keeps nothing.
pub fn every_nth<S: AsRef<str>>(categories: &[S], step: usize) -> Vec<&str> {
    if step == 0 {
        return Vec::new();
    }
    categories
        .iter()
        .step_by(step)
        .map(AsRef::<str>::as_ref)
        .collect()
}

/// Formats a cell value for display (`19`, `12.5`).
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Avoid rendering negative zero as "-0".
        return "0".to_owned();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn short_labels_only_lose_trailing_whitespace() {
        assert_eq!(format_label("London  \t"), "London");
        assert_eq!(format_label("  Padded"), "  Padded");
        assert_eq!(format_label(""), "");
    }

    #[test]
    fn long_labels_are_truncated_with_omission() {
        let label = format_label("International Business Machines");
        assert_eq!(label, "International Bus...");
        assert_eq!(label.chars().count(), 20);
        assert_eq!(format_label("exactly twenty chars"), "exactly twenty chars");
    }

    #[test]
    fn truncation_counts_characters() {
        let label = format_label("Ñandú Ñandú Ñandú Ñandú Ñandú");
        assert_eq!(label.chars().count(), 20);
        assert!(label.ends_with(OMISSION));
    }

    #[test]
    fn tiny_limits_still_respect_the_limit() {
        assert_eq!(format_label_with("abcdef", 2), "..");
        assert_eq!(format_label_with("abcdef", 4), "a...");
    }

    #[test]
    fn every_nth_keeps_multiples_of_step() {
        let cats = ["a", "b", "c", "d", "e"];
        assert_eq!(every_nth(&cats, 1), cats.to_vec());
        assert_eq!(every_nth(&cats, 2), vec!["a", "c", "e"]);
        assert_eq!(every_nth(&cats, 9), vec!["a"]);
        assert!(every_nth(&cats, 0).is_empty());
    }

    #[test]
    fn values_format_without_spurious_fraction() {
        assert_eq!(format_value(19.0), "19");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(-3.0), "-3");
    }

    proptest! {
        #[test]
        fn formatted_labels_are_bounded_and_trimmed(text in "\\PC{0,40}[ \t]{0,3}") {
            let label = format_label(&text);
            prop_assert!(label.chars().count() <= DEFAULT_MAX_LABEL_CHARS);
            prop_assert_eq!(label.trim_end(), label.as_str());
        }
    }
}
