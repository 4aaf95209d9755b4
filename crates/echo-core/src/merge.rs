//! Merging of selected time slots into display ranges.
//!
//! A selection arrives in insertion order and may contain duplicates or
//! overlapping slots. Merging sorts it by start time and folds every slot whose
//! start does not exceed the running end into the current range, so touching
//! (`9-10`, `10-11`) and overlapping (`9-11`, `10-12`) slots both collapse.

use crate::slot::{SlotError, SlotToken, TimeInterval};

/// Separator between merged ranges in a display string.
pub const RANGE_SEPARATOR: &str = ", ";

/// Decodes a selection of token strings into intervals, failing on the first
/// malformed token.
pub fn parse_selection<S: AsRef<str>>(selection: &[S]) -> Result<Vec<TimeInterval>, SlotError> {
    selection
        .iter()
        .map(|token| token.as_ref().parse::<SlotToken>().map(SlotToken::interval))
        .collect()
}

/// Collapses intervals into a start-ascending, non-overlapping list.
pub fn merge_intervals(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort_by(|a, b| a.start().total_cmp(&b.start()));

    let mut iter = intervals.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if next.start() <= current.end() {
            current.extend_to(next.end());
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

/// Renders merged ranges as labels joined by [`RANGE_SEPARATOR`].
pub fn format_merged(ranges: &[TimeInterval]) -> String {
    ranges
        .iter()
        .map(|range| range.label())
        .collect::<Vec<_>>()
        .join(RANGE_SEPARATOR)
}

/// Merges a selection of slot tokens and formats the result for display.
///
/// An empty selection yields an empty string.
///
/// ```
/// let times = echo_core::merge_and_format(&["14-15", "9-10", "10-11"]).unwrap();
/// assert_eq!(times, "9:00 AM - 11:00 AM, 2:00 PM - 3:00 PM");
/// ```
pub fn merge_and_format<S: AsRef<str>>(selection: &[S]) -> Result<String, SlotError> {
    let intervals = parse_selection(selection)?;
    let merged = merge_intervals(intervals);
    tracing::trace!(
        selected = selection.len(),
        merged = merged.len(),
        "merged time slots"
    );
    Ok(format_merged(&merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals(tokens: &[&str]) -> Vec<TimeInterval> {
        parse_selection(tokens).unwrap()
    }

    fn retokenize(ranges: &[TimeInterval]) -> Vec<String> {
        ranges
            .iter()
            .map(|r| SlotToken::new(*r).to_string())
            .collect()
    }

    /// All permutations of a small slice (Heap's algorithm).
    fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
        fn heap(k: usize, items: &mut Vec<&'static str>, out: &mut Vec<Vec<&'static str>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            for i in 0..k {
                heap(k - 1, items, out);
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
            }
        }
        let mut items = items.to_vec();
        let mut out = Vec::new();
        heap(items.len(), &mut items, &mut out);
        out
    }

    #[test]
    fn empty_selection_is_empty_string() {
        let empty: [&str; 0] = [];
        assert_eq!(merge_and_format(&empty).unwrap(), "");
        assert!(merge_intervals(Vec::new()).is_empty());
    }

    #[test]
    fn merges_touching_slots() {
        let result = merge_and_format(&["9-10", "10-11", "14-15"]).unwrap();
        assert_eq!(result, "9:00 AM - 11:00 AM, 2:00 PM - 3:00 PM");
    }

    #[test]
    fn merges_genuinely_overlapping_slots() {
        // 10-12 starts before 9-11 ends without touching its boundary
        let merged = merge_intervals(intervals(&["10-12", "9-11"]));
        assert_eq!(retokenize(&merged), vec!["9-12"]);

        let merged = merge_intervals(intervals(&["9-12", "10-11"]));
        assert_eq!(retokenize(&merged), vec!["9-12"]);
    }

    #[test]
    fn keeps_gaps_separate() {
        let merged = merge_intervals(intervals(&["9-9.5", "10-10.5"]));
        assert_eq!(retokenize(&merged), vec!["9-9.5", "10-10.5"]);
    }

    #[test]
    fn collapses_duplicates() {
        let result = merge_and_format(&["9.5-10", "9.5-10", "9.5-10"]).unwrap();
        assert_eq!(result, "9:30 AM - 10:00 AM");
    }

    #[test]
    fn half_hour_chain_reaches_midnight() {
        let result = merge_and_format(&["23-23.5", "22.5-23", "23.5-24"]).unwrap();
        assert_eq!(result, "10:30 PM - 12:00 AM");
    }

    #[test]
    fn malformed_token_fails_fast() {
        let err = merge_and_format(&["9-10", "11-10"]).unwrap_err();
        assert!(matches!(err, SlotError::InvalidSlotToken { ref token, .. } if token == "11-10"));
    }

    #[test]
    fn output_is_sorted_disjoint_and_covers_inputs() {
        let tokens = ["14-15", "9-10", "9.5-11", "16-17", "15-15.5", "20-21"];
        let inputs = intervals(&tokens);
        let merged = merge_intervals(inputs.clone());

        assert!(merged.len() <= inputs.len());
        for pair in merged.windows(2) {
            assert!(pair[0].end() < pair[1].start(), "ranges overlap: {pair:?}");
        }
        for input in &inputs {
            let covering = merged.iter().filter(|m| m.covers(*input)).count();
            assert_eq!(covering, 1, "input {input:?} covered {covering} times");
        }
    }

    #[test]
    fn merging_is_idempotent() {
        let first = merge_intervals(intervals(&["13-14", "9-10", "10-11.5", "11-12", "18-19"]));
        let again = merge_intervals(intervals(
            &retokenize(&first).iter().map(String::as_str).collect::<Vec<_>>(),
        ));
        assert_eq!(first, again);
        assert_eq!(format_merged(&first), format_merged(&again));
    }

    #[test]
    fn merging_is_order_independent() {
        let tokens = ["9-10", "14-15", "10-11", "9.5-10.5", "13.5-14"];
        let expected = merge_and_format(&tokens).unwrap();
        for order in permutations(&tokens) {
            assert_eq!(merge_and_format(&order).unwrap(), expected, "order {order:?}");
        }
    }
}
