//! Offset ranges and range correspondence entries.
//!
//! Producers describe how a product lines up with its source document as a list of
//! [`RangeEntry`] values: one source interval fanning out to zero or more target intervals.
//! All offsets are character offsets (Unicode scalar values) from the start of a document.

use serde::{Deserialize, Serialize};

/// A half-open character-offset range (`start..end`) in a document.
///
/// Deserialized ranges go through [`OffsetRange::new`], so reversed bounds from a producer are
/// swapped as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawOffsetRange")]
pub struct OffsetRange {
    /// Range start offset (inclusive).
    pub start: usize,
    /// Range end offset (exclusive).
    pub end: usize,
}

#[derive(Deserialize)]
struct RawOffsetRange {
    start: usize,
    end: usize,
}

impl From<RawOffsetRange> for OffsetRange {
    fn from(raw: RawOffsetRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl OffsetRange {
    /// Create a new range; reversed bounds are swapped so that `start <= end` holds.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A zero-length range at `offset`.
    pub fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns `true` if `start <= offset < end`.
    ///
    /// Zero-length ranges contain nothing.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// One source interval mapped to zero or more target intervals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeEntry {
    /// Interval in the document the lookup starts from.
    pub source: OffsetRange,
    /// Corresponding intervals in the linked document.
    #[serde(default)]
    pub targets: Vec<OffsetRange>,
}

impl RangeEntry {
    /// Create a new entry.
    pub fn new(source: OffsetRange, targets: Vec<OffsetRange>) -> Self {
        Self { source, targets }
    }

    /// The placeholder entry carried by the empty product: offset 0 mapped to offset 0.
    pub fn degenerate() -> Self {
        Self {
            source: OffsetRange::empty_at(0),
            targets: vec![OffsetRange::empty_at(0)],
        }
    }
}

/// Which of a product's two tables a lookup uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDirection {
    /// Source document offset to product offset(s) (`rangeMap`).
    Forward,
    /// Product offset to source document offset(s) (`rangeMapRev`).
    Reverse,
}

/// Find the first entry whose source interval contains `offset`.
///
/// Tables are not required to be sorted, so this is a linear scan in table order.
pub fn find_containing(entries: &[RangeEntry], offset: usize) -> Option<&RangeEntry> {
    entries.iter().find(|entry| entry.source.contains(offset))
}

/// Resolve `offset` to the linked intervals, falling back to a zero-length range at the start
/// of the linked document when no entry contains it.
pub fn resolve_targets(entries: &[RangeEntry], offset: usize) -> Vec<OffsetRange> {
    match find_containing(entries, offset) {
        Some(entry) => entry.targets.clone(),
        None => {
            tracing::trace!(offset, entries = entries.len(), "no range entry contains offset");
            vec![OffsetRange::empty_at(0)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: usize, end: usize, targets: &[(usize, usize)]) -> RangeEntry {
        RangeEntry::new(
            OffsetRange::new(start, end),
            targets
                .iter()
                .map(|&(s, e)| OffsetRange::new(s, e))
                .collect(),
        )
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = OffsetRange::new(2, 5);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert!(!OffsetRange::empty_at(3).contains(3));
    }

    #[test]
    fn test_new_orders_bounds() {
        let range = OffsetRange::new(7, 3);
        assert_eq!(range, OffsetRange { start: 3, end: 7 });
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_first_match_wins() {
        let entries = vec![entry(0, 10, &[(0, 1)]), entry(5, 8, &[(2, 3)])];
        let found = find_containing(&entries, 6).unwrap();
        assert_eq!(found.targets, vec![OffsetRange::new(0, 1)]);
    }

    #[test]
    fn test_resolve_falls_back_to_document_start() {
        let entries = vec![entry(0, 5, &[(10, 12)])];
        assert_eq!(resolve_targets(&entries, 9), vec![OffsetRange::empty_at(0)]);
        assert_eq!(resolve_targets(&[], 0), vec![OffsetRange::empty_at(0)]);
    }

    #[test]
    fn test_resolve_keeps_fan_out_and_empty_targets() {
        let entries = vec![entry(0, 5, &[(1, 2), (7, 9)]), entry(5, 6, &[])];
        assert_eq!(resolve_targets(&entries, 3).len(), 2);
        assert!(resolve_targets(&entries, 5).is_empty());
    }

    #[test]
    fn test_degenerate_entry_contains_nothing() {
        let entries = vec![RangeEntry::degenerate()];
        assert!(find_containing(&entries, 0).is_none());
    }

    #[test]
    fn test_wire_shape() {
        let entry: RangeEntry =
            serde_json::from_str(r#"{"source":{"start":0,"end":5},"targets":[{"start":0,"end":3}]}"#)
                .unwrap();
        assert_eq!(entry.source, OffsetRange::new(0, 5));
        assert_eq!(entry.targets, vec![OffsetRange::new(0, 3)]);
    }

    #[test]
    fn test_deserialize_orders_bounds() {
        let range: OffsetRange = serde_json::from_str(r#"{"start":5,"end":2}"#).unwrap();
        assert_eq!(range, OffsetRange { start: 2, end: 5 });
        assert_eq!(
            serde_json::to_value(range).unwrap(),
            serde_json::json!({ "start": 2, "end": 5 })
        );
    }
}
