//! FILENAME: core/variant-engine/src/row_span.rs
//! Row-Span Matrix - Merged-cell layout for the combination table.
//!
//! Given combinations in generator order, decides per (row, column) whether
//! the cell opens a visual group and how many rows it covers. A cell merges
//! with the row above when its own column and every column to its left are
//! unchanged, so groups nest the same way the variant tree does.

use serde::{Deserialize, Serialize};

use crate::model::Combination;

/// Layout of one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpanCell {
    /// Whether this cell opens a group (the master cell of a merged region).
    pub should_render: bool,
    /// Rows covered, counting this one. Zero for cells covered by a master above.
    pub span: usize,
}

impl RowSpanCell {
    fn covered() -> Self {
        RowSpanCell {
            should_render: false,
            span: 0,
        }
    }
}

/// One row per combination, one column per group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpanMatrix {
    pub column_count: usize,
    pub rows: Vec<Vec<RowSpanCell>>,
}

impl RowSpanMatrix {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&RowSpanCell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Out-of-range cells never render.
    pub fn should_render(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|c| c.should_render)
    }

    pub fn span(&self, row: usize, col: usize) -> usize {
        self.cell(row, col).map_or(0, |c| c.span)
    }
}

/// First column at which two rows differ, or `column_count` if they agree on
/// every column. Missing trailing values compare equal to each other.
fn first_difference(a: &Combination, b: &Combination, column_count: usize) -> usize {
    (0..column_count)
        .find(|&k| a.get(k) != b.get(k))
        .unwrap_or(column_count)
}

/// Computes the merged-cell layout for `combinations`.
///
/// Row 0 always opens a group. Row `r` opens a group in column `c` unless
/// columns `0..=c` all equal those of row `r - 1`.
pub fn row_spans(combinations: &[Combination], column_count: usize) -> RowSpanMatrix {
    let row_count = combinations.len();

    // diff[r] = first column where row r departs from row r - 1.
    let mut diff = vec![0usize; row_count];
    for r in 1..row_count {
        diff[r] = first_difference(&combinations[r - 1], &combinations[r], column_count);
    }

    let mut rows = vec![vec![RowSpanCell::covered(); column_count]; row_count];
    for col in 0..column_count {
        let mut start = 0;
        while start < row_count {
            let mut end = start + 1;
            while end < row_count && diff[end] > col {
                end += 1;
            }
            rows[start][col] = RowSpanCell {
                should_render: true,
                span: end - start,
            };
            start = end;
        }
    }

    RowSpanMatrix { column_count, rows }
}

/// Number of contiguous rows starting at `row` that share `row`'s value in
/// `col` and in every column to its left. Zero when `row` is out of range.
pub fn span_count(combinations: &[Combination], col: usize, row: usize) -> usize {
    let Some(anchor) = combinations.get(row) else {
        return 0;
    };
    combinations[row..]
        .iter()
        .take_while(|other| (0..=col).all(|k| other.get(k) == anchor.get(k)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combos(rows: &[&[&str]]) -> Vec<Combination> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_color_size_layout() {
        let c = combos(&[&["Red", "S"], &["Red", "M"], &["Blue", "S"], &["Blue", "M"]]);
        let m = row_spans(&c, 2);

        assert!(m.should_render(0, 0));
        assert_eq!(m.span(0, 0), 2);
        assert!(!m.should_render(1, 0));
        assert!(m.should_render(2, 0));
        assert_eq!(m.span(2, 0), 2);
        assert!(!m.should_render(3, 0));

        for row in 0..4 {
            assert!(m.should_render(row, 1));
            assert_eq!(m.span(row, 1), 1);
            assert_eq!(span_count(&c, 1, row), 1);
        }
        assert_eq!(span_count(&c, 0, 0), 2);
        assert_eq!(span_count(&c, 0, 2), 2);
    }

    #[test]
    fn test_repeated_value_under_new_parent_starts_group() {
        // "S" repeats across the Red/Blue boundary but must not merge.
        let c = combos(&[&["Red", "S"], &["Blue", "S"]]);
        let m = row_spans(&c, 2);
        assert!(m.should_render(1, 1));
        assert_eq!(m.span(0, 1), 1);
        assert_eq!(span_count(&c, 1, 0), 1);
    }

    #[test]
    fn test_three_levels() {
        let c = combos(&[
            &["A", "x", "1"],
            &["A", "x", "2"],
            &["A", "y", "1"],
            &["B", "x", "1"],
        ]);
        let m = row_spans(&c, 3);
        assert_eq!(m.span(0, 0), 3);
        assert_eq!(m.span(0, 1), 2);
        assert_eq!(m.span(2, 1), 1);
        assert_eq!(m.span(3, 0), 1);
        assert!(!m.should_render(1, 1));
        assert!(m.should_render(2, 2));
    }

    #[test]
    fn test_empty_and_out_of_range() {
        let m = row_spans(&[], 2);
        assert_eq!(m.row_count(), 0);
        assert!(!m.should_render(0, 0));
        assert_eq!(span_count(&[], 0, 0), 0);

        let c = combos(&[&["Red"]]);
        assert_eq!(span_count(&c, 0, 5), 0);
        assert!(!row_spans(&c, 1).should_render(0, 3));
    }
}
