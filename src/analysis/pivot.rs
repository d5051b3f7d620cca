use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// How labels along one axis of a [`CrossTab`] are chosen and ordered.
#[derive(Debug, Clone, Copy)]
pub enum AxisOrder<'a> {
    /// Every observed label, ascending.
    Sorted,
    /// Only these labels, in this order. Pairs with other labels are
    /// discarded before counting.
    Given(&'a [String]),
}

/// Dense count matrix over two categorical dimensions.
///
/// Only labels that occur in at least one counted pair appear on an axis;
/// absent combinations are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

fn axis_labels(order: AxisOrder<'_>, observed: &BTreeSet<&str>) -> Vec<String> {
    match order {
        AxisOrder::Sorted => observed.iter().map(|s| s.to_string()).collect(),
        AxisOrder::Given(labels) => labels
            .iter()
            .filter(|l| observed.contains(l.as_str()))
            .cloned()
            .collect(),
    }
}

fn allows(order: AxisOrder<'_>, label: &str) -> bool {
    match order {
        AxisOrder::Sorted => true,
        AxisOrder::Given(labels) => labels.iter().any(|l| l == label),
    }
}

impl CrossTab {
    /// Count `(row, column)` pairs into a matrix.
    pub fn from_pairs<'p, I>(pairs: I, rows: AxisOrder<'_>, columns: AxisOrder<'_>) -> Self
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut cells: HashMap<(&str, &str), usize> = HashMap::new();
        let mut seen_rows = BTreeSet::new();
        let mut seen_cols = BTreeSet::new();
        for (r, c) in pairs {
            if !allows(rows, r) || !allows(columns, c) {
                continue;
            }
            *cells.entry((r, c)).or_insert(0) += 1;
            seen_rows.insert(r);
            seen_cols.insert(c);
        }
        if cells.is_empty() {
            return CrossTab::default();
        }

        let rows = axis_labels(rows, &seen_rows);
        let columns = axis_labels(columns, &seen_cols);
        let counts: Vec<Vec<usize>> = rows
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| cells.get(&(r.as_str(), c.as_str())).copied().unwrap_or(0))
                    .collect()
            })
            .collect();
        CrossTab {
            rows,
            columns,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn get(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.columns.iter().position(|l| l == column)?;
        Some(self.counts[r][c])
    }

    /// Sum of every cell.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.columns.len())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }

    /// Row labels ordered by row total, largest first; ties keep the current
    /// row order.
    pub fn order_by_total_desc(&self) -> Vec<String> {
        let mut ranked: Vec<(usize, &String)> = self.row_totals().into_iter().zip(&self.rows).collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.into_iter().map(|(_, label)| label.clone()).collect()
    }

    /// Rearrange rows to follow `order`. Rows missing from `order` keep
    /// their relative order after the listed ones.
    pub fn reorder_rows(mut self, order: &[String]) -> Self {
        let rank = |label: &String| order.iter().position(|o| o == label).unwrap_or(order.len());
        let mut paired: Vec<(String, Vec<usize>)> = self.rows.drain(..).zip(self.counts.drain(..)).collect();
        paired.sort_by_key(|(label, _)| rank(label));
        let (rows, counts): (Vec<String>, Vec<Vec<usize>>) = paired.into_iter().unzip();
        self.rows = rows;
        self.counts = counts;
        self
    }

    /// Drop columns whose total is zero.
    pub fn drop_empty_columns(mut self) -> Self {
        let keep: Vec<bool> = self.column_totals().iter().map(|&t| t > 0).collect();
        self.columns = self
            .columns
            .into_iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c)
            .collect();
        for row in &mut self.counts {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&false));
        }
        self
    }

    /// Non-zero cells as `(row, column, count)`, row-major.
    pub fn nonzero_cells(&self) -> impl Iterator<Item = (&str, &str, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(r, row)| {
            self.columns
                .iter()
                .enumerate()
                .filter(move |(c, _)| self.counts[r][*c] > 0)
                .map(move |(c, col)| (row.as_str(), col.as_str(), self.counts[r][c]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_fill_and_sorted_axes() {
        let pairs = [("US", "Drama"), ("US", "Comedy"), ("IN", "Drama"), ("US", "Drama")];
        let tab = CrossTab::from_pairs(pairs, AxisOrder::Sorted, AxisOrder::Sorted);
        assert_eq!(tab.rows, labels(&["IN", "US"]));
        assert_eq!(tab.columns, labels(&["Comedy", "Drama"]));
        assert_eq!(tab.counts, vec![vec![0, 1], vec![1, 2]]);
        assert_eq!(tab.total(), pairs.len());
        assert_eq!(tab.get("IN", "Comedy"), Some(0));
        assert_eq!(tab.get("FR", "Comedy"), None);
    }

    #[test]
    fn test_given_axis_restricts_and_orders() {
        let top = labels(&["Drama", "Action"]);
        let pairs = [("US", "Drama"), ("US", "Horror"), ("IN", "Action"), ("IN", "Drama")];
        let tab = CrossTab::from_pairs(pairs, AxisOrder::Sorted, AxisOrder::Given(&top));
        assert_eq!(tab.columns, top);
        assert_eq!(tab.counts, vec![vec![1, 1], vec![1, 0]]);
        assert_eq!(tab.total(), 3);
    }

    #[test]
    fn test_empty_input() {
        let tab = CrossTab::from_pairs(Vec::<(&str, &str)>::new(), AxisOrder::Sorted, AxisOrder::Sorted);
        assert!(tab.is_empty());
        assert_eq!(tab.total(), 0);
        assert!(tab.order_by_total_desc().is_empty());
    }

    #[test]
    fn test_order_and_reorder_rows() {
        let pairs = [("a", "x"), ("b", "x"), ("b", "y"), ("c", "x"), ("c", "x"), ("c", "y")];
        let tab = CrossTab::from_pairs(pairs, AxisOrder::Sorted, AxisOrder::Sorted);
        let order = tab.order_by_total_desc();
        assert_eq!(order, labels(&["c", "b", "a"]));

        let tab = tab.reorder_rows(&order);
        assert_eq!(tab.rows, order);
        assert_eq!(tab.row_totals(), vec![3, 2, 1]);
        assert_eq!(tab.get("c", "x"), Some(2));
    }

    #[test]
    fn test_drop_empty_columns() {
        let tab = CrossTab {
            rows: labels(&["r1", "r2"]),
            columns: labels(&["a", "b", "c"]),
            counts: vec![vec![1, 0, 2], vec![0, 0, 1]],
        };
        let tab = tab.drop_empty_columns();
        assert_eq!(tab.columns, labels(&["a", "c"]));
        assert_eq!(tab.counts, vec![vec![1, 2], vec![0, 1]]);
    }

    #[test]
    fn test_nonzero_cells() {
        let pairs = [("US", "Drama"), ("IN", "Comedy")];
        let tab = CrossTab::from_pairs(pairs, AxisOrder::Sorted, AxisOrder::Sorted);
        let cells: Vec<_> = tab.nonzero_cells().collect();
        assert_eq!(cells, vec![("IN", "Comedy", 1), ("US", "Drama", 1)]);
    }
}
