//! Pipe table detection and construction.

use crate::block::Table;

/// Check whether a line looks like a pipe table row.
///
/// The trimmed line must start with `|` and contain at least one more `|`.
pub(crate) fn is_table_row(line: &str) -> bool {
    line.trim()
        .strip_prefix('|')
        .is_some_and(|rest| rest.contains('|'))
}

/// Split a table row into trimmed cells.
///
/// One leading and one trailing `|` are dropped before splitting, so
/// `| a | b |` yields `["a", "b"]`.
pub(crate) fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_owned()).collect()
}

/// Check whether cells form the header/body separator (`|---|:--:|`).
pub(crate) fn is_separator_row(cells: &[String]) -> bool {
    let only_rule_chars = cells
        .iter()
        .all(|cell| cell.chars().all(|c| matches!(c, '-' | ':' | ' ')));
    only_rule_chars && cells.iter().any(|cell| cell.contains('-'))
}

/// Build a table from accumulated raw row lines.
///
/// A separator in second position is discarded. Returns `None` when no rows
/// remain.
pub(crate) fn build_table(lines: &[String]) -> Option<Table> {
    let mut rows: Vec<Vec<String>> = lines.iter().map(|line| split_row(line)).collect();
    if rows.get(1).is_some_and(|row| is_separator_row(row)) {
        rows.remove(1);
    }

    let mut rows = rows.into_iter();
    let header = rows.next()?;
    Some(Table {
        header,
        rows: rows.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|s| (*s).to_owned()).collect()
    }

    fn cells(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_is_table_row() {
        assert!(is_table_row("| a | b |"));
        assert!(is_table_row("   |a|"));
        assert!(is_table_row("||"));
        assert!(!is_table_row("|"));
        assert!(!is_table_row("a | b"));
        assert!(!is_table_row(""));
    }

    #[test]
    fn test_split_row_trims_cells() {
        assert_eq!(split_row("|  a |b  |   c|"), cells(&["a", "b", "c"]));
    }

    #[test]
    fn test_split_row_without_trailing_pipe() {
        assert_eq!(split_row("| a | b"), cells(&["a", "b"]));
    }

    #[test]
    fn test_split_row_keeps_empty_cells() {
        assert_eq!(split_row("| a || c |"), cells(&["a", "", "c"]));
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator_row(&cells(&["---", "---"])));
        assert!(is_separator_row(&cells(&[":--", ":-:", "--:"])));
        assert!(is_separator_row(&cells(&["- -"])));
        assert!(!is_separator_row(&cells(&["---", "x"])));
        assert!(!is_separator_row(&cells(&["", ""])));
    }

    #[test]
    fn test_build_table_drops_separator() {
        let table = build_table(&lines(&["| a | b |", "|---|---|", "| 1 | 2 |"])).unwrap();
        assert_eq!(table.header, cells(&["a", "b"]));
        assert_eq!(table.rows, vec![cells(&["1", "2"])]);
    }

    #[test]
    fn test_build_table_keeps_non_separator_second_row() {
        let table = build_table(&lines(&["| a |", "| b |", "| c |"])).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0], cells(&["b"]));
    }

    #[test]
    fn test_separator_only_dropped_in_second_position() {
        let table = build_table(&lines(&["| a |", "| 1 |", "|---|"])).unwrap();
        assert_eq!(table.rows, vec![cells(&["1"]), cells(&["---"])]);
    }

    #[test]
    fn test_build_table_header_only() {
        let table = build_table(&lines(&["| a | b |", "| --- | --- |"])).unwrap();
        assert_eq!(table.header, cells(&["a", "b"]));
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_build_table_empty() {
        assert_eq!(build_table(&[]), None);
    }
}
