use std::collections::HashMap;

use crate::model::Row;

/// Splits a text line on tabs or runs of two or more spaces.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    let mut flush = |current: &mut String| {
        if !current.trim().is_empty() {
            cells.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in trimmed.chars() {
        if ch == '\t' {
            flush(&mut current);
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                flush(&mut current);
            } else {
                current.push(' ');
            }
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }
    flush(&mut current);

    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Pads every row to the widest row with absent cells.
pub(crate) fn pad_rows(rows: Vec<Vec<String>>) -> Vec<Row> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    rows.into_iter()
        .map(|row| {
            let mut out = row.into_iter().map(Some).collect::<Row>();
            out.resize(width, None);
            out
        })
        .collect()
}

pub(crate) fn modal_width<T>(rows: &[Vec<T>]) -> usize {
    let mut freq = HashMap::new();
    for width in rows.iter().map(Vec::len) {
        *freq.entry(width).or_insert(0_usize) += 1;
    }

    freq.into_iter()
        .max_by_key(|(width, count)| (*count, *width))
        .map_or(0, |(width, _)| width)
}

#[cfg(test)]
mod tests {
    use super::{modal_width, pad_rows, soft_split_line_into_cells, split_line_into_cells};

    #[test]
    fn splits_double_space_separated_cells() {
        let cells = split_line_into_cells("Title: A  x  y");
        assert_eq!(cells, vec!["Title: A", "x", "y"]);
    }

    #[test]
    fn splits_tab_separated_cells() {
        let cells = split_line_into_cells("A\tB\t\tC");
        assert_eq!(cells, vec!["A", "B", "C"]);
    }

    #[test]
    fn blank_line_has_no_cells() {
        assert!(split_line_into_cells("   ").is_empty());
    }

    #[test]
    fn soft_splits_single_space_cells() {
        let cells = soft_split_line_into_cells("Name Age Score");
        assert_eq!(cells, vec!["Name", "Age", "Score"]);
    }

    #[test]
    fn pads_ragged_rows_with_absent_cells() {
        let rows = vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string()],
        ];
        let padded = pad_rows(rows);
        assert_eq!(padded[0], vec![Some("a".to_string()), None]);
        assert_eq!(
            padded[1],
            vec![Some("b".to_string()), Some("c".to_string())]
        );
    }

    #[test]
    fn detects_modal_width() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
            vec!["x".to_string()],
        ];
        assert_eq!(modal_width(&rows), 2);
    }
}
