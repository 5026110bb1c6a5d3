use crate::model::{DetectedTable, PageText};
use crate::options::ExtractOptions;
use crate::table_parse::{modal_width, pad_rows, soft_split_line_into_cells, split_line_into_cells};
use crate::warning::{ExtractWarning, WarningCode};

pub(crate) const LOW_CONFIDENCE_THRESHOLD: f32 = 0.60;

#[allow(clippy::cast_precision_loss)]
fn table_confidence(rows: &[Vec<String>]) -> f32 {
    if rows.len() < 2 {
        return 0.0;
    }

    let modal = modal_width(rows);
    if modal == 0 {
        return 0.0;
    }

    let consistent =
        rows.iter().filter(|row| row.len() == modal).count() as f32 / rows.len() as f32;
    let max_width = rows.iter().map(Vec::len).max().unwrap_or(modal);
    let min_width = rows.iter().map(Vec::len).min().unwrap_or(modal);
    let uniformity = if max_width == 0 {
        0.0
    } else {
        1.0 - ((max_width - min_width) as f32 / max_width as f32)
    };

    (consistent * 0.75 + uniformity * 0.25).clamp(0.0, 1.0)
}

fn line_cells(line: &str, min_cols: usize) -> Vec<String> {
    let cells = split_line_into_cells(line);
    if cells.len() >= min_cols {
        return cells;
    }

    let soft_cells = soft_split_line_into_cells(line);
    let has_numeric = soft_cells
        .iter()
        .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
    let looks_like_sentence = ['.', '!', '?']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation));
    if soft_cells.len() >= min_cols && !looks_like_sentence && (has_numeric || soft_cells.len() <= 6)
    {
        soft_cells
    } else {
        cells
    }
}

fn detect_tables_in_page(page: &PageText, min_cols: usize) -> Vec<DetectedTable> {
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    let flush_current = |rows: &mut Vec<Vec<String>>, tables: &mut Vec<DetectedTable>| {
        if rows.len() >= 2 {
            let confidence = table_confidence(rows);
            tables.push(DetectedTable {
                page: page.page_number,
                rows: pad_rows(std::mem::take(rows)),
                confidence,
            });
        } else {
            rows.clear();
        }
    };

    for line in page.text.lines() {
        let cells = line_cells(line, min_cols);
        if cells.len() >= min_cols {
            current_rows.push(cells);
        } else {
            flush_current(&mut current_rows, &mut tables);
        }
    }

    flush_current(&mut current_rows, &mut tables);
    tables
}

/// Finds tables on every page, in page order and top-to-bottom within a page.
///
/// Low-confidence tables are kept and flagged.
pub(crate) fn detect_tables(
    pages: &[PageText],
    options: &ExtractOptions,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<DetectedTable> {
    let min_cols = options.min_cols.max(2);
    let mut tables = Vec::new();

    for page in pages {
        let found = detect_tables_in_page(page, min_cols);
        tracing::debug!(
            page = page.page_number,
            tables = found.len(),
            "detected tables on page"
        );
        tables.extend(found);
    }

    for (index, table) in tables.iter().enumerate() {
        if table.confidence < LOW_CONFIDENCE_THRESHOLD {
            warnings.push(
                ExtractWarning::new(
                    WarningCode::LowConfidence,
                    "table structure is ragged; extracted in best-effort mode",
                )
                .with_page(table.page)
                .with_table_id(index + 1)
                .with_confidence(table.confidence),
            );
        }
    }

    tables
}
