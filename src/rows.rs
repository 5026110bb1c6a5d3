use crate::model::Cell;

pub(crate) const TITLE_MARKER: &str = "Title";

/// A detected row after trimming, with absent cells turned into `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CleanRow {
    cells: Vec<String>,
}

impl CleanRow {
    pub(crate) fn from_cells(cells: &[Cell]) -> Self {
        Self {
            cells: cells
                .iter()
                .map(|cell| cell.as_deref().map(str::trim).unwrap_or_default().to_string())
                .collect(),
        }
    }

    /// True when no cell has content. A row with zero cells is blank.
    pub(crate) fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }

    pub(crate) fn is_title(&self) -> bool {
        self.cells
            .first()
            .is_some_and(|first| first.contains(TITLE_MARKER))
    }

    /// Cells are joined as-is; a comma inside a cell is not escaped.
    pub(crate) fn joined(&self) -> String {
        self.cells.join(",")
    }
}

/// Cleans every row and drops the blank ones. Returns the kept rows and the
/// number dropped.
pub(crate) fn clean_rows<'a, I>(rows: I) -> (Vec<CleanRow>, usize)
where
    I: IntoIterator<Item = &'a [Cell]>,
{
    let mut dropped = 0_usize;
    let kept = rows
        .into_iter()
        .map(CleanRow::from_cells)
        .filter(|row| {
            let blank = row.is_blank();
            if blank {
                dropped += 1;
            }
            !blank
        })
        .collect();
    (kept, dropped)
}
