use crate::model::Section;
use crate::rows::CleanRow;

#[derive(Debug, Default)]
struct Grouping {
    current: Section,
    completed: Vec<Section>,
}

impl Grouping {
    fn push(mut self, row: &CleanRow) -> Self {
        if row.is_title() {
            let finished = std::mem::replace(&mut self.current, vec![row.joined()]);
            if !finished.is_empty() {
                self.completed.push(finished);
            }
        } else {
            self.current.push(row.joined());
        }
        self
    }

    fn finish(mut self) -> Vec<Section> {
        if !self.current.is_empty() {
            self.completed.push(self.current);
        }
        self.completed
    }
}

/// Groups cleaned rows into sections, starting a new one at every row whose
/// first cell contains `Title`.
///
/// Rows seen before the first title row form a leading section of their own.
pub(crate) fn group_sections<'a, I>(rows: I) -> Vec<Section>
where
    I: IntoIterator<Item = &'a CleanRow>,
{
    rows.into_iter()
        .fold(Grouping::default(), Grouping::push)
        .finish()
}

/// True when the first section does not open with a title row.
pub(crate) fn has_untitled_leading_section(rows: &[CleanRow]) -> bool {
    rows.first().is_some_and(|row| !row.is_title())
}
