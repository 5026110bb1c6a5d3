mod error;
mod json_out;
mod model;
mod options;
mod pdf_reader;
mod rows;
mod sections;
mod table_detect;
mod table_parse;
mod warning;

use std::path::Path;

use crate::json_out::{write_json, write_json_to_string};
use crate::pdf_reader::{read_pdf_pages, read_pdf_pages_from_bytes};
use crate::rows::clean_rows;
use crate::sections::{group_sections, has_untitled_leading_section};
use crate::table_detect::detect_tables;
use crate::warning::WarningCode;

pub use error::ExtractError;
pub use model::{Cell, DetectedTable, PageText, Row, Section, TableDocument};
pub use options::ExtractOptions;
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

/// Input read by the `pdf2json` binary, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "temp.pdf";
/// Output written by the `pdf2json` binary.
pub const DEFAULT_OUTPUT_PATH: &str = "temp.json";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub page_count: usize,
    pub table_count: usize,
    /// Rows kept after blank-row filtering.
    pub row_count: usize,
    pub dropped_row_count: usize,
    pub section_count: usize,
    pub warnings: Vec<ExtractWarning>,
}

/// Cleans and groups the rows of `tables`, in order, into sections.
#[must_use]
pub fn sections_from_tables(tables: &[DetectedTable]) -> Vec<Section> {
    let (rows, _) = clean_rows(
        tables
            .iter()
            .flat_map(|table| table.rows.iter().map(Vec::as_slice)),
    );
    group_sections(&rows)
}

fn extract_from_pages(
    pages: &[PageText],
    options: &ExtractOptions,
) -> (Vec<Section>, ExtractionReport) {
    let mut warnings = Vec::new();
    let tables = detect_tables(pages, options, &mut warnings);

    let (rows, dropped_row_count) = clean_rows(
        tables
            .iter()
            .flat_map(|table| table.rows.iter().map(Vec::as_slice)),
    );
    if rows.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::NoTablesDetected,
            "no table rows were detected in the document",
        ));
    } else if has_untitled_leading_section(&rows) {
        warnings.push(ExtractWarning::new(
            WarningCode::UntitledLeadingSection,
            "rows before the first Title row were kept as an untitled section",
        ));
    }

    let sections = group_sections(&rows);
    let report = ExtractionReport {
        page_count: pages.len(),
        table_count: tables.len(),
        row_count: rows.len(),
        dropped_row_count,
        section_count: sections.len(),
        warnings,
    };
    tracing::info!(
        pages = report.page_count,
        tables = report.table_count,
        rows = report.row_count,
        dropped = report.dropped_row_count,
        sections = report.section_count,
        "grouped table rows into sections"
    );

    (sections, report)
}

/// Reads the PDF at `input_pdf` and groups its table rows into sections.
pub fn extract_sections(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<(Vec<Section>, ExtractionReport), ExtractError> {
    options.validate()?;
    let pages = read_pdf_pages(input_pdf)?;
    Ok(extract_from_pages(&pages, options))
}

pub fn extract_sections_from_bytes(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<(Vec<Section>, ExtractionReport), ExtractError> {
    options.validate()?;
    let pages = read_pdf_pages_from_bytes(input_pdf)?;
    Ok(extract_from_pages(&pages, options))
}

/// Writes `{"table": sections}` as 4-space indented JSON, replacing any file
/// already at `output_json`.
pub fn write_sections_json(output_json: &Path, sections: &[Section]) -> Result<(), ExtractError> {
    write_json(output_json, sections)?;
    tracing::info!(
        path = %output_json.display(),
        sections = sections.len(),
        "wrote sections json"
    );
    Ok(())
}

pub fn sections_to_json_string(sections: &[Section]) -> Result<String, ExtractError> {
    write_json_to_string(sections)
}

pub fn extract_pdf_to_json(
    input_pdf: &Path,
    output_json: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    let (sections, report) = extract_sections(input_pdf, options)?;
    write_sections_json(output_json, &sections)?;
    Ok(report)
}
