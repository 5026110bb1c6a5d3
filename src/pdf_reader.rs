use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::UTF_16BE;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use crate::error::ExtractError;
use crate::model::PageText;
use crate::table_parse::{soft_split_line_into_cells, split_line_into_cells};

const BROKEN_TEXT_PENALTY: i64 = 800;
const WEAK_PAGE_SCORE: i64 = 80;

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (decoded, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
    (!had_errors && !decoded.is_empty()).then(|| decoded.into_owned())
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        if let Some(text) = decode_utf16(bytes.get(2..).unwrap_or(bytes)) {
            return text;
        }
    }

    if encoding
        .map(str::to_ascii_lowercase)
        .is_some_and(|name| {
            ["utf16", "ucs2", "identity-h", "unicode"]
                .iter()
                .any(|hint| name.contains(hint))
        })
        && let Some(text) = decode_utf16(bytes)
    {
        return text;
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Favours text whose lines split into several cells, which is what table
/// detection needs.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        non_empty_lines += 1;
        if split_line_into_cells(line).len() >= 2 || soft_split_line_into_cells(line).len() >= 3 {
            multi_cell_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) {
        BROKEN_TEXT_PENALTY
    } else {
        0
    };
    multi_cell_lines * 50 + non_empty_lines - broken_penalty
}

fn choose_best_text(candidates: Vec<String>) -> String {
    candidates
        .into_iter()
        .max_by_key(|text| extraction_quality_score(text))
        .unwrap_or_default()
}

fn extract_text_from_page_content(document: &Document, page_id: ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    text.push_str(&decode_pdf_bytes(encoding, bytes));
                }
                Object::Array(items) => {
                    collect_text(text, encoding, items);
                    text.push(' ');
                }
                Object::Integer(value) if *value < -100 => text.push(' '),
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            // Every text move ends a line, including horizontal `Td` moves
            // between cells; the other candidates cover that layout.
            "T*" | "Td" | "TD" | "ET" => {
                if current.trim().is_empty() {
                    current.clear();
                } else {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Picks the best text for each page among `pdf-extract`'s output and two
/// `lopdf` based readings. A document without pages yields no page texts.
fn collect_pages(document: &Document, extracted: Option<String>) -> Vec<PageText> {
    let pages_map = document.get_pages();

    let (per_page, whole) = match extracted {
        Some(text) => {
            let pages = split_text_into_pages(&text);
            if pages.len() == pages_map.len() {
                (Some(pages), None)
            } else {
                (None, Some(text))
            }
        }
        None => (None, None),
    };

    let mut pages = Vec::new();
    for (index, (page_no, page_id)) in pages_map.iter().enumerate() {
        let mut candidates = Vec::new();
        if let Some(text) = per_page
            .as_ref()
            .and_then(|texts| texts.get(index))
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text.clone());
        }
        if let Some(text) = extract_text_from_page_content(document, *page_id) {
            candidates.push(text);
        }
        if let Some(text) = document
            .extract_text(&[*page_no])
            .ok()
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }

        let local_best = candidates
            .iter()
            .map(|text| extraction_quality_score(text))
            .max()
            .unwrap_or(i64::MIN / 4);
        if index == 0
            && local_best < WEAK_PAGE_SCORE
            && let Some(text) = whole.as_ref().filter(|text| !text.trim().is_empty())
        {
            candidates.push(text.clone());
        }

        let text = choose_best_text(candidates);
        tracing::debug!(page = *page_no, chars = text.len(), "read page text");
        pages.push(PageText {
            page_number: *page_no,
            text,
        });
    }

    pages
}

/// Loads the document fully into memory, so the file is closed before any
/// page is processed.
pub(crate) fn read_pdf_pages(input_pdf: &Path) -> Result<Vec<PageText>, ExtractError> {
    let document = Document::load(input_pdf)?;
    let extracted = pdf_extract::extract_text(input_pdf).ok();
    Ok(collect_pages(&document, extracted))
}

pub(crate) fn read_pdf_pages_from_bytes(input_pdf: &[u8]) -> Result<Vec<PageText>, ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    let extracted = pdf_extract::extract_text_from_mem(input_pdf).ok();
    Ok(collect_pages(&document, extracted))
}

#[cfg(test)]
mod tests {
    use super::{
        choose_best_text, decode_pdf_bytes, extraction_quality_score, looks_decoding_broken,
        split_text_into_pages,
    };

    #[test]
    fn splits_form_feed_delimited_pages() {
        let pages = split_text_into_pages("p1\u{000C}p2\u{000C}");
        assert_eq!(pages, vec!["p1", "p2"]);
    }

    #[test]
    fn decodes_bom_prefixed_utf16_strings() {
        let bytes = [0xFE, 0xFF, 0x00, b'T', 0x00, b'i', 0x00, 0xFC];
        assert_eq!(decode_pdf_bytes(None, &bytes), "Ti\u{FC}");
    }

    #[test]
    fn flags_replacement_heavy_text() {
        assert!(looks_decoding_broken("\u{FFFD}\u{FFFD}ab"));
        assert!(!looks_decoding_broken("Title: A  x  y"));
    }

    #[test]
    fn prefers_tabular_text_over_prose() {
        let tabular = "Title: A  x  y\nv1  v2  v3".to_string();
        let prose = "Title: A x y v1 v2 v3.".to_string();
        assert!(extraction_quality_score(&tabular) > extraction_quality_score(&prose));
        assert_eq!(choose_best_text(vec![prose, tabular.clone()]), tabular);
    }
}
