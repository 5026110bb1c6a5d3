use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

use crate::error::ExtractError;
use crate::model::Section;

const INDENT: &[u8] = b"    ";

/// Borrowed twin of [`crate::model::TableDocument`].
#[derive(Serialize)]
struct DocumentRef<'a> {
    table: &'a [Section],
}

fn write_document<W: Write>(writer: W, sections: &[Section]) -> Result<W, ExtractError> {
    let document = DocumentRef { table: sections };
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Writes `{"table": sections}` to `path`, replacing any existing file.
pub(crate) fn write_json(path: &Path, sections: &[Section]) -> Result<(), ExtractError> {
    let file = File::create(path)?;
    let mut writer = write_document(BufWriter::new(file), sections)?;
    writer.flush()?;
    Ok(())
}

pub(crate) fn write_json_to_string(sections: &[Section]) -> Result<String, ExtractError> {
    let bytes = write_document(Vec::new(), sections)?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 json output: {error}")))
}
