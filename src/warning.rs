use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningCode {
    LowConfidence,
    NoTablesDetected,
    UntitledLeadingSection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    pub page: Option<u32>,
    pub table_id: Option<usize>,
    pub confidence: Option<f32>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            page: None,
            table_id: None,
            confidence: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_table_id(mut self, table_id: usize) -> Self {
        self.table_id = Some(table_id);
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl WarningCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LowConfidence => "low_confidence",
            Self::NoTablesDetected => "no_tables_detected",
            Self::UntitledLeadingSection => "untitled_leading_section",
        }
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code.as_str())?;
        if let Some(page) = self.page {
            write!(f, " page={page}")?;
        }
        if let Some(table_id) = self.table_id {
            write!(f, " table={table_id}")?;
        }
        if let Some(confidence) = self.confidence {
            write!(f, " confidence={confidence:.2}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtractWarning, WarningCode};

    #[test]
    fn displays_code_location_and_message() {
        let warning = ExtractWarning::new(WarningCode::LowConfidence, "ragged table")
            .with_page(3)
            .with_table_id(2)
            .with_confidence(0.5);
        assert_eq!(
            warning.to_string(),
            "low_confidence page=3 table=2 confidence=0.50: ragged table"
        );
    }

    #[test]
    fn omits_missing_location() {
        let warning = ExtractWarning::new(WarningCode::NoTablesDetected, "nothing found");
        assert_eq!(warning.to_string(), "no_tables_detected: nothing found");
    }
}
