use crate::error::ExtractError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Minimum cells a text line needs to count as a table row.
    pub min_cols: usize,
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.min_cols < 2 {
            return Err(ExtractError::InvalidOption(
                "min_cols must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { min_cols: 2 }
    }
}
