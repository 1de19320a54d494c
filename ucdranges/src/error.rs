use thiserror::Error;

/// Errors produced while extracting codepoint ranges.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The character database could neither be read locally nor downloaded.
    #[error("Unicode character database is unavailable from {location}")]
    DataUnavailable {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A category code outside the 29 general categories.
    #[error("'{0}' is not a Unicode general category")]
    InvalidCategory(String),

    /// A database line that does not parse.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Tables and rule literals need at least one column.
    #[error("column count must be at least 1")]
    InvalidColumns,

    #[error("could not write formatted output")]
    Render(#[from] std::fmt::Error),
}

impl ExtractError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ExtractError::MalformedRecord { line, reason: reason.into() }
    }
}
