use regex::{Regex, RegexBuilder};

/// Errors surfaced by the extraction crate.
///
/// Parse outcomes (`Ignored`, `NotParsed`, `RejectedByClassifier`) are not
/// errors; these cover rule loading and user pattern compilation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// For host `RuleSources` implementations whose fetch failed
    #[error("Rule source error: {0}")]
    Source(String),

    #[error("Rule data error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compile a user-authored pattern as a case-insensitive regex
pub fn compile_user_pattern(pattern: &str) -> Result<Regex> {
    if pattern.trim().is_empty() {
        return Err(Error::InvalidRule("empty pattern".to_string()));
    }

    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}
