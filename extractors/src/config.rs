use serde::{Deserialize, Serialize};

/// Parser behaviour that a host may tune; loaded from the `[parser]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Merge the built-in OTP/promo/delivery suppression phrases with user rules
    pub include_default_suppression_rules: bool,
    /// A negative classifier verdict at or above this confidence rejects the message
    pub classifier_rejection_threshold: f32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            include_default_suppression_rules: true,
            classifier_rejection_threshold: 0.8,
        }
    }
}
