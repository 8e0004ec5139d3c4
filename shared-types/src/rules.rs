use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What part of a message a suppression rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuppressionKind {
    /// Case-insensitive match against the sender, `*` matches any run of characters
    Sender,
    /// Case-insensitive regex search against the normalized body
    BodyPhrase,
}

/// User or default instruction to silently drop a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuppressionRule {
    pub kind: SuppressionKind,
    pub pattern: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub is_default: bool,
}

impl SuppressionRule {
    pub fn sender(pattern: impl Into<String>) -> Self {
        Self {
            kind: SuppressionKind::Sender,
            pattern: pattern.into(),
            enabled: true,
            is_default: false,
        }
    }

    pub fn body_phrase(pattern: impl Into<String>) -> Self {
        Self {
            kind: SuppressionKind::BodyPhrase,
            pattern: pattern.into(),
            enabled: true,
            is_default: false,
        }
    }
}

/// User-authored extraction rule, evaluated before any generic logic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomExtractionRule {
    /// Literal phrase that must appear in the body (case-insensitive)
    pub trigger_phrase: String,
    /// Regex whose first capture group holds the amount
    pub amount_pattern: Option<String>,
    pub merchant_pattern: Option<String>,
    pub account_pattern: Option<String>,
    #[serde(default)]
    pub priority: i32,
    /// Message the rule was authored against, kept for the rule editor
    pub sample_text: Option<String>,
}

/// Maps an extracted merchant to a preferred display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenameRule {
    /// Case-insensitive key
    pub original_name: String,
    pub new_name: String,
}

/// A learned message shape: where merchant and amount sat in one corrected message.
///
/// Offsets are character (not byte) positions into the normalized body,
/// half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HeuristicTemplate {
    pub signature: String,
    pub merchant_name: String,
    pub original_text: String,
    pub merchant_start: usize,
    pub merchant_end: usize,
    pub amount_start: usize,
    pub amount_end: usize,
}

/// Raw materials a learning UI needs to persist a new template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateDraft {
    pub signature: String,
    pub merchant_name: String,
    pub original_text: String,
    pub merchant_start: usize,
    pub merchant_end: usize,
    pub amount_start: usize,
    pub amount_end: usize,
}

impl TemplateDraft {
    pub fn into_template(self) -> HeuristicTemplate {
        HeuristicTemplate {
            signature: self.signature,
            merchant_name: self.merchant_name,
            original_text: self.original_text,
            merchant_start: self.merchant_start,
            merchant_end: self.merchant_end,
            amount_start: self.amount_start,
            amount_end: self.amount_end,
        }
    }
}

/// Direct merchant → category assignment owned by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MerchantCategory {
    pub merchant_name: String,
    pub category_id: i64,
}

/// Category known to the host, used to resolve keyword-table matches to ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppression_kind_serialization() {
        let json = serde_json::to_string(&SuppressionKind::BodyPhrase).unwrap();
        assert_eq!(json, "\"BODY_PHRASE\"");
    }

    #[test]
    fn test_suppression_rule_defaults() {
        let rule: SuppressionRule =
            serde_json::from_str(r#"{"kind":"SENDER","pattern":"*PROMO*"}"#).unwrap();
        assert!(rule.enabled);
        assert!(!rule.is_default);
        assert_eq!(rule, SuppressionRule::sender("*PROMO*"));
    }
}
