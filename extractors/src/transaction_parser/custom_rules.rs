use regex::Regex;
use shared_types::{CustomExtractionRule, ExtractedAccount, TransactionDirection};
use tracing::{debug, warn};

use super::amount::parse_amount;
use crate::error::compile_user_pattern;
use super::direction::direction_or_income;

/// Account type attached to accounts captured by a user rule
pub const CUSTOM_RULE_ACCOUNT_TYPE: &str = "Account";

struct CompiledCustomRule {
    trigger_lower: String,
    trigger_phrase: String,
    amount: Option<Regex>,
    merchant: Option<Regex>,
    account: Option<Regex>,
}

/// Fields recovered by the first custom rule that fired
#[derive(Debug, Clone, PartialEq)]
pub struct CustomRuleMatch {
    pub trigger_phrase: String,
    pub amount: f64,
    pub direction: TransactionDirection,
    pub merchant: Option<String>,
    pub account: Option<ExtractedAccount>,
}

/// User-authored rules, kept in the priority order the rule source returned
pub struct CustomRuleMatcher {
    rules: Vec<CompiledCustomRule>,
}

impl CustomRuleMatcher {
    pub fn new(rules: &[CustomExtractionRule]) -> Self {
        let rules = rules
            .iter()
            .filter(|rule| !rule.trigger_phrase.trim().is_empty())
            .map(|rule| CompiledCustomRule {
                trigger_lower: rule.trigger_phrase.trim().to_lowercase(),
                trigger_phrase: rule.trigger_phrase.clone(),
                amount: compile_field(rule, "amount", rule.amount_pattern.as_deref()),
                merchant: compile_field(rule, "merchant", rule.merchant_pattern.as_deref()),
                account: compile_field(rule, "account", rule.account_pattern.as_deref()),
            })
            .collect();

        Self { rules }
    }

    /// Try each rule in order. A rule whose trigger is present but whose
    /// amount cannot be extracted is skipped, not fatal.
    pub fn find_match(&self, normalized_body: &str) -> Option<CustomRuleMatch> {
        let body_lower = normalized_body.to_lowercase();

        for rule in &self.rules {
            if !body_lower.contains(&rule.trigger_lower) {
                continue;
            }

            let Some(amount) = rule
                .amount
                .as_ref()
                .and_then(|re| first_group(re, normalized_body))
                .and_then(|text| parse_amount(&text))
            else {
                debug!(
                    "Custom rule '{}' triggered but no amount extracted, skipping",
                    rule.trigger_phrase
                );
                continue;
            };

            let merchant = rule
                .merchant
                .as_ref()
                .and_then(|re| first_group(re, normalized_body));

            let account = rule
                .account
                .as_ref()
                .and_then(|re| first_group(re, normalized_body))
                .map(|name| ExtractedAccount::new(name, CUSTOM_RULE_ACCOUNT_TYPE));

            return Some(CustomRuleMatch {
                trigger_phrase: rule.trigger_phrase.clone(),
                amount,
                direction: direction_or_income(normalized_body),
                merchant,
                account,
            });
        }

        None
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_field(rule: &CustomExtractionRule, field: &str, pattern: Option<&str>) -> Option<Regex> {
    let pattern = pattern.map(str::trim).filter(|p| !p.is_empty())?;

    match compile_user_pattern(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(
                "Custom rule '{}' has an invalid {} pattern '{}': {}",
                rule.trigger_phrase, field, pattern, e
            );
            None
        }
    }
}

/// Trimmed, non-empty text of capture group 1
fn first_group(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
