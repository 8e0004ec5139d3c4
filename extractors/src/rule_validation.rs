//! Checks a host runs on user-authored rules before saving them.
//!
//! The parser itself never rejects a rule; invalid patterns are simply
//! inapplicable at parse time. These checks give the rule editor a message
//! to show instead.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use regex::Regex;
use shared_types::{CustomExtractionRule, SuppressionKind, SuppressionRule};

use crate::error::compile_user_pattern;

pub fn validate_custom_rule(rule: &CustomExtractionRule) -> Result<()> {
    if rule.trigger_phrase.trim().is_empty() {
        bail!("Trigger phrase must not be empty");
    }

    let Some(amount_pattern) = rule.amount_pattern.as_deref() else {
        bail!("Amount pattern is required");
    };
    let amount = validate_field_pattern("amount", amount_pattern)?;
    validate_regex_performance(&amount)?;

    if let Some(pattern) = rule.merchant_pattern.as_deref() {
        let merchant = validate_field_pattern("merchant", pattern)?;
        validate_regex_performance(&merchant)?;
    }

    if let Some(pattern) = rule.account_pattern.as_deref() {
        let account = validate_field_pattern("account", pattern)?;
        validate_regex_performance(&account)?;
    }

    Ok(())
}

pub fn validate_suppression_rule(rule: &SuppressionRule) -> Result<()> {
    if rule.pattern.trim().is_empty() {
        bail!("Suppression pattern must not be empty");
    }

    if rule.kind == SuppressionKind::BodyPhrase {
        let regex = compile_user_pattern(&rule.pattern)
            .map_err(|e| anyhow::anyhow!("Invalid body phrase pattern: {}", e))?;
        validate_regex_performance(&regex)?;
    }

    Ok(())
}

/// Must compile and expose the value in capture group 1
fn validate_field_pattern(field: &str, pattern: &str) -> Result<Regex> {
    let regex = compile_user_pattern(pattern)
        .map_err(|e| anyhow::anyhow!("Invalid {} pattern: {}", field, e))?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 2 {
        bail!("{} pattern needs a capture group around the value", field);
    }

    Ok(regex)
}

fn validate_regex_performance(regex: &Regex) -> Result<()> {
    let test_input = "a1 ".repeat(334);

    let start = Instant::now();
    let _ = regex.is_match(&test_input);
    let duration = start.elapsed();

    if duration > Duration::from_millis(100) {
        bail!("Pattern is too slow to run on every message");
    }

    Ok(())
}
