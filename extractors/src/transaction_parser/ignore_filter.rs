use regex::Regex;
use shared_types::{SuppressionKind, SuppressionRule};
use tracing::warn;

use crate::error::{compile_user_pattern, Error, Result};

struct CompiledSuppression {
    pattern: String,
    /// `None` when the user pattern did not compile; the rule never matches
    matcher: Option<Regex>,
}

/// Sender rules are evaluated before body rules; the first match wins
pub struct SuppressionMatcher {
    sender_rules: Vec<CompiledSuppression>,
    body_rules: Vec<CompiledSuppression>,
}

impl SuppressionMatcher {
    pub fn new(rules: &[SuppressionRule]) -> Self {
        let mut sender_rules = Vec::new();
        let mut body_rules = Vec::new();

        for rule in rules.iter().filter(|r| r.enabled) {
            let compiled = match rule.kind {
                SuppressionKind::Sender => sender_wildcard_regex(&rule.pattern),
                SuppressionKind::BodyPhrase => compile_user_pattern(&rule.pattern),
            };

            let matcher = match compiled {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(
                        "Ignoring {:?} suppression rule '{}': {}",
                        rule.kind, rule.pattern, e
                    );
                    None
                }
            };

            let entry = CompiledSuppression {
                pattern: rule.pattern.clone(),
                matcher,
            };

            match rule.kind {
                SuppressionKind::Sender => sender_rules.push(entry),
                SuppressionKind::BodyPhrase => body_rules.push(entry),
            }
        }

        Self {
            sender_rules,
            body_rules,
        }
    }

    /// Reason string for the first rule that fires, if any
    pub fn check(&self, sender: &str, normalized_body: &str) -> Option<String> {
        let sender = sender.trim();

        for rule in &self.sender_rules {
            if rule.matcher.as_ref().is_some_and(|re| re.is_match(sender)) {
                return Some(format!("Sender matches ignore rule: '{}'", rule.pattern));
            }
        }

        for rule in &self.body_rules {
            if rule
                .matcher
                .as_ref()
                .is_some_and(|re| re.is_match(normalized_body))
            {
                return Some(format!("Body contains ignore phrase: '{}'", rule.pattern));
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.sender_rules.len() + self.body_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whole-sender, case-insensitive match where `*` is any run of characters
fn sender_wildcard_regex(pattern: &str) -> Result<Regex> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(Error::InvalidRule("empty pattern".to_string()));
    }

    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    compile_user_pattern(&format!("^{}$", body))
}
