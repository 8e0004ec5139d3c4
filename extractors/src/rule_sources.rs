//! Providers the host implements to hand rule data to the parser.
//!
//! Fetching is the only async boundary; everything after
//! [`RuleSnapshot::load`](crate::RuleSnapshot::load) is synchronous.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{
    Category, CustomExtractionRule, HeuristicTemplate, MerchantCategory, RenameRule,
    SuppressionRule,
};

use crate::error::Result;

#[async_trait]
pub trait SuppressionRuleSource: Send + Sync {
    /// Only enabled rules
    async fn enabled_suppression_rules(&self) -> Result<Vec<SuppressionRule>>;
}

#[async_trait]
pub trait CustomRuleSource: Send + Sync {
    /// Rules in the order they must be evaluated
    async fn custom_rules(&self) -> Result<Vec<CustomExtractionRule>>;
}

#[async_trait]
pub trait RenameRuleSource: Send + Sync {
    async fn rename_rules(&self) -> Result<Vec<RenameRule>>;
}

#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn merchant_categories(&self) -> Result<Vec<MerchantCategory>>;
    async fn categories(&self) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn templates_for_signature(&self, signature: &str) -> Result<Vec<HeuristicTemplate>>;
}

#[async_trait]
pub trait AddressBookSource: Send + Sync {
    /// Sender id to display name
    async fn sender_names(&self) -> Result<HashMap<String, String>>;
}

/// One handle per provider; they may all point at the same store
#[derive(Clone)]
pub struct RuleSources {
    pub suppression: Arc<dyn SuppressionRuleSource>,
    pub custom: Arc<dyn CustomRuleSource>,
    pub renames: Arc<dyn RenameRuleSource>,
    pub categories: Arc<dyn CategorySource>,
    pub templates: Arc<dyn TemplateSource>,
    pub address_book: Option<Arc<dyn AddressBookSource>>,
}

impl RuleSources {
    pub fn from_store(store: Arc<InMemoryRuleStore>) -> Self {
        Self {
            suppression: store.clone(),
            custom: store.clone(),
            renames: store.clone(),
            categories: store.clone(),
            templates: store.clone(),
            address_book: Some(store),
        }
    }
}

/// Rule data held in memory, e.g. deserialized from a rules file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryRuleStore {
    pub suppression_rules: Vec<SuppressionRule>,
    pub custom_rules: Vec<CustomExtractionRule>,
    pub rename_rules: Vec<RenameRule>,
    pub categories: Vec<Category>,
    pub merchant_categories: Vec<MerchantCategory>,
    pub templates: Vec<HeuristicTemplate>,
    pub sender_names: HashMap<String, String>,
}

impl InMemoryRuleStore {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[async_trait]
impl SuppressionRuleSource for InMemoryRuleStore {
    async fn enabled_suppression_rules(&self) -> Result<Vec<SuppressionRule>> {
        Ok(self
            .suppression_rules
            .iter()
            .filter(|rule| rule.enabled)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CustomRuleSource for InMemoryRuleStore {
    /// Highest priority first; ties keep their stored order
    async fn custom_rules(&self) -> Result<Vec<CustomExtractionRule>> {
        let mut rules = self.custom_rules.clone();
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority));
        Ok(rules)
    }
}

#[async_trait]
impl RenameRuleSource for InMemoryRuleStore {
    async fn rename_rules(&self) -> Result<Vec<RenameRule>> {
        Ok(self.rename_rules.clone())
    }
}

#[async_trait]
impl CategorySource for InMemoryRuleStore {
    async fn merchant_categories(&self) -> Result<Vec<MerchantCategory>> {
        Ok(self.merchant_categories.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

#[async_trait]
impl TemplateSource for InMemoryRuleStore {
    async fn templates_for_signature(&self, signature: &str) -> Result<Vec<HeuristicTemplate>> {
        Ok(self
            .templates
            .iter()
            .filter(|template| template.signature == signature)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AddressBookSource for InMemoryRuleStore {
    async fn sender_names(&self) -> Result<HashMap<String, String>> {
        Ok(self.sender_names.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(trigger: &str, priority: i32) -> CustomExtractionRule {
        CustomExtractionRule {
            trigger_phrase: trigger.to_string(),
            amount_pattern: None,
            merchant_pattern: None,
            account_pattern: None,
            priority,
            sample_text: None,
        }
    }

    #[tokio::test]
    async fn test_custom_rules_sorted_by_priority_stable() {
        let store = InMemoryRuleStore {
            custom_rules: vec![rule("a", 1), rule("b", 5), rule("c", 1), rule("d", 5)],
            ..Default::default()
        };

        let triggers: Vec<String> = store
            .custom_rules()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.trigger_phrase)
            .collect();
        assert_eq!(triggers, vec!["b", "d", "a", "c"]);
    }

    #[tokio::test]
    async fn test_only_enabled_suppression_rules_returned() {
        let mut disabled = SuppressionRule::sender("VM-*");
        disabled.enabled = false;
        let store = InMemoryRuleStore {
            suppression_rules: vec![disabled, SuppressionRule::body_phrase("otp")],
            ..Default::default()
        };

        let rules = store.enabled_suppression_rules().await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].pattern, "otp");
    }

    #[test]
    fn test_from_json_with_partial_data() {
        let store = InMemoryRuleStore::from_json(
            r#"{"suppression_rules": [{"kind": "BODY_PHRASE", "pattern": "otp"}],
                "sender_names": {"AX-SWIGGY": "Swiggy"}}"#,
        )
        .unwrap();
        assert_eq!(store.suppression_rules.len(), 1);
        assert!(store.suppression_rules[0].enabled);
        assert_eq!(store.sender_names.get("AX-SWIGGY").map(String::as_str), Some("Swiggy"));
        assert!(store.custom_rules.is_empty());
    }

    #[test]
    fn test_from_json_reports_bad_data() {
        assert!(InMemoryRuleStore::from_json("{\"custom_rules\": 3}").is_err());
    }
}
