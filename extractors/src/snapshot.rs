use std::collections::{BTreeSet, HashMap};

use shared_types::{
    Category, CustomExtractionRule, HeuristicTemplate, IncomingMessage, MerchantCategory,
    RenameRule, SuppressionRule,
};
use tracing::debug;

use crate::config::ParserConfig;
use crate::defaults::default_suppression_rules;
use crate::error::Result;
use crate::rule_sources::RuleSources;
use crate::transaction_parser::custom_rules::CustomRuleMatcher;
use crate::transaction_parser::ignore_filter::SuppressionMatcher;
use crate::transaction_parser::normalize::SignatureGenerator;

/// Raw rule data for one batch, before compilation
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub suppression_rules: Vec<SuppressionRule>,
    /// Already in evaluation order
    pub custom_rules: Vec<CustomExtractionRule>,
    pub rename_rules: Vec<RenameRule>,
    pub categories: Vec<Category>,
    pub merchant_categories: Vec<MerchantCategory>,
    pub templates: Vec<HeuristicTemplate>,
    pub sender_names: HashMap<String, String>,
}

/// Immutable, compiled rule data shared by every message of a batch.
///
/// Lookup keys are lowercased so rename, category and address-book lookups
/// are case-insensitive.
pub struct RuleSnapshot {
    pub(crate) suppression: SuppressionMatcher,
    pub(crate) custom_rules: CustomRuleMatcher,
    renames: HashMap<String, String>,
    merchant_categories: HashMap<String, i64>,
    category_ids: HashMap<String, i64>,
    templates: HashMap<String, Vec<HeuristicTemplate>>,
    sender_names: HashMap<String, String>,
}

impl RuleSnapshot {
    /// Compile a rule set. User rules come before the built-in defaults.
    pub fn build(rules: RuleSet, config: &ParserConfig) -> Self {
        let mut suppression_rules = rules.suppression_rules;
        if config.include_default_suppression_rules {
            suppression_rules.extend(default_suppression_rules());
        }

        let mut templates: HashMap<String, Vec<HeuristicTemplate>> = HashMap::new();
        for template in rules.templates {
            templates
                .entry(template.signature.clone())
                .or_default()
                .push(template);
        }

        Self {
            suppression: SuppressionMatcher::new(&suppression_rules),
            custom_rules: CustomRuleMatcher::new(&rules.custom_rules),
            renames: rules
                .rename_rules
                .into_iter()
                .map(|r| (r.original_name.trim().to_lowercase(), r.new_name))
                .collect(),
            merchant_categories: rules
                .merchant_categories
                .into_iter()
                .map(|m| (m.merchant_name.trim().to_lowercase(), m.category_id))
                .collect(),
            category_ids: rules
                .categories
                .into_iter()
                .map(|c| (c.name.trim().to_lowercase(), c.id))
                .collect(),
            templates,
            sender_names: rules
                .sender_names
                .into_iter()
                .map(|(sender, name)| (sender.trim().to_lowercase(), name))
                .collect(),
        }
    }

    /// Fetch every rule set once for a batch of messages.
    ///
    /// Templates are fetched once per distinct signature present in the batch,
    /// so a message outside `messages` will not see any template.
    pub async fn load(
        sources: &RuleSources,
        messages: &[IncomingMessage],
        config: &ParserConfig,
    ) -> Result<Self> {
        let signatures = SignatureGenerator::new();
        let distinct: BTreeSet<String> = messages
            .iter()
            .map(|msg| signatures.signature(&msg.body))
            .collect();

        let mut templates = Vec::new();
        for signature in &distinct {
            templates.extend(sources.templates.templates_for_signature(signature).await?);
        }

        let sender_names = match &sources.address_book {
            Some(book) => book.sender_names().await?,
            None => HashMap::new(),
        };

        let rules = RuleSet {
            suppression_rules: sources.suppression.enabled_suppression_rules().await?,
            custom_rules: sources.custom.custom_rules().await?,
            rename_rules: sources.renames.rename_rules().await?,
            categories: sources.categories.categories().await?,
            merchant_categories: sources.categories.merchant_categories().await?,
            templates,
            sender_names,
        };

        debug!(
            "Loaded rule snapshot: {} suppression, {} custom, {} rename, {} templates over {} signatures",
            rules.suppression_rules.len(),
            rules.custom_rules.len(),
            rules.rename_rules.len(),
            rules.templates.len(),
            distinct.len()
        );

        Ok(Self::build(rules, config))
    }

    pub fn templates_for(&self, signature: &str) -> &[HeuristicTemplate] {
        self.templates
            .get(signature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rename_for(&self, merchant: &str) -> Option<&str> {
        self.renames
            .get(&merchant.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn category_for_merchant(&self, merchant: &str) -> Option<i64> {
        self.merchant_categories
            .get(&merchant.trim().to_lowercase())
            .copied()
    }

    pub fn category_id_by_name(&self, name: &str) -> Option<i64> {
        self.category_ids.get(&name.trim().to_lowercase()).copied()
    }

    pub fn sender_names(&self) -> &HashMap<String, String> {
        &self.sender_names
    }
}
