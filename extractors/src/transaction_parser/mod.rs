//! Message-to-transaction pipeline.
//!
//! Stage order per message: normalize, ignore filter, custom rules
//! (short-circuit), optional classifier, heuristic template, generic
//! engine, enrichment.

pub mod account;
pub mod amount;
pub mod classifier;
pub mod custom_rules;
pub mod direction;
pub mod enrichment;
pub mod ignore_filter;
pub mod merchant;
pub mod normalize;
pub mod templates;

use shared_types::{IncomingMessage, ParseOutcome};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::rule_sources::RuleSources;
use crate::snapshot::RuleSnapshot;

use account::AccountExtractor;
use amount::AmountExtractor;
use classifier::TransactionClassifier;
use direction::classify_direction;
use enrichment::{enrich, Candidate};
use merchant::MerchantExtractor;
use normalize::{normalize_body, SignatureGenerator};
use templates::{apply_templates, TemplateOutcome};

pub const REASON_NO_AMOUNT: &str = "no amount found";
pub const REASON_NO_DIRECTION: &str = "direction undetermined";

/// Compiled built-in patterns plus parser settings.
///
/// Construct once and share; parsing takes `&self` and touches no mutable state.
pub struct TransactionParser {
    config: ParserConfig,
    signatures: SignatureGenerator,
    amounts: AmountExtractor,
    merchants: MerchantExtractor,
    accounts: AccountExtractor,
}

impl TransactionParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            signatures: SignatureGenerator::new(),
            amounts: AmountExtractor::new(),
            merchants: MerchantExtractor::new(),
            accounts: AccountExtractor::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn signature(&self, body: &str) -> String {
        self.signatures.signature(body)
    }

    /// Fetch all rule data for a batch using this parser's config
    pub async fn load_snapshot(
        &self,
        sources: &RuleSources,
        messages: &[IncomingMessage],
    ) -> Result<RuleSnapshot> {
        RuleSnapshot::load(sources, messages, &self.config).await
    }

    pub fn parse(&self, snapshot: &RuleSnapshot, message: &IncomingMessage) -> ParseOutcome {
        self.run(snapshot, message, None)
    }

    pub fn parse_with_classifier(
        &self,
        snapshot: &RuleSnapshot,
        message: &IncomingMessage,
        classifier: &dyn TransactionClassifier,
    ) -> ParseOutcome {
        self.run(snapshot, message, Some(classifier))
    }

    /// One outcome per message, in input order
    pub fn parse_batch(
        &self,
        snapshot: &RuleSnapshot,
        messages: &[IncomingMessage],
    ) -> Vec<ParseOutcome> {
        messages
            .iter()
            .map(|message| self.parse(snapshot, message))
            .collect()
    }

    fn run(
        &self,
        snapshot: &RuleSnapshot,
        message: &IncomingMessage,
        classifier: Option<&dyn TransactionClassifier>,
    ) -> ParseOutcome {
        let body = normalize_body(&message.body);

        if let Some(reason) = snapshot.suppression.check(&message.sender, &body) {
            debug!("Message {} ignored: {}", message.id, reason);
            return ParseOutcome::ignored(reason);
        }

        let signature = self.signatures.signature(&body);

        if let Some(found) = snapshot.custom_rules.find_match(&body) {
            debug!(
                "Message {} parsed by custom rule '{}'",
                message.id, found.trigger_phrase
            );
            let candidate = Candidate {
                amount: found.amount,
                direction: found.direction,
                merchant: found.merchant,
                currency: None,
                account: found.account,
                account_searched: false,
            };
            return self.finish(candidate, message, &body, &signature, snapshot);
        }

        if let Some(classifier) = classifier {
            let verdict = classifier.classify(&body);
            if !verdict.is_transaction
                && verdict.confidence >= self.config.classifier_rejection_threshold
            {
                debug!(
                    "Message {} rejected by classifier ({:.2})",
                    message.id, verdict.confidence
                );
                return ParseOutcome::RejectedByClassifier {
                    confidence: verdict.confidence,
                    reason: format!(
                        "Classifier judged message non-transactional (confidence {:.2})",
                        verdict.confidence
                    ),
                };
            }
        }

        if let TemplateOutcome::Applied(found) =
            apply_templates(snapshot.templates_for(&signature), &body)
        {
            debug!("Message {} parsed by template", message.id);
            let mut candidate = Candidate::new(found.amount, found.direction);
            candidate.merchant = Some(found.merchant);
            return self.finish(candidate, message, &body, &signature, snapshot);
        }

        match self.generic(snapshot, message, &body) {
            Ok(candidate) => self.finish(candidate, message, &body, &signature, snapshot),
            Err(reason) => {
                debug!("Message {} not parsed: {}", message.id, reason);
                ParseOutcome::not_parsed(reason)
            }
        }
    }

    /// Two-pass amount, direction, merchant and account extraction
    fn generic(
        &self,
        snapshot: &RuleSnapshot,
        message: &IncomingMessage,
        body: &str,
    ) -> std::result::Result<Candidate, &'static str> {
        let amount = self.amounts.extract(body).ok_or(REASON_NO_AMOUNT)?;
        let direction = classify_direction(body).ok_or(REASON_NO_DIRECTION)?;

        debug!(
            "Amount {} ({:?} pass), direction {}",
            amount.amount, amount.pass, direction
        );

        Ok(Candidate {
            amount: amount.amount,
            direction,
            merchant: self
                .merchants
                .extract(body, &message.sender, snapshot.sender_names()),
            currency: amount.currency,
            account: self.accounts.extract(body),
            account_searched: true,
        })
    }

    fn finish(
        &self,
        candidate: Candidate,
        message: &IncomingMessage,
        body: &str,
        signature: &str,
        snapshot: &RuleSnapshot,
    ) -> ParseOutcome {
        ParseOutcome::Parsed(enrich(
            candidate,
            message,
            body,
            signature,
            snapshot,
            &self.accounts,
        ))
    }
}

impl Default for TransactionParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
