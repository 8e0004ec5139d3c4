//! Extractors Crate
//!
//! Turns free-text bank and payment notifications into structured
//! transactions. Data types live in the `shared-types` crate; this crate
//! holds the pipeline and the rule plumbing around it.
//!
//! # Usage
//!
//! Rule data is fetched once per batch through the async source traits,
//! then every message is parsed synchronously against that snapshot.
//!
//! ```rust,ignore
//! use extractors::{InMemoryRuleStore, RuleSources, TransactionParser};
//!
//! let parser = TransactionParser::default();
//! let sources = RuleSources::from_store(Arc::new(store));
//! let snapshot = parser.load_snapshot(&sources, &messages).await?;
//! let outcomes = parser.parse_batch(&snapshot, &messages);
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod learning;
pub mod rule_sources;
pub mod rule_validation;
pub mod snapshot;
pub mod transaction_parser;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use learning::draft_template;
pub use rule_sources::{
    AddressBookSource, CategorySource, CustomRuleSource, InMemoryRuleStore, RenameRuleSource,
    RuleSources, SuppressionRuleSource, TemplateSource,
};
pub use snapshot::{RuleSet, RuleSnapshot};
pub use transaction_parser::classifier::{ClassifierVerdict, TransactionClassifier};
pub use transaction_parser::TransactionParser;

// Re-export the data model for convenience
pub use shared_types::{ExtractedTransaction, IncomingMessage, ParseOutcome};
