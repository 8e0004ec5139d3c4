//! Data model shared between the extraction core and its host application.
//!
//! Everything here is a plain value: messages coming in, transactions and
//! outcomes going out, and the externally owned rules the core reads.

pub mod message;
pub mod rules;
pub mod transaction;

pub use message::IncomingMessage;
pub use rules::{
    Category, CustomExtractionRule, HeuristicTemplate, MerchantCategory, RenameRule,
    SuppressionKind, SuppressionRule, TemplateDraft,
};
pub use transaction::{ExtractedAccount, ExtractedTransaction, ParseOutcome, TransactionDirection};
