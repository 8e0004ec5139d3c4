use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Whether money left or entered the user's account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionDirection {
    Expense,
    Income,
}

impl TransactionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionDirection::Expense => "expense",
            TransactionDirection::Income => "income",
        }
    }
}

impl fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank account, card or wallet identified in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedAccount {
    pub name: String,
    pub account_type: String,
}

impl ExtractedAccount {
    pub fn new(name: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_type: account_type.into(),
        }
    }
}

/// Structured transaction recovered from a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedTransaction {
    // Source tracking
    pub source_message_id: String,
    pub source_sender: String,

    // Transaction data
    /// Always positive and finite
    pub amount: f64,
    pub direction: TransactionDirection,
    pub merchant_name: Option<String>,
    pub currency_code: Option<String>,
    pub category_id: Option<i64>,
    pub account: Option<ExtractedAccount>,

    // Provenance
    pub raw_message: String,
    pub dedup_hash: String,
    pub signature: String,
    pub timestamp: i64,
}

/// Terminal result of running the pipeline over one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ParseOutcome {
    Parsed(ExtractedTransaction),
    Ignored { reason: String },
    NotParsed { reason: String },
    RejectedByClassifier { confidence: f32, reason: String },
}

impl ParseOutcome {
    pub fn ignored(reason: impl Into<String>) -> Self {
        ParseOutcome::Ignored {
            reason: reason.into(),
        }
    }

    pub fn not_parsed(reason: impl Into<String>) -> Self {
        ParseOutcome::NotParsed {
            reason: reason.into(),
        }
    }

    pub fn transaction(&self) -> Option<&ExtractedTransaction> {
        match self {
            ParseOutcome::Parsed(txn) => Some(txn),
            ParseOutcome::Ignored { .. }
            | ParseOutcome::NotParsed { .. }
            | ParseOutcome::RejectedByClassifier { .. } => None,
        }
    }

    /// Human-readable explanation for debugging views; `None` for parsed messages
    pub fn reason(&self) -> Option<&str> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Ignored { reason }
            | ParseOutcome::NotParsed { reason }
            | ParseOutcome::RejectedByClassifier { reason, .. } => Some(reason),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }
}
