use sha2::{Digest, Sha256};
use shared_types::{ExtractedAccount, ExtractedTransaction, IncomingMessage, TransactionDirection};
use tracing::debug;

use super::account::AccountExtractor;
use crate::defaults::keyword_category;
use crate::snapshot::RuleSnapshot;

/// Fields an extraction stage established before enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub amount: f64,
    pub direction: TransactionDirection,
    pub merchant: Option<String>,
    pub currency: Option<String>,
    pub account: Option<ExtractedAccount>,
    /// The account dispatch table already ran on this body
    pub account_searched: bool,
}

impl Candidate {
    pub fn new(amount: f64, direction: TransactionDirection) -> Self {
        Self {
            amount,
            direction,
            merchant: None,
            currency: None,
            account: None,
            account_searched: false,
        }
    }
}

/// Turn a candidate into a finished transaction: category, rename, account
/// fallback, dedup hash and signature.
pub fn enrich(
    candidate: Candidate,
    message: &IncomingMessage,
    normalized_body: &str,
    signature: &str,
    snapshot: &RuleSnapshot,
    accounts: &AccountExtractor,
) -> ExtractedTransaction {
    let original_merchant = candidate.merchant;

    // Category from the merchant as extracted, before any rename
    let mut category_id = original_merchant
        .as_deref()
        .and_then(|merchant| resolve_category(merchant, snapshot));

    let merchant_name = original_merchant.map(|merchant| {
        match snapshot.rename_for(&merchant) {
            Some(renamed) => {
                debug!("Renamed merchant '{}' to '{}'", merchant, renamed);
                renamed.to_string()
            }
            None => merchant,
        }
    });

    if category_id.is_none() {
        category_id = merchant_name
            .as_deref()
            .and_then(|merchant| snapshot.category_for_merchant(merchant));
    }

    let account = match candidate.account {
        Some(account) => Some(account),
        None if !candidate.account_searched => accounts.extract(normalized_body),
        None => None,
    };

    ExtractedTransaction {
        source_message_id: message.id.clone(),
        source_sender: message.sender.clone(),
        amount: candidate.amount,
        direction: candidate.direction,
        merchant_name,
        currency_code: candidate.currency,
        category_id,
        account,
        raw_message: message.body.clone(),
        dedup_hash: dedup_hash(&message.sender, normalized_body),
        signature: signature.to_string(),
        timestamp: message.timestamp,
    }
}

/// Direct merchant mapping, then the keyword table resolved to a category id
fn resolve_category(merchant: &str, snapshot: &RuleSnapshot) -> Option<i64> {
    if let Some(id) = snapshot.category_for_merchant(merchant) {
        return Some(id);
    }

    let name = keyword_category(merchant)?;
    let id = snapshot.category_id_by_name(name);
    if id.is_none() {
        debug!(
            "Keyword category '{}' for merchant '{}' has no id in this snapshot",
            name, merchant
        );
    }
    id
}

/// sha256 over the sender's last 10 digits and the normalized body.
///
/// Separators and country prefixes drop out, so "+91-98765-43210" and
/// "9876543210" hash the same.
pub fn dedup_hash(sender: &str, normalized_body: &str) -> String {
    let digits: Vec<char> = sender.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(10)..].iter().collect();

    let mut hasher = Sha256::new();
    hasher.update(tail.as_bytes());
    hasher.update(normalized_body.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::snapshot::RuleSet;
    use shared_types::{Category, MerchantCategory, RenameRule};

    fn snapshot(rules: RuleSet) -> RuleSnapshot {
        RuleSnapshot::build(rules, &ParserConfig::default())
    }

    fn message(body: &str) -> IncomingMessage {
        IncomingMessage::new("m1", "AM-HDFCBK", body, 1_700_000_000_000)
    }

    fn candidate(merchant: &str) -> Candidate {
        let mut c = Candidate::new(100.0, TransactionDirection::Expense);
        c.merchant = Some(merchant.to_string());
        c
    }

    #[test]
    fn test_category_from_original_name_survives_rename() {
        let snap = snapshot(RuleSet {
            merchant_categories: vec![
                MerchantCategory { merchant_name: "AMZN".to_string(), category_id: 1 },
                MerchantCategory { merchant_name: "Amazon".to_string(), category_id: 2 },
            ],
            rename_rules: vec![RenameRule {
                original_name: "amzn".to_string(),
                new_name: "Amazon".to_string(),
            }],
            ..Default::default()
        });

        let txn = enrich(candidate("AMZN"), &message("x"), "x", "sig", &snap, &AccountExtractor::new());
        assert_eq!(txn.merchant_name.as_deref(), Some("Amazon"));
        assert_eq!(txn.category_id, Some(1));
    }

    #[test]
    fn test_renamed_name_used_when_original_has_no_category() {
        let snap = snapshot(RuleSet {
            merchant_categories: vec![MerchantCategory {
                merchant_name: "Corner Cafe".to_string(),
                category_id: 9,
            }],
            rename_rules: vec![RenameRule {
                original_name: "CRNR CF".to_string(),
                new_name: "Corner Cafe".to_string(),
            }],
            ..Default::default()
        });

        let txn = enrich(candidate("CRNR CF"), &message("x"), "x", "sig", &snap, &AccountExtractor::new());
        assert_eq!(txn.category_id, Some(9));
    }

    #[test]
    fn test_keyword_fallback_resolves_category_id() {
        let snap = snapshot(RuleSet {
            categories: vec![Category { id: 4, name: "Food & Dining".to_string() }],
            ..Default::default()
        });

        let txn = enrich(candidate("STARBUCKS"), &message("x"), "x", "sig", &snap, &AccountExtractor::new());
        assert_eq!(txn.category_id, Some(4));

        // Keyword category unknown to the host: no category
        let empty = snapshot(RuleSet::default());
        let txn = enrich(candidate("STARBUCKS"), &message("x"), "x", "sig", &empty, &AccountExtractor::new());
        assert_eq!(txn.category_id, None);
    }

    #[test]
    fn test_account_fallback_only_when_not_searched() {
        let body = "Rs 50 debited from HDFC Bank A/C *1243";
        let snap = snapshot(RuleSet::default());
        let accounts = AccountExtractor::new();

        let txn = enrich(candidate("X"), &message(body), body, "sig", &snap, &accounts);
        assert!(txn.account.is_some());

        let mut searched = candidate("X");
        searched.account_searched = true;
        let txn = enrich(searched, &message(body), body, "sig", &snap, &accounts);
        assert!(txn.account.is_none());
    }

    #[test]
    fn test_dedup_hash_uses_sender_tail() {
        let body = "Rs 50 debited";
        assert_eq!(dedup_hash("+919876543210", body), dedup_hash("9876543210", body));
        assert_eq!(dedup_hash("+91-98765-43210", body), dedup_hash("9876543210", body));
        assert_eq!(dedup_hash(" 98765 43210 ", body), dedup_hash("9876543210", body));
        assert_ne!(dedup_hash("9876543210", body), dedup_hash("9876543211", body));
        assert_eq!(dedup_hash("AM-HDFCBK", body).len(), 64);
    }

    #[test]
    fn test_provenance_fields_copied() {
        let snap = snapshot(RuleSet::default());
        let msg = message("Rs  50 debited");
        let txn = enrich(candidate("X"), &msg, "Rs 50 debited", "rs debited", &snap, &AccountExtractor::new());
        assert_eq!(txn.source_message_id, "m1");
        assert_eq!(txn.raw_message, "Rs  50 debited");
        assert_eq!(txn.signature, "rs debited");
        assert_eq!(txn.timestamp, 1_700_000_000_000);
    }
}
