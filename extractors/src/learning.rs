//! Raw materials for learning a template from a user's correction.
//!
//! Nothing here persists; the host stores the returned draft as a
//! `HeuristicTemplate` if it wants the shape remembered.

use regex::RegexBuilder;
use shared_types::{IncomingMessage, TemplateDraft};
use tracing::debug;

use crate::transaction_parser::amount::parse_amount;
use crate::transaction_parser::normalize::{normalize_body, SignatureGenerator};

/// Locate the user-highlighted merchant and amount text inside the message.
///
/// Offsets are char positions into the normalized body, matching how
/// templates are applied. Returns `None` when either text is missing from
/// the body or the amount text is not a positive number.
pub fn draft_template(
    message: &IncomingMessage,
    corrected_merchant: &str,
    merchant_text: &str,
    amount_text: &str,
) -> Option<TemplateDraft> {
    let body = normalize_body(&message.body);

    let (merchant_start, merchant_end) = find_chars(&body, merchant_text)?;
    let (amount_start, amount_end) = find_chars(&body, amount_text)?;

    if parse_amount(amount_text.trim()).is_none() {
        debug!("Amount text '{}' is not a number, no template drafted", amount_text);
        return None;
    }

    let corrected = corrected_merchant.trim();
    let merchant_name = if corrected.is_empty() {
        normalize_body(merchant_text)
    } else {
        corrected.to_string()
    };

    Some(TemplateDraft {
        signature: SignatureGenerator::new().signature(&body),
        merchant_name,
        original_text: body,
        merchant_start,
        merchant_end,
        amount_start,
        amount_end,
    })
}

/// Case-insensitive search returning char offsets `[start, end)`
fn find_chars(body: &str, needle: &str) -> Option<(usize, usize)> {
    let needle = normalize_body(needle);
    if needle.is_empty() {
        return None;
    }

    let re = RegexBuilder::new(&regex::escape(&needle))
        .case_insensitive(true)
        .build()
        .ok()?;
    let found = re.find(body)?;

    let start = body[..found.start()].chars().count();
    let end = start + found.as_str().chars().count();
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction_parser::templates::{apply_templates, TemplateOutcome};

    #[test]
    fn test_draft_offsets_reapply_to_same_shape() {
        let learned = IncomingMessage::new(
            "m1",
            "VK-KOTAKB",
            "Acct XX12 used for Rs 420.00 at  PAYU*FOODHALL on 03-02-2025",
            0,
        );
        let draft = draft_template(&learned, "Food Hall", "PAYU*FOODHALL", "420.00").unwrap();
        assert_eq!(draft.merchant_name, "Food Hall");
        assert_eq!(&draft.original_text[draft.amount_start..draft.amount_end], "420.00");

        let template = draft.into_template();
        let next = normalize_body("Acct XX12 used for Rs 99.50 at PAYU*FOODHALL on 09-02-2025");
        assert_eq!(SignatureGenerator::new().signature(&next), template.signature);

        match apply_templates(&[template], &next) {
            TemplateOutcome::Applied(found) => {
                assert_eq!(found.amount, 99.5);
                assert_eq!(found.merchant, "Food Hall");
            }
            other => panic!("expected template to apply, got {:?}", other),
        }
    }

    #[test]
    fn test_offsets_are_case_insensitive_and_char_based() {
        let msg = IncomingMessage::new("m1", "X", "₹250 paid to corner cafe", 0);
        let draft = draft_template(&msg, "", "Corner Cafe", "250").unwrap();
        assert_eq!((draft.amount_start, draft.amount_end), (1, 4));
        assert_eq!((draft.merchant_start, draft.merchant_end), (13, 24));
        assert_eq!(draft.merchant_name, "Corner Cafe");
    }

    #[test]
    fn test_missing_text_gives_no_draft() {
        let msg = IncomingMessage::new("m1", "X", "Rs 250 paid to cafe", 0);
        assert!(draft_template(&msg, "Cafe", "bakery", "250").is_none());
        assert!(draft_template(&msg, "Cafe", "cafe", "paid").is_none());
    }
}
