use shared_types::{HeuristicTemplate, TransactionDirection};
use tracing::debug;

use super::amount::parse_amount;
use super::direction::direction_or_income;

/// What the template stage decided for one message
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateOutcome {
    /// No template is stored under this signature
    NoTemplate,
    /// Several templates share the signature; none is applied
    Ambiguous(usize),
    /// The single template's amount slice did not parse on this body
    Unusable,
    Applied(TemplateMatch),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch {
    pub amount: f64,
    pub merchant: String,
    pub direction: TransactionDirection,
}

/// Re-apply a learned template to a structurally identical body.
///
/// `candidates` are all templates stored under the body's signature.
pub fn apply_templates(candidates: &[HeuristicTemplate], normalized_body: &str) -> TemplateOutcome {
    let template = match candidates {
        [] => return TemplateOutcome::NoTemplate,
        [single] => single,
        many => {
            debug!(
                "{} templates share signature '{}', declining to pick one",
                many.len(),
                many[0].signature
            );
            return TemplateOutcome::Ambiguous(many.len());
        }
    };

    let Some(amount_text) = slice_chars(normalized_body, template.amount_start, template.amount_end)
    else {
        debug!("Template offsets fall outside the body, skipping template");
        return TemplateOutcome::Unusable;
    };

    let Some(amount) = parse_amount(amount_text.trim()) else {
        debug!("Template amount slice '{}' did not parse", amount_text);
        return TemplateOutcome::Unusable;
    };

    // Direction follows the body the template was learned from
    let direction = direction_or_income(&template.original_text);

    debug!(
        "Applied template for merchant '{}' (amount {})",
        template.merchant_name, amount
    );

    TemplateOutcome::Applied(TemplateMatch {
        amount,
        merchant: template.merchant_name.clone(),
        direction,
    })
}

/// Char-offset slice with the end clamped to the body length
fn slice_chars(body: &str, start: usize, end: usize) -> Option<String> {
    let len = body.chars().count();
    let end = end.min(len);
    if start >= end {
        return None;
    }
    Some(body.chars().skip(start).take(end - start).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(merchant: &str, original: &str, amount_start: usize, amount_end: usize) -> HeuristicTemplate {
        HeuristicTemplate {
            signature: "sig".to_string(),
            merchant_name: merchant.to_string(),
            original_text: original.to_string(),
            merchant_start: 0,
            merchant_end: 0,
            amount_start,
            amount_end,
        }
    }

    #[test]
    fn test_single_template_applies_stored_offsets() {
        // amount sits at chars 4..10 in both bodies
        let t = template("Corner Shop", "Txn 100.00 debited at shop 7", 4, 10);
        let outcome = apply_templates(&[t], "Txn 250.00 debited at shop 9");

        assert_eq!(
            outcome,
            TemplateOutcome::Applied(TemplateMatch {
                amount: 250.0,
                merchant: "Corner Shop".to_string(),
                direction: TransactionDirection::Expense,
            })
        );
    }

    #[test]
    fn test_end_offset_clamped_to_shorter_body() {
        let t = template("Shop", "Paid 1,234", 5, 40);
        match apply_templates(&[t], "Paid 1,999") {
            TemplateOutcome::Applied(m) => assert_eq!(m.amount, 1999.0),
            other => panic!("expected applied template, got {:?}", other),
        }
    }

    #[test]
    fn test_direction_comes_from_original_text() {
        let t = template("Employer", "Amount 500 credited to you", 7, 10);
        match apply_templates(&[t], "Amount 900 debited from you") {
            TemplateOutcome::Applied(m) => assert_eq!(m.direction, TransactionDirection::Income),
            other => panic!("expected applied template, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_templates_are_ambiguous() {
        let a = template("Amazon", "Paid 100", 5, 8);
        let b = template("Flipkart", "Paid 100", 5, 8);
        assert_eq!(apply_templates(&[a, b], "Paid 300"), TemplateOutcome::Ambiguous(2));
    }

    #[test]
    fn test_no_templates() {
        assert_eq!(apply_templates(&[], "Paid 300"), TemplateOutcome::NoTemplate);
    }

    #[test]
    fn test_unparseable_slice_is_unusable() {
        let t = template("Shop", "Paid 100", 0, 4);
        assert_eq!(apply_templates(&[t], "Paid 300"), TemplateOutcome::Unusable);
    }

    #[test]
    fn test_start_past_end_is_unusable() {
        let t = template("Shop", "Paid 100", 20, 24);
        assert_eq!(apply_templates(&[t], "Paid 300"), TemplateOutcome::Unusable);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let t = template("Cafe", "₹ 120 paid", 2, 5);
        match apply_templates(&[t], "₹ 450 paid") {
            TemplateOutcome::Applied(m) => assert_eq!(m.amount, 450.0),
            other => panic!("expected applied template, got {:?}", other),
        }
    }
}
