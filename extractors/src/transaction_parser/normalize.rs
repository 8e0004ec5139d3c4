use regex::Regex;

/// Collapse every whitespace run to a single space and trim the ends
pub fn normalize_body(body: &str) -> String {
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Erases volatile substrings so messages of the same shape share a key.
///
/// The erasure order is fixed: dates with month names and reference tokens
/// must run before the bare 4+ digit eraser, otherwise they fragment.
pub struct SignatureGenerator {
    erasers: Vec<Regex>,
}

impl SignatureGenerator {
    pub fn new() -> Self {
        let erasers = vec![
            // Currency-prefixed amounts: "Rs.1,200.50", "INR 300", "MYR 55.50", "₹99"
            Regex::new(
                r"(?i)(?:\brs\.?|\binr\b|\busd\b|\beur\b|\bgbp\b|\bmyr\b|\bsgd\b|\baed\b|[₹$€£])\s*\d[\d,]*(?:\.\d+)?",
            )
            .unwrap(),
            // 07-08-2025, 07/08/25
            Regex::new(r"\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b").unwrap(),
            // 07-Aug-2025
            Regex::new(r"(?i)\b\d{1,2}-[a-z]{3}-\d{2,4}\b").unwrap(),
            // 14:05, 14:05:33
            Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?\b").unwrap(),
            // Ref 5585..., UPI Ref No. 123, Txn ID ABC123, id 42
            Regex::new(r"(?i)\b(?:upi\s+ref|ref|txn|id)\b(?:\s*(?:no|id)\b)?\.?[\s:#-]*[a-z0-9]+")
                .unwrap(),
            // A/c no. XX1234, A/C *1243
            Regex::new(r"(?i)\ba/c\s*(?:no\.?\s*)?[x*]*\d+").unwrap(),
            // Avl Bal: Rs 1,000.00 (the amount itself may already be gone)
            Regex::new(r"(?i)\bavl\.?\s*bal(?:ance)?\s*:?\s*(?:(?:rs\.?|inr)\s*)?(?:\d[\d,]*(?:\.\d+)?)?")
                .unwrap(),
            // Any remaining run of 4+ digits
            Regex::new(r"\d{4,}").unwrap(),
        ];

        Self { erasers }
    }

    /// Structural fingerprint of a body. Invariant under case and whitespace-run changes.
    pub fn signature(&self, body: &str) -> String {
        let mut erased = normalize_body(body);
        for eraser in &self.erasers {
            erased = eraser.replace_all(&erased, "").into_owned();
        }
        normalize_body(&erased.to_lowercase())
    }
}

impl Default for SignatureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_body("  Sent\tRs.11.00 \n\n From  HDFC  "), "Sent Rs.11.00 From HDFC");
        assert_eq!(normalize_body(""), "");
        assert_eq!(normalize_body(" \t\n"), "");
    }

    #[test]
    fn test_signature_erases_volatile_parts() {
        let gen = SignatureGenerator::new();
        let sig = gen.signature(
            "Sent Rs.11.00 From HDFC Bank A/C *1243 To Raju On 07/08/25 Ref 558523453508",
        );
        assert_eq!(sig, "sent from hdfc bank to raju on");
    }

    #[test]
    fn test_signature_ignores_amount_and_date_changes() {
        let gen = SignatureGenerator::new();
        let a = gen.signature("Rs 500.00 debited from A/c XX4321 on 12-Jan-2025 14:02. Avl Bal: Rs 1,200.00");
        let b = gen.signature("Rs 75.25 debited from A/c XX9876 on 03-Feb-2025 09:15:44. Avl Bal: Rs 99.10");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_invariant_under_case_and_whitespace() {
        let gen = SignatureGenerator::new();
        let a = gen.signature("You have spent MYR 55.50 at STARBUCKS.");
        let b = gen.signature("you  have SPENT   myr 12.00\tat starbucks.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_merchant_or_verb() {
        let gen = SignatureGenerator::new();
        let base = gen.signature("You have spent MYR 55.50 at STARBUCKS.");
        assert_ne!(base, gen.signature("You have spent MYR 55.50 at COSTA."));
        assert_ne!(base, gen.signature("You have received MYR 55.50 at STARBUCKS."));
    }

    #[test]
    fn test_txn_id_value_is_erased() {
        let gen = SignatureGenerator::new();
        let a = gen.signature("Rs 500 debited Txn ID AB12CD at SHOP");
        let b = gen.signature("Rs 75 debited Txn ID ZX98QW at SHOP");
        assert_eq!(a, "debited at shop");
        assert_eq!(a, b);
        assert_eq!(
            gen.signature("UPI Ref No. 4411 paid to KIRANA"),
            gen.signature("UPI Ref No. 9823 paid to KIRANA")
        );
    }

    #[test]
    fn test_refund_word_survives_ref_eraser() {
        let gen = SignatureGenerator::new();
        assert_eq!(gen.signature("Refund processed"), "refund processed");
    }
}
