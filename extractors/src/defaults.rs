//! Static rule tables shipped with the parser.
//!
//! These are plain read-only values; the snapshot merges them with user data
//! when `ParserConfig::include_default_suppression_rules` is set.

use shared_types::{SuppressionKind, SuppressionRule};

/// Body phrases for traffic that is never a transaction
const DEFAULT_SUPPRESSION_PHRASES: &[&str] = &[
    // OTP and verification codes, phrased as the code itself rather than a
    // "never share your OTP" footer on a real debit alert
    r"\b(?:otp|one[\s-]time password|verification code)\s*(?:is|for)\b",
    r"\bis your (?:otp|one[\s-]time password|verification code)\b",
    // Promotions
    r"\b(?:flat|upto|up to)\s+\d+%\s+off\b",
    r"\buse (?:promo )?code\b",
    r"limited period offer",
    r"\bpre-approved\b",
    // Delivery notices
    r"out for delivery",
    r"has been (?:shipped|dispatched|delivered)",
    // Bill reminders
    r"minimum amount due",
    r"\b(?:bill|payment) is due\b",
    // Recharge offers
    r"recharge (?:now|today)",
    r"\bpack (?:expires|is expiring|will expire)\b",
];

pub fn default_suppression_rules() -> Vec<SuppressionRule> {
    DEFAULT_SUPPRESSION_PHRASES
        .iter()
        .map(|pattern| SuppressionRule {
            kind: SuppressionKind::BodyPhrase,
            pattern: pattern.to_string(),
            enabled: true,
            is_default: true,
        })
        .collect()
}

/// Category name to merchant keywords, scanned in order by the keyword fallback
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "swiggy", "zomato", "starbucks", "mcdonald", "domino", "pizza", "kfc", "burger",
            "cafe", "restaurant", "dhaba", "bakery", "eatsure",
        ],
    ),
    (
        "Groceries",
        &[
            "bigbasket", "blinkit", "zepto", "dmart", "grofers", "instamart", "supermarket",
            "grocery", "kirana", "more retail",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "flipkart", "myntra", "ajio", "nykaa", "meesho", "tata cliq", "decathlon",
            "ikea", "lifestyle",
        ],
    ),
    (
        "Transport",
        &["uber", "ola", "rapido", "metro", "irctc", "redbus", "fastag", "parking"],
    ),
    (
        "Fuel",
        &["petrol", "fuel", "indian oil", "iocl", "hpcl", "bharat petroleum", "bpcl", "shell"],
    ),
    (
        "Travel",
        &[
            "makemytrip", "goibibo", "cleartrip", "indigo", "air india", "vistara", "airbnb",
            "oyo", "booking.com", "yatra",
        ],
    ),
    (
        "Entertainment",
        &["bookmyshow", "pvr", "inox", "cinema", "steam", "playstation"],
    ),
    (
        "Bills & Utilities",
        &[
            "electricity", "bescom", "tata power", "water", "gas", "broadband", "airtel", "jio",
            "vodafone", "bsnl", "act fibernet",
        ],
    ),
    (
        "Health",
        &["apollo", "pharmeasy", "1mg", "netmeds", "hospital", "clinic", "pharmacy", "medplus"],
    ),
    (
        "Education",
        &["udemy", "coursera", "byju", "unacademy", "school", "college", "university"],
    ),
    (
        "Subscriptions",
        &["netflix", "spotify", "hotstar", "prime video", "youtube", "apple.com", "google play"],
    ),
    (
        "Transfers",
        &["neft", "imps", "rtgs", "upi transfer", "self transfer"],
    ),
];

/// First category whose keyword list contains the merchant name, case-insensitively
pub fn keyword_category(merchant: &str) -> Option<&'static str> {
    let merchant = merchant.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| merchant.contains(kw)))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction_parser::ignore_filter::SuppressionMatcher;
    use regex::RegexBuilder;

    #[test]
    fn test_default_rules_are_flagged_and_compile() {
        let rules = default_suppression_rules();
        assert!(!rules.is_empty());
        for rule in &rules {
            assert!(rule.is_default);
            assert!(rule.enabled);
            assert_eq!(rule.kind, SuppressionKind::BodyPhrase);
            assert!(
                RegexBuilder::new(&rule.pattern).case_insensitive(true).build().is_ok(),
                "default pattern '{}' should compile",
                rule.pattern
            );
        }
    }

    #[test]
    fn test_otp_rules_match_codes_not_footers() {
        let matcher = SuppressionMatcher::new(&default_suppression_rules());

        assert!(matcher.check("AD-HDFCBK", "Your OTP is 554433").is_some());
        assert!(matcher
            .check("AD-HDFCBK", "482910 is your verification code for login")
            .is_some());
        assert!(matcher
            .check("AD-HDFCBK", "OTP for txn of Rs 500 at AMAZON is 112233")
            .is_some());

        assert!(matcher
            .check(
                "AD-HDFCBK",
                "Rs 500.00 debited from A/c XX1234 at AMAZON on 01-02-25. Never share your OTP with anyone.",
            )
            .is_none());
    }

    #[test]
    fn test_keyword_category_lookup() {
        assert_eq!(keyword_category("STARBUCKS COFFEE"), Some("Food & Dining"));
        assert_eq!(keyword_category("Amazon Pay"), Some("Shopping"));
        assert_eq!(keyword_category("Raju"), None);
    }

    #[test]
    fn test_keyword_table_order_decides_ties() {
        // "swiggy instamart" hits both Food & Dining and Groceries
        assert_eq!(keyword_category("Swiggy Instamart"), Some("Food & Dining"));
    }
}
