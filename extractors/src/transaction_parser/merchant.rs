use regex::Regex;
use std::collections::HashMap;

/// One phrasing a merchant name can appear in. Group 1 holds the candidate.
pub struct MerchantPattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl MerchantPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// Ordered, most specific phrasing first. The first candidate that survives
/// `clean_merchant_candidate` wins.
pub fn create_merchant_patterns() -> Vec<MerchantPattern> {
    vec![
        // "... at AMAZON on 12-01-25"
        MerchantPattern::new("at_on", r"(?i)\bat\s+(.+?)\s+on\b"),
        // "... To Raju On 07/08/25", "... to ZOMATO Ref No 1234"
        MerchantPattern::new("to_ref_or_on", r"(?i)\bto\s+(.+?)\s+(?:ref(?:\s*no)?|on)\b"),
        // "... by SWIGGY. Avl bal"
        MerchantPattern::new("by_dot", r"(?i)\bby\s+([A-Za-z][A-Za-z0-9&' -]*?)\.(?:\s|$)"),
        // "... towards BESCOM for bill"
        MerchantPattern::new("towards_for", r"(?i)\btowards\s+(.+?)\s+for\b"),
        // "... to VPA zomato@icici", "VPA paytm-123@ptys"
        MerchantPattern::new(
            "vpa_to",
            r"(?i)\b(?:to|vpa)\s+([a-z0-9][a-z0-9._-]*@[a-z][a-z0-9.]*)",
        ),
        // "... from rahul.k@okaxis"
        MerchantPattern::new(
            "vpa_from",
            r"(?i)\bfrom\s+([a-z0-9][a-z0-9._-]*@[a-z][a-z0-9.]*)",
        ),
        // "Info: UPI/P2M/412345678901/BLINKIT"
        MerchantPattern::new(
            "upi_path",
            r"(?i)\bupi/(?:p2[am]/)?\d+/([^/\s][^/]*?)(?:/|\s|$)",
        ),
        // "Info: IMPS-CASHFREE PAYMENTS."
        MerchantPattern::new(
            "info_label",
            r"(?i)\binfo\s*[:-]\s*([A-Za-z][\w&' .-]*?)(?:\.(?:\s|$)|,|$)",
        ),
        // "Merchant Name: BIG BAZAAR,"
        MerchantPattern::new(
            "merchant_label",
            r"(?i)\bmerchant(?:\s+name)?\s*:\s*(.+?)(?:\.(?:\s|$)|,|$)",
        ),
        // "Beneficiary: JOHN DOE"
        MerchantPattern::new(
            "beneficiary_label",
            r"(?i)\bbeneficiary(?:\s+name)?\s*:\s*(.+?)(?:\.(?:\s|$)|,|$)",
        ),
        // "Paid to ZEPTO via UPI"
        MerchantPattern::new(
            "paid_to",
            r"(?i)\bpaid\s+to\s+(.+?)(?:\s+(?:on|via|using|ref)\b|\.(?:\s|$)|,|$)",
        ),
        // "payment to AIRTEL is successful"
        MerchantPattern::new(
            "payment_to",
            r"(?i)\bpayment\s+to\s+(.+?)(?:\s+(?:on|via|ref|is|was|of)\b|\.(?:\s|$)|,|$)",
        ),
        // "trf to PRIYA Ref"
        MerchantPattern::new(
            "trf_to",
            r"(?i)\btrf\s+to\s+(.+?)(?:\s+(?:ref|on)\b|\.(?:\s|$)|,|$)",
        ),
        // "for purchase at DECATHLON."
        MerchantPattern::new(
            "purchase_at",
            r"(?i)\bpurchase\s+(?:at|from|on)\s+(.+?)(?:\s+(?:on|via|using)\b|\.(?:\s|$)|,|$)",
        ),
        // "spent on NETFLIX."
        MerchantPattern::new(
            "spent_on",
            r"(?i)\bspent\s+on\s+([A-Za-z][^,]*?)(?:\s+(?:on|via|using)\b|\.(?:\s|$)|,|$)",
        ),
        // "debited for IRCTC on"
        MerchantPattern::new(
            "debited_for",
            r"(?i)\bdebited\s+for\s+([A-Za-z][^,]*?)(?:\s+(?:on|via)\b|\.(?:\s|$)|,|$)",
        ),
        // "... at STARBUCKS."
        MerchantPattern::new(
            "at_terminal",
            r"(?i)\bat\s+([A-Za-z0-9][^,]*?)(?:\s+(?:on|using|via|for|with)\b|\.(?:\s|$)|,|$)",
        ),
        // "credited to your a/c from ACME CORP."
        MerchantPattern::new(
            "received_from",
            r"(?i)\b(?:received|credited)\b.*?\bfrom\s+([A-Za-z][^,]*?)(?:\s+(?:on|via|ref|upi)\b|\.(?:\s|$)|,|$)",
        ),
        // "... sent to MOM."
        MerchantPattern::new(
            "to_terminal",
            r"(?i)\bto\s+([A-Za-z][^,]*?)(?:\s+(?:on|via|using|from|for)\b|\.(?:\s|$)|,|$)",
        ),
        // "NEFT-HDFCN52025-ACME PVT LTD"
        MerchantPattern::new("neft_reference", r"(?i)\b(NEFT[-/][\w/ -]+?)(?:\.(?:\s|$)|,|$)"),
        // "... https://bit.ly/x1 - MYNTRA"
        MerchantPattern::new(
            "url_trailing",
            r"(?i)https?://\S+\s+(?:-\s*)?([A-Za-z][A-Za-z0-9 &'.-]*?)\.?$",
        ),
    ]
}

pub struct MerchantExtractor {
    patterns: Vec<MerchantPattern>,
}

impl MerchantExtractor {
    pub fn new() -> Self {
        Self {
            patterns: create_merchant_patterns(),
        }
    }

    /// Address-book name for the sender first, then the ordered pattern list
    pub fn extract(
        &self,
        body: &str,
        sender: &str,
        sender_names: &HashMap<String, String>,
    ) -> Option<String> {
        if let Some(name) = sender_names.get(&sender.to_lowercase()) {
            return Some(name.clone());
        }

        for pattern in &self.patterns {
            let Some(candidate) = pattern
                .regex
                .captures(body)
                .and_then(|caps| caps.get(1))
            else {
                continue;
            };

            if let Some(merchant) = clean_merchant_candidate(candidate.as_str()) {
                tracing::debug!("Merchant '{}' matched by pattern '{}'", merchant, pattern.name);
                return Some(merchant);
            }
        }

        None
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Validity filter applied to every raw capture
pub fn clean_merchant_candidate(raw: &str) -> Option<String> {
    let spaced = raw.replace('_', " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = collapsed.trim_end_matches(|c: char| c == '.' || c.is_whitespace());

    if cleaned.is_empty() {
        return None;
    }

    let lower = cleaned.to_lowercase();

    // Card-block helpline boilerplate: "to block card call 1800..."
    if lower.contains("call") {
        return None;
    }

    // The user's own account, e.g. "to your A/c XX12 from ..."
    if lower.starts_with("your ") {
        return None;
    }

    if looks_like_reference_number(cleaned) {
        return None;
    }

    Some(cleaned.to_string())
}

fn looks_like_reference_number(candidate: &str) -> bool {
    candidate.chars().count() >= 8
        && candidate.chars().any(|c| c.is_ascii_digit())
        && !candidate.chars().any(|c| c.is_alphabetic())
        && !candidate.starts_with("NEFT")
}
