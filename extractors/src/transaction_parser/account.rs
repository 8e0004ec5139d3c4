use regex::{Captures, Regex};
use shared_types::ExtractedAccount;

const ISSUERS: &str = concat!(
    r"HDFC|ICICI|SBI|Axis|Kotak|IDFC\s+FIRST|Yes|IndusInd|Federal|RBL|HSBC|Citi|",
    r"Standard\s+Chartered|Canara|PNB|Union|BOB|Bank\s+of\s+Baroda|AU|Amex|American\s+Express"
);

/// Each issuer phrasing reassembles its groups differently, so every
/// pattern carries its own formatter.
pub struct AccountPattern {
    pub name: &'static str,
    pub regex: Regex,
    pub format: fn(&Captures) -> Option<ExtractedAccount>,
}

pub fn create_account_patterns() -> Vec<AccountPattern> {
    vec![
        // "From HDFC Bank A/C *1243" -> "HDFC Bank A/C *1243"
        AccountPattern {
            name: "hdfc_account",
            regex: Regex::new(r"(?i)\bHDFC\s+Bank\s+A/?C\s*(?:no\.?\s*)?[x*]*(\d{3,6})\b").unwrap(),
            format: |caps| {
                let last = caps.get(1)?.as_str();
                Some(ExtractedAccount::new(
                    format!("HDFC Bank A/C *{}", last),
                    "Bank Account",
                ))
            },
        },
        // "ICICI Bank Credit Card XX9876" -> "ICICI Bank Credit Card - xx9876"
        AccountPattern {
            name: "issuer_card",
            regex: Regex::new(&format!(
                r"(?i)\b({issuers})(?:\s+Bank)?\s+(Credit|Debit)\s+Card\s+(?:ending\s+(?:with\s+|in\s+)?)?(?:no\.?\s*)?[x*]*(\d{{4}})\b",
                issuers = ISSUERS
            ))
            .unwrap(),
            format: |caps| {
                let bank = canonical_issuer(caps.get(1)?.as_str());
                let card = title_case(caps.get(2)?.as_str());
                let last = caps.get(3)?.as_str();
                Some(ExtractedAccount::new(
                    format!("{} {} Card - xx{}", bank, card, last),
                    format!("{} Card", card),
                ))
            },
        },
        // "ICICI Bank Acct XX123" -> "ICICI Bank - xx123"
        AccountPattern {
            name: "issuer_account",
            regex: Regex::new(&format!(
                r"(?i)\b({issuers})(?:\s+Bank)?\s+(?:A/?c|Acct|Account)\s*(?:no\.?\s*)?(?:ending\s+(?:with\s+|in\s+)?)?[x*]*(\d{{3,6}})\b",
                issuers = ISSUERS
            ))
            .unwrap(),
            format: |caps| {
                let bank = canonical_issuer(caps.get(1)?.as_str());
                let last = caps.get(2)?.as_str();
                Some(ExtractedAccount::new(
                    format!("{} - xx{}", bank, last),
                    "Bank Account",
                ))
            },
        },
        // "Credit Card ending 4321" -> "Credit Card - xx4321"
        AccountPattern {
            name: "typed_card",
            regex: Regex::new(
                r"(?i)\b(Credit|Debit)\s+Card\s+(?:ending\s+(?:with\s+|in\s+)?)?(?:no\.?\s*)?[x*]*(\d{4})\b",
            )
            .unwrap(),
            format: |caps| {
                let card = title_case(caps.get(1)?.as_str());
                let last = caps.get(2)?.as_str();
                Some(ExtractedAccount::new(
                    format!("{} Card - xx{}", card, last),
                    format!("{} Card", card),
                ))
            },
        },
        // "Paytm Wallet" -> "Paytm Wallet"
        AccountPattern {
            name: "wallet",
            regex: Regex::new(
                r"(?i)\b(Paytm|PhonePe|Amazon\s+Pay|Mobikwik|Freecharge|Airtel\s+Money)\s+(?:wallet|balance)\b",
            )
            .unwrap(),
            format: |caps| {
                let provider = caps.get(1)?.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
                Some(ExtractedAccount::new(format!("{} Wallet", provider), "Wallet"))
            },
        },
        // "Card XX1234" -> "Card - xx1234"
        AccountPattern {
            name: "bare_card",
            regex: Regex::new(
                r"(?i)\bcard\s+(?:ending\s+(?:with\s+|in\s+)?)?(?:no\.?\s*)?[x*]+(\d{4})\b",
            )
            .unwrap(),
            format: |caps| {
                let last = caps.get(1)?.as_str();
                Some(ExtractedAccount::new(format!("Card - xx{}", last), "Card"))
            },
        },
        // "A/c XX4321" -> "A/c xx4321"
        AccountPattern {
            name: "bare_account",
            regex: Regex::new(
                r"(?i)\b(?:a/c|acct|account)\s*(?:no\.?\s*)?(?:ending\s+(?:with\s+|in\s+)?)?[x*]+(\d{3,6})\b",
            )
            .unwrap(),
            format: |caps| {
                let last = caps.get(1)?.as_str();
                Some(ExtractedAccount::new(format!("A/c xx{}", last), "Bank Account"))
            },
        },
    ]
}

pub struct AccountExtractor {
    patterns: Vec<AccountPattern>,
}

impl AccountExtractor {
    pub fn new() -> Self {
        Self {
            patterns: create_account_patterns(),
        }
    }

    /// First pattern whose formatter produces an account wins
    pub fn extract(&self, body: &str) -> Option<ExtractedAccount> {
        self.patterns.iter().find_map(|pattern| {
            let caps = pattern.regex.captures(body)?;
            let account = (pattern.format)(&caps)?;
            tracing::debug!("Account '{}' matched by pattern '{}'", account.name, pattern.name);
            Some(account)
        })
    }
}

impl Default for AccountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn canonical_issuer(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.to_lowercase().as_str() {
        "hdfc" => "HDFC Bank".to_string(),
        "icici" => "ICICI Bank".to_string(),
        "sbi" => "SBI".to_string(),
        "axis" => "Axis Bank".to_string(),
        "kotak" => "Kotak Bank".to_string(),
        "idfc first" => "IDFC FIRST Bank".to_string(),
        "yes" => "Yes Bank".to_string(),
        "indusind" => "IndusInd Bank".to_string(),
        "federal" => "Federal Bank".to_string(),
        "rbl" => "RBL Bank".to_string(),
        "hsbc" => "HSBC".to_string(),
        "citi" => "Citi".to_string(),
        "standard chartered" => "Standard Chartered".to_string(),
        "canara" => "Canara Bank".to_string(),
        "pnb" => "PNB".to_string(),
        "union" => "Union Bank".to_string(),
        "bob" | "bank of baroda" => "Bank of Baroda".to_string(),
        "au" => "AU Bank".to_string(),
        "amex" | "american express" => "Amex".to_string(),
        _ => collapsed,
    }
}

fn title_case(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
