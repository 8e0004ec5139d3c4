use regex::{Captures, Regex};

/// ISO codes recognised next to a number in the fallback pass
const KNOWN_CURRENCY_CODES: &[&str] = &[
    "INR", "USD", "EUR", "GBP", "MYR", "SGD", "AED", "AUD", "CAD", "JPY", "CNY", "HKD", "THB",
    "IDR", "PHP", "NZD", "CHF", "SAR", "QAR", "KWD", "OMR", "BHD", "BDT", "LKR", "NPR", "PKR",
    "ZAR",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountPass {
    /// Anchored on a transactional verb or an Rs/INR prefix
    HighConfidence,
    /// Number next to a currency code, or a bare number
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountMatch {
    pub amount: f64,
    pub currency: Option<String>,
    pub pass: AmountPass,
}

pub struct AmountExtractor {
    high_confidence: Regex,
    with_currency: Regex,
    bare_number: Regex,
}

impl AmountExtractor {
    pub fn new() -> Self {
        let codes = KNOWN_CURRENCY_CODES.join("|");

        Self {
            // A verb may be followed by a known currency code, or by a short
            // uppercase acronym such as "EMI" that is skipped
            high_confidence: Regex::new(&format!(
                concat!(
                    r"(?:\b(?i:debited\s+(?:by|with|for)|spent|credited\s+(?:with|by)|",
                    r"transferred\s+(?:from|to)|sent|paid|received|withdrawn|charged|deducted)\b\s+",
                    r"(?:(?P<code>(?i:{codes}))\.?\s*|[A-Z]{{2,5}}\s+)?",
                    r"|\b(?P<prefix>(?i:rs|inr))\.?\s*)",
                    r"(?P<amount>\d[\d,]*(?:\.\d+)?)"
                ),
                codes = codes
            ))
            .unwrap(),
            with_currency: Regex::new(&format!(
                concat!(
                    r"(?i)(?:\b(?P<pre>rs|{codes})\.?|(?P<sym>[₹$€£]))\s*(?P<pre_amount>\d[\d,]*(?:\.\d+)?)",
                    r"|(?P<post_amount>\d[\d,]*(?:\.\d+)?)\s*(?P<post>{codes})\b"
                ),
                codes = codes
            ))
            .unwrap(),
            bare_number: Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap(),
        }
    }

    /// Two-pass amount and currency detection. The fallback pass only runs
    /// when the high-confidence pass finds nothing.
    pub fn extract(&self, body: &str) -> Option<AmountMatch> {
        self.high_confidence_pass(body)
            .or_else(|| self.fallback_pass(body))
    }

    fn high_confidence_pass(&self, body: &str) -> Option<AmountMatch> {
        for caps in self.high_confidence.captures_iter(body) {
            let Some(amount) = caps.name("amount").and_then(|m| parse_amount(m.as_str())) else {
                continue;
            };

            let code = caps
                .name("code")
                .or_else(|| caps.name("prefix"))
                .map(|m| m.as_str());

            return Some(AmountMatch {
                amount,
                currency: Some(resolve_currency(code)),
                pass: AmountPass::HighConfidence,
            });
        }

        None
    }

    fn fallback_pass(&self, body: &str) -> Option<AmountMatch> {
        for caps in self.with_currency.captures_iter(body) {
            if let Some(found) = currency_match(&caps) {
                return Some(found);
            }
        }

        self.bare_number
            .find_iter(body)
            .find_map(|m| parse_amount(m.as_str()))
            .map(|amount| AmountMatch {
                amount,
                currency: None,
                pass: AmountPass::Fallback,
            })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn currency_match(caps: &Captures) -> Option<AmountMatch> {
    let amount_text = caps.name("pre_amount").or_else(|| caps.name("post_amount"))?;
    let amount = parse_amount(amount_text.as_str())?;

    let currency = if let Some(symbol) = caps.name("sym") {
        symbol_currency(symbol.as_str()).to_string()
    } else {
        let code = caps.name("pre").or_else(|| caps.name("post"))?;
        resolve_currency(Some(code.as_str()))
    };

    Some(AmountMatch {
        amount,
        currency: Some(currency),
        pass: AmountPass::Fallback,
    })
}

/// "RS" or no code means rupees; anything else is the code, uppercased
fn resolve_currency(code: Option<&str>) -> String {
    match code.map(|c| c.to_uppercase()) {
        None => "INR".to_string(),
        Some(c) if c == "RS" => "INR".to_string(),
        Some(c) => c,
    }
}

fn symbol_currency(symbol: &str) -> &'static str {
    match symbol {
        "$" => "USD",
        "€" => "EUR",
        "£" => "GBP",
        _ => "INR",
    }
}

/// Strip thousands separators and accept only positive, finite values
pub fn parse_amount(text: &str) -> Option<f64> {
    let value: f64 = text.replace(',', "").trim().parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rs_prefix_defaults_to_inr() {
        let extractor = AmountExtractor::new();
        let found = extractor
            .extract("Sent Rs.11.00 From HDFC Bank A/C *1243 To Raju On 07/08/25 Ref 558523453508")
            .unwrap();
        assert_eq!(found.amount, 11.0);
        assert_eq!(found.currency.as_deref(), Some("INR"));
        assert_eq!(found.pass, AmountPass::HighConfidence);
    }

    #[test]
    fn test_verb_with_currency_code() {
        let extractor = AmountExtractor::new();
        let found = extractor.extract("You have spent MYR 55.50 at STARBUCKS.").unwrap();
        assert_eq!(found.amount, 55.5);
        assert_eq!(found.currency.as_deref(), Some("MYR"));
        assert_eq!(found.pass, AmountPass::HighConfidence);
    }

    #[test]
    fn test_acronym_after_verb_is_not_a_currency() {
        let extractor = AmountExtractor::new();
        let found = extractor
            .extract("Paid EMI 4,500 to BAJAJ FINANCE on 05-02-25")
            .unwrap();
        assert_eq!(found.amount, 4500.0);
        assert_eq!(found.currency.as_deref(), Some("INR"));
        assert_eq!(found.pass, AmountPass::HighConfidence);
    }

    #[test]
    fn test_verbs_inside_words_do_not_anchor() {
        let extractor = AmountExtractor::new();

        let found = extractor.extract("Your consent 42 was recorded").unwrap();
        assert_eq!(found.pass, AmountPass::Fallback);
        assert_eq!(found.currency, None);

        let found = extractor.extract("Prepaid 349 plan renewed").unwrap();
        assert_eq!(found.pass, AmountPass::Fallback);
        assert_eq!(found.amount, 349.0);
    }

    #[test]
    fn test_thousands_separators() {
        let extractor = AmountExtractor::new();
        let found = extractor
            .extract("Your a/c is credited with INR 1,25,000.50 on 01-Jan-2025")
            .unwrap();
        assert_eq!(found.amount, 125000.5);
        assert_eq!(found.currency.as_deref(), Some("INR"));
    }

    #[test]
    fn test_fallback_prefers_explicit_currency() {
        let extractor = AmountExtractor::new();
        let found = extractor
            .extract("Order 42 total 1,499.00 USD has shipped")
            .unwrap();
        assert_eq!(found.amount, 1499.0);
        assert_eq!(found.currency.as_deref(), Some("USD"));
        assert_eq!(found.pass, AmountPass::Fallback);
    }

    #[test]
    fn test_fallback_symbol() {
        let extractor = AmountExtractor::new();
        let found = extractor.extract("Card purchase €12.40 approved").unwrap();
        assert_eq!(found.amount, 12.4);
        assert_eq!(found.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_fallback_bare_number_has_no_currency() {
        let extractor = AmountExtractor::new();
        let found = extractor.extract("Amount 250.75 was debited").unwrap();
        assert_eq!(found.amount, 250.75);
        assert_eq!(found.currency, None);
    }

    #[test]
    fn test_no_amount() {
        let extractor = AmountExtractor::new();
        assert!(extractor.extract("Hello, are we still on for dinner tomorrow?").is_none());
        assert!(extractor.extract("Balance is 0").is_none());
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        assert_eq!(parse_amount("1,200.50"), Some(1200.5));
        assert_eq!(parse_amount("0.00"), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
