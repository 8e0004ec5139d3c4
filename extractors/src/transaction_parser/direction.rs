use shared_types::TransactionDirection;

/// Tested before the income set; a message matching both is an expense
pub const EXPENSE_KEYWORDS: &[&str] = &[
    "debited",
    "debit",
    "paid",
    "spent",
    "sent",
    "withdrawn",
    "withdrawal",
    "charged",
    "deducted",
    "purchase",
    "payment of",
    "transferred to",
    "txn of",
];

pub const INCOME_KEYWORDS: &[&str] = &[
    "credited",
    "received",
    "refund",
    "deposited",
    "reversal",
    "reversed",
    "cashback",
    "credit of",
];

pub fn contains_expense_keyword(body: &str) -> bool {
    let lower = body.to_lowercase();
    EXPENSE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub fn contains_income_keyword(body: &str) -> bool {
    let lower = body.to_lowercase();
    INCOME_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Keyword classification used by the generic engine. Never defaults.
pub fn classify_direction(body: &str) -> Option<TransactionDirection> {
    if contains_expense_keyword(body) {
        Some(TransactionDirection::Expense)
    } else if contains_income_keyword(body) {
        Some(TransactionDirection::Income)
    } else {
        None
    }
}

/// Used by custom rules and templates, where a shape without an expense
/// keyword is taken to be income
pub fn direction_or_income(body: &str) -> TransactionDirection {
    if contains_expense_keyword(body) {
        TransactionDirection::Expense
    } else {
        TransactionDirection::Income
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_wins_over_income() {
        let body = "Rs 500 debited from your a/c and credited to RAHUL";
        assert_eq!(classify_direction(body), Some(TransactionDirection::Expense));
    }

    #[test]
    fn test_income_keywords() {
        assert_eq!(
            classify_direction("INR 2,000.00 CREDITED to A/c XX1111"),
            Some(TransactionDirection::Income)
        );
        assert_eq!(
            classify_direction("Refund of Rs 99 initiated"),
            Some(TransactionDirection::Income)
        );
    }

    #[test]
    fn test_undetermined_direction() {
        assert_eq!(classify_direction("Your balance is Rs 500"), None);
    }

    #[test]
    fn test_direction_or_income_defaults_to_income() {
        assert_eq!(direction_or_income("Salary 50000 posted"), TransactionDirection::Income);
        assert_eq!(direction_or_income("Amount spent 10"), TransactionDirection::Expense);
    }
}
