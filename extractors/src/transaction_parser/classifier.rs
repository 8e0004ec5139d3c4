/// Verdict from an external transaction/non-transaction model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierVerdict {
    pub is_transaction: bool,
    /// Model confidence in `is_transaction`, 0.0 to 1.0
    pub confidence: f32,
}

/// Pre-filter consulted before templates and the generic engine.
///
/// Implementations must be cheap to call and safe to share across threads.
pub trait TransactionClassifier: Send + Sync {
    fn classify(&self, normalized_body: &str) -> ClassifierVerdict;
}

impl<F> TransactionClassifier for F
where
    F: Fn(&str) -> ClassifierVerdict + Send + Sync,
{
    fn classify(&self, normalized_body: &str) -> ClassifierVerdict {
        self(normalized_body)
    }
}
