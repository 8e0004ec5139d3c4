use anyhow::{Context, Result};
use extractors::InMemoryRuleStore;
use shared_types::IncomingMessage;
use std::path::Path;

/// Rules file: TOML tables matching `InMemoryRuleStore`
pub fn load_rules(path: Option<&Path>) -> Result<InMemoryRuleStore> {
    let Some(path) = path else {
        return Ok(InMemoryRuleStore::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {:?}", path))?;

    toml::from_str(&text).with_context(|| format!("Failed to parse rules file {:?}", path))
}

/// Messages file: a JSON array of `{id, sender, body, timestamp}`
pub fn load_messages(path: &Path) -> Result<Vec<IncomingMessage>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read messages file {:?}", path))?;

    serde_json::from_str(&text).with_context(|| format!("Failed to parse messages file {:?}", path))
}
