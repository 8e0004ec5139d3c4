use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the host application
    let mut types = Vec::new();

    // Message types
    types.push(clean_type(IncomingMessage::export_to_string()?));

    // Transaction types
    types.push(clean_type(TransactionDirection::export_to_string()?));
    types.push(clean_type(ExtractedAccount::export_to_string()?));
    types.push(clean_type(ExtractedTransaction::export_to_string()?));
    types.push(clean_type(ParseOutcome::export_to_string()?));

    // Rule types
    types.push(clean_type(SuppressionKind::export_to_string()?));
    types.push(clean_type(SuppressionRule::export_to_string()?));
    types.push(clean_type(CustomExtractionRule::export_to_string()?));
    types.push(clean_type(RenameRule::export_to_string()?));
    types.push(clean_type(HeuristicTemplate::export_to_string()?));
    types.push(clean_type(TemplateDraft::export_to_string()?));
    types.push(clean_type(MerchantCategory::export_to_string()?));
    types.push(clean_type(Category::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
