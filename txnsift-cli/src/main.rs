use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use extractors::rule_validation::{validate_custom_rule, validate_suppression_rule};
use extractors::{draft_template, RuleSources, TransactionParser};
use shared_types::IncomingMessage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

mod config;
mod rules_file;

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "txnsift", author, version, about = "Extract transactions from bank notification messages")]
struct Cli {
    /// Config file; defaults to txnsift.toml in the platform config dir
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse messages and print one JSON outcome per line
    #[command(group(
        ArgGroup::new("input")
            .required(true)
            .args(["messages", "body"]),
    ))]
    Parse {
        /// JSON array of messages
        #[arg(long, value_name = "PATH", group = "input")]
        messages: Option<PathBuf>,

        /// A single message body
        #[arg(long, group = "input")]
        body: Option<String>,

        /// Sender for --body
        #[arg(long, default_value = "UNKNOWN")]
        sender: String,

        /// TOML rules file
        #[arg(long, value_name = "PATH")]
        rules: Option<PathBuf>,
    },

    /// Check every suppression and custom rule in a rules file
    Validate {
        #[arg(long, value_name = "PATH")]
        rules: PathBuf,
    },

    /// Print the structural signature of a message body
    Signature {
        #[arg(long)]
        body: String,
    },

    /// Compute template offsets from a corrected message
    DraftTemplate {
        #[arg(long)]
        body: String,

        /// Merchant text as it appears in the body
        #[arg(long)]
        merchant_text: String,

        /// Amount text as it appears in the body
        #[arg(long)]
        amount_text: String,

        /// Display name to store; defaults to the merchant text
        #[arg(long, default_value = "")]
        merchant: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) =
        CliConfig::load(cli.config.as_deref()).context("Failed to load txnsift config")?;
    init_tracing(&config.logging.level);
    tracing::debug!("Using config at {:?}", config_path);

    match cli.command {
        Command::Parse {
            messages,
            body,
            sender,
            rules,
        } => {
            let messages = match (messages, body) {
                (Some(path), None) => rules_file::load_messages(&path)?,
                (None, Some(body)) => vec![IncomingMessage::new(
                    "cli-1",
                    sender,
                    body,
                    chrono::Utc::now().timestamp_millis(),
                )],
                _ => unreachable!("clap enforces exactly one input"),
            };
            run_parse(config, rules.as_deref(), &messages).await
        }
        Command::Validate { rules } => run_validate(&rules),
        Command::Signature { body } => {
            println!("{}", TransactionParser::default().signature(&body));
            Ok(())
        }
        Command::DraftTemplate {
            body,
            merchant_text,
            amount_text,
            merchant,
        } => {
            let message = IncomingMessage::new("cli-1", "UNKNOWN", body, 0);
            let draft = draft_template(&message, &merchant, &merchant_text, &amount_text)
                .ok_or_else(|| {
                    anyhow::anyhow!("Merchant or amount text not found in the message body")
                })?;
            println!("{}", serde_json::to_string_pretty(&draft.into_template())?);
            Ok(())
        }
    }
}

async fn run_parse(
    config: CliConfig,
    rules: Option<&std::path::Path>,
    messages: &[IncomingMessage],
) -> Result<()> {
    let store = rules_file::load_rules(rules)?;
    let sources = RuleSources::from_store(Arc::new(store));

    let parser = TransactionParser::new(config.parser);
    let snapshot = parser
        .load_snapshot(&sources, messages)
        .await
        .context("Failed to load rules")?;

    let mut parsed = 0;
    for message in messages {
        let outcome = parser.parse(&snapshot, message);
        if outcome.is_parsed() {
            parsed += 1;
        }
        println!(
            "{}",
            serde_json::json!({ "id": message.id, "outcome": outcome })
        );
    }

    tracing::info!("Parsed {} of {} messages", parsed, messages.len());
    Ok(())
}

fn run_validate(path: &std::path::Path) -> Result<()> {
    let store = rules_file::load_rules(Some(path))?;
    let mut problems = 0;

    for rule in &store.suppression_rules {
        if let Err(e) = validate_suppression_rule(rule) {
            problems += 1;
            println!("suppression rule '{}': {}", rule.pattern, e);
        }
    }

    for rule in &store.custom_rules {
        if let Err(e) = validate_custom_rule(rule) {
            problems += 1;
            println!("custom rule '{}': {}", rule.trigger_phrase, e);
        }
    }

    if problems > 0 {
        anyhow::bail!("{} invalid rule(s) in {:?}", problems, path);
    }

    println!(
        "{} suppression and {} custom rules are valid",
        store.suppression_rules.len(),
        store.custom_rules.len()
    );
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
