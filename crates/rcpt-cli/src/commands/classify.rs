//! Classify command - show how each OCR token is labelled.

use clap::Args;
use console::style;
use serde::Serialize;

use rcpt_core::models::token::{Token, TokenLabel};
use rcpt_core::TokenClassifier;

use super::{load_config, read_tokens};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// OCR JSON response, or `-` for stdin
    #[arg(required = true)]
    input: String,

    /// Read plain text with one token per line instead of JSON
    #[arg(long)]
    lines: bool,

    /// Print labels as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct LabelledToken<'a> {
    position: usize,
    text: &'a str,
    label: TokenLabel,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let classifier = TokenClassifier::from_config(&config.parser)?;

    let tokens = Token::sequence(read_tokens(&args.input, args.lines)?);
    let labelled: Vec<LabelledToken> = tokens
        .iter()
        .map(|token| LabelledToken {
            position: token.position,
            text: &token.text,
            label: classifier.label(token),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&labelled)?);
        return Ok(());
    }

    for entry in &labelled {
        let padded = format!("{:<15}", entry.label.as_str());
        let label = match entry.label {
            TokenLabel::Price => style(padded).green(),
            TokenLabel::QuantityMarker => style(padded).cyan(),
            TokenLabel::Noise => style(padded).dim(),
            TokenLabel::Plain => style(padded),
        };
        println!("{:>4}  {}  {}", entry.position, label, entry.text);
    }

    Ok(())
}
