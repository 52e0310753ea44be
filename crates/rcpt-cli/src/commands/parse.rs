//! Parse command - turn one OCR response into transactions.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::{debug, info};

use rcpt_core::models::receipt::{Category, ParsedReceipt};
use rcpt_core::ReceiptPipelineBuilder;

use super::{load_config, read_tokens};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// OCR JSON response, or `-` for stdin
    #[arg(required = true)]
    input: String,

    /// Read plain text with one token per line instead of JSON
    #[arg(long)]
    lines: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Predict categories with the configured keyword rules
    #[arg(long)]
    categorize: bool,

    /// Category for items no prediction applies to
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,

    /// Date for transactions without one (YYYY-MM-DD or "today")
    #[arg(long, value_parser = parse_fill_date)]
    fill_date: Option<NaiveDate>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per transaction
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn parse_fill_date(value: &str) -> Result<NaiveDate, String> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD or \"today\": {}", e))
}

pub fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_str(value).ok_or_else(|| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category {:?}, expected one of: {}", value, names.join(", "))
    })
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.categorize {
        config.pipeline.categorize = true;
    }
    if let Some(category) = args.category {
        config.parser.default_category = category;
    }

    let texts = read_tokens(&args.input, args.lines)?;
    info!("Parsing {} tokens from {}", texts.len(), args.input);

    let pipeline = ReceiptPipelineBuilder::from_config(&config)?.build();
    let mut receipt = pipeline.process_tokens(&texts)?;

    if let Some(date) = args.fill_date {
        fill_missing_dates(&mut receipt, date);
    }

    for warning in &receipt.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let output = format_receipt(&receipt, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Give undated transactions `date`.
pub fn fill_missing_dates(receipt: &mut ParsedReceipt, date: NaiveDate) {
    for record in &mut receipt.transactions {
        record.date = Some(record.date_or(date));
    }
}

pub fn format_receipt(
    receipt: &ParsedReceipt,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Json => Ok(serde_json::to_string(receipt)?),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt)),
    }
}

fn format_csv(receipt: &ParsedReceipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["category", "date", "description", "amount"])?;

    for record in &receipt.transactions {
        wtr.write_record([
            record.category.as_str(),
            &record.date.map(|d| d.to_string()).unwrap_or_default(),
            &record.description,
            &record.amount.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &ParsedReceipt) -> String {
    let rule = "=".repeat(50);
    let mut output = String::new();

    output.push_str(&format!("Merchant: {}\n", receipt.merchant));
    match receipt.date {
        Some(date) => output.push_str(&format!("Date: {}\n", date)),
        None => output.push_str("Date: unknown\n"),
    }
    if let Some(total) = receipt.total {
        output.push_str(&format!("Total: ${}\n", total));
    }
    output.push('\n');

    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!(
        "PARSED TRANSACTIONS ({} items):\n",
        receipt.transactions.len()
    ));
    output.push_str(&format!("{}\n", rule));

    for (i, record) in receipt.transactions.iter().enumerate() {
        output.push_str(&format!("\n--- Transaction {} ---\n", i + 1));
        output.push_str(&format!("Category: {}\n", record.category));
        match record.date {
            Some(date) => output.push_str(&format!("Date: {}\n", date)),
            None => output.push_str("Date: -\n"),
        }
        output.push_str(&format!("Description: {}\n", record.description));
        output.push_str(&format!("Amount: ${}\n", record.amount));
    }

    output.push_str(&format!("\n{}", rule));
    output
}
