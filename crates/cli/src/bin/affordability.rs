use std::path::PathBuf;

use affordability_engine::calculate_with;
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Report, build_inputs, render_fields, render_json, render_text};

/// Home affordability calculator.
/// Starts from the built-in form values, then applies settings.json, an
/// optional inputs file and any --set edits.
#[derive(Debug, Parser)]
#[command(name = "affordability", author, version, about = "Estimate housing costs and grade affordability", long_about = None)]
struct Args {
    /// Path to settings.json (optional). If omitted, ./settings.json is used when present
    #[arg(short = 's', long = "settings")]
    settings_path: Option<PathBuf>,

    /// JSON file with field values, e.g. {"purchasePrice": 500000}
    #[arg(short = 'i', long = "inputs")]
    inputs_path: Option<PathBuf>,

    /// Edit one field, e.g. --set purchase_price=500000 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    edits: Vec<String>,

    /// Print a JSON report (metadata, inputs, result) instead of text
    #[arg(long)]
    json: bool,

    /// List the input fields with their current values and exit
    #[arg(long = "list-fields")]
    list_fields: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "affordability=info,cli=info,settings_loader=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let settings = match &args.settings_path {
        Some(path) => Some(settings_loader::load_settings(path)?),
        None => settings_loader::load_settings_with_fallback(None)?,
    };

    let inputs = build_inputs(settings.as_ref(), args.inputs_path.as_deref(), &args.edits)
        .context("building inputs")?;

    if args.list_fields {
        print!("{}", render_fields(&inputs));
        return Ok(());
    }

    let (thresholds, defaults) = settings
        .as_ref()
        .map(|s| (s.thresholds.clone(), s.formula_defaults.clone()))
        .unwrap_or_default();
    let result = calculate_with(&inputs, &thresholds, &defaults);
    if result.is_none() {
        tracing::info!("purchase price, down payment or annual income missing; nothing to assess");
    }

    if args.json {
        let report = Report::new(settings.as_ref(), &inputs, result.as_ref());
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(result.as_ref()));
    }
    Ok(())
}
