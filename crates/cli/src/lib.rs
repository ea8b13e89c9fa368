use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use affordability_engine::{
    InputConfig, finance_inputs, format_currency, format_currency_input, property_inputs,
    sanitize_numeric_text,
};
use anyhow::{Context, Result};
use chrono::Local;
use models::{
    CalculationResult, FieldValue, MortgageInputs, Settings, Status, parse_assignment,
};
use serde::Serialize;

const MISSING_INPUT_PROMPT: &str = "Enter required fields to see your affordability assessment";

/// Assembles the form state: starting values, then settings, then the inputs
/// file, then `field=value` edits in the order given.
pub fn build_inputs(
    settings: Option<&Settings>,
    inputs_path: Option<&Path>,
    edits: &[String],
) -> Result<MortgageInputs> {
    let mut inputs = settings_loader::starting_inputs(settings)?;

    if let Some(path) = inputs_path {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading inputs file: {}", path.display()))?;
        let overrides: BTreeMap<String, FieldValue> = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing inputs JSON in {}", path.display()))?;
        inputs
            .apply_overrides(&overrides)
            .with_context(|| format!("Applying inputs from {}", path.display()))?;
        tracing::debug!(count = overrides.len(), "applied inputs file");
    }

    for edit in edits {
        let (field, value) = parse_assignment(edit)?;
        // Same cleanup the form applies on every keystroke
        let cleaned = sanitize_numeric_text(value);
        if cleaned != value {
            tracing::debug!("{} '{}' stored as '{}'", field.name(), value, cleaned);
        }
        inputs.set(field, cleaned);
    }

    Ok(inputs)
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub settings_version: u32,
}

/// Machine-readable output of one run
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub metadata: ReportMetadata,
    pub inputs: &'a MortgageInputs,
    pub result: Option<&'a CalculationResult>,
}

impl<'a> Report<'a> {
    pub fn new(
        settings: Option<&Settings>,
        inputs: &'a MortgageInputs,
        result: Option<&'a CalculationResult>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Local::now().to_rfc3339(),
                settings_version: settings.map(|s| s.settings_version).unwrap_or_default(),
            },
            inputs,
            result,
        }
    }
}

/// Pretty JSON for `--json`: `{ metadata, inputs, result }`, with `result`
/// null when a required field is missing
pub fn render_json(report: &Report<'_>) -> Result<String> {
    serde_json::to_string_pretty(report).context("Serializing report JSON")
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Good => "✓",
        Status::Warning => "⚠",
        Status::Bad => "✗",
    }
}

fn push_rows(out: &mut String, rows: &[(&str, f64)]) {
    let width = rows.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);
    for (label, value) in rows {
        let label = format!("{label}:");
        out.push_str(&format!(
            "  {label:<width$}  {:>12}\n",
            format_currency(*value)
        ));
    }
}

fn push_heading(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');
}

/// Text rendering of the summary and checklist
pub fn render_text(result: Option<&CalculationResult>) -> String {
    let mut out = String::new();
    let Some(result) = result else {
        out.push_str(MISSING_INPUT_PROMPT);
        out.push('\n');
        return out;
    };
    let s = &result.summary;
    let m = &s.monthly_breakdown;
    let l = &s.lifetime_breakdown;

    push_heading(&mut out, "Financial Summary");
    out.push_str(&format!(
        "Total Monthly Cost: {}\n",
        format_currency(s.total_monthly_cost)
    ));
    push_rows(
        &mut out,
        &[
            ("Mortgage (P&I)", m.mortgage),
            ("Taxes & Insurance", m.tax + m.insurance),
            ("HOA Fees", m.hoa),
            ("Maintenance", m.maintenance),
            ("Renovations", m.renovations),
            ("Utilities", m.utilities),
        ],
    );
    out.push('\n');

    out.push_str(&format!(
        "Total Lifetime Cost: {}\n",
        format_currency(s.total_lifetime_cost)
    ));
    out.push_str(&format!(
        "  Estimated total spent over {} years\n",
        s.loan_term
    ));
    push_rows(
        &mut out,
        &[
            ("Down Payment", l.down_payment),
            ("Total Mortgage (P&I)", l.mortgage),
            ("Total Taxes & Insurance", l.tax + l.insurance),
            ("Total HOA Fees", l.hoa),
            ("Total Maintenance", l.maintenance),
            ("Total Renovations", l.renovations),
            ("Total Utilities", l.utilities),
        ],
    );
    out.push('\n');

    push_heading(&mut out, "Affordability Checklist");
    for item in &result.checklist {
        out.push_str(&format!("{} {}\n", status_icon(item.status), item.label));
        out.push_str(&format!("    {}\n", item.value));
        out.push_str(&format!("    {}\n", item.description));
    }
    out
}

fn push_field_section(out: &mut String, title: &str, configs: &[InputConfig], inputs: &MortgageInputs) {
    push_heading(out, title);
    for config in configs {
        let current = inputs.get(config.field);
        let shown = if config.is_currency {
            format_currency_input(current)
        } else {
            current.to_string()
        };
        out.push_str(&format!(
            "  {:<24} {:<30} {}\n",
            config.field.name(),
            config.label,
            shown
        ));
        if let Some(sublabel) = &config.sublabel {
            out.push_str(&format!("  {:<24} {}\n", "", sublabel));
        }
    }
}

/// Lists the editable fields with their current values
pub fn render_fields(inputs: &MortgageInputs) -> String {
    let mut out = String::new();
    push_field_section(&mut out, "Property Details", &property_inputs(), inputs);
    out.push('\n');
    push_field_section(&mut out, "Your Finances", &finance_inputs(), inputs);
    out
}
