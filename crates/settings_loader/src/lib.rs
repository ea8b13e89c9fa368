//! # Settings Loader
//!
//! Loads the optional `settings.json` of the affordability calculator. The file
//! can replace the form's starting values, the checklist thresholds and the
//! defaults substituted for empty fields. Every section is optional; anything
//! left out keeps its built-in value.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/my_settings.json")?;
//!
//! // Load from default location
//! let settings = settings_loader::load_default_settings()?;
//!
//! // Fall back to built-in values when nothing is found
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use models::{Band, FormulaDefaults, MortgageInputs, Settings, Thresholds};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads and validates settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings = parse_settings(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    tracing::debug!(path = %path.display(), version = settings.settings_version, "loaded settings");
    Ok(settings)
}

/// Parses and validates settings from a JSON string
pub fn parse_settings(raw: &str) -> Result<Settings> {
    let settings: Settings = serde_json::from_str(raw)?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads settings from a default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// Tries the provided path first, then the default location. Returns None
/// only if neither holds a readable settings file.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    if let Some(settings_path) = path {
        match load_settings(settings_path) {
            Ok(settings) => return Ok(Some(settings)),
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {:#}", settings_path.display(), e);
            }
        }
    }

    if !default_settings_exist() {
        tracing::debug!("No {} found, using built-in values", DEFAULT_SETTINGS_FILE);
        return Ok(None);
    }
    match load_default_settings() {
        Ok(settings) => Ok(Some(settings)),
        Err(e) => {
            tracing::warn!("Ignoring {}: {:#}", DEFAULT_SETTINGS_FILE, e);
            Ok(None)
        }
    }
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_FILE)
}

/// Starting form values with the settings' `default_inputs` applied
pub fn starting_inputs(settings: Option<&Settings>) -> Result<MortgageInputs> {
    let mut inputs = MortgageInputs::starting_values();
    if let Some(settings) = settings {
        inputs
            .apply_overrides(&settings.default_inputs)
            .context("Applying default_inputs from settings")?;
    }
    Ok(inputs)
}

fn validate(settings: &Settings) -> Result<()> {
    validate_thresholds(&settings.thresholds)?;
    validate_formula_defaults(&settings.formula_defaults)?;
    // Unknown field names are reported here rather than at first use
    MortgageInputs::default()
        .apply_overrides(&settings.default_inputs)
        .context("Invalid default_inputs")?;
    Ok(())
}

fn validate_thresholds(t: &Thresholds) -> Result<()> {
    check_band("down_payment", t.down_payment, true)?;
    check_band("front_end_ratio", t.front_end_ratio, false)?;
    check_band("back_end_ratio", t.back_end_ratio, false)?;
    check_band("price_to_income", t.price_to_income, false)?;
    check_band("budget_buffer", t.budget_buffer, false)?;
    if !(t.emergency_fund_minimum.is_finite() && t.emergency_fund_minimum >= 0.0) {
        bail!(
            "thresholds.emergency_fund_minimum must be a non-negative number, got {}",
            t.emergency_fund_minimum
        );
    }
    Ok(())
}

/// `higher_is_better` bands need good >= warning, the others good <= warning
fn check_band(name: &str, band: Band, higher_is_better: bool) -> Result<()> {
    if !band.good.is_finite() || !band.warning.is_finite() {
        bail!("thresholds.{name} must contain finite numbers");
    }
    let ordered = if higher_is_better {
        band.good >= band.warning
    } else {
        band.good <= band.warning
    };
    if !ordered {
        bail!(
            "thresholds.{name}: good ({}) and warning ({}) are in the wrong order",
            band.good,
            band.warning
        );
    }
    Ok(())
}

fn validate_formula_defaults(d: &FormulaDefaults) -> Result<()> {
    let non_negative = [
        ("interest_rate", d.interest_rate),
        ("property_tax", d.property_tax),
        ("home_insurance", d.home_insurance),
        ("hoa_fees", d.hoa_fees),
        ("maintenance_annual", d.maintenance_annual),
        ("renovations_annual", d.renovations_annual),
        ("utilities", d.utilities),
        ("safety_multiplier", d.safety_multiplier),
    ];
    for (name, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            bail!("formula_defaults.{name} must be a non-negative number, got {value}");
        }
    }
    if !(d.loan_term.is_finite() && d.loan_term > 0.0) {
        bail!("formula_defaults.loan_term must be positive, got {}", d.loan_term);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_keeps_builtins() {
        let settings = parse_settings("{}").unwrap();
        assert_eq!(settings.thresholds, Thresholds::default());
        assert_eq!(settings.formula_defaults, FormulaDefaults::default());
        assert!(settings.default_inputs.is_empty());
    }

    #[test]
    fn test_load_settings_from_file() {
        let file = write_temp(
            r#"{
                "settings_version": 2,
                "default_inputs": { "purchasePrice": 600000, "loan_term": "30" },
                "thresholds": { "price_to_income": { "good": 3.5, "warning": 5 } },
                "formula_defaults": { "interest_rate": 6.5 }
            }"#,
        );
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.settings_version, 2);
        assert_eq!(settings.thresholds.price_to_income, Band::new(3.5, 5.0));
        assert_eq!(settings.formula_defaults.interest_rate, 6.5);
        assert_eq!(settings.formula_defaults.loan_term, 30.0);

        let inputs = starting_inputs(Some(&settings)).unwrap();
        assert_eq!(inputs.purchase_price, "600000");
        assert_eq!(inputs.loan_term, "30");
        assert_eq!(inputs.down_payment, "100000");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("Reading settings file"));
    }

    #[test]
    fn test_optional_settings() {
        assert!(load_optional_settings(None).unwrap().is_none());
        let file = write_temp("{}");
        let path = file.path().to_path_buf();
        assert!(load_optional_settings(Some(&path)).unwrap().is_some());
    }

    #[test]
    fn test_rejects_unknown_input_field() {
        let err = parse_settings(r#"{ "default_inputs": { "poolSize": 3 } }"#).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown input field: poolSize"));
    }

    #[test]
    fn test_rejects_inverted_band() {
        let err = parse_settings(
            r#"{ "thresholds": { "down_payment": { "good": 10, "warning": 20 } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("down_payment"));
    }

    #[test]
    fn test_rejects_zero_loan_term_default() {
        let err = parse_settings(r#"{ "formula_defaults": { "loan_term": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("loan_term"));
    }

    #[test]
    fn test_starting_inputs_without_settings() {
        assert_eq!(starting_inputs(None).unwrap(), MortgageInputs::starting_values());
    }

    #[test]
    fn test_settings_file_exists() {
        let file = write_temp("{}");
        assert!(settings_file_exists(file.path()));
        let dir = tempfile::tempdir().unwrap();
        assert!(!settings_file_exists(dir.path()));
    }
}
