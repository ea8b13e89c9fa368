use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

mod thresholds;

pub use thresholds::*;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Unknown input field: {0}")]
    UnknownField(String),

    #[error("Malformed assignment '{0}', expected field=value")]
    MalformedAssignment(String),
}

// Input models

/// Names of the editable fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    PurchasePrice,
    DownPayment,
    InterestRate,
    LoanTerm,
    PropertyTax,
    HomeInsurance,
    HoaFees,
    MaintenanceAnnual,
    RenovationsAnnual,
    Utilities,
    AnnualIncome,
    MonthlyDebts,
    EmergencyFund,
    DesiredMonthlyHousing,
    SafetyMultiplier,
}

impl InputField {
    pub const ALL: [InputField; 15] = [
        InputField::PurchasePrice,
        InputField::DownPayment,
        InputField::InterestRate,
        InputField::LoanTerm,
        InputField::PropertyTax,
        InputField::HomeInsurance,
        InputField::HoaFees,
        InputField::MaintenanceAnnual,
        InputField::RenovationsAnnual,
        InputField::Utilities,
        InputField::AnnualIncome,
        InputField::MonthlyDebts,
        InputField::EmergencyFund,
        InputField::DesiredMonthlyHousing,
        InputField::SafetyMultiplier,
    ];

    /// camelCase key used in JSON documents
    pub fn name(self) -> &'static str {
        match self {
            InputField::PurchasePrice => "purchasePrice",
            InputField::DownPayment => "downPayment",
            InputField::InterestRate => "interestRate",
            InputField::LoanTerm => "loanTerm",
            InputField::PropertyTax => "propertyTax",
            InputField::HomeInsurance => "homeInsurance",
            InputField::HoaFees => "hoaFees",
            InputField::MaintenanceAnnual => "maintenanceAnnual",
            InputField::RenovationsAnnual => "renovationsAnnual",
            InputField::Utilities => "utilities",
            InputField::AnnualIncome => "annualIncome",
            InputField::MonthlyDebts => "monthlyDebts",
            InputField::EmergencyFund => "emergencyFund",
            InputField::DesiredMonthlyHousing => "desiredMonthlyHousing",
            InputField::SafetyMultiplier => "safetyMultiplier",
        }
    }

    /// Accepts camelCase, snake_case or kebab-case spellings (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self, InputError> {
        let wanted: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect();
        InputField::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| InputError::UnknownField(name.to_string()))
    }
}

impl FromStr for InputField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::from_name(s)
    }
}

/// A field value as it may appear in a JSON document: either the raw text of
/// the form or a plain number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

/// Raw form state. Every field is kept as text so partially typed values
/// survive; conversion to numbers happens in the calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MortgageInputs {
    pub purchase_price: String,
    pub down_payment: String,
    pub interest_rate: String,
    pub loan_term: String,
    pub property_tax: String,
    pub home_insurance: String,
    pub hoa_fees: String,
    pub maintenance_annual: String,
    pub renovations_annual: String,
    pub utilities: String,
    pub annual_income: String,
    pub monthly_debts: String,
    pub emergency_fund: String,
    pub desired_monthly_housing: String,
    pub safety_multiplier: String,
}

impl MortgageInputs {
    /// Values the form is pre-filled with on every load
    pub fn starting_values() -> Self {
        Self {
            purchase_price: "450000".to_string(),
            down_payment: "100000".to_string(),
            interest_rate: "5.3".to_string(),
            loan_term: "15".to_string(),
            property_tax: "1.1".to_string(),
            home_insurance: "0.9".to_string(),
            hoa_fees: "90".to_string(),
            maintenance_annual: "2500".to_string(),
            renovations_annual: "3500".to_string(),
            utilities: "300".to_string(),
            annual_income: "160000".to_string(),
            monthly_debts: "0".to_string(),
            emergency_fund: "18000".to_string(),
            desired_monthly_housing: "4000".to_string(),
            safety_multiplier: "10".to_string(),
        }
    }

    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::PurchasePrice => &self.purchase_price,
            InputField::DownPayment => &self.down_payment,
            InputField::InterestRate => &self.interest_rate,
            InputField::LoanTerm => &self.loan_term,
            InputField::PropertyTax => &self.property_tax,
            InputField::HomeInsurance => &self.home_insurance,
            InputField::HoaFees => &self.hoa_fees,
            InputField::MaintenanceAnnual => &self.maintenance_annual,
            InputField::RenovationsAnnual => &self.renovations_annual,
            InputField::Utilities => &self.utilities,
            InputField::AnnualIncome => &self.annual_income,
            InputField::MonthlyDebts => &self.monthly_debts,
            InputField::EmergencyFund => &self.emergency_fund,
            InputField::DesiredMonthlyHousing => &self.desired_monthly_housing,
            InputField::SafetyMultiplier => &self.safety_multiplier,
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let slot = match field {
            InputField::PurchasePrice => &mut self.purchase_price,
            InputField::DownPayment => &mut self.down_payment,
            InputField::InterestRate => &mut self.interest_rate,
            InputField::LoanTerm => &mut self.loan_term,
            InputField::PropertyTax => &mut self.property_tax,
            InputField::HomeInsurance => &mut self.home_insurance,
            InputField::HoaFees => &mut self.hoa_fees,
            InputField::MaintenanceAnnual => &mut self.maintenance_annual,
            InputField::RenovationsAnnual => &mut self.renovations_annual,
            InputField::Utilities => &mut self.utilities,
            InputField::AnnualIncome => &mut self.annual_income,
            InputField::MonthlyDebts => &mut self.monthly_debts,
            InputField::EmergencyFund => &mut self.emergency_fund,
            InputField::DesiredMonthlyHousing => &mut self.desired_monthly_housing,
            InputField::SafetyMultiplier => &mut self.safety_multiplier,
        };
        *slot = value.into();
    }

    /// Applies a keyed set of overrides (e.g. `default_inputs` from the
    /// settings file). Fails on the first unknown key without touching the
    /// remaining ones.
    pub fn apply_overrides(
        &mut self,
        overrides: &BTreeMap<String, FieldValue>,
    ) -> Result<(), InputError> {
        for (key, value) in overrides {
            let field = InputField::from_name(key)?;
            self.set(field, value.clone().into_text());
        }
        Ok(())
    }
}

/// Splits a `field=value` edit into its parts
pub fn parse_assignment(raw: &str) -> Result<(InputField, &str), InputError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| InputError::MalformedAssignment(raw.to_string()))?;
    if name.trim().is_empty() {
        return Err(InputError::MalformedAssignment(raw.to_string()));
    }
    Ok((InputField::from_name(name)?, value.trim()))
}

// Settings models
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub settings_version: u32,
    /// Replaces the starting values of the listed fields
    pub default_inputs: BTreeMap<String, FieldValue>,
    pub thresholds: Thresholds,
    pub formula_defaults: FormulaDefaults,
}

// Output models

/// Monthly cost per category, after the safety multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    pub mortgage: f64,
    pub tax: f64,
    pub insurance: f64,
    pub hoa: f64,
    pub maintenance: f64,
    pub renovations: f64,
    pub utilities: f64,
}

impl MonthlyBreakdown {
    pub fn total(&self) -> f64 {
        self.mortgage
            + self.tax
            + self.insurance
            + self.hoa
            + self.maintenance
            + self.renovations
            + self.utilities
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            mortgage: self.mortgage * factor,
            tax: self.tax * factor,
            insurance: self.insurance * factor,
            hoa: self.hoa * factor,
            maintenance: self.maintenance * factor,
            renovations: self.renovations * factor,
            utilities: self.utilities * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeBreakdown {
    pub down_payment: f64,
    pub mortgage: f64,
    pub tax: f64,
    pub insurance: f64,
    pub hoa: f64,
    pub maintenance: f64,
    pub renovations: f64,
    pub utilities: f64,
}

impl LifetimeBreakdown {
    pub fn total(&self) -> f64 {
        self.down_payment
            + self.mortgage
            + self.tax
            + self.insurance
            + self.hoa
            + self.maintenance
            + self.renovations
            + self.utilities
    }
}

/// Ratios the checklist is graded on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityMetrics {
    pub front_end_ratio: f64,
    pub back_end_ratio: f64,
    pub down_payment_percent: f64,
    pub price_to_income: f64,
    /// Desired budget actually compared against (entered or derived)
    pub desired_monthly_housing: f64,
    /// Total monthly cost minus the desired budget; negative when under budget
    pub budget_overage: f64,
    /// Months of housing cost the emergency fund covers
    pub months_covered: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_monthly_cost: f64,
    pub total_lifetime_cost: f64,
    /// Years
    pub loan_term: f64,
    pub loan_amount: f64,
    pub monthly_breakdown: MonthlyBreakdown,
    pub lifetime_breakdown: LifetimeBreakdown,
    pub metrics: AffordabilityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub label: String,
    pub value: String,
    pub description: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub checklist: Vec<ChecklistItem>,
    pub summary: Summary,
}
