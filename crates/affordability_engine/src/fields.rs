use models::{InputField, MortgageInputs};
use serde::Serialize;

/// How a single form field is presented
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputConfig {
    pub field: InputField,
    pub label: &'static str,
    pub sublabel: Option<String>,
    pub placeholder: Option<String>,
    /// Increment for numeric spinners (percent fields)
    pub step: Option<&'static str>,
    /// Shown as a formatted dollar amount while editing
    pub is_currency: bool,
}

impl InputConfig {
    fn new(field: InputField, label: &'static str) -> Self {
        Self {
            field,
            label,
            sublabel: None,
            placeholder: None,
            step: None,
            is_currency: false,
        }
    }

    fn sublabel(mut self, text: String) -> Self {
        self.sublabel = Some(text);
        self
    }

    fn placeholder(mut self, text: String) -> Self {
        self.placeholder = Some(text);
        self
    }

    fn step(mut self, step: &'static str) -> Self {
        self.step = Some(step);
        self
    }

    fn currency(mut self) -> Self {
        self.is_currency = true;
        self
    }
}

/// "Property Details" section, in form order
pub fn property_inputs() -> Vec<InputConfig> {
    let d = MortgageInputs::starting_values();
    vec![
        InputConfig::new(InputField::PurchasePrice, "Purchase Price")
            .sublabel(format!("Default: ${}", d.purchase_price))
            .placeholder(format!("e.g., {}", d.purchase_price))
            .currency(),
        InputConfig::new(InputField::DownPayment, "Down Payment")
            .sublabel(format!("Default: ${}", d.down_payment))
            .placeholder(format!("e.g., {}", d.down_payment))
            .currency(),
        InputConfig::new(InputField::InterestRate, "Interest Rate (%)")
            .sublabel(format!("Default: {}%", d.interest_rate))
            .step("0.1"),
        InputConfig::new(InputField::LoanTerm, "Loan Term (years)")
            .sublabel(format!("Default: {} years", d.loan_term)),
        InputConfig::new(InputField::PropertyTax, "Property Tax Rate (%)")
            .sublabel(format!("Default: {}%", d.property_tax))
            .step("0.1"),
        InputConfig::new(InputField::HomeInsurance, "Home Insurance (% of price)")
            .sublabel(format!("Default: {}%", d.home_insurance))
            .step("0.1"),
        InputConfig::new(InputField::HoaFees, "HOA Fees ($/month)")
            .sublabel(format!("Default: ${}", d.hoa_fees))
            .placeholder("0".to_string())
            .currency(),
        InputConfig::new(InputField::MaintenanceAnnual, "Maintenance ($/year)")
            .sublabel(format!("e.g. HVAC, filters - Default: ${}", d.maintenance_annual))
            .placeholder(format!("Default: {}", d.maintenance_annual))
            .currency(),
        InputConfig::new(InputField::RenovationsAnnual, "Renovations ($/year)")
            .sublabel(format!("e.g. Roof, expansions - Default: ${}", d.renovations_annual))
            .placeholder(format!("Default: {}", d.renovations_annual))
            .currency(),
        InputConfig::new(InputField::Utilities, "Utilities ($/month)")
            .sublabel(format!("Default: ${}", d.utilities))
            .currency(),
    ]
}

/// "Your Finances" section, in form order
pub fn finance_inputs() -> Vec<InputConfig> {
    let d = MortgageInputs::starting_values();
    vec![
        InputConfig::new(InputField::AnnualIncome, "Annual Gross Income ($)")
            .sublabel(format!("Default: ${}", d.annual_income))
            .placeholder("e.g., 100000".to_string())
            .currency(),
        InputConfig::new(InputField::MonthlyDebts, "Other Monthly Debts")
            .sublabel(format!("Car, Student Loans, etc - Default: ${}", d.monthly_debts))
            .placeholder("0".to_string())
            .currency(),
        InputConfig::new(InputField::EmergencyFund, "Emergency Fund ($)")
            .sublabel(format!("Default: ${}", d.emergency_fund))
            .placeholder("0".to_string())
            .currency(),
        InputConfig::new(InputField::DesiredMonthlyHousing, "Desired Monthly Housing ($)")
            .sublabel(format!("Default: ${}", d.desired_monthly_housing))
            .placeholder("e.g., 4000".to_string())
            .currency(),
        InputConfig::new(InputField::SafetyMultiplier, "Safety Multiplier (%)")
            .sublabel("e.g., 10".to_string())
            .placeholder("e.g., 10".to_string()),
    ]
}

/// Looks up the presentation of one field
pub fn input_config(field: InputField) -> InputConfig {
    property_inputs()
        .into_iter()
        .chain(finance_inputs())
        .find(|c| c.field == field)
        .unwrap_or_else(|| InputConfig::new(field, field.name()))
}
