use serde::{Deserialize, Serialize};

/// Grading outcome of a single checklist metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Bad,
}

/// Direction in which a metric improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Higher is better (`value >= bound`)
    AtLeast,
    /// Lower is better (`value <= bound`)
    AtMost,
}

impl Comparator {
    pub fn meets(self, value: f64, bound: f64) -> bool {
        match self {
            Comparator::AtLeast => value >= bound,
            Comparator::AtMost => value <= bound,
        }
    }

    /// Both bounds are inclusive: hitting `good` exactly is good, hitting
    /// `warning` exactly is a warning.
    pub fn grade(self, value: f64, band: &Band) -> Status {
        if self.meets(value, band.good) {
            Status::Good
        } else if self.meets(value, band.warning) {
            Status::Warning
        } else {
            Status::Bad
        }
    }
}

/// Good/warning cutoffs for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub good: f64,
    pub warning: f64,
}

impl Band {
    pub const fn new(good: f64, warning: f64) -> Self {
        Self { good, warning }
    }
}

pub const DOWN_PAYMENT: Band = Band::new(20.0, 10.0);
pub const FRONT_END_RATIO: Band = Band::new(28.0, 33.0);
pub const BACK_END_RATIO: Band = Band::new(36.0, 43.0);
pub const PRICE_TO_INCOME: Band = Band::new(3.0, 4.0);
pub const BUDGET_BUFFER: Band = Band::new(250.0, 500.0);
pub const EMERGENCY_FUND_MINIMUM: f64 = 20000.0;

/// Reference cutoffs used to grade the affordability checklist.
///
/// Every band can be replaced from `settings.json`; bands that are not
/// mentioned keep the built-in values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Down payment as a percentage of the price (higher is better)
    pub down_payment: Band,
    /// Housing cost as a percentage of gross monthly income
    pub front_end_ratio: Band,
    /// Housing cost plus other debts as a percentage of gross monthly income
    pub back_end_ratio: Band,
    /// Price as a multiple of annual income
    pub price_to_income: Band,
    /// Dollars the total monthly cost may exceed the desired budget
    pub budget_buffer: Band,
    pub emergency_fund_minimum: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            down_payment: DOWN_PAYMENT,
            front_end_ratio: FRONT_END_RATIO,
            back_end_ratio: BACK_END_RATIO,
            price_to_income: PRICE_TO_INCOME,
            budget_buffer: BUDGET_BUFFER,
            emergency_fund_minimum: EMERGENCY_FUND_MINIMUM,
        }
    }
}

impl Thresholds {
    /// The minimum is the good bound; half of it still earns a warning.
    pub fn emergency_fund(&self) -> Band {
        Band::new(self.emergency_fund_minimum, self.emergency_fund_minimum / 2.0)
    }
}

/// Values substituted for optional fields that are empty or unparseable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaDefaults {
    pub interest_rate: f64,
    pub loan_term: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub hoa_fees: f64,
    pub maintenance_annual: f64,
    pub renovations_annual: f64,
    pub utilities: f64,
    pub safety_multiplier: f64,
}

impl Default for FormulaDefaults {
    fn default() -> Self {
        Self {
            interest_rate: 7.0,
            loan_term: 30.0,
            property_tax: 1.2,
            home_insurance: 0.5,
            hoa_fees: 0.0,
            maintenance_annual: 8000.0,
            renovations_annual: 10000.0,
            utilities: 300.0,
            safety_multiplier: 0.0,
        }
    }
}
