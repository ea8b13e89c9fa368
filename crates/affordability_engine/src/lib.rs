//! # Affordability Engine
//!
//! Turns the raw text of the home-buying form into a monthly/lifetime cost
//! summary and a graded affordability checklist.
//!
//! ```rust,no_run
//! use affordability_engine::calculate;
//! use models::MortgageInputs;
//!
//! if let Some(result) = calculate(&MortgageInputs::starting_values()) {
//!     println!("{:.0} per month", result.summary.total_monthly_cost);
//! }
//! ```
//!
//! The calculation is pure: no logging, no I/O, and the same inputs always
//! give the same result.

mod calculator;
mod checklist;
pub mod fields;
pub mod format;
pub mod parse;

pub use calculator::{calculate, calculate_with, monthly_payment};
pub use fields::{InputConfig, finance_inputs, input_config, property_inputs};
pub use format::{format_currency, format_currency_input, format_number};
pub use parse::{FieldDomain, parse_number, parse_optional_number, sanitize_numeric_text};
