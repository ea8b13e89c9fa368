use models::{
    AffordabilityMetrics, CalculationResult, FormulaDefaults, LifetimeBreakdown,
    MonthlyBreakdown, MortgageInputs, Summary, Thresholds,
};

use crate::checklist::{ChecklistInputs, build_checklist};
use crate::parse::FieldDomain;

/// Numeric view of the form after defaults have been substituted
#[derive(Debug, Clone, PartialEq)]
struct ResolvedInputs {
    price: f64,
    down_payment: f64,
    interest_rate: f64,
    loan_term: f64,
    tax_rate: f64,
    insurance_rate: f64,
    hoa: f64,
    maintenance_annual: f64,
    renovations_annual: f64,
    utilities: f64,
    income: f64,
    monthly_debts: f64,
    emergency_fund: f64,
    desired_monthly_housing: Option<f64>,
    safety_multiplier: f64,
}

impl ResolvedInputs {
    fn resolve(inputs: &MortgageInputs, defaults: &FormulaDefaults) -> Self {
        use FieldDomain::{NonNegative, Positive};
        Self {
            price: NonNegative.resolve(&inputs.purchase_price, 0.0),
            down_payment: NonNegative.resolve(&inputs.down_payment, 0.0),
            interest_rate: NonNegative.resolve(&inputs.interest_rate, defaults.interest_rate),
            loan_term: Positive.resolve(&inputs.loan_term, defaults.loan_term),
            tax_rate: NonNegative.resolve(&inputs.property_tax, defaults.property_tax),
            insurance_rate: NonNegative.resolve(&inputs.home_insurance, defaults.home_insurance),
            hoa: NonNegative.resolve(&inputs.hoa_fees, defaults.hoa_fees),
            maintenance_annual: NonNegative
                .resolve(&inputs.maintenance_annual, defaults.maintenance_annual),
            renovations_annual: NonNegative
                .resolve(&inputs.renovations_annual, defaults.renovations_annual),
            utilities: NonNegative.resolve(&inputs.utilities, defaults.utilities),
            income: NonNegative.resolve(&inputs.annual_income, 0.0),
            monthly_debts: NonNegative.resolve(&inputs.monthly_debts, 0.0),
            emergency_fund: NonNegative.resolve(&inputs.emergency_fund, 0.0),
            desired_monthly_housing: NonNegative.parse(&inputs.desired_monthly_housing),
            safety_multiplier: NonNegative
                .resolve(&inputs.safety_multiplier, defaults.safety_multiplier),
        }
    }

    fn has_required(&self) -> bool {
        self.price != 0.0 && self.down_payment != 0.0 && self.income != 0.0
    }
}

/// Fully amortizing monthly payment (principal and interest).
///
/// `annual_rate` is a percentage; a zero rate spreads the principal evenly.
/// Evaluated as `L·r / (1 − (1+r)^−n)` with `ln_1p`/`exp_m1`, so rates too
/// small to change `1 + r` and terms long enough to overflow `(1+r)^n` still
/// give a finite payment.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: f64) -> f64 {
    let payments = term_years * 12.0;
    if principal <= 0.0 || payments <= 0.0 {
        return 0.0;
    }
    let r = annual_rate / 100.0 / 12.0;
    if r == 0.0 {
        return principal / payments;
    }
    // (1+r)^-n - 1, always in (-1, 0]
    let discount_m1 = (-payments * r.ln_1p()).exp_m1();
    if discount_m1 == 0.0 {
        return principal / payments;
    }
    principal * r / -discount_m1
}

/// Computes the summary and checklist with the built-in reference tables.
///
/// Returns `None` when the purchase price, down payment or annual income is
/// missing or zero.
pub fn calculate(inputs: &MortgageInputs) -> Option<CalculationResult> {
    calculate_with(inputs, &Thresholds::default(), &FormulaDefaults::default())
}

pub fn calculate_with(
    inputs: &MortgageInputs,
    thresholds: &Thresholds,
    defaults: &FormulaDefaults,
) -> Option<CalculationResult> {
    let r = ResolvedInputs::resolve(inputs, defaults);
    if !r.has_required() {
        return None;
    }

    let loan_amount = (r.price - r.down_payment).max(0.0);

    let base = MonthlyBreakdown {
        mortgage: monthly_payment(loan_amount, r.interest_rate, r.loan_term),
        tax: r.price * r.tax_rate / 100.0 / 12.0,
        insurance: r.price * r.insurance_rate / 100.0 / 12.0,
        hoa: r.hoa,
        maintenance: r.maintenance_annual / 12.0,
        renovations: r.renovations_annual / 12.0,
        utilities: r.utilities,
    };
    let monthly = base.scaled(1.0 + r.safety_multiplier / 100.0);
    let total_monthly = monthly.total();

    let months = 12.0 * r.loan_term;
    let lifetime = LifetimeBreakdown {
        down_payment: r.down_payment,
        mortgage: monthly.mortgage * months,
        tax: monthly.tax * months,
        insurance: monthly.insurance * months,
        hoa: monthly.hoa * months,
        maintenance: monthly.maintenance * months,
        renovations: monthly.renovations * months,
        utilities: monthly.utilities * months,
    };
    let total_lifetime = r.down_payment + total_monthly * months;

    let monthly_income = r.income / 12.0;
    let desired = r
        .desired_monthly_housing
        .unwrap_or(monthly_income * thresholds.front_end_ratio.good / 100.0);
    let metrics = AffordabilityMetrics {
        front_end_ratio: total_monthly / monthly_income * 100.0,
        back_end_ratio: (total_monthly + r.monthly_debts) / monthly_income * 100.0,
        down_payment_percent: r.down_payment * 100.0 / r.price,
        price_to_income: r.price / r.income,
        desired_monthly_housing: desired,
        budget_overage: total_monthly - desired,
        months_covered: if total_monthly > 0.0 {
            r.emergency_fund / total_monthly
        } else {
            0.0
        },
    };

    let checklist = build_checklist(&ChecklistInputs {
        thresholds,
        metrics: &metrics,
        down_payment: r.down_payment,
        total_monthly,
        emergency_fund: r.emergency_fund,
    });

    Some(CalculationResult {
        checklist,
        summary: Summary {
            total_monthly_cost: total_monthly,
            total_lifetime_cost: total_lifetime,
            loan_term: r.loan_term,
            loan_amount,
            monthly_breakdown: monthly,
            lifetime_breakdown: lifetime,
            metrics,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{InputField, Status};
    use proptest::prelude::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
    }

    fn status_of(result: &CalculationResult, label: &str) -> Status {
        result
            .checklist
            .iter()
            .find(|i| i.label == label)
            .map(|i| i.status)
            .unwrap()
    }

    #[test]
    fn test_monthly_payment_matches_annuity_formula() {
        // 200k over 30 years at 6%
        let p = monthly_payment(200000.0, 6.0, 30.0);
        assert!((p - 1199.10).abs() < 0.01, "payment was {p}");
        assert_eq!(monthly_payment(120000.0, 0.0, 10.0), 1000.0);
        assert_eq!(monthly_payment(0.0, 6.0, 30.0), 0.0);
    }

    #[test]
    fn test_monthly_payment_tiny_rate_stays_finite() {
        // r is far below f64 epsilon, so 1 + r == 1
        let p = monthly_payment(350000.0, 1e-15, 30.0);
        assert!(p.is_finite(), "payment was {p}");
        assert!(close(p, 350000.0 / 360.0, 1e-9), "payment was {p}");

        let p = monthly_payment(350000.0, 1e-300, 30.0);
        assert!(close(p, 350000.0 / 360.0, 1e-9), "payment was {p}");
    }

    #[test]
    fn test_monthly_payment_huge_term_stays_finite() {
        // (1+r)^n overflows; the payment tends to interest only
        let p = monthly_payment(350000.0, 5.3, 20000.0);
        assert!(p.is_finite(), "payment was {p}");
        assert!(close(p, 350000.0 * 5.3 / 1200.0, 1e-12), "payment was {p}");
    }

    #[test]
    fn test_tiny_interest_rate_grades_like_zero_rate() {
        let mut tiny = MortgageInputs::starting_values();
        tiny.interest_rate = "0.0000000000000001".to_string();
        let mut zero = MortgageInputs::starting_values();
        zero.interest_rate = "0".to_string();

        let tiny = calculate(&tiny).unwrap();
        let zero = calculate(&zero).unwrap();
        let s = &tiny.summary;
        assert!(s.total_monthly_cost.is_finite());
        assert!(s.total_lifetime_cost.is_finite());
        assert!(s.metrics.front_end_ratio.is_finite());
        assert!(close(s.monthly_breakdown.mortgage, zero.summary.monthly_breakdown.mortgage, 1e-9));
        for (a, b) in tiny.checklist.iter().zip(&zero.checklist) {
            assert_eq!(a.status, b.status, "{}", a.label);
        }

        let json = serde_json::to_value(&tiny).unwrap();
        assert!(json["summary"]["totalMonthlyCost"].is_number());
        assert!(json["summary"]["metrics"]["frontEndRatio"].is_number());
    }

    #[test]
    fn test_long_loan_term_stays_finite() {
        let mut inputs = MortgageInputs::starting_values();
        inputs.loan_term = "20000".to_string();
        let s = calculate(&inputs).unwrap().summary;
        assert!(s.monthly_breakdown.mortgage.is_finite());
        assert!(s.total_lifetime_cost.is_finite());
        assert!(close(s.lifetime_breakdown.total(), s.total_lifetime_cost, 1e-9));
    }

    #[test]
    fn test_starting_values_scenario() {
        let result = calculate(&MortgageInputs::starting_values()).unwrap();
        let s = &result.summary;

        assert_eq!(s.loan_amount, 350000.0);
        assert_eq!(s.loan_term, 15.0);
        // components before the 10% markup: tax 412.50, insurance 337.50
        assert!(close(s.monthly_breakdown.tax, 453.75, 1e-12));
        assert!(close(s.monthly_breakdown.insurance, 371.25, 1e-12));
        assert!(close(s.monthly_breakdown.hoa, 99.0, 1e-12));
        assert!(close(s.monthly_breakdown.utilities, 330.0, 1e-12));
        assert!(s.total_monthly_cost > 4850.0 && s.total_monthly_cost < 4950.0);

        assert_eq!(result.checklist[0].value, "22.2% ($100,000)");
        assert_eq!(status_of(&result, "Down Payment"), Status::Good);
        assert_eq!(status_of(&result, "Emergency Fund"), Status::Warning);
        assert_eq!(status_of(&result, "Price-to-Income Ratio"), Status::Good);
        assert_eq!(status_of(&result, "Front-End Ratio"), Status::Bad);
        assert_eq!(status_of(&result, "Back-End Ratio"), Status::Warning);
        assert_eq!(status_of(&result, "Monthly Housing Budget"), Status::Bad);
    }

    #[test]
    fn test_missing_required_field_yields_none() {
        for field in [
            InputField::PurchasePrice,
            InputField::DownPayment,
            InputField::AnnualIncome,
        ] {
            for text in ["0", "", "abc", "-10"] {
                let mut inputs = MortgageInputs::starting_values();
                inputs.set(field, text);
                assert!(calculate(&inputs).is_none(), "{field:?}={text:?}");
            }
        }
    }

    #[test]
    fn test_missing_interest_rate_uses_default() {
        let mut inputs = MortgageInputs::starting_values();
        inputs.interest_rate.clear();
        let result = calculate(&inputs).unwrap();

        let expected = monthly_payment(350000.0, 7.0, 15.0) * 1.1;
        assert!(close(result.summary.monthly_breakdown.mortgage, expected, 1e-12));
    }

    #[test]
    fn test_typed_zero_overrides_default() {
        let mut inputs = MortgageInputs::starting_values();
        inputs.utilities = "0".to_string();
        inputs.maintenance_annual = "0".to_string();
        inputs.safety_multiplier = "0".to_string();
        let result = calculate(&inputs).unwrap();
        assert_eq!(result.summary.monthly_breakdown.utilities, 0.0);
        assert_eq!(result.summary.monthly_breakdown.maintenance, 0.0);
    }

    #[test]
    fn test_empty_optional_fields_use_formula_defaults() {
        let mut inputs = MortgageInputs::starting_values();
        inputs.utilities.clear();
        inputs.maintenance_annual.clear();
        inputs.safety_multiplier.clear();
        inputs.loan_term = "0".to_string();
        let s = calculate(&inputs).unwrap().summary;
        assert_eq!(s.loan_term, 30.0);
        assert_eq!(s.monthly_breakdown.utilities, 300.0);
        assert!(close(s.monthly_breakdown.maintenance, 8000.0 / 12.0, 1e-12));
    }

    #[test]
    fn test_missing_budget_derives_from_income() {
        let mut inputs = MortgageInputs::starting_values();
        inputs.desired_monthly_housing.clear();
        let m = calculate(&inputs).unwrap().summary.metrics;
        // 28% of 160000 / 12
        assert!(close(m.desired_monthly_housing, 3733.333333333333, 1e-12));
    }

    #[test]
    fn test_down_payment_covering_price_has_no_mortgage() {
        let mut inputs = MortgageInputs::starting_values();
        inputs.down_payment = "500000".to_string();
        let s = calculate(&inputs).unwrap().summary;
        assert_eq!(s.loan_amount, 0.0);
        assert_eq!(s.monthly_breakdown.mortgage, 0.0);
    }

    #[test]
    fn test_monthly_debts_only_move_back_end_ratio() {
        let base = calculate(&MortgageInputs::starting_values()).unwrap();
        let mut inputs = MortgageInputs::starting_values();
        inputs.monthly_debts = "1333.33".to_string();
        let with_debts = calculate(&inputs).unwrap();
        assert_eq!(
            base.summary.metrics.front_end_ratio,
            with_debts.summary.metrics.front_end_ratio
        );
        assert!(close(
            with_debts.summary.metrics.back_end_ratio - base.summary.metrics.back_end_ratio,
            10.0,
            1e-4
        ));
    }

    #[test]
    fn test_down_payment_boundaries() {
        let cases = [
            ("100000", Status::Good),
            ("99999", Status::Warning),
            ("50000", Status::Warning),
            ("49999", Status::Bad),
        ];
        for (down, expected) in cases {
            let mut inputs = MortgageInputs::starting_values();
            inputs.purchase_price = "500000".to_string();
            inputs.down_payment = down.to_string();
            let result = calculate(&inputs).unwrap();
            assert_eq!(status_of(&result, "Down Payment"), expected, "down={down}");
        }
    }

    #[test]
    fn test_emergency_fund_boundaries() {
        let cases = [
            ("20000", Status::Good),
            ("19999.99", Status::Warning),
            ("10000", Status::Warning),
            ("9999", Status::Bad),
            ("", Status::Bad),
        ];
        for (fund, expected) in cases {
            let mut inputs = MortgageInputs::starting_values();
            inputs.emergency_fund = fund.to_string();
            let result = calculate(&inputs).unwrap();
            assert_eq!(status_of(&result, "Emergency Fund"), expected, "fund={fund:?}");
        }
    }

    #[test]
    fn test_configured_thresholds_change_grades() {
        let mut thresholds = Thresholds::default();
        thresholds.down_payment = models::Band::new(25.0, 20.0);
        let result = calculate_with(
            &MortgageInputs::starting_values(),
            &thresholds,
            &FormulaDefaults::default(),
        )
        .unwrap();
        assert_eq!(status_of(&result, "Down Payment"), Status::Warning);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let inputs = MortgageInputs::starting_values();
        let a = calculate(&inputs).unwrap();
        let b = calculate(&inputs).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        assert_eq!(inputs, MortgageInputs::starting_values());
    }

    fn arb_inputs() -> impl Strategy<Value = MortgageInputs> {
        (
            (50_000.0f64..2_000_000.0, 0.01f64..1.2, 0.0f64..15.0, 1u32..41),
            (0.0f64..3.0, 0.0f64..2.0, 0.0f64..800.0, 0.0f64..20_000.0),
            (0.0f64..20_000.0, 0.0f64..1_000.0, 20_000.0f64..600_000.0),
            (0.0f64..5_000.0, 0.0f64..60_000.0, 0.0f64..10_000.0, 0.0f64..50.0),
        )
            .prop_map(
                |(
                    (price, down_frac, rate, term),
                    (tax, ins, hoa, maint),
                    (reno, utils, income),
                    (debts, fund, desired, safety),
                )| MortgageInputs {
                    purchase_price: price.to_string(),
                    down_payment: (price * down_frac).to_string(),
                    interest_rate: rate.to_string(),
                    loan_term: term.to_string(),
                    property_tax: tax.to_string(),
                    home_insurance: ins.to_string(),
                    hoa_fees: hoa.to_string(),
                    maintenance_annual: maint.to_string(),
                    renovations_annual: reno.to_string(),
                    utilities: utils.to_string(),
                    annual_income: income.to_string(),
                    monthly_debts: debts.to_string(),
                    emergency_fund: fund.to_string(),
                    desired_monthly_housing: desired.to_string(),
                    safety_multiplier: safety.to_string(),
                },
            )
    }

    proptest! {
        #[test]
        fn prop_monthly_payment_is_finite_and_bounded(
            principal in 1.0f64..5_000_000.0,
            rate in prop_oneof![0.0f64..1e-9, 0.0f64..40.0],
            term in 1u32..200
        ) {
            let p = monthly_payment(principal, rate, term as f64);
            let n = term as f64 * 12.0;
            let r = rate / 1200.0;
            prop_assert!(p.is_finite());
            // between spreading the principal evenly and that plus full interest
            prop_assert!(p >= principal / n * (1.0 - 1e-9));
            prop_assert!(p <= (principal / n + principal * r) * (1.0 + 1e-9));
        }

        #[test]
        fn prop_monthly_breakdown_sums_to_total(inputs in arb_inputs()) {
            let s = calculate(&inputs).unwrap().summary;
            prop_assert!(close(s.monthly_breakdown.total(), s.total_monthly_cost, 1e-9));
        }

        #[test]
        fn prop_lifetime_breakdown_sums_to_total(inputs in arb_inputs()) {
            let s = calculate(&inputs).unwrap().summary;
            prop_assert!(close(s.lifetime_breakdown.total(), s.total_lifetime_cost, 1e-9));
            prop_assert_eq!(s.lifetime_breakdown.down_payment, inputs.down_payment.parse::<f64>().unwrap());
        }

        #[test]
        fn prop_zero_required_field_yields_none(
            inputs in arb_inputs(),
            which in 0usize..3
        ) {
            let mut inputs = inputs;
            let field = [InputField::PurchasePrice, InputField::DownPayment, InputField::AnnualIncome][which];
            inputs.set(field, "0");
            prop_assert!(calculate(&inputs).is_none());
        }

        #[test]
        fn prop_down_payment_status_follows_percent(inputs in arb_inputs()) {
            let result = calculate(&inputs).unwrap();
            let pct = result.summary.metrics.down_payment_percent;
            let expected = if pct >= 20.0 {
                Status::Good
            } else if pct >= 10.0 {
                Status::Warning
            } else {
                Status::Bad
            };
            prop_assert_eq!(status_of(&result, "Down Payment"), expected);
        }

        #[test]
        fn prop_emergency_status_follows_fund(inputs in arb_inputs()) {
            let fund: f64 = inputs.emergency_fund.parse().unwrap();
            let result = calculate(&inputs).unwrap();
            let expected = if fund >= 20000.0 {
                Status::Good
            } else if fund >= 10000.0 {
                Status::Warning
            } else {
                Status::Bad
            };
            prop_assert_eq!(status_of(&result, "Emergency Fund"), expected);
        }
    }
}
