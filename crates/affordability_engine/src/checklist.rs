use models::{AffordabilityMetrics, Band, ChecklistItem, Comparator, Status, Thresholds};

use crate::format::format_currency;

/// Figures the checklist reports on besides the ratios themselves
pub(crate) struct ChecklistInputs<'a> {
    pub thresholds: &'a Thresholds,
    pub metrics: &'a AffordabilityMetrics,
    pub down_payment: f64,
    pub total_monthly: f64,
    pub emergency_fund: f64,
}

/// Builds the checklist in display order
pub(crate) fn build_checklist(ctx: &ChecklistInputs<'_>) -> Vec<ChecklistItem> {
    vec![
        down_payment_item(ctx),
        budget_item(ctx),
        back_end_item(ctx),
        price_to_income_item(ctx),
        front_end_item(ctx),
        emergency_fund_item(ctx),
    ]
}

fn item(
    label: &str,
    value: String,
    status: Status,
    describe: impl FnOnce(Status) -> String,
) -> ChecklistItem {
    ChecklistItem {
        label: label.to_string(),
        value,
        description: describe(status),
        status,
    }
}

fn down_payment_item(ctx: &ChecklistInputs<'_>) -> ChecklistItem {
    let band = ctx.thresholds.down_payment;
    let pct = ctx.metrics.down_payment_percent;
    item(
        "Down Payment",
        format!("{:.1}% ({})", pct, format_currency(ctx.down_payment)),
        Comparator::AtLeast.grade(pct, &band),
        |status| match status {
            Status::Good => format!("Excellent! {}%+ down avoids PMI", band.good),
            Status::Warning => format!("Good, but PMI may apply below {}% down", band.good),
            Status::Bad => format!(
                "Low down payment - expect PMI and higher costs. Aim for at least {}%",
                band.warning
            ),
        },
    )
}

fn budget_item(ctx: &ChecklistInputs<'_>) -> ChecklistItem {
    let band = ctx.thresholds.budget_buffer;
    let desired = ctx.metrics.desired_monthly_housing;
    let overage = ctx.metrics.budget_overage;
    item(
        "Monthly Housing Budget",
        format!(
            "{} of {} budget",
            format_currency(ctx.total_monthly),
            format_currency(desired)
        ),
        Comparator::AtMost.grade(overage, &band),
        |status| match status {
            Status::Good => format!(
                "Total monthly cost stays within {} of your {} budget",
                format_currency(band.good),
                format_currency(desired)
            ),
            Status::Warning => format!(
                "Over your {} budget by {} - look for costs to trim",
                format_currency(desired),
                format_currency(overage)
            ),
            Status::Bad => format!(
                "Exceeds your {} budget by more than {}",
                format_currency(desired),
                format_currency(band.warning)
            ),
        },
    )
}

fn back_end_item(ctx: &ChecklistInputs<'_>) -> ChecklistItem {
    ratio_item(
        "Back-End Ratio",
        ctx.metrics.back_end_ratio,
        ctx.thresholds.back_end_ratio,
        |status, band| match status {
            Status::Good => format!(
                "Total debt is manageable (at or below {}% of income)",
                band.good
            ),
            Status::Warning => format!(
                "Total debt is on the higher side (above {}% of income)",
                band.good
            ),
            Status::Bad => format!(
                "Total debt exceeds the recommended {}% of income",
                band.warning
            ),
        },
    )
}

fn front_end_item(ctx: &ChecklistInputs<'_>) -> ChecklistItem {
    ratio_item(
        "Front-End Ratio",
        ctx.metrics.front_end_ratio,
        ctx.thresholds.front_end_ratio,
        |status, band| match status {
            Status::Good => format!(
                "Housing costs are well within the recommended {}% of income",
                band.good
            ),
            Status::Warning => format!(
                "Housing costs are slightly high but manageable (above {}% of income)",
                band.good
            ),
            Status::Bad => format!(
                "Housing costs are too high relative to income (above {}%)",
                band.warning
            ),
        },
    )
}

fn ratio_item(
    label: &str,
    ratio: f64,
    band: Band,
    describe: impl FnOnce(Status, Band) -> String,
) -> ChecklistItem {
    item(
        label,
        format!("{:.1}%", ratio),
        Comparator::AtMost.grade(ratio, &band),
        |status| describe(status, band),
    )
}

fn price_to_income_item(ctx: &ChecklistInputs<'_>) -> ChecklistItem {
    let band = ctx.thresholds.price_to_income;
    let pti = ctx.metrics.price_to_income;
    item(
        "Price-to-Income Ratio",
        format!("{:.1}x", pti),
        Comparator::AtMost.grade(pti, &band),
        |status| match status {
            Status::Good => format!(
                "Home price is conservative relative to income ({}x or less)",
                band.good
            ),
            Status::Warning => format!(
                "Home price is reasonable but stretching (above {}x income)",
                band.good
            ),
            Status::Bad => format!(
                "Home price is very high relative to income (above {}x)",
                band.warning
            ),
        },
    )
}

fn emergency_fund_item(ctx: &ChecklistInputs<'_>) -> ChecklistItem {
    let band = ctx.thresholds.emergency_fund();
    let months = ctx.metrics.months_covered;
    item(
        "Emergency Fund",
        format!("{} (~{:.1} months)", format_currency(ctx.emergency_fund), months),
        Comparator::AtLeast.grade(ctx.emergency_fund, &band),
        |status| match status {
            Status::Good => format!(
                "Great! You have ~{:.1} months of housing costs covered",
                months
            ),
            Status::Warning => format!(
                "You have ~{:.1} months covered. Aim for at least {}",
                months,
                format_currency(band.good)
            ),
            Status::Bad => format!(
                "Build your emergency fund to at least {} (currently ~{:.1} months covered)",
                format_currency(band.good),
                months
            ),
        },
    )
}
