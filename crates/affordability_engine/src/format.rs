use crate::parse::parse_number;

/// Rounds to a whole unit and groups thousands with commas (`1,234,568`)
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        return rounded.to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    // -0.0 compares equal to 0.0, so tiny negatives print without a sign
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Whole-dollar amount: `$1,234`, `-$56`
pub fn format_currency(value: f64) -> String {
    let body = format_number(value.abs());
    if value.round() < 0.0 {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Display form of a currency input field. Text that is not a number is
/// shown as typed so the user can keep editing it.
pub fn format_currency_input(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match parse_number(text) {
        Some(v) => format_currency(v),
        None => text.to_string(),
    }
}
