/// Parses a form field. Empty, whitespace-only, unparseable and non-finite
/// text all yield `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a form field, substituting `default` when the text is not a number.
///
/// A number that was actually typed is always returned, `0` included.
pub fn parse_optional_number(text: &str, default: f64) -> f64 {
    parse_number(text).unwrap_or(default)
}

/// Range of values a field accepts before its default takes over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    /// Amounts, rates and percentages: `0` and up
    NonNegative,
    /// Loan term: a zero-length loan has no payment schedule
    Positive,
}

impl FieldDomain {
    pub fn admits(self, value: f64) -> bool {
        match self {
            FieldDomain::NonNegative => value >= 0.0,
            FieldDomain::Positive => value > 0.0,
        }
    }

    pub fn parse(self, text: &str) -> Option<f64> {
        parse_number(text).filter(|v| self.admits(*v))
    }

    pub fn resolve(self, text: &str, default: f64) -> f64 {
        self.parse(text).unwrap_or(default)
    }
}

/// Keeps only digits and the decimal point, turning a displayed currency
/// value such as `$450,000` back into the raw `450000` the form stores.
pub fn sanitize_numeric_text(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}
