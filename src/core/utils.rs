use std::num::{
    ParseFloatError,
    ParseIntError,
};

/// Blank text, or a sign typed on its own while a number is being entered.
fn is_blank_entry(text: &str) -> bool {
    matches!(text, "" | "-" | "+")
}

/// Coerces numeric cell text: blank means "no value", anything else must be an
/// integer.
pub fn parse_optional_int(text: &str) -> Result<Option<i64>, ParseIntError> {
    let trimmed = text.trim();
    if is_blank_entry(trimmed) {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some)
}

/// Like [`parse_optional_int`], but fractions are allowed.
pub fn parse_optional_number(text: &str) -> Result<Option<f64>, ParseFloatError> {
    let trimmed = text.trim();
    if is_blank_entry(trimmed) {
        return Ok(None);
    }
    trimmed.parse::<f64>().map(Some)
}

pub fn format_optional_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Shortest text that parses back to the same value; whole numbers have no ".0".
pub fn format_optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Credits as the backend reports them, without a trailing ".0" for whole numbers.
pub fn format_credits(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
