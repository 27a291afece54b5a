//! Integer money handling. Amounts are carried as i64 cents end to end;
//! floats never touch a stored value.

/// Parse a submitted decimal amount into cents.
///
/// Accepts an unsigned decimal with at most two fractional digits
/// ("12", "12.5", "12.50"). Anything else, including a sign, grouping
/// separators, or three or more fractional digits, is rejected rather
/// than rounded.
pub fn parse_decimal_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };
    if whole.chars().any(|c| !c.is_ascii_digit()) || frac.chars().any(|c| !c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 {
        return None;
    }

    let dollars: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    dollars.checked_mul(100)?.checked_add(cents)
}

/// Format cents as a US-locale currency string: 125632 -> "$1,256.32".
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{cents:02}")
}
