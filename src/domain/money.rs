/// Formats an amount with Indian digit grouping (`1,00,000`).
///
/// Up to three fraction digits are kept and trailing zeros dropped, so
/// whole rupee amounts print without a decimal point.
///
/// # Examples
///
/// ```
/// use launchshop::domain::format_amount;
///
/// assert_eq!(format_amount(650.0), "650");
/// assert_eq!(format_amount(1250.0), "1,250");
/// assert_eq!(format_amount(1234567.5), "12,34,567.5");
/// ```
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut result = String::new();
    if amount < 0.0 && (whole != "0" || !fraction.is_empty()) {
        result.push('-');
    }
    result.push_str(&group_indian(whole));
    if !fraction.is_empty() {
        result.push('.');
        result.push_str(fraction);
    }
    result
}

/// Formats an amount prefixed with a currency symbol.
pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
