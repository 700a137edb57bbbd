//! Display-time formatting of currency amounts and rates

/// Format an amount as dollars with thousands separators and two decimals
///
/// `1234567.891` becomes `$1,234,567.89`. The sign follows the dollar sign
/// and is kept when the amount rounds to zero: `-0.001` renders as `$-0.00`.
pub fn format_currency(value: f64) -> String {
    let s = format!("{:.2}", value);
    let (sign, digits) = match s.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", s.as_str()),
    };
    format!("${}{}", sign, add_thousands_separator(digits))
}

/// Format a decimal rate as a percentage with four decimals (0.06 -> `6.0000%`)
pub fn format_percentage(value: f64) -> String {
    format!("{:.4}%", value * 100.0)
}

/// Add thousands separators to a number string
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let chars: Vec<char> = integer_part.chars().rev().collect();
    let grouped: String = chars
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(",")
        .chars()
        .rev()
        .collect();

    match decimal_part {
        Some(dec) => format!("{}.{}", grouped, dec),
        None => grouped,
    }
}
