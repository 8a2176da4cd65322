/// Formats a count with dot thousands separators, e.g. "1.234.567".
/// Used by the request logger for response sizes.
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string(), '.')
}

/// Formats a sales amount as whole dollars with comma grouping, e.g. "$1,234"
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = group_digits(&format!("{:.0}", rounded.abs()), ',');
    if rounded < 0.0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

fn group_digits(s: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
