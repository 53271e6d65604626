/// Format a dollar amount without cents, with thousands separators
pub fn format_currency(value: f64) -> String {
    let dollars = value.abs().round() as i64;

    let digits = dollars.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let dollars_formatted: String = result.chars().rev().collect();

    if value < 0.0 && dollars > 0 {
        format!("-${}", dollars_formatted)
    } else {
        format!("${}", dollars_formatted)
    }
}

/// Format a fraction as a percentage with one decimal
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Format a difference of two fractions in percentage points, always signed
pub fn format_points(value: f64) -> String {
    format!("{:+.1} pts", value * 100.0)
}

/// Format a correlation coefficient
pub fn format_coefficient(value: f64) -> String {
    format!("{:+.3}", value)
}
