/// Format a float with two decimals and thousands separators: 1,234.56
pub fn amount(val: f64) -> String {
    let negative = val < 0.0;
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative && fixed != "0.00" {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// 0-100 value as a one-decimal percentage.
pub fn pct(val: f64) -> String {
    format!("{val:.1}%")
}

/// 0-1 ratio as a one-decimal percentage.
pub fn ratio(val: f64) -> String {
    pct(val * 100.0)
}
