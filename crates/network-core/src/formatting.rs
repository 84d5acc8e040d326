/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use network_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let fixed = format!("{:.*}", decimals as usize, rounded);

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{sign}{}.{frac}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// Format an integer count with thousands separators.
///
/// ```
/// use network_core::formatting::format_count;
///
/// assert_eq!(format_count(12_480), "12,480");
/// ```
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// `"1 day"` / `"12 days"`.
pub fn format_days(days: usize) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", format_count(days))
    }
}

/// Truncate `s` to at most `width` characters, marking the cut with `…`.
pub fn truncate_label(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert a comma before every group of three digits, counted from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
