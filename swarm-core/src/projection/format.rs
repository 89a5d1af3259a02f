//! Display formatting for projected figures.

/// Table cell style: `$29,100`, `$539,500`, `$1.16M`, `$14.55B`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= 1e9 {
        format!("{sign}${:.2}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}${:.2}M", abs / 1e6)
    } else {
        format!("{sign}${}", group_thousands(abs.round() as u64))
    }
}

/// Column header style: `$1K`, `$25K`, `$2.5K`, `$1M`.
pub fn tier_label(tier: f64) -> String {
    if tier >= 1e6 {
        format!("${}M", trim_decimals(tier / 1e6))
    } else if tier >= 1e3 {
        format!("${}K", trim_decimals(tier / 1e3))
    } else {
        format!("${}", trim_decimals(tier))
    }
}

/// `0.0328` → `3.28%`.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn trim_decimals(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
