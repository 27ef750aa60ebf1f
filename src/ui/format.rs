// Display formatting for prices, large magnitudes, and percentages.

pub fn format_price(v: f64) -> String {
    if v >= 1.0 {
        add_commas(&format!("{:.2}", v))
    } else if v > 0.0 {
        // up to six decimals, trailing zeros trimmed, never fewer than two
        let s = format!("{:.6}", v);
        let trimmed = s.trim_end_matches('0');
        let fraction = trimmed.split('.').nth(1).map(str::len).unwrap_or(0);
        match fraction {
            0 => format!("{}00", trimmed),
            1 => format!("{}0", trimmed),
            _ => trimmed.to_string(),
        }
    } else {
        "0.00".to_string()
    }
}

pub fn format_large(v: f64) -> String {
    if v >= 1_000_000_000_000.0 {
        format!("{:.2}T", v / 1_000_000_000_000.0)
    } else if v >= 1_000_000_000.0 {
        format!("{:.2}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("{:.2}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.2}K", v / 1_000.0)
    } else {
        format!("{:.2}", v)
    }
}

pub fn format_pct(v: f64) -> String {
    let sign = if v >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, v)
}

pub fn format_count(n: u64) -> String {
    add_commas(&n.to_string())
}

pub fn add_commas(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let int_part = parts[0];
    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(',');
        }
        result.push(c);
    }
    let int_formatted: String = result.chars().rev().collect();
    if parts.len() > 1 {
        format!("{}.{}", int_formatted, parts[1])
    } else {
        int_formatted
    }
}
