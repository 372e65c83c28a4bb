use chrono::{Local, TimeZone};

/// Format a float as a dollar amount with two decimals: -$12.50
pub fn money(val: f64) -> String {
    let sign = if val < 0.0 { "-" } else { "" };
    format!("{sign}${:.2}", val.abs())
}

/// Unix seconds as a local calendar date.
pub fn date(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).earliest() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
