//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Format an event's time range for display, e.g. `Sun, Oct 5, 2025 • 18:00–20:00`
pub fn format_range(start: DateTime<Utc>, finish: DateTime<Utc>, tz: Tz) -> String {
    let start = tz.from_utc_datetime(&start.naive_utc());
    let finish = tz.from_utc_datetime(&finish.naive_utc());
    format!(
        "{} • {}–{}",
        start.format("%a, %b %-d, %Y"),
        start.format("%H:%M"),
        finish.format("%H:%M")
    )
}

/// Format the calendar date of a timestamp in the display timezone
pub fn format_date(timestamp: DateTime<Utc>, tz: Tz) -> String {
    tz.from_utc_datetime(&timestamp.naive_utc())
        .format("%Y-%m-%d")
        .to_string()
}

/// Format the wall-clock time of a timestamp in the display timezone
pub fn format_time(timestamp: DateTime<Utc>, tz: Tz) -> String {
    tz.from_utc_datetime(&timestamp.naive_utc())
        .format("%H:%M")
        .to_string()
}

/// Format a price without trailing zeros for whole amounts
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Sanitize filename for safe storage
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a command line into words, keeping double-quoted runs together
pub fn split_quoted(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in text.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    words.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        words.push(current);
    }

    words
}
