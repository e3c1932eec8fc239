use chrono::{DateTime, Utc};

use crate::model::MarketEntry;

const UP_ARROW: &str = "↗";
const DOWN_ARROW: &str = "↘";

/// Full reply text for one matched entry. `now` is the formatting-time
/// clock so freshness output stays deterministic under test.
pub fn build_reply(
    entry: &MarketEntry,
    include_change: bool,
    include_link: bool,
    now: DateTime<Utc>,
) -> String {
    let mut text = format!(
        "Current price of {} is: {}.",
        entry.name,
        format_usd(entry.current_price)
    );
    if include_change {
        text.push_str(&format!(" {}.", change_summary(entry)));
    }
    if include_link {
        text.push_str(&format!(" https://coingecko.com/en/coins/{}", entry.id));
    }
    text.push_str(&format!(" ({})", freshness(&entry.last_updated, now)));
    text
}

fn change_summary(entry: &MarketEntry) -> String {
    format!(
        "{} / {} / {}",
        change_segment("1h", entry.price_change_percentage_1h_in_currency),
        change_segment("1d", entry.price_change_percentage_24h_in_currency),
        change_segment("1w", entry.price_change_percentage_7d_in_currency),
    )
}

// Arrow carries the sign, the numeral shows the magnitude. A change of
// exactly zero (or one the feed left null) points up.
fn change_segment(label: &str, pct: Option<f64>) -> String {
    let pct = pct.unwrap_or(0.0);
    let arrow = if pct < 0.0 { DOWN_ARROW } else { UP_ARROW };
    format!("{label}:{arrow}{}", format_number(pct).replace('-', ""))
}

fn freshness(last_updated: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(last_updated) {
        Ok(ts) => {
            let elapsed = now.signed_duration_since(ts.with_timezone(&Utc));
            let secs = elapsed.num_milliseconds() as f64 / 1000.0;
            format!("updated {}s ago", format_number(secs))
        }
        Err(_) => "Could not parse update time.".to_string(),
    }
}

/// USD currency style: thousands-grouped integer part, exactly two
/// fraction digits.
pub fn format_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Locale-default numeral style: thousands grouping, at most three
/// fraction digits, trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.3}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
