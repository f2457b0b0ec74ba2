//! Display formatting: en-IN number grouping, rupee amounts, relative time.
//!
//! One fixed convention: Indian digit grouping (`12,34,567.89`), the rupee
//! sign and exactly two fraction digits.

use crate::UtcDateTime;

pub const RUPEE: char = '₹';

/// `1234567.891` → `"12,34,567.89"`.
pub fn format_price(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount < 0.0 && fixed.bytes().any(|byte| byte.is_ascii_digit() && byte != b'0');

    let mut output = String::with_capacity(fixed.len() + integer.len() / 2 + 1);
    if negative {
        output.push('-');
    }
    output.push_str(&group_indian(integer));
    output.push('.');
    output.push_str(fraction);
    output
}

/// `format_price` with the rupee sign in front.
pub fn format_inr(amount: f64) -> String {
    format!("{RUPEE}{}", format_price(amount))
}

/// Absolute value with two fraction digits; the sign is carried by
/// [`Movement`](crate::Movement) instead.
pub fn format_percentage(value: f64) -> String {
    format_price(value.abs())
}

/// `"▲ ₹3.55"` when futures trade at or above capital, `"▼ ₹1.20"` below.
pub fn format_futures_difference(capital_price: f64, futures_price: f64) -> String {
    let arrow = if futures_price >= capital_price {
        '▲'
    } else {
        '▼'
    };
    format!("{arrow} {RUPEE}{:.2}", (futures_price - capital_price).abs())
}

/// Coarse "time ago" label. Future instants read as `"0 sec ago"`.
pub fn relative_time(then: UtcDateTime, now: UtcDateTime) -> String {
    let seconds = now.seconds_since(then).max(0);
    if seconds < 60 {
        return format!("{seconds} sec ago");
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} {} ago", plural(hours, "hour"));
    }

    let days = hours / 24;
    format!("{days} {} ago", plural(days, "day"))
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{unit}s")
    } else {
        unit.to_owned()
    }
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut output = groups.join(",");
    output.push(',');
    output.push_str(tail);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(999.5), "999.50");
        assert_eq!(format_price(1_000.0), "1,000.00");
        assert_eq!(format_price(123_456.78), "1,23,456.78");
        assert_eq!(format_price(12_345_678.9), "1,23,45,678.90");
        assert_eq!(format_price(-2_500.126), "-2,500.13");
    }

    #[test]
    fn negative_zero_after_rounding_has_no_sign() {
        assert_eq!(format_price(-0.001), "0.00");
    }

    #[test]
    fn rupee_and_percentage() {
        assert_eq!(format_inr(3712.2), "₹3,712.20");
        assert_eq!(format_percentage(-0.456), "0.46");
    }

    #[test]
    fn futures_difference_arrow_follows_sign() {
        assert_eq!(format_futures_difference(100.0, 103.55), "▲ ₹3.55");
        assert_eq!(format_futures_difference(100.0, 100.0), "▲ ₹0.00");
        assert_eq!(format_futures_difference(101.2, 100.0), "▼ ₹1.20");
    }

    #[test]
    fn relative_time_buckets() {
        let now = UtcDateTime::parse("2025-09-08T12:00:00Z").expect("valid");
        let at = |text: &str| UtcDateTime::parse(text).expect("valid");

        assert_eq!(relative_time(at("2025-09-08T11:59:15Z"), now), "45 sec ago");
        assert_eq!(relative_time(at("2025-09-08T11:57:00Z"), now), "3 min ago");
        assert_eq!(relative_time(at("2025-09-08T11:00:00Z"), now), "1 hour ago");
        assert_eq!(relative_time(at("2025-09-08T07:00:00Z"), now), "5 hours ago");
        assert_eq!(relative_time(at("2025-09-07T12:00:00Z"), now), "1 day ago");
        assert_eq!(relative_time(at("2025-09-01T12:00:00Z"), now), "7 days ago");
        assert_eq!(relative_time(at("2025-09-08T12:30:00Z"), now), "0 sec ago");
    }
}
