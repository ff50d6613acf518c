//! Rental price arithmetic.
//!
//! Catalog prices are labels like "85k": the digits are the daily rate in
//! thousands of rupiah. A booking total is that rate times the rental
//! duration in days.

use chrono::NaiveDate;

/// Unit scale behind the "k" suffix on price labels.
const PRICE_UNIT: u64 = 1000;

/// Extract the numeric part of a price label such as "85k".
///
/// Labels without any digit price at zero.
pub fn price_per_day(label: &str) -> u64 {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Rental duration in whole days, minimum one.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(1)
}

/// Total rental cost in rupiah.
pub fn total_price(label: &str, start: NaiveDate, end: NaiveDate) -> u64 {
    price_per_day(label) * PRICE_UNIT * rental_days(start, end) as u64
}

/// Format a rupiah amount with dot-grouped thousands, e.g. `Rp255.000`.
pub fn format_idr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_price_per_day_extracts_digits() {
        assert_eq!(price_per_day("85k"), 85);
        assert_eq!(price_per_day("5500k"), 5500);
        assert_eq!(price_per_day("120"), 120);
    }

    #[test]
    fn test_price_per_day_without_digits_is_zero() {
        assert_eq!(price_per_day("free"), 0);
        assert_eq!(price_per_day(""), 0);
    }

    #[test]
    fn test_rental_days_is_whole_day_difference() {
        assert_eq!(rental_days(date(2025, 7, 9), date(2025, 7, 11)), 2);
        assert_eq!(rental_days(date(2025, 7, 1), date(2025, 7, 8)), 7);
    }

    #[test]
    fn test_rental_days_minimum_is_one() {
        // Same-day rental still charges a full day
        assert_eq!(rental_days(date(2025, 7, 9), date(2025, 7, 9)), 1);
        // An inverted range does not produce a negative duration
        assert_eq!(rental_days(date(2025, 7, 9), date(2025, 7, 8)), 1);
    }

    #[test]
    fn test_total_price_for_two_day_span() {
        // 85k over two days: 85 * 1000 * 2
        let total = total_price("85k", date(2025, 7, 9), date(2025, 7, 11));
        assert_eq!(total, 170_000);
        assert_eq!(format_idr(total), "Rp170.000");
    }

    #[test]
    fn test_three_digit_price_over_two_days() {
        let total = total_price("120k", date(2025, 7, 1), date(2025, 7, 3));
        assert_eq!(total, 120 * 1000 * 2);
        assert_eq!(format_idr(total), "Rp240.000");
    }

    #[test]
    fn test_format_idr_grouping() {
        assert_eq!(format_idr(0), "Rp0");
        assert_eq!(format_idr(999), "Rp999");
        assert_eq!(format_idr(1_000), "Rp1.000");
        assert_eq!(format_idr(255_000), "Rp255.000");
        assert_eq!(format_idr(5_500_000), "Rp5.500.000");
    }
}
