//! Booking lifecycle types.

pub mod dates;
pub mod pricing;

use crate::catalog::Bike;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Rental in progress
    Ongoing,
    /// Rental finished by the customer
    Completed,
    /// Rental cancelled before it started
    Cancelled,
}

impl BookingStatus {
    /// Only an ongoing rental can be marked finished.
    pub fn can_complete(&self) -> bool {
        matches!(self, BookingStatus::Ongoing)
    }

    /// Completed and cancelled bookings are history and may be removed.
    pub fn is_history(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Ongoing => write!(f, "Ongoing"),
            BookingStatus::Completed => write!(f, "Completed"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A rental booking with its bike snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking identifier, e.g. "SC-001"
    pub id: String,
    /// The booked bike
    pub bike: Bike,
    /// Rental start, persisted as a display string ("9 Jul 2025")
    pub start_date: String,
    /// Rental end, same format as the start
    pub end_date: String,
    /// Formatted total, e.g. "Rp255.000"
    pub total_price: String,
    /// Lifecycle state
    pub status: BookingStatus,
}

impl Booking {
    /// Rental duration in days, when both persisted dates still parse.
    pub fn duration_days(&self) -> Option<i64> {
        let start = dates::parse_date(&self.start_date)?;
        let end = dates::parse_date(&self.end_date)?;
        Some(pricing::rental_days(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn booking_with_status(status: BookingStatus) -> Booking {
        Booking {
            id: "SC-001".to_string(),
            bike: default_catalog().remove(0),
            start_date: "9 Jul 2025".to_string(),
            end_date: "11 Jul 2025".to_string(),
            total_price: "Rp170.000".to_string(),
            status,
        }
    }

    #[test]
    fn test_status_edges() {
        assert!(BookingStatus::Ongoing.can_complete());
        assert!(!BookingStatus::Completed.can_complete());
        assert!(!BookingStatus::Cancelled.can_complete());

        assert!(!BookingStatus::Ongoing.is_history());
        assert!(BookingStatus::Completed.is_history());
        assert!(BookingStatus::Cancelled.is_history());
    }

    #[test]
    fn test_duration_from_persisted_dates() {
        let booking = booking_with_status(BookingStatus::Ongoing);
        assert_eq!(booking.duration_days(), Some(2));
    }

    #[test]
    fn test_duration_of_malformed_dates_is_none() {
        let mut booking = booking_with_status(BookingStatus::Ongoing);
        booking.end_date = "sometime".to_string();
        assert_eq!(booking.duration_days(), None);
    }
}
