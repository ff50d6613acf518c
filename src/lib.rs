//! ScootEase - Scooter Rental Application Core
//!
//! The headless engine beneath a scooter-rental app: bike catalog browsing,
//! booking lifecycle with date-based pricing, authenticated user sessions,
//! and local SQLite persistence.

pub mod app;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use app::{App, MainTab, Screen};
pub use auth::User;
pub use booking::{Booking, BookingStatus};
pub use catalog::{Bike, BikeStatus, BikeType};
pub use session::SessionStore;
pub use storage::{Database, DatabaseError};
