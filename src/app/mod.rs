//! Application controller and state.
//!
//! All screen and booking state lives in one [`AppState`] owned by the
//! [`App`] controller and changes only through its named actions.

pub mod nav;

pub use nav::{MainTab, Screen};

use crate::auth::{self, AuthError, User};
use crate::booking::{dates, pricing, Booking, BookingStatus};
use crate::catalog::{Bike, CatalogFilter, Category};
use crate::session::{SessionError, SessionStore};
use crate::storage::{Database, DatabaseError};
use chrono::NaiveDate;
use thiserror::Error;

/// A bike picked for booking together with the chosen date range.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub bike: Bike,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// In-memory application state.
#[derive(Debug)]
pub struct AppState {
    /// Screen currently composed
    pub current_screen: Screen,
    /// Active tab on the main screen
    pub active_tab: MainTab,
    /// Booking being confirmed, if any
    pub booking_draft: Option<BookingRequest>,
    /// Cached booking list, reloaded after every mutation
    pub bookings: Vec<Booking>,
    /// Seeded catalog, loaded once at startup
    pub catalog: Vec<Bike>,
    /// Home-screen catalog filter
    pub catalog_filter: CatalogFilter,
}

/// Application controller owning storage, session, and state.
pub struct App {
    db: Database,
    session: SessionStore,
    state: AppState,
}

/// Controller-level failures.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Navigation from {from:?} to {to:?} is not allowed")]
    InvalidTransition { from: Screen, to: Screen },

    #[error("Booking {0} is not ongoing")]
    NotOngoing(String),

    #[error("Booking {0} is still in progress")]
    NotHistory(String),

    #[error("No booking is being confirmed")]
    NoDraft,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

impl App {
    /// Build the controller, deciding the initial screen from the session.
    pub fn new(db: Database, session: SessionStore) -> Result<Self, AppError> {
        let current_screen = if session.is_logged_in() {
            Screen::Main
        } else {
            Screen::Auth
        };
        let catalog = db.all_bikes()?;
        let bookings = db.all_bookings()?;

        Ok(Self {
            db,
            session,
            state: AppState {
                current_screen,
                active_tab: MainTab::default(),
                booking_draft: None,
                bookings,
                catalog,
                catalog_filter: CatalogFilter::default(),
            },
        })
    }

    /// Current application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The underlying repository.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The session store.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ========== Auth actions ==========

    /// Log in, persist the session, and move to the main screen.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AppError> {
        let user = auth::login(&self.db, email, password)?;
        self.session
            .save_login(&user.email, &user.role, &user.username)?;
        self.state.current_screen = Screen::Main;
        tracing::info!(user = %user.email, "logged in");
        Ok(user)
    }

    /// Register a new account; success logs straight in.
    pub fn register(
        &mut self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, AppError> {
        let user = auth::register(&self.db, full_name, email, password, confirm_password)?;
        self.session
            .save_login(&user.email, &user.role, &user.username)?;
        self.state.current_screen = Screen::Main;
        Ok(user)
    }

    /// Clear the session and return to the auth screen.
    pub fn logout(&mut self) -> Result<(), AppError> {
        self.session.clear_session()?;
        self.state.current_screen = Screen::Auth;
        self.state.booking_draft = None;
        self.state.active_tab = MainTab::default();
        tracing::info!("logged out");
        Ok(())
    }

    // ========== Navigation actions ==========

    /// Move to another screen, if the route table allows it.
    pub fn navigate(&mut self, to: Screen) -> Result<(), AppError> {
        let from = self.state.current_screen;
        if !from.can_navigate_to(to) {
            return Err(AppError::InvalidTransition { from, to });
        }
        self.state.current_screen = to;
        Ok(())
    }

    /// Switch the active main-screen tab.
    pub fn select_tab(&mut self, tab: MainTab) {
        self.state.active_tab = tab;
    }

    // ========== Catalog actions ==========

    /// Narrow the home-screen list to a drivetrain category.
    pub fn select_category(&mut self, category: Category) {
        self.state.catalog_filter.category = category;
    }

    /// Run a date search; from here the list shows available bikes only.
    pub fn search_available(&mut self) {
        self.state.catalog_filter.available_only = true;
    }

    /// Catalog rows matching the current filter.
    pub fn displayed_bikes(&self) -> Vec<&Bike> {
        self.state.catalog_filter.apply(&self.state.catalog)
    }

    // ========== Booking actions ==========

    /// Start confirming a booking for the given bike and date range.
    pub fn request_booking(&mut self, bike: Bike, start_date: NaiveDate, end_date: NaiveDate) {
        self.state.booking_draft = Some(BookingRequest {
            bike,
            start_date,
            end_date,
        });
    }

    /// Abandon the booking being confirmed.
    pub fn cancel_booking_request(&mut self) {
        self.state.booking_draft = None;
    }

    /// Persist the drafted booking and land on the bookings tab.
    pub fn confirm_booking(&mut self) -> Result<Booking, AppError> {
        let draft = self.state.booking_draft.take().ok_or(AppError::NoDraft)?;

        let total = pricing::total_price(&draft.bike.price, draft.start_date, draft.end_date);
        let booking = Booking {
            id: self.db.next_booking_id()?,
            bike: draft.bike,
            start_date: dates::format_date(draft.start_date),
            end_date: dates::format_date(draft.end_date),
            total_price: pricing::format_idr(total),
            status: BookingStatus::Ongoing,
        };

        self.db.insert_booking(&booking)?;
        self.state.bookings = self.db.all_bookings()?;
        self.state.active_tab = MainTab::Bookings;
        tracing::info!(id = %booking.id, bike = %booking.bike.name, "booking confirmed");

        Ok(booking)
    }

    /// Mark an ongoing booking as finished.
    pub fn complete_booking(&mut self, id: &str) -> Result<(), AppError> {
        if let Some(booking) = self.state.bookings.iter().find(|b| b.id == id) {
            if !booking.status.can_complete() {
                return Err(AppError::NotOngoing(id.to_string()));
            }
        }
        self.db.update_booking_status(id, BookingStatus::Completed)?;
        self.state.bookings = self.db.all_bookings()?;
        Ok(())
    }

    /// Remove a completed or cancelled booking from history.
    pub fn delete_booking(&mut self, id: &str) -> Result<(), AppError> {
        if let Some(booking) = self.state.bookings.iter().find(|b| b.id == id) {
            if !booking.status.is_history() {
                return Err(AppError::NotHistory(id.to_string()));
            }
        }
        self.db.delete_booking(id)?;
        self.state.bookings = self.db.all_bookings()?;
        Ok(())
    }

    /// Bookings shown on the in-progress tab.
    pub fn ongoing_bookings(&self) -> Vec<&Booking> {
        self.state
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Ongoing)
            .collect()
    }

    /// Bookings shown on the history tab.
    pub fn history_bookings(&self) -> Vec<&Booking> {
        self.state
            .bookings
            .iter()
            .filter(|b| b.status.is_history())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(dir: &std::path::Path) -> App {
        let db = Database::open_in_memory().unwrap();
        App::new(db, SessionStore::open(dir)).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn logged_in_app(dir: &std::path::Path) -> App {
        let mut app = test_app(dir);
        app.register("Made Wirawan", "made@example.com", "rahasia123", "rahasia123")
            .unwrap();
        app
    }

    #[test]
    fn test_initial_screen_follows_session() {
        let dir = tempfile::tempdir().unwrap();

        let app = test_app(dir.path());
        assert_eq!(app.state().current_screen, Screen::Auth);

        // A persisted session skips the auth screen on the next start
        SessionStore::open(dir.path())
            .save_login("made@example.com", "user", "Made Wirawan")
            .unwrap();
        let db = Database::open_in_memory().unwrap();
        let app = App::new(db, SessionStore::open(dir.path())).unwrap();
        assert_eq!(app.state().current_screen, Screen::Main);
    }

    #[test]
    fn test_register_logs_in_and_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let app = logged_in_app(dir.path());

        assert_eq!(app.state().current_screen, Screen::Main);
        assert!(app.session().is_logged_in());
        assert_eq!(app.session().user_name().as_deref(), Some("Made Wirawan"));
        assert_eq!(app.session().user_role().as_deref(), Some("user"));
    }

    #[test]
    fn test_logout_clears_session_and_returns_to_auth() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        app.logout().unwrap();

        assert_eq!(app.state().current_screen, Screen::Auth);
        assert!(!app.session().is_logged_in());
        assert_eq!(app.session().user_email(), None);
    }

    #[test]
    fn test_navigation_follows_route_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        app.navigate(Screen::Help).unwrap();
        assert_eq!(app.state().current_screen, Screen::Help);

        // Help cannot jump to About Us directly
        let result = app.navigate(Screen::AboutUs);
        assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
        assert_eq!(app.state().current_screen, Screen::Help);

        app.navigate(Screen::Main).unwrap();
        app.navigate(Screen::AboutUs).unwrap();
    }

    #[test]
    fn test_confirm_booking_persists_and_switches_tab() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        let bike = app.database().bike_by_id(2).unwrap().unwrap();
        app.request_booking(bike, date(2025, 7, 9), date(2025, 7, 11));
        let booking = app.confirm_booking().unwrap();

        assert_eq!(booking.id, "SC-001");
        assert_eq!(booking.start_date, "9 Jul 2025");
        assert_eq!(booking.end_date, "11 Jul 2025");
        // NMAX at 120k over two days
        assert_eq!(booking.total_price, "Rp240.000");
        assert_eq!(booking.status, BookingStatus::Ongoing);

        assert_eq!(app.state().active_tab, MainTab::Bookings);
        assert_eq!(app.state().bookings.len(), 1);
        assert!(app.state().booking_draft.is_none());
    }

    #[test]
    fn test_confirm_without_draft_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());
        assert!(matches!(app.confirm_booking(), Err(AppError::NoDraft)));
    }

    #[test]
    fn test_cancel_booking_request_drops_draft() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        let bike = app.database().bike_by_id(3).unwrap().unwrap();
        app.request_booking(bike, date(2025, 7, 9), date(2025, 7, 10));
        app.cancel_booking_request();

        assert!(app.state().booking_draft.is_none());
        assert!(matches!(app.confirm_booking(), Err(AppError::NoDraft)));
    }

    #[test]
    fn test_complete_then_delete_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        let bike = app.database().bike_by_id(2).unwrap().unwrap();
        app.request_booking(bike, date(2025, 7, 9), date(2025, 7, 11));
        let booking = app.confirm_booking().unwrap();

        // An ongoing booking cannot be deleted from history
        assert!(matches!(
            app.delete_booking(&booking.id),
            Err(AppError::NotHistory(_))
        ));

        app.complete_booking(&booking.id).unwrap();
        assert_eq!(app.ongoing_bookings().len(), 0);
        assert_eq!(app.history_bookings().len(), 1);

        // A completed booking cannot be completed again
        assert!(matches!(
            app.complete_booking(&booking.id),
            Err(AppError::NotOngoing(_))
        ));

        app.delete_booking(&booking.id).unwrap();
        assert!(app.state().bookings.is_empty());
    }

    #[test]
    fn test_catalog_filter_actions() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        // Before any search the whole catalog shows
        assert_eq!(app.displayed_bikes().len(), 7);

        app.search_available();
        assert_eq!(app.displayed_bikes().len(), 5);

        app.select_category(Category::Manual);
        let shown = app.displayed_bikes();
        assert_eq!(shown.len(), 3);
        assert!(shown.iter().all(|b| b.name.contains("Harley") || b.name.contains("BMW")));
    }

    #[test]
    fn test_tab_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(dir.path());

        assert_eq!(app.state().active_tab, MainTab::Home);
        app.select_tab(MainTab::Profile);
        assert_eq!(app.state().active_tab, MainTab::Profile);
    }
}
