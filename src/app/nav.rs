//! Screen navigation route table.

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login / registration
    Auth,
    /// Tabbed main screen
    Main,
    /// Driver document upload
    DocVerification,
    /// Help center
    Help,
    /// About the company
    AboutUs,
}

/// Bottom-bar tabs on the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Home,
    Map,
    Bookings,
    Profile,
}

impl Screen {
    /// Screens directly reachable from this one.
    ///
    /// Everything outside the main screen returns there and nowhere else;
    /// leaving the main screen other than by logout goes to one of its
    /// satellite pages.
    pub fn transitions(&self) -> &'static [Screen] {
        match self {
            Screen::Auth => &[Screen::Main],
            Screen::Main => &[
                Screen::Auth,
                Screen::DocVerification,
                Screen::Help,
                Screen::AboutUs,
            ],
            Screen::DocVerification | Screen::Help | Screen::AboutUs => &[Screen::Main],
        }
    }

    /// Whether the route table allows moving from this screen to `target`.
    pub fn can_navigate_to(&self, target: Screen) -> bool {
        self.transitions().contains(&target)
    }
}
