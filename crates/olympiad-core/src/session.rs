//! In-memory session: the signed-in user and the selected screen.
//!
//! Authentication is derived from `user_data`, so the two can never
//! disagree. Nothing here is persisted.

use crate::models::UserRecord;

/// The nine screens reachable from the sidebar once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    Home,
    #[default]
    Dashboard,
    MyExams,
    Practice,
    Analytics,
    StudyNotes,
    Bookmarks,
    Profile,
    Settings,
}

impl Screen {
    /// Sidebar order.
    pub const ALL: [Screen; 9] = [
        Screen::Home,
        Screen::Dashboard,
        Screen::MyExams,
        Screen::Practice,
        Screen::Analytics,
        Screen::StudyNotes,
        Screen::Bookmarks,
        Screen::Profile,
        Screen::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Dashboard => "Dashboard",
            Screen::MyExams => "My Exams",
            Screen::Practice => "Practice",
            Screen::Analytics => "Analytics",
            Screen::StudyNotes => "Study Notes",
            Screen::Bookmarks => "Bookmarks",
            Screen::Profile => "Profile",
            Screen::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// What the router shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    Screen(Screen),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    user_data: Option<UserRecord>,
    active_nav: Screen,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(&self) -> bool {
        self.user_data.is_some()
    }

    pub fn user_data(&self) -> Option<&UserRecord> {
        self.user_data.as_ref()
    }

    pub fn active_nav(&self) -> Screen {
        self.active_nav
    }

    /// Stores the user returned by a successful login and lands on the
    /// dashboard.
    pub fn login(&mut self, user: UserRecord) {
        self.user_data = Some(user);
        self.active_nav = Screen::Dashboard;
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn set_active_nav(&mut self, screen: Screen) {
        self.active_nav = screen;
    }

    pub fn current_view(&self) -> View {
        if self.authenticated() {
            View::Screen(self.active_nav)
        } else {
            View::Auth
        }
    }
}
