use olympiad_core::actions::Action;

use crate::features::form::FormState;
use crate::state::Feedback;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    SignIn,
    SignUp,
}

impl AuthTab {
    pub fn action(self) -> Action {
        match self {
            AuthTab::SignIn => Action::Login,
            AuthTab::SignUp => Action::Signup,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthTab::SignIn => "Sign In",
            AuthTab::SignUp => "Sign Up",
        }
    }
}

/// Sign-in and sign-up forms shown while signed out.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub tab: AuthTab,
    pub sign_in: FormState,
    pub sign_up: FormState,
    pub feedback: Option<Feedback>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            tab: AuthTab::SignIn,
            sign_in: FormState::new(Action::Login),
            sign_up: FormState::new(Action::Signup),
            feedback: None,
        }
    }
}

impl AuthState {
    pub fn form(&self) -> &FormState {
        match self.tab {
            AuthTab::SignIn => &self.sign_in,
            AuthTab::SignUp => &self.sign_up,
        }
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        match self.tab {
            AuthTab::SignIn => &mut self.sign_in,
            AuthTab::SignUp => &mut self.sign_up,
        }
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            AuthTab::SignIn => AuthTab::SignUp,
            AuthTab::SignUp => AuthTab::SignIn,
        };
        self.feedback = None;
    }
}
