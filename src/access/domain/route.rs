//! Request routing rules for signed-in and signed-out visitors.

use crate::config::BoardConfig;

/// What to do with an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the requested path.
    Continue,
    /// Redirect to this path instead.
    Redirect(String),
}

/// Path rules gating pages on session presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRules {
    login_path: String,
    home_path: String,
    public_prefixes: Vec<String>,
}

impl RouteRules {
    /// Creates rules from explicit paths.
    #[must_use]
    pub fn new(
        login_path: impl Into<String>,
        home_path: impl Into<String>,
        public_prefixes: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
            public_prefixes: public_prefixes.into_iter().collect(),
        }
    }

    /// Creates rules from board configuration.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(
            config.login_path.clone(),
            config.home_path.clone(),
            config.public_prefixes.iter().cloned(),
        )
    }

    /// Decides how to route `path` for a visitor with or without a session.
    ///
    /// Public asset paths always continue. Without a session every other
    /// path redirects to the login page; with a session the login page
    /// redirects home.
    #[must_use]
    pub fn decide(&self, path: &str, has_session: bool) -> RouteDecision {
        if self
            .public_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            return RouteDecision::Continue;
        }

        let is_login = path.starts_with(self.login_path.as_str());
        match (has_session, is_login) {
            (false, false) => RouteDecision::Redirect(self.login_path.clone()),
            (true, true) => RouteDecision::Redirect(self.home_path.clone()),
            _ => RouteDecision::Continue,
        }
    }
}
