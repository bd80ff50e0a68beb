//! Client-side routes.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    /// Application list, the main view after login
    Home,
    AddApplication,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Home => "/home",
            Route::AddApplication => "/add-application",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Shared handle to the current route
#[derive(Clone)]
pub struct Navigator {
    tx: Arc<watch::Sender<Route>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }

    pub fn navigate(&self, route: Route) {
        let previous = self.tx.send_replace(route);
        if previous != route {
            tracing::info!(from = %previous, to = %route, "Navigate");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::AddApplication.to_string(), "/add-application");
    }

    #[test]
    fn test_navigate_is_shared_between_handles() {
        let nav = Navigator::default();
        assert_eq!(nav.current(), Route::Login);

        nav.clone().navigate(Route::Home);
        assert_eq!(nav.current(), Route::Home);
    }
}
