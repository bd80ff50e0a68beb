//! Views
//!
//! Front-end independent state machines for each screen. A view owns its
//! form fields and messages, talks to the backend through the shared
//! [`ViewContext`], and exposes what should be rendered. The terminal shell
//! and any other front end only draw what the views say.
//!
//! - [`LoginView`] / [`RegisterView`]: auth gateway
//! - [`AddApplicationView`]: create form
//! - [`ApplicationListView`]: list, truncation, delete
//! - [`InsightPanel`]: the overlay for the three insight kinds

mod add_application;
mod applications;
mod insight;
mod login;
mod register;

#[cfg(test)]
pub(crate) mod testing;

pub use add_application::{AddApplicationView, ApplicationForm, ADD_SUCCESS_MESSAGE};
pub use applications::{
    truncate_details, ApplicationListView, ApplicationRow, ListScreen, DELETE_DEFAULT_ERROR,
    EMPTY_LIST_MESSAGE,
};
pub use insight::{CancelToken, InsightPanel, InsightResolution, PanelView, PendingInsight};
pub use login::{LoginForm, LoginView};
pub use register::{RegisterForm, RegisterView};

use std::sync::Arc;

use crate::api::TrackerBackend;
use crate::config::UiConfig;
use crate::navigation::Navigator;
use crate::session::SessionStore;

/// Everything a view may touch outside itself
#[derive(Clone)]
pub struct ViewContext {
    pub backend: Arc<dyn TrackerBackend>,
    pub session: SessionStore,
    pub navigator: Navigator,
    pub ui: UiConfig,
}

impl ViewContext {
    /// Fresh context: logged out, on the login route
    pub fn new(backend: Arc<dyn TrackerBackend>, ui: UiConfig) -> Self {
        Self {
            backend,
            session: SessionStore::new(),
            navigator: Navigator::default(),
            ui,
        }
    }
}

/// Presence check for required fields. Whitespace counts as present,
/// same as an HTML `required` input.
pub(crate) fn is_missing(value: &str) -> bool {
    value.is_empty()
}
