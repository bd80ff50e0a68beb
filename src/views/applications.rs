//! Application list view
//!
//! Loads the signed-in user's applications, renders them as rows with a
//! shortened job description, and deletes them one at a time. The local
//! list only changes after the backend confirms a delete.
//!
//! The view follows the session store: when the signed-in user changes,
//! rows loaded for the previous user are dropped before the new fetch.

use std::borrow::Cow;

use tokio::sync::watch;

use super::ViewContext;
use crate::error::ClientResult;
use crate::models::{ApplicationRecord, Session};

pub const LIST_DEFAULT_ERROR: &str = "Error fetching applications.";
pub const DELETE_DEFAULT_ERROR: &str = "Error deleting application.";
pub const EMPTY_LIST_MESSAGE: &str = "No applications found.";

/// Cut `text` to `limit` characters and mark the cut with `...`.
///
/// Counts characters, not bytes. Text at or under the limit is returned as is.
pub fn truncate_details(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRow {
    pub id: String,
    pub company: String,
    pub job: String,
    pub details: String,
    pub deadline: String,
    pub contact_info: String,
}

/// What the list screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScreen {
    /// No session: a prompt instead of data
    LoginPrompt,
    Empty,
    Rows(Vec<ApplicationRow>),
}

pub struct ApplicationListView {
    ctx: ViewContext,
    identity: watch::Receiver<Option<Session>>,
    applications: Vec<ApplicationRecord>,
    /// User the list was loaded for
    loaded_for: Option<String>,
    error: Option<String>,
    alert: Option<String>,
}

impl ApplicationListView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            identity: ctx.session.subscribe(),
            ctx,
            applications: Vec::new(),
            loaded_for: None,
            error: None,
            alert: None,
        }
    }

    pub fn applications(&self) -> &[ApplicationRecord] {
        &self.applications
    }

    /// Inline error from the last fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pending delete failure; taking it dismisses the alert
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Fetch the current user's applications
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let session = match self.ctx.session.require() {
            Ok(session) => session,
            Err(err) => {
                self.applications.clear();
                self.loaded_for = None;
                return Err(err);
            }
        };

        if self.loaded_for.as_deref() != Some(session.user_id.as_str()) {
            self.applications.clear();
            self.error = None;
            self.loaded_for = Some(session.user_id.clone());
        }

        match self.ctx.backend.list_applications(&session).await {
            Ok(applications) => {
                tracing::debug!(count = applications.len(), "Applications loaded");
                self.applications = applications;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message(LIST_DEFAULT_ERROR));
                Err(err)
            }
        }
    }

    /// Refetch only when the signed-in user differs from the loaded one.
    /// Returns whether a fetch ran.
    pub async fn sync_identity(&mut self) -> bool {
        let current = self
            .identity
            .borrow_and_update()
            .as_ref()
            .map(|session| session.user_id.clone());
        if current == self.loaded_for {
            return false;
        }

        if current.is_none() {
            self.applications.clear();
            self.loaded_for = None;
            self.error = None;
            return false;
        }

        // Failures are already reflected in `error`
        let _ = self.refresh().await;
        true
    }

    /// Wait for the next login or logout, then sync with it.
    /// Returns whether a fetch ran.
    pub async fn identity_changed(&mut self) -> bool {
        if self.identity.changed().await.is_err() {
            return false;
        }
        self.sync_identity().await
    }

    /// Delete by id; the row disappears only after the backend agrees
    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        let result = match self.ctx.session.require() {
            Ok(session) => self.ctx.backend.delete_application(&session, id).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.applications.retain(|app| app.id != id);
                Ok(())
            }
            Err(err) => {
                self.alert = Some(err.user_message(DELETE_DEFAULT_ERROR));
                Err(err)
            }
        }
    }

    /// Record at a 1-based row position
    pub fn record_at(&self, row: usize) -> Option<&ApplicationRecord> {
        row.checked_sub(1).and_then(|i| self.applications.get(i))
    }

    pub fn screen(&self) -> ListScreen {
        if !self.ctx.session.is_logged_in() {
            return ListScreen::LoginPrompt;
        }
        if self.applications.is_empty() {
            return ListScreen::Empty;
        }

        let limit = self.ctx.ui.details_preview_chars;
        ListScreen::Rows(
            self.applications
                .iter()
                .map(|app| ApplicationRow {
                    id: app.id.clone(),
                    company: app.company.clone(),
                    job: app.job.clone(),
                    details: truncate_details(&app.job_details, limit).into_owned(),
                    deadline: app.deadline_display(),
                    contact_info: app.contact_display().to_string(),
                })
                .collect(),
        )
    }
}
