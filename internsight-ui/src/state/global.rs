//! Global Application State
//!
//! Reactive state using Leptos signals. The session is mirrored to
//! `sessionStorage` so it survives a reload but not a closed tab.

use leptos::*;
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "internsight_session";

/// Characters of job details shown on a card before "..."
pub const DETAILS_PREVIEW_CHARS: usize = 400;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Signed-in user, if any
    pub session: RwSignal<Option<Session>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Signed-in user as returned by the login call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub user_id: String,
    pub username: String,
    pub token: String,
}

/// A tracked application
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub company: String,
    pub job: String,
    #[serde(default)]
    pub job_details: String,
    pub deadline: String,
    #[serde(default)]
    pub contact_info: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendation {
    pub skill: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPrepTip {
    pub platform_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub improve_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

/// Settled content of the insight modal
#[derive(Clone, Debug, PartialEq)]
pub enum InsightOutput {
    Skills(Vec<SkillRecommendation>),
    Interview(Vec<InterviewPrepTip>),
    SkillAnalysis(SkillAnalysis),
    Error(String),
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(load_session()),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

fn load_session() -> Option<Session> {
    let raw = session_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

impl GlobalState {
    pub fn is_logged_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// Replace the session and mirror it to storage
    pub fn login(&self, session: Session) {
        if let (Some(storage), Ok(raw)) = (session_storage(), serde_json::to_string(&session)) {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
        self.session.set(Some(session));
    }

    pub fn logout(&self) {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
        self.session.set(None);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }
}

/// Cut `text` to `limit` characters and mark the cut with "..."
pub fn truncate_details(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `M/D/YYYY` for a bare date or a timestamp; anything else is shown as is
pub fn format_deadline(raw: &str) -> String {
    use chrono::{DateTime, NaiveDate};

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()));

    match date {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_details() {
        let exact = "a".repeat(DETAILS_PREVIEW_CHARS);
        assert_eq!(truncate_details(&exact, DETAILS_PREVIEW_CHARS), exact);

        let long = "b".repeat(DETAILS_PREVIEW_CHARS + 1);
        let shown = truncate_details(&long, DETAILS_PREVIEW_CHARS);
        assert_eq!(shown.chars().count(), DETAILS_PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_format_deadline() {
        assert_eq!(format_deadline("2025-03-09"), "3/9/2025");
        assert_eq!(format_deadline("2024-05-01T00:00:00.000Z"), "5/1/2024");
        assert_eq!(format_deadline("soon"), "soon");
    }

    #[test]
    fn test_application_wire_format() {
        let app: Application = serde_json::from_str(
            r#"{"_id":"a1","company":"Acme","job":"Intern","deadline":"2025-03-09","userId":"u1"}"#,
        )
        .unwrap();
        assert_eq!(app.id, "a1");
        assert_eq!(app.job_details, "");
        assert_eq!(app.contact_info, None);
    }
}
