//! Domain types shared by every view.
//!
//! Field names follow the backend's camelCase JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The signed-in user as returned by the login call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub user_id: String,
    pub username: String,
    pub token: String,
}

/// A tracked job application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub company: String,
    pub job: String,
    #[serde(default)]
    pub job_details: String,
    /// As sent by the backend: a bare date or a full timestamp
    pub deadline: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ApplicationRecord {
    /// Calendar date of the deadline, if the backend sent a readable one
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        parse_deadline(&self.deadline)
    }

    /// Deadline in the short `M/D/YYYY` form used by the list view.
    /// Unreadable values are shown as sent.
    pub fn deadline_display(&self) -> String {
        match self.deadline_date() {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => self.deadline.clone(),
        }
    }

    pub fn contact_display(&self) -> &str {
        self.contact_info.as_deref().unwrap_or("")
    }
}

/// Body of the create call: the form fields plus the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub company: String,
    pub job: String,
    pub job_details: String,
    /// `YYYY-MM-DD`, forwarded as entered
    pub deadline: String,
    pub contact_info: String,
    pub user_id: String,
}

/// A course suggestion for a skill the job asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

/// A practice platform for interview preparation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

/// Skill-gap analysis between the user's profile and a job.
///
/// Each group keeps the order the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub improve_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

/// The three kinds of insight the backend can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    SkillRecommendations,
    InterviewPrep,
    SkillAnalysis,
}

impl InsightKind {
    pub const ALL: [InsightKind; 3] = [
        InsightKind::SkillRecommendations,
        InsightKind::InterviewPrep,
        InsightKind::SkillAnalysis,
    ];

    /// Endpoint path relative to the backend base URL
    pub fn path(&self) -> &'static str {
        match self {
            InsightKind::SkillRecommendations => "/api/applications/skillRecommendations",
            InsightKind::InterviewPrep => "/api/applications/interviewPrep",
            InsightKind::SkillAnalysis => "/api/applications/skillAnalysis",
        }
    }

    /// Text shown when the request fails without a backend message
    pub fn default_error(&self) -> &'static str {
        match self {
            InsightKind::SkillRecommendations => "Error fetching skill recommendations.",
            InsightKind::InterviewPrep => "Error fetching interview prep tips.",
            InsightKind::SkillAnalysis => "Error fetching skill analysis.",
        }
    }

    /// Button label on an application row
    pub fn action_label(&self) -> &'static str {
        match self {
            InsightKind::SkillRecommendations => "Get Skill Recommendations",
            InsightKind::InterviewPrep => "Get Interview Prep Tips",
            InsightKind::SkillAnalysis => "Skill Analysis for Job",
        }
    }
}

/// Successful insight response, already unwrapped from its envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightPayload {
    Skills(Vec<SkillRecommendation>),
    Interview(Vec<InterviewPrepTip>),
    SkillAnalysis(SkillAnalysis),
}

/// What the insight panel holds once a request settles.
///
/// Serialized as `{"type": "...", "data": ...}` with the tags
/// `skills`, `interview`, `skillAnalysis` and `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum InsightOutput {
    Skills(Vec<SkillRecommendation>),
    Interview(Vec<InterviewPrepTip>),
    SkillAnalysis(SkillAnalysis),
    Error(String),
}

impl InsightOutput {
    pub fn tag(&self) -> &'static str {
        match self {
            InsightOutput::Skills(_) => "skills",
            InsightOutput::Interview(_) => "interview",
            InsightOutput::SkillAnalysis(_) => "skillAnalysis",
            InsightOutput::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, InsightOutput::Error(_))
    }
}

impl From<InsightPayload> for InsightOutput {
    fn from(payload: InsightPayload) -> Self {
        match payload {
            InsightPayload::Skills(list) => InsightOutput::Skills(list),
            InsightPayload::Interview(list) => InsightOutput::Interview(list),
            InsightPayload::SkillAnalysis(analysis) => InsightOutput::SkillAnalysis(analysis),
        }
    }
}

/// Read a deadline as a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (taken in UTC) and naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc().date());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
