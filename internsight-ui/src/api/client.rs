//! HTTP API Client
//!
//! Functions for talking to the InternSight backend. Every failure resolves
//! to the text the page should show: the backend's `message` when it sent
//! one, otherwise the call's default.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::state::global::{
    Application, InsightOutput, InterviewPrepTip, Session, SkillAnalysis, SkillRecommendation,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const API_URL_KEY: &str = "internsight_api_url";

pub const LOGIN_DEFAULT_ERROR: &str = "Invalid email or password";
pub const REGISTER_DEFAULT_ERROR: &str = "An error occurred";
pub const REGISTER_DEFAULT_SUCCESS: &str = "Registration successful";
pub const LIST_DEFAULT_ERROR: &str = "Error fetching applications.";
pub const CREATE_DEFAULT_ERROR: &str = "Error adding application.";
pub const DELETE_DEFAULT_ERROR: &str = "Error deleting application.";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

// ============ Request / Response Types ============

#[derive(Debug, Default, serde::Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub company: String,
    pub job: String,
    pub job_details: String,
    pub deadline: String,
    pub contact_info: String,
    pub user_id: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightRequest<'a> {
    user_id: &'a str,
    company: &'a str,
    job: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillRecommendationsResponse {
    skill_recommendations: Vec<SkillRecommendation>,
}

#[derive(serde::Deserialize)]
struct InterviewPrepResponse {
    recommendations: Vec<InterviewPrepTip>,
}

/// The three insight actions on an application card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightKind {
    SkillRecommendations,
    InterviewPrep,
    SkillAnalysis,
}

impl InsightKind {
    fn path(self) -> &'static str {
        match self {
            InsightKind::SkillRecommendations => "/api/applications/skillRecommendations",
            InsightKind::InterviewPrep => "/api/applications/interviewPrep",
            InsightKind::SkillAnalysis => "/api/applications/skillAnalysis",
        }
    }

    pub fn default_error(self) -> &'static str {
        match self {
            InsightKind::SkillRecommendations => "Error fetching skill recommendations.",
            InsightKind::InterviewPrep => "Error fetching interview prep tips.",
            InsightKind::SkillAnalysis => "Error fetching skill analysis.",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InsightKind::SkillRecommendations => "Get Skill Recommendations",
            InsightKind::InterviewPrep => "Get Interview Prep Tips",
            InsightKind::SkillAnalysis => "Skill Analysis for Job",
        }
    }
}

// ============ Helpers ============

/// Backend message if non-empty, otherwise `default`
async fn failure_message(response: Response, default: &str) -> String {
    response
        .json::<MessageResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

async fn send(request: Result<Request, gloo_net::Error>, default: &str) -> Result<Response, String> {
    let request = request.map_err(|e| {
        log_error(&format!("Request build error: {}", e));
        default.to_string()
    })?;

    let response = request.send().await.map_err(|e| {
        log_error(&format!("Network error: {}", e));
        default.to_string()
    })?;

    if !response.ok() {
        return Err(failure_message(response, default).await);
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response, default: &str) -> Result<T, String> {
    response.json().await.map_err(|e| {
        log_error(&format!("Parse error: {}", e));
        default.to_string()
    })
}

fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

// ============ API Functions ============

pub async fn login(email: &str, password: &str) -> Result<Session, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest<'a> {
        email: &'a str,
        password: &'a str,
    }

    let request = Request::post(&format!("{}/api/auth/login", get_api_base()))
        .json(&LoginRequest { email, password });
    let response = send(request, LOGIN_DEFAULT_ERROR).await?;
    decode(response, LOGIN_DEFAULT_ERROR).await
}

/// Returns the confirmation message to show
pub async fn register(name: &str, email: &str, password: &str) -> Result<String, String> {
    #[derive(serde::Serialize)]
    struct RegisterRequest<'a> {
        name: &'a str,
        email: &'a str,
        password: &'a str,
    }

    let request = Request::post(&format!("{}/api/auth/register", get_api_base()))
        .json(&RegisterRequest { name, email, password });
    let response = send(request, REGISTER_DEFAULT_ERROR).await?;

    let body: MessageResponse = response.json().await.unwrap_or_default();
    Ok(body
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| REGISTER_DEFAULT_SUCCESS.to_string()))
}

pub async fn fetch_applications(session: &Session) -> Result<Vec<Application>, String> {
    let url = format!("{}/api/applications", get_api_base());
    let request = Request::get(&url)
        .query([("userId", session.user_id.as_str())])
        .build();
    let response = send(request, LIST_DEFAULT_ERROR).await?;
    decode(response, LIST_DEFAULT_ERROR).await
}

pub async fn create_application(application: &NewApplication) -> Result<(), String> {
    let request = Request::post(&format!("{}/api/applications", get_api_base())).json(application);
    send(request, CREATE_DEFAULT_ERROR).await?;
    Ok(())
}

pub async fn delete_application(session: &Session, id: &str) -> Result<(), String> {
    let id = String::from(js_sys::encode_uri_component(id));
    let url = format!("{}/api/applications/{}", get_api_base(), id);
    let request = Request::delete(&url)
        .header("Authorization", &format!("Bearer {}", session.token))
        .build();
    send(request, DELETE_DEFAULT_ERROR).await?;
    Ok(())
}

/// Run one insight request. Failures become [`InsightOutput::Error`].
pub async fn fetch_insight(
    kind: InsightKind,
    session: &Session,
    company: &str,
    job: &str,
) -> InsightOutput {
    match request_insight(kind, session, company, job).await {
        Ok(output) => output,
        Err(message) => InsightOutput::Error(message),
    }
}

async fn request_insight(
    kind: InsightKind,
    session: &Session,
    company: &str,
    job: &str,
) -> Result<InsightOutput, String> {
    let default = kind.default_error();
    let request = Request::post(&format!("{}{}", get_api_base(), kind.path()))
        .header("Authorization", &format!("Bearer {}", session.token))
        .json(&InsightRequest {
            user_id: &session.user_id,
            company,
            job,
        });
    let response = send(request, default).await?;

    Ok(match kind {
        InsightKind::SkillRecommendations => {
            let body: SkillRecommendationsResponse = decode(response, default).await?;
            InsightOutput::Skills(body.skill_recommendations)
        }
        InsightKind::InterviewPrep => {
            let body: InterviewPrepResponse = decode(response, default).await?;
            InsightOutput::Interview(body.recommendations)
        }
        InsightKind::SkillAnalysis => {
            let body: SkillAnalysis = decode(response, default).await?;
            InsightOutput::SkillAnalysis(body)
        }
    })
}
