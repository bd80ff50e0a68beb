//! Data Transfer Objects
//!
//! Request and response envelopes of the InternSight backend.
//! Domain payloads live in [`crate::models`].

use serde::{Deserialize, Serialize};

use crate::models::{InterviewPrepTip, SkillRecommendation};

// ============================================
// AUTH DTOs
// ============================================

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration request body
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Bodies that only carry a message: register success and every error
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================
// INSIGHT DTOs
// ============================================

/// Body shared by the three insight endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    pub user_id: String,
    pub company: String,
    pub job: String,
}

/// Skill recommendations envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendationsResponse {
    pub skill_recommendations: Vec<SkillRecommendation>,
}

/// Interview prep envelope
#[derive(Debug, Deserialize)]
pub struct InterviewPrepResponse {
    pub recommendations: Vec<InterviewPrepTip>,
}
