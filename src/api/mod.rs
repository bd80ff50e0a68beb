//! Backend access
//!
//! Every view talks to the backend through [`TrackerBackend`], so views can
//! run against [`HttpBackend`] in production and an in-memory fake in tests.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/auth/login` - Exchange credentials for a session
//! - `POST /api/auth/register` - Create an account
//!
//! ## Applications
//! - `GET /api/applications?userId=` - List a user's applications
//! - `POST /api/applications` - Create an application
//! - `DELETE /api/applications/:id` - Delete an application (bearer)
//!
//! ## Insights (bearer)
//! - `POST /api/applications/skillRecommendations`
//! - `POST /api/applications/interviewPrep`
//! - `POST /api/applications/skillAnalysis`

pub mod client;
pub mod dto;

pub use client::HttpBackend;
pub use dto::InsightRequest;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{ApplicationRecord, InsightKind, InsightPayload, NewApplication, Session};

/// Operations the client needs from the InternSight backend
#[async_trait]
pub trait TrackerBackend: Send + Sync {
    /// Exchange credentials for a session
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session>;

    /// Create an account; returns the backend's confirmation message
    async fn register(&self, name: &str, email: &str, password: &str)
        -> ClientResult<Option<String>>;

    /// All applications owned by the session's user
    async fn list_applications(&self, session: &Session) -> ClientResult<Vec<ApplicationRecord>>;

    /// Create an application; the created record when the backend echoes it
    async fn create_application(
        &self,
        session: &Session,
        application: &NewApplication,
    ) -> ClientResult<Option<ApplicationRecord>>;

    /// Delete one application by id
    async fn delete_application(&self, session: &Session, id: &str) -> ClientResult<()>;

    /// Compute one kind of insight for a company/job pair
    async fn request_insight(
        &self,
        session: &Session,
        kind: InsightKind,
        request: &InsightRequest,
    ) -> ClientResult<InsightPayload>;
}
