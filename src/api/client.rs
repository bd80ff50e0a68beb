//! InternSight REST API Client
//!
//! HTTP implementation of [`TrackerBackend`] on top of reqwest.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{
    InsightRequest, InterviewPrepResponse, LoginRequest, MessageResponse, RegisterRequest,
    SkillRecommendationsResponse,
};
use super::TrackerBackend;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ApplicationRecord, InsightKind, InsightPayload, NewApplication, Session, SkillAnalysis,
};

/// InternSight REST API client
pub struct HttpBackend {
    client: Client,
    base_url: String,
    bearer_on_all_requests: bool,
}

impl HttpBackend {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.backend.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.backend.base_url().to_string(),
            bearer_on_all_requests: config.auth.bearer_on_all_requests,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List and create historically go out without a token.
    fn with_optional_bearer(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        if self.bearer_on_all_requests {
            request.bearer_auth(&session.token)
        } else {
            request
        }
    }

    /// Send a request and turn non-success statuses into [`ClientError::Backend`]
    async fn execute(&self, request: RequestBuilder, call: &'static str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(call, error = %e, "Request failed before a response");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(call, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageResponse>(&text)
            .ok()
            .and_then(|body| body.message);

        tracing::warn!(
            call,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "Backend rejected request"
        );

        Err(ClientError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TrackerBackend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        tracing::debug!(method = "POST", path = "/api/auth/login");
        let request = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { email, password });

        let response = self.execute(request, "login").await?;
        Self::decode(response).await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<Option<String>> {
        tracing::debug!(method = "POST", path = "/api/auth/register");
        let request = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&RegisterRequest {
                name,
                email,
                password,
            });

        let response = self.execute(request, "register").await?;
        let body: MessageResponse = Self::decode(response).await.unwrap_or_default();
        Ok(body.message)
    }

    async fn list_applications(&self, session: &Session) -> ClientResult<Vec<ApplicationRecord>> {
        let path = format!(
            "/api/applications?userId={}",
            urlencoding::encode(&session.user_id)
        );
        tracing::debug!(method = "GET", path = %path);

        let request = self.with_optional_bearer(self.client.get(self.url(&path)), session);
        let response = self.execute(request, "list_applications").await?;
        Self::decode(response).await
    }

    async fn create_application(
        &self,
        session: &Session,
        application: &NewApplication,
    ) -> ClientResult<Option<ApplicationRecord>> {
        tracing::debug!(method = "POST", path = "/api/applications");
        let request = self.with_optional_bearer(
            self.client.post(self.url("/api/applications")).json(application),
            session,
        );

        let response = self.execute(request, "create_application").await?;
        // Any 2xx counts as created; the echoed record is a bonus.
        let body: serde_json::Value = Self::decode(response).await.unwrap_or_default();
        Ok(serde_json::from_value(body).ok())
    }

    async fn delete_application(&self, session: &Session, id: &str) -> ClientResult<()> {
        let path = format!("/api/applications/{}", urlencoding::encode(id));
        tracing::debug!(method = "DELETE", path = %path);

        let request = self
            .client
            .delete(self.url(&path))
            .bearer_auth(&session.token);

        self.execute(request, "delete_application").await?;
        Ok(())
    }

    async fn request_insight(
        &self,
        session: &Session,
        kind: InsightKind,
        request: &InsightRequest,
    ) -> ClientResult<InsightPayload> {
        tracing::debug!(method = "POST", path = kind.path());
        let http_request = self
            .client
            .post(self.url(kind.path()))
            .bearer_auth(&session.token)
            .json(request);

        let response = self.execute(http_request, "request_insight").await?;

        let payload = match kind {
            InsightKind::SkillRecommendations => {
                let body: SkillRecommendationsResponse = Self::decode(response).await?;
                InsightPayload::Skills(body.skill_recommendations)
            }
            InsightKind::InterviewPrep => {
                let body: InterviewPrepResponse = Self::decode(response).await?;
                InsightPayload::Interview(body.recommendations)
            }
            InsightKind::SkillAnalysis => {
                let body: SkillAnalysis = Self::decode(response).await?;
                InsightPayload::SkillAnalysis(body)
            }
        };

        Ok(payload)
    }
}
