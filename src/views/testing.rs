//! In-memory backend for view tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::ViewContext;
use crate::api::{InsightRequest, TrackerBackend};
use crate::config::UiConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ApplicationRecord, InsightKind, InsightPayload, InterviewPrepTip, NewApplication, Session,
    SkillAnalysis, SkillRecommendation,
};

#[derive(Default)]
pub(crate) struct FakeBackend {
    calls: Mutex<Vec<&'static str>>,
    records: Mutex<Vec<ApplicationRecord>>,
    failures: Mutex<HashMap<&'static str, Option<String>>>,
    hold_insights: AtomicBool,
    release: Notify,
    last_created: Mutex<Option<NewApplication>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_records(records: Vec<ApplicationRecord>) -> Arc<Self> {
        let backend = Self::default();
        *backend.records.lock().unwrap() = records;
        Arc::new(backend)
    }

    /// Make `call` fail with a 400 carrying `message`
    pub fn fail(&self, call: &'static str, message: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(call, message.map(str::to_string));
    }

    pub fn heal(&self, call: &'static str) {
        self.failures.lock().unwrap().remove(call);
    }

    /// Park insight requests until [`FakeBackend::release_insight`]
    pub fn hold_insights(&self) {
        self.hold_insights.store(true, Ordering::SeqCst);
    }

    pub fn release_insight(&self) {
        self.release.notify_one();
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
    }

    pub fn last_created(&self) -> Option<NewApplication> {
        self.last_created.lock().unwrap().clone()
    }

    fn enter(&self, call: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(call) {
            Some(message) => Err(ClientError::Backend {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TrackerBackend for FakeBackend {
    async fn login(&self, _email: &str, password: &str) -> ClientResult<Session> {
        self.enter("login")?;
        if password != "pw" {
            return Err(ClientError::Backend {
                status: 401,
                message: None,
            });
        }
        Ok(session("u1"))
    }

    async fn register(
        &self,
        _name: &str,
        _email: &str,
        _password: &str,
    ) -> ClientResult<Option<String>> {
        self.enter("register")?;
        Ok(Some("User registered successfully".to_string()))
    }

    async fn list_applications(&self, session: &Session) -> ClientResult<Vec<ApplicationRecord>> {
        self.enter("list")?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id.as_deref() == Some(session.user_id.as_str()))
            .cloned()
            .collect())
    }

    async fn create_application(
        &self,
        _session: &Session,
        application: &NewApplication,
    ) -> ClientResult<Option<ApplicationRecord>> {
        self.enter("create")?;
        *self.last_created.lock().unwrap() = Some(application.clone());
        Ok(None)
    }

    async fn delete_application(&self, _session: &Session, id: &str) -> ClientResult<()> {
        self.enter("delete")?;
        self.records.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn request_insight(
        &self,
        _session: &Session,
        kind: InsightKind,
        request: &InsightRequest,
    ) -> ClientResult<InsightPayload> {
        if self.hold_insights.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        self.enter("insight")?;

        Ok(match kind {
            InsightKind::SkillRecommendations => InsightPayload::Skills(vec![SkillRecommendation {
                skill: format!("{} skill", request.company),
                course_name: "Course".to_string(),
                provider: "Provider".to_string(),
                description: "Description".to_string(),
            }]),
            InsightKind::InterviewPrep => InsightPayload::Interview(vec![InterviewPrepTip {
                platform_name: "LeetCode".to_string(),
                url: "https://leetcode.com".to_string(),
                focus: request.job.clone(),
                category: "Technical".to_string(),
            }]),
            InsightKind::SkillAnalysis => InsightPayload::SkillAnalysis(SkillAnalysis {
                matched_skills: vec!["Rust".to_string()],
                improve_skills: vec!["SQL".to_string()],
                missing_skills: vec!["Kubernetes".to_string()],
            }),
        })
    }
}

pub(crate) fn session(user_id: &str) -> Session {
    Session {
        email: "a@b.com".to_string(),
        user_id: user_id.to_string(),
        username: "A".to_string(),
        token: "t1".to_string(),
    }
}

pub(crate) fn record(id: &str, user_id: &str, details: &str) -> ApplicationRecord {
    ApplicationRecord {
        id: id.to_string(),
        company: format!("Company {}", id),
        job: "Intern".to_string(),
        job_details: details.to_string(),
        deadline: "2025-03-09".to_string(),
        contact_info: None,
        user_id: Some(user_id.to_string()),
    }
}

pub(crate) fn context(backend: Arc<FakeBackend>) -> ViewContext {
    let ui = UiConfig {
        register_redirect_ms: 20,
        ..UiConfig::default()
    };
    ViewContext::new(backend, ui)
}
