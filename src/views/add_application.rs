//! Create-application view

use super::{is_missing, ViewContext};
use crate::error::{ClientError, ClientResult};
use crate::models::NewApplication;

pub const ADD_SUCCESS_MESSAGE: &str = "Application added successfully!";
pub const ADD_DEFAULT_ERROR: &str = "Error adding application.";

/// The five create-form fields. Contact info is the only optional one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub company: String,
    pub job: String,
    pub job_details: String,
    /// `YYYY-MM-DD`
    pub deadline: String,
    pub contact_info: String,
}

impl ApplicationForm {
    /// First required field that is still empty, by display name
    pub fn missing_required(&self) -> Option<&'static str> {
        [
            ("company", &self.company),
            ("job title", &self.job),
            ("job details", &self.job_details),
            ("deadline", &self.deadline),
        ]
        .into_iter()
        .find(|(_, value)| is_missing(value))
        .map(|(field, _)| field)
    }

    pub fn is_submittable(&self) -> bool {
        self.missing_required().is_none()
    }

    fn to_request(&self, user_id: String) -> NewApplication {
        NewApplication {
            company: self.company.clone(),
            job: self.job.clone(),
            job_details: self.job_details.clone(),
            deadline: self.deadline.clone(),
            contact_info: self.contact_info.clone(),
            user_id,
        }
    }
}

pub struct AddApplicationView {
    ctx: ViewContext,
    pub form: ApplicationForm,
    message: Option<String>,
    error: Option<String>,
}

impl AddApplicationView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            form: ApplicationForm::default(),
            message: None,
            error: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Post the form for the current user. Success clears the form;
    /// failure keeps it for another attempt.
    pub async fn submit(&mut self) -> ClientResult<()> {
        self.message = None;
        self.error = None;

        let session = match self.ctx.session.require() {
            Ok(session) => session,
            Err(err) => {
                self.error = Some(err.user_message(ADD_DEFAULT_ERROR));
                return Err(err);
            }
        };

        if let Some(field) = self.form.missing_required() {
            let err = ClientError::MissingField(field);
            self.error = Some(err.user_message(ADD_DEFAULT_ERROR));
            return Err(err);
        }

        let request = self.form.to_request(session.user_id.clone());
        match self.ctx.backend.create_application(&session, &request).await {
            Ok(created) => {
                if let Some(record) = created {
                    tracing::debug!(id = %record.id, "Application created");
                }
                self.message = Some(ADD_SUCCESS_MESSAGE.to_string());
                self.form = ApplicationForm::default();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message(ADD_DEFAULT_ERROR));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LOGIN_PROMPT;
    use crate::views::testing::{context, session, FakeBackend};

    fn filled() -> ApplicationForm {
        ApplicationForm {
            company: "Acme".to_string(),
            job: "Intern".to_string(),
            job_details: "Write Rust".to_string(),
            deadline: "2025-03-09".to_string(),
            contact_info: String::new(),
        }
    }

    #[test]
    fn test_required_fields() {
        let form = ApplicationForm::default();
        assert_eq!(form.missing_required(), Some("company"));
        assert!(!form.is_submittable());

        let mut form = filled();
        assert!(form.is_submittable());
        form.deadline.clear();
        assert_eq!(form.missing_required(), Some("deadline"));

        // Contact info is optional
        let mut form = filled();
        form.contact_info.clear();
        assert!(form.is_submittable());
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let backend = FakeBackend::new();
        let ctx = context(backend.clone());
        ctx.session.login(session("u1"));

        let mut view = AddApplicationView::new(ctx);
        view.form = filled();
        view.submit().await.unwrap();

        assert_eq!(view.message(), Some(ADD_SUCCESS_MESSAGE));
        assert!(view.error().is_none());
        assert_eq!(view.form, ApplicationForm::default());

        let sent = backend.last_created().unwrap();
        assert_eq!(sent.user_id, "u1");
        assert_eq!(sent.company, "Acme");
        assert_eq!(sent.deadline, "2025-03-09");
    }

    #[tokio::test]
    async fn test_failure_keeps_fields() {
        let backend = FakeBackend::new();
        backend.fail("create", Some("Deadline must be a date"));
        let ctx = context(backend.clone());
        ctx.session.login(session("u1"));

        let mut view = AddApplicationView::new(ctx);
        view.form = filled();
        assert!(view.submit().await.is_err());

        assert_eq!(view.error(), Some("Deadline must be a date"));
        assert!(view.message().is_none());
        assert_eq!(view.form, filled());

        backend.fail("create", None);
        assert!(view.submit().await.is_err());
        assert_eq!(view.error(), Some(ADD_DEFAULT_ERROR));
    }

    #[tokio::test]
    async fn test_empty_required_field_blocks_submission() {
        let backend = FakeBackend::new();
        let ctx = context(backend.clone());
        ctx.session.login(session("u1"));

        let mut view = AddApplicationView::new(ctx);
        view.form = filled();
        view.form.job_details.clear();

        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::MissingField("job details")));
        assert_eq!(backend.count("create"), 0);
    }

    #[tokio::test]
    async fn test_requires_session() {
        let backend = FakeBackend::new();
        let mut view = AddApplicationView::new(context(backend.clone()));
        view.form = filled();

        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::NoSession));
        assert_eq!(view.error(), Some(LOGIN_PROMPT));
        assert_eq!(backend.count("create"), 0);
    }
}
