//! Registration view

use tokio::task::JoinHandle;

use super::{is_missing, ViewContext};
use crate::error::{ClientError, ClientResult};
use crate::navigation::Route;

/// Shown when registration fails without a backend message
pub const REGISTER_DEFAULT_ERROR: &str = "An error occurred";

/// Shown when the backend confirms without a message
pub const REGISTER_DEFAULT_SUCCESS: &str = "Registration successful";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn missing_required(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .find(|(_, value)| is_missing(value))
        .map(|(field, _)| field)
    }
}

pub struct RegisterView {
    ctx: ViewContext,
    pub form: RegisterForm,
    message: Option<String>,
    error: Option<String>,
    redirect: Option<JoinHandle<()>>,
}

impl RegisterView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            form: RegisterForm::default(),
            message: None,
            error: None,
            redirect: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Signed-in users never see the form. Returns true when it redirected.
    pub fn redirect_if_signed_in(&self) -> bool {
        if self.ctx.session.is_logged_in() {
            self.ctx.navigator.navigate(Route::Home);
            true
        } else {
            false
        }
    }

    /// Post the registration. On success the login view follows after the
    /// configured delay.
    pub async fn submit(&mut self) -> ClientResult<()> {
        if self.redirect_if_signed_in() {
            return Ok(());
        }

        self.message = None;
        self.error = None;

        if let Some(field) = self.form.missing_required() {
            let err = ClientError::MissingField(field);
            self.error = Some(err.user_message(REGISTER_DEFAULT_ERROR));
            return Err(err);
        }

        match self
            .ctx
            .backend
            .register(&self.form.name, &self.form.email, &self.form.password)
            .await
        {
            Ok(message) => {
                self.message = Some(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| REGISTER_DEFAULT_SUCCESS.to_string()),
                );
                self.schedule_login_redirect();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message(REGISTER_DEFAULT_ERROR));
                Err(err)
            }
        }
    }

    fn schedule_login_redirect(&mut self) {
        let navigator = self.ctx.navigator.clone();
        let delay = self.ctx.ui.register_redirect_delay();
        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(Route::Login);
        }));
    }

    /// Wait for a scheduled redirect to happen
    pub async fn wait_for_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Login redirect task failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{context, session, FakeBackend};

    fn filled(view: &mut RegisterView) {
        view.form = RegisterForm {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        };
    }

    #[tokio::test]
    async fn test_existing_session_redirects_without_call() {
        let backend = FakeBackend::new();
        let ctx = context(backend.clone());
        ctx.session.login(session("u1"));

        let mut view = RegisterView::new(ctx.clone());
        filled(&mut view);
        view.submit().await.unwrap();

        assert_eq!(ctx.navigator.current(), Route::Home);
        assert_eq!(backend.count("register"), 0);
        assert!(view.message().is_none());
    }

    #[tokio::test]
    async fn test_success_shows_message_then_redirects_to_login() {
        let backend = FakeBackend::new();
        let ctx = context(backend.clone());
        ctx.navigator.navigate(Route::Register);

        let mut view = RegisterView::new(ctx.clone());
        filled(&mut view);
        view.submit().await.unwrap();

        assert_eq!(view.message(), Some("User registered successfully"));
        // Redirect is delayed, not immediate
        assert_eq!(ctx.navigator.current(), Route::Register);

        view.wait_for_redirect().await;
        assert_eq!(ctx.navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_failure_keeps_route_and_shows_error() {
        let backend = FakeBackend::new();
        backend.fail("register", None);
        let ctx = context(backend.clone());
        ctx.navigator.navigate(Route::Register);

        let mut view = RegisterView::new(ctx.clone());
        filled(&mut view);
        assert!(view.submit().await.is_err());

        assert_eq!(view.error(), Some(REGISTER_DEFAULT_ERROR));
        assert!(view.message().is_none());
        view.wait_for_redirect().await;
        assert_eq!(ctx.navigator.current(), Route::Register);
    }

    #[test]
    fn test_missing_required_order() {
        let mut form = RegisterForm::default();
        assert_eq!(form.missing_required(), Some("name"));
        form.name = "A".to_string();
        assert_eq!(form.missing_required(), Some("email"));
        form.email = "a@b.com".to_string();
        assert_eq!(form.missing_required(), Some("password"));
        form.password = "pw".to_string();
        assert_eq!(form.missing_required(), None);
    }
}
