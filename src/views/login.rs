//! Login view

use super::{is_missing, ViewContext};
use crate::error::{ClientError, ClientResult};
use crate::navigation::Route;

/// Shown when login fails without a backend message
pub const LOGIN_DEFAULT_ERROR: &str = "Invalid email or password";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn missing_required(&self) -> Option<&'static str> {
        if is_missing(&self.email) {
            Some("email")
        } else if is_missing(&self.password) {
            Some("password")
        } else {
            None
        }
    }
}

pub struct LoginView {
    ctx: ViewContext,
    pub form: LoginForm,
    error: Option<String>,
}

impl LoginView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            form: LoginForm::default(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Post the credentials; on success store the session and go home.
    pub async fn submit(&mut self) -> ClientResult<()> {
        self.error = None;

        if let Some(field) = self.form.missing_required() {
            let err = ClientError::MissingField(field);
            self.error = Some(err.user_message(LOGIN_DEFAULT_ERROR));
            return Err(err);
        }

        match self
            .ctx
            .backend
            .login(&self.form.email, &self.form.password)
            .await
        {
            Ok(session) => {
                self.ctx.session.login(session);
                self.ctx.navigator.navigate(Route::Home);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message(LOGIN_DEFAULT_ERROR));
                Err(err)
            }
        }
    }
}
