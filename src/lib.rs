//! # InternSight
//!
//! Client for the InternSight job-application tracker: sign in, keep a list
//! of applications, and ask the backend for AI career guidance on any of
//! them.
//!
//! ## Modules
//!
//! - [`api`]: backend seam and its reqwest implementation
//! - [`views`]: login, registration, list, create form and insight panel
//! - [`session`] / [`navigation`]: shared session store and route state
//! - [`config`]: TOML configuration with environment overrides
//! - [`shell`] / [`render`]: the interactive terminal front end
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use internsight::{Config, HttpBackend, LoginView, ViewContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _source) = Config::load_default();
//!     let backend = Arc::new(HttpBackend::new(&config)?);
//!     let ctx = ViewContext::new(backend, config.ui.clone());
//!
//!     let mut login = LoginView::new(ctx.clone());
//!     login.form.email = "a@b.com".to_string();
//!     login.form.password = "secret".to_string();
//!     login.submit().await?;
//!
//!     println!("Signed in as {:?}", ctx.session.current());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod render;
pub mod session;
pub mod shell;
pub mod views;

pub use api::{HttpBackend, InsightRequest, TrackerBackend};

pub use config::{
    generate_default_config, AuthConfig, BackendConfig, Config, ConfigError, ConfigSource,
    LoggingConfig, UiConfig,
};

pub use error::{ClientError, ClientResult};

pub use models::{
    ApplicationRecord, InsightKind, InsightOutput, InsightPayload, InterviewPrepTip,
    NewApplication, Session, SkillAnalysis, SkillRecommendation,
};

pub use navigation::{Navigator, Route};
pub use session::{SessionStore, LOGIN_PROMPT};
pub use shell::{Command, Shell};

pub use views::{
    AddApplicationView, ApplicationForm, ApplicationListView, InsightPanel, InsightResolution,
    ListScreen, LoginView, PanelView, RegisterView, ViewContext,
};
