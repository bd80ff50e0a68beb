//! Pages
//!
//! Top-level page components for each route.

pub mod add_application;
pub mod home;
pub mod login;
pub mod register;

pub use add_application::AddApplication;
pub use home::Home;
pub use login::Login;
pub use register::Register;
