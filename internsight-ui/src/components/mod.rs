//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod application_card;
pub mod insight_modal;
pub mod loading;
pub mod nav;
pub mod toast;

pub use application_card::ApplicationCard;
pub use insight_modal::{InsightModal, ModalState};
pub use loading::Loading;
pub use nav::Nav;
pub use toast::Toast;
