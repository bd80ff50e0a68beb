//! InternSight Web Client
//!
//! Browser front end for the InternSight tracker built with Leptos (WASM).
//!
//! # Features
//!
//! - Login and registration
//! - Application list with delete
//! - Skill recommendations, interview prep tips and skill analysis per
//!   application, shown in a modal
//! - Create form for new applications
//!
//! # Architecture
//!
//! Client-side rendered Leptos application compiled to WebAssembly. It talks
//! to the InternSight backend over HTTP; the signed-in session is mirrored to
//! `sessionStorage` so a reload keeps the user signed in for the tab.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Readable panics in the browser console
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
