//! Home Page
//!
//! The signed-in user's applications with per-card insight and delete
//! actions. The list is cleared and refetched whenever the signed-in user
//! changes; a fetch that finishes after a newer one started, or after the
//! user changed again, is ignored.
//! Each modal opening takes a new generation number; a response is only
//! shown if its generation is still current, so closing the modal or
//! opening it again drops anything still in flight.

use leptos::*;

use crate::api::{self, InsightKind};
use crate::components::{ApplicationCard, InsightModal, Loading, ModalState};
use crate::state::global::{Application, GlobalState};

const LOGIN_PROMPT: &str = "Please log in to access your applications.";
const EMPTY_LIST: &str = "No applications found.";

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let applications = create_rw_signal(Vec::<Application>::new());
    let error = create_rw_signal(None::<String>);
    let loading = create_rw_signal(false);
    let modal = create_rw_signal(ModalState::Hidden);
    let generation = create_rw_signal(0u64);
    let fetches = create_rw_signal(0u64);

    // Refetch on identity change
    let session = state.session;
    create_effect(move |_| {
        fetches.update_untracked(|n| *n += 1);
        let ticket = fetches.get_untracked();
        applications.set(Vec::new());
        error.set(None);

        let Some(current) = session.get() else {
            loading.set(false);
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_applications(&current).await;
            let signed_in = session.with_untracked(|s| s.as_ref().map(|s| s.user_id.clone()));
            if !fetch_is_current(
                ticket,
                fetches.get_untracked(),
                signed_in.as_deref(),
                &current.user_id,
            ) {
                return;
            }
            match result {
                Ok(list) => applications.set(list),
                Err(msg) => error.set(Some(msg)),
            }
            loading.set(false);
        });
    });

    let on_insight = move |(kind, application): (InsightKind, Application)| {
        let Some(current) = session.get_untracked() else {
            return;
        };
        generation.update(|g| *g += 1);
        let ticket = generation.get_untracked();
        modal.set(ModalState::Loading);

        spawn_local(async move {
            let output =
                api::fetch_insight(kind, &current, &application.company, &application.job).await;
            if generation.get_untracked() == ticket {
                modal.set(ModalState::Showing(output));
            }
        });
    };

    let on_close = move |_: ()| {
        generation.update(|g| *g += 1);
        modal.set(ModalState::Hidden);
    };

    let on_delete = move |id: String| {
        let Some(current) = session.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::delete_application(&current, &id).await {
                Ok(()) => applications.update(|list| list.retain(|app| app.id != id)),
                Err(msg) => alert(&msg),
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h2 class="text-3xl font-bold text-center">"Applications"</h2>

            {move || error.get().map(|msg| view! { <p class="text-red-400 text-center">{msg}</p> })}

            {move || {
                if session.with(Option::is_none) {
                    view! { <p class="text-center text-gray-400">{LOGIN_PROMPT}</p> }.into_view()
                } else if loading.get() && applications.with(Vec::is_empty) {
                    view! { <Loading /> }.into_view()
                } else if applications.with(Vec::is_empty) {
                    view! { <p class="text-center text-gray-400">{EMPTY_LIST}</p> }.into_view()
                } else {
                    view! {
                        <ul class="space-y-4">
                            <For
                                each=move || applications.get()
                                key=|app| app.id.clone()
                                children=move |app| view! {
                                    <ApplicationCard
                                        application=app
                                        on_insight=on_insight
                                        on_delete=on_delete
                                    />
                                }
                            />
                        </ul>
                    }
                    .into_view()
                }
            }}

            <InsightModal state=modal on_close=on_close />
        </div>
    }
}

/// Whether a finished list fetch may still be shown
fn fetch_is_current(ticket: u64, latest: u64, signed_in: Option<&str>, fetched_for: &str) -> bool {
    ticket == latest && signed_in == Some(fetched_for)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
