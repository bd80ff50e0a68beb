//! Navigation Component
//!
//! Header bar. Signed-in users see their pages and a logout button;
//! everyone else sees the auth pages.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let state_for_logout = state.clone();
    let on_logout = move |_| {
        state_for_logout.logout();
        state_for_logout.show_success("Logged out");
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/home" class="flex items-center space-x-3">
                        <span class="text-2xl">"🎯"</span>
                        <span class="text-xl font-bold text-white">"InternSight"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <Show
                            when={
                                let state = state.clone();
                                move || state.is_logged_in()
                            }
                            fallback=|| view! {
                                <NavLink href="/login" label="Login" />
                                <NavLink href="/register" label="Register" />
                            }
                        >
                            <NavLink href="/home" label="Applications" />
                            <NavLink href="/add-application" label="Add Application" />
                            <button
                                on:click=on_logout.clone()
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
