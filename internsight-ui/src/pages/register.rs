//! Registration Page
//!
//! Signed-in users are sent home. A successful registration shows the
//! backend's confirmation and moves to the login page two seconds later.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;

const LOGIN_REDIRECT_MS: u32 = 2000;

#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let state_for_guard = state.clone();
    let navigate_home = navigate.clone();
    create_effect(move |_| {
        if state_for_guard.is_logged_in() {
            navigate_home("/home", Default::default());
        }
    });

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (message, set_message) = create_signal(None::<String>);
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);
        set_error.set(None);
        set_submitting.set(true);

        let navigate = navigate.clone();
        let (name, email, password) = (name.get(), email.get(), password.get());
        spawn_local(async move {
            match api::register(&name, &email, &password).await {
                Ok(confirmation) => {
                    set_message.set(Some(confirmation));
                    gloo_timers::callback::Timeout::new(LOGIN_REDIRECT_MS, move || {
                        navigate("/login", Default::default());
                    })
                    .forget();
                }
                Err(msg) => set_error.set(Some(msg)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h2 class="text-2xl font-bold text-center">"Register"</h2>

            {move || message.get().map(|msg| view! { <p class="text-green-400 text-center">{msg}</p> })}
            {move || error.get().map(|msg| view! { <p class="text-red-400 text-center">{msg}</p> })}

            <form on:submit=on_submit class="space-y-4">
                <input
                    type="text"
                    placeholder="Name"
                    required
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3"
                />
                <input
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3"
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3"
                />
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold"
                >
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>

            <p class="text-center text-gray-400">
                "Already have an account? "
                <A href="/login" class="text-primary-400">"Login"</A>
            </p>
        </div>
    }
}
