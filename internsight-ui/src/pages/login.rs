//! Login Page

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        let (email, password) = (email.get(), password.get());
        spawn_local(async move {
            match api::login(&email, &password).await {
                Ok(session) => {
                    state.login(session);
                    navigate("/home", Default::default());
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h2 class="text-2xl font-bold text-center">"Login"</h2>

            {move || error.get().map(|msg| view! { <p class="text-red-400 text-center">{msg}</p> })}

            <form on:submit=on_submit class="space-y-4">
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
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>

            <p class="text-center text-gray-400">
                "Don't have an account? "
                <A href="/register" class="text-primary-400">"Register"</A>
            </p>
        </div>
    }
}
