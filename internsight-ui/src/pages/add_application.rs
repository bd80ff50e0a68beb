//! Add Application Page
//!
//! Create form. Every field except contact info is required. Success
//! clears the form; failure keeps it for another try.

use leptos::*;

use crate::api::{self, NewApplication};
use crate::state::global::GlobalState;

const SUCCESS_MESSAGE: &str = "Application added successfully!";
const LOGIN_PROMPT: &str = "Please log in to access your applications.";

#[component]
pub fn AddApplication() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let company = create_rw_signal(String::new());
    let job = create_rw_signal(String::new());
    let job_details = create_rw_signal(String::new());
    let deadline = create_rw_signal(String::new());
    let contact_info = create_rw_signal(String::new());

    let (message, set_message) = create_signal(None::<String>);
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let session = state.session;
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);
        set_error.set(None);

        let Some(current) = session.get_untracked() else {
            set_error.set(Some(LOGIN_PROMPT.to_string()));
            return;
        };

        let application = NewApplication {
            company: company.get_untracked(),
            job: job.get_untracked(),
            job_details: job_details.get_untracked(),
            deadline: deadline.get_untracked(),
            contact_info: contact_info.get_untracked(),
            user_id: current.user_id,
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api::create_application(&application).await {
                Ok(()) => {
                    set_message.set(Some(SUCCESS_MESSAGE.to_string()));
                    for field in [company, job, job_details, deadline, contact_info] {
                        field.set(String::new());
                    }
                }
                Err(msg) => set_error.set(Some(msg)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-xl mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h2 class="text-2xl font-bold text-center">"Add Application"</h2>

            {move || message.get().map(|msg| view! { <p class="text-green-400 text-center">{msg}</p> })}
            {move || error.get().map(|msg| view! { <p class="text-red-400 text-center">{msg}</p> })}

            <form on:submit=on_submit class="space-y-4">
                <TextField label="Company" value=company required=true />
                <TextField label="Job Title" value=job required=true />
                <label class="block">
                    <span class="text-gray-300">"Job Details"</span>
                    <textarea
                        required
                        rows="6"
                        prop:value=move || job_details.get()
                        on:input=move |ev| job_details.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 mt-1"
                    />
                </label>
                <TextField label="Deadline" value=deadline required=true input_type="date" />
                <TextField label="Contact Info" value=contact_info required=false />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold"
                >
                    {move || if submitting.get() { "Saving..." } else { "Add Application" }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    required: bool,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-gray-300">{label}</span>
            <input
                type=input_type
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 mt-1"
            />
        </label>
    }
}
