//! Application Card Component
//!
//! One application with its insight and delete actions.

use leptos::*;

use crate::api::InsightKind;
use crate::state::global::{format_deadline, truncate_details, Application, DETAILS_PREVIEW_CHARS};

#[component]
pub fn ApplicationCard(
    application: Application,
    #[prop(into)] on_insight: Callback<(InsightKind, Application)>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let company = application.company.clone();
    let job = application.job.clone();
    let details = truncate_details(&application.job_details, DETAILS_PREVIEW_CHARS);
    let deadline = format_deadline(&application.deadline);
    let contact = application.contact_info.clone().unwrap_or_default();
    let id = application.id.clone();

    let insight_button = move |kind: InsightKind, class: &'static str| {
        let application = application.clone();
        view! {
            <button
                on:click=move |_| on_insight.call((kind, application.clone()))
                class=format!("px-3 py-2 rounded-lg text-sm font-medium transition-colors {}", class)
            >
                {kind.label()}
            </button>
        }
    };

    view! {
        <li class="bg-gray-800 rounded-xl p-6 space-y-2">
            <h4 class="text-lg font-semibold">{company}</h4>
            <p><strong>"Job: "</strong>{job}</p>
            <p><strong>"Details: "</strong>{details}</p>
            <p><strong>"Deadline: "</strong>{deadline}</p>
            <p><strong>"Contact Info: "</strong>{contact}</p>
            <div class="flex flex-wrap gap-2 pt-2">
                {insight_button(InsightKind::SkillRecommendations, "bg-primary-600 hover:bg-primary-700")}
                {insight_button(InsightKind::InterviewPrep, "bg-green-600 hover:bg-green-700")}
                {insight_button(InsightKind::SkillAnalysis, "bg-gray-600 hover:bg-gray-500")}
                <button
                    on:click=move |_| on_delete.call(id.clone())
                    class="px-3 py-2 rounded-lg text-sm font-medium bg-red-600 hover:bg-red-700 transition-colors"
                >
                    "Delete Application"
                </button>
            </div>
        </li>
    }
}
