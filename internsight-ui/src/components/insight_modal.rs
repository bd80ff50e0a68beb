//! Insight Modal Component
//!
//! Overlay showing loading, then exactly one of the insight results.

use leptos::*;

use crate::components::Loading;
use crate::state::global::{InsightOutput, InterviewPrepTip, SkillAnalysis, SkillRecommendation};

/// What the modal shows
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState {
    Hidden,
    Loading,
    Showing(InsightOutput),
}

#[component]
pub fn InsightModal(
    #[prop(into)] state: Signal<ModalState>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    move || match state.get() {
        ModalState::Hidden => view! {}.into_view(),
        ModalState::Loading => view! {
            <Backdrop on_close=on_close>
                <Loading />
            </Backdrop>
        }
        .into_view(),
        ModalState::Showing(output) => view! {
            <Backdrop on_close=on_close>
                <InsightBody output=output />
            </Backdrop>
        }
        .into_view(),
    }
}

#[component]
fn Backdrop(on_close: Callback<()>, children: Children) -> impl IntoView {
    view! {
        <div class="fixed inset-0 bg-black/60 flex items-center justify-center z-40">
            <div class="bg-gray-800 rounded-xl p-6 w-full max-w-xl max-h-[80vh] overflow-y-auto relative">
                <button
                    on:click=move |_| on_close.call(())
                    class="absolute top-3 right-3 text-gray-400 hover:text-white"
                >
                    "X"
                </button>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn InsightBody(output: InsightOutput) -> impl IntoView {
    match output {
        InsightOutput::Skills(list) => view! { <SkillList list=list /> }.into_view(),
        InsightOutput::Interview(list) => view! { <InterviewList list=list /> }.into_view(),
        InsightOutput::SkillAnalysis(analysis) => {
            view! { <AnalysisView analysis=analysis /> }.into_view()
        }
        InsightOutput::Error(message) => view! {
            <p class="text-red-400">{message}</p>
        }
        .into_view(),
    }
}

#[component]
fn SkillList(list: Vec<SkillRecommendation>) -> impl IntoView {
    view! {
        <h4 class="text-lg font-semibold mb-3">"Recommended Skills:"</h4>
        <ul class="space-y-3">
            {list.into_iter().map(|item| view! {
                <li class="bg-gray-700 rounded-lg p-4">
                    <strong>{item.skill}</strong>
                    <p><strong>"Course: "</strong>{item.course_name}</p>
                    <p><strong>"Provider: "</strong>{item.provider}</p>
                    <p><strong>"Description: "</strong>{item.description}</p>
                </li>
            }).collect_view()}
        </ul>
    }
}

#[component]
fn InterviewList(list: Vec<InterviewPrepTip>) -> impl IntoView {
    view! {
        <h4 class="text-lg font-semibold mb-3">"Interview Prep Tips:"</h4>
        <ul class="space-y-3">
            {list.into_iter().map(|tip| view! {
                <li class="bg-gray-700 rounded-lg p-4">
                    <p><strong>"Platform Name: "</strong>{tip.platform_name}</p>
                    <p><strong>"URL: "</strong>{tip.url}</p>
                    <p><strong>"Focus: "</strong>{tip.focus}</p>
                    <p><strong>"Category: "</strong>{tip.category}</p>
                </li>
            }).collect_view()}
        </ul>
    }
}

#[component]
fn AnalysisView(analysis: SkillAnalysis) -> impl IntoView {
    view! {
        <h4 class="text-lg font-semibold mb-3">"Skill Analysis:"</h4>
        <div class="bg-gray-700 rounded-lg p-4 space-y-1">
            <p><strong>"Matched Skills: "</strong>{analysis.matched_skills.join(", ")}</p>
            <p><strong>"Improve Skills: "</strong>{analysis.improve_skills.join(", ")}</p>
            <p><strong>"Missing Skills: "</strong>{analysis.missing_skills.join(", ")}</p>
        </div>
    }
}
