//! Loading Component

use leptos::*;

/// Centered loading spinner with a caption
#[component]
pub fn Loading(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            <p class="text-gray-400">{label}</p>
        </div>
    }
}
