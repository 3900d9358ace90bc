use fitlife_shared::catalog::stars;
use fitlife_shared::{Tone, status_tone};
use leptos::prelude::*;

/// 页面标题与副标题
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4 mb-6">
            <div>
                <h1 class="text-3xl font-bold">{title}</h1>
                {subtitle.map(|s| view! { <p class="text-base-content/70 mt-1">{s}</p> })}
            </div>
            {children.map(|c| view! { <div class="flex gap-2">{c()}</div> })}
        </div>
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] desc: Option<String>,
    #[prop(optional)] tone: Tone,
) -> impl IntoView {
    view! {
        <div class="stat bg-base-100 rounded-box shadow">
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value text-3xl {}", tone.text_class())>{move || value.get()}</div>
            {desc.map(|d| view! { <div class="stat-desc">{d}</div> })}
        </div>
    }
}

/// 状态字符串徽章（颜色由状态决定）
#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let class = status_tone(&status).badge_class();
    view! { <span class=class>{status}</span> }
}

#[component]
pub fn Stars(rating: f64) -> impl IntoView {
    view! { <span class="text-warning tracking-tight" title=format!("{rating:.1}")>{stars(rating)}</span> }
}
