use leptos::prelude::*;

/// 整页加载状态
#[component]
pub fn PageSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[40vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 表格空行
#[component]
pub fn EmptyRow(colspan: u32, #[prop(into)] text: String) -> impl IntoView {
    view! {
        <tr>
            <td colspan=colspan class="text-center py-8 text-base-content/50">{text}</td>
        </tr>
    }
}
