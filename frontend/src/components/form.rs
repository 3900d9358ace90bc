//! 表单输入组件
//!
//! 管理端的编辑对话框都由 `RwSignal<String>` 字段组成，这里统一渲染。

use leptos::prelude::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    /// `text` / `email` / `number` / `password` / `datetime-local` / `url`
    #[prop(optional, into)]
    kind: Option<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <span class="label-text mb-1">{label}</span>
            <input
                type=kind.unwrap_or_else(|| "text".to_string())
                class="input input-bordered w-full"
                required=required
                step="any"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(default = 3)] rows: u32,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <span class="label-text mb-1">{label}</span>
            <textarea
                class="textarea textarea-bordered w-full"
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="label cursor-pointer justify-start gap-3">
            <input
                type="checkbox"
                class="toggle toggle-primary"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span class="label-text">{label}</span>
        </label>
    }
}
