use leptos::prelude::*;

/// 页码按钮组，只有一页时不渲染
#[component]
pub fn Pagination(page: RwSignal<usize>, #[prop(into)] total_pages: Signal<usize>) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="join flex justify-center mt-6">
                <button
                    class="join-item btn btn-sm"
                    disabled={move || page.get() <= 1}
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "«"
                </button>
                {move || {
                    (1..=total_pages.get())
                        .map(|n| {
                            view! {
                                <button
                                    class="join-item btn btn-sm"
                                    class:btn-active=move || page.get() == n
                                    on:click=move |_| page.set(n)
                                >
                                    {n}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="join-item btn btn-sm"
                    disabled={move || page.get() >= total_pages.get()}
                    on:click=move |_| page.update(|p| *p += 1)
                >
                    "»"
                </button>
            </div>
        </Show>
    }
}
