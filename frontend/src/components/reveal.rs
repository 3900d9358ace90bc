//! 进入视口时的淡入/缩放动画
//!
//! 元素首次与视口相交后即停止观察。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    FadeUp,
    ScaleIn,
}

const BASE: &str = "transition-all duration-700 ease-out";

/// 动画状态对应的 tailwind 类
pub fn reveal_class(animation: Animation, visible: bool) -> String {
    let state = match (animation, visible) {
        (_, true) => "opacity-100 translate-y-0 scale-100",
        (Animation::FadeUp, false) => "opacity-0 translate-y-8",
        (Animation::ScaleIn, false) => "opacity-0 scale-95",
    };
    format!("{BASE} {state}")
}

type ObserverHandle = (IntersectionObserver, Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>);

#[component]
fn Reveal(
    animation: Animation,
    /// 延迟（毫秒）
    delay: u32,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let node = NodeRef::<leptos::html::Div>::new();
    let (visible, set_visible) = signal(false);
    let handle = StoredValue::new_local(None::<ObserverHandle>);

    Effect::new(move |_| {
        let Some(element) = node.get() else {
            return;
        };
        if handle.with_value(Option::is_some) {
            return;
        }

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let hit = entries.iter().any(|entry| {
                    entry
                        .dyn_into::<IntersectionObserverEntry>()
                        .is_ok_and(|e| e.is_intersecting())
                });
                if hit {
                    set_visible.set(true);
                    observer.disconnect();
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(0.1));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&element);
                handle.set_value(Some((observer, callback)));
            }
            // 不支持时直接显示
            Err(_) => set_visible.set(true),
        }
    });

    on_cleanup(move || {
        handle.try_with_value(|h| {
            if let Some((observer, _)) = h {
                observer.disconnect();
            }
        });
    });

    view! {
        <div
            node_ref=node
            class=move || format!("{} {}", reveal_class(animation, visible.get()), class)
            style=format!("transition-delay: {delay}ms")
        >
            {children()}
        </div>
    }
}

#[component]
pub fn FadeIn(
    #[prop(optional)] delay: u32,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! { <Reveal animation=Animation::FadeUp delay=delay class=class>{children()}</Reveal> }
}

#[component]
pub fn ScaleIn(
    #[prop(optional)] delay: u32,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! { <Reveal animation=Animation::ScaleIn delay=delay class=class>{children()}</Reveal> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_state_depends_on_animation() {
        assert!(reveal_class(Animation::FadeUp, false).contains("translate-y-8"));
        assert!(reveal_class(Animation::ScaleIn, false).contains("scale-95"));
        assert!(reveal_class(Animation::ScaleIn, true).contains("opacity-100"));
    }
}
