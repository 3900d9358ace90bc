//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，验证统一交给 `route::guard`。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, Guard, Viewer, guard};

/// 获取当前浏览器路径（含查询串）
fn current_path() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{path}{search}")
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 访问者信号由外部注入，与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    viewer: Signal<Viewer>,
}

impl RouterService {
    fn new(viewer: Signal<Viewer>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            viewer,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn viewer(&self) -> Signal<Viewer> {
        self.viewer
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    pub fn go(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 导航到指定路由
    ///
    /// `use_push`: true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let viewer = self.viewer.get_untracked();

        // --- Step 1: 验证目标路由 ---
        // Wait 时先进入目标路由，会话恢复完成后由 setup_auth_redirect 重新判定
        let resolved = match guard(&target_route, viewer) {
            Guard::Allow | Guard::Wait => target_route,
            Guard::Redirect(redirect) => {
                log_info!("[Router] {} -> {} ({:?})", target_route, redirect, viewer);
                redirect
            }
        };

        // --- Step 2: 加载页面 (更新状态) ---
        let path = resolved.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(resolved);
        scroll_to_top();
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时也执行守卫逻辑，重定向使用 replaceState
            router.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 访问者变化（会话恢复完成、登录、登出、401）时重新判定当前路由
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let viewer = router.viewer.get();
            let route = router.current_route.get_untracked();

            if let Guard::Redirect(redirect) = guard(&route, viewer) {
                log_info!(
                    "[Router] Viewer changed to {:?}, redirecting {} -> {}",
                    viewer,
                    route,
                    redirect
                );
                replace_history_state(&redirect.to_path());
                router.set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(viewer: Signal<Viewer>) -> RouterService {
    let router = RouterService::new(viewer);

    // 首次加载时的 URL 同样经过守卫
    router.navigate_to_route(router.current_route.get_untracked(), false);
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 访问者信号
    viewer: Signal<Viewer>,
    children: Children,
) -> impl IntoView {
    provide_router(viewer);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件；会话恢复中的受保护路由显示加载状态。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let waiting =
        Memo::new(move |_| guard(&router.current_route().get(), router.viewer().get()) == Guard::Wait);

    move || {
        if waiting.get() {
            view! {
                <div class="flex items-center justify-center min-h-[50vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any()
        } else {
            matcher(router.current_route().get())
        }
    }
}

/// 站内链接：拦截点击，改用路由服务导航
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        // 保留新标签页打开等浏览器默认行为
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
