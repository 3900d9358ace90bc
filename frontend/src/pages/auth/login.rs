use super::AuthCard;
use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::alert::ErrorAlert;
use crate::web::router::Link;
use crate::web::spawn_scoped;
use leptos::prelude::*;

/// 登录页
///
/// 成功后由路由服务按访问者变化跳转（优先 `next`，否则角色首页）。
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        if user.trim().is_empty() || pass.is_empty() {
            error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        error_msg.set(None);

        let api = api.clone();
        // 登录成功后页面随即卸载，会话更新仍在任务内完成
        spawn_scoped(async move { login(&auth, &api, user.trim().to_string(), pass).await }, move |result| {
            if let Err(e) = result {
                log_warn!("[Login] Failed: {}", e);
                error_msg.set(Some(e.user_message()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Welcome Back!" subtitle="Sign in to continue your health journey">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error_msg />

                <label class="form-control">
                    <span class="label-text mb-1">"Username"</span>
                    <input
                        type="text"
                        autocomplete="username"
                        class="input input-bordered"
                        prop:value=username
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        required
                    />
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        placeholder="••••••••"
                        class="input input-bordered"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        required
                    />
                </label>

                <div class="text-right">
                    <Link to="/forgot-password" class="link link-primary text-sm">"Forgot password?"</Link>
                </div>

                <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() {
                        view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                    } else {
                        "Sign In".into_any()
                    }}
                </button>

                <p class="text-center text-sm text-base-content/70 mt-2">
                    "Don't have an account? "
                    <Link to="/register" class="link link-primary">"Sign up here"</Link>
                </p>
            </form>
        </AuthCard>
    }
}
