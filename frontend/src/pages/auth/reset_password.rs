use super::AuthCard;
use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::components::icons::{Check, X};
use crate::pages::submit;
use crate::web::router::{Link, use_router};
use fitlife_shared::protocol::ResetPassword;
use fitlife_shared::user::PasswordStrength;
use leptos::prelude::*;

/// 重置密码；缺少令牌时回到找回密码页
#[component]
pub fn ResetPasswordPage(token: Option<String>) -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let Some(token) = token else {
        log_warn!("[ResetPassword] Missing token, redirecting");
        router.navigate("/forgot-password");
        return ().into_any();
    };

    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (done, set_done) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    let strength = Memo::new(move |_| password.with(|p| PasswordStrength::check(p)));
    let matches = move || password.with(|p| confirm.with(|c| !c.is_empty() && p == c));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !strength.get_untracked().is_valid() {
            error_msg.set(Some(
                "Password must be at least 8 characters long and contain uppercase, lowercase, and numbers."
                    .to_string(),
            ));
            return;
        }
        if password.get_untracked() != confirm.get_untracked() {
            error_msg.set(Some("Passwords do not match.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        let req = ResetPassword {
            token: token.clone(),
            new_password: password.get_untracked(),
        };
        submit(&api, req, error_msg, move |_| set_done.set(true));
    };

    Effect::new(move |_| {
        if error_msg.get().is_some() || done.get() {
            set_is_submitting.set(false);
        }
    });

    view! {
        <Show
            when=move || done.get()
            fallback=move || {
                let on_submit = on_submit.clone();
                view! {
                    <AuthCard title="Reset Password" subtitle="Choose a new password for your account">
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <ErrorAlert message=error_msg />
                            <label class="form-control">
                                <span class="label-text mb-1">"New Password"</span>
                                <input
                                    type="password"
                                    autocomplete="new-password"
                                    class="input input-bordered"
                                    prop:value=password
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    required
                                />
                            </label>
                            <ul class="text-sm grid grid-cols-2 gap-1">
                                {move || {
                                    strength
                                        .get()
                                        .rules()
                                        .into_iter()
                                        .map(|(rule, ok)| {
                                            let class = if ok { "flex gap-1 items-center text-success" } else { "flex gap-1 items-center text-base-content/50" };
                                            view! {
                                                <li class=class>
                                                    {if ok {
                                                        view! { <Check attr:class="h-3 w-3" /> }.into_any()
                                                    } else {
                                                        view! { <X attr:class="h-3 w-3" /> }.into_any()
                                                    }}
                                                    {rule}
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </ul>
                            <label class="form-control">
                                <span class="label-text mb-1">"Confirm New Password"</span>
                                <input
                                    type="password"
                                    autocomplete="new-password"
                                    class="input input-bordered"
                                    class:input-error=move || !confirm.get().is_empty() && !matches()
                                    prop:value=confirm
                                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                    required
                                />
                            </label>
                            <button
                                class="btn btn-primary mt-2"
                                disabled=move || is_submitting.get() || !strength.get().is_valid() || !matches()
                            >
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Resetting..." }.into_any()
                                } else {
                                    "Reset Password".into_any()
                                }}
                            </button>
                        </form>
                    </AuthCard>
                }
            }
        >
            <AuthCard title="Password Reset Successful" subtitle="You can now sign in with your new password.">
                <Link to="/login" class="btn btn-primary">"Go to Login"</Link>
            </AuthCard>
        </Show>
    }
    .into_any()
}
