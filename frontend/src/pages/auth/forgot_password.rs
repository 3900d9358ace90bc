use super::AuthCard;
use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::components::icons::{ArrowLeft, Mail};
use crate::pages::submit;
use crate::web::router::Link;
use fitlife_shared::protocol::ForgotPassword;
use leptos::prelude::*;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = use_api();
    let (email, set_email) = signal(String::new());
    let (sent, set_sent) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    Effect::new(move |_| {
        if error_msg.get().is_some() {
            set_is_submitting.set(false);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked().trim().to_string();
        if address.is_empty() {
            return;
        }
        set_is_submitting.set(true);
        submit(&api, ForgotPassword { email: address }, error_msg, move |_| {
            set_is_submitting.set(false);
            set_sent.set(true);
        });
    };

    view! {
        <Show
            when=move || sent.get()
            fallback=move || {
                let on_submit = on_submit.clone();
                view! {
                    <AuthCard
                        title="Forgot Password?"
                        subtitle="No worries! Enter your email address and we'll send you a link to reset your password."
                    >
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <ErrorAlert message=error_msg />
                            <label class="form-control">
                                <span class="label-text mb-1">"Email Address"</span>
                                <input
                                    type="email"
                                    autocomplete="email"
                                    class="input input-bordered"
                                    prop:value=email
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    required
                                />
                            </label>
                            <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                                } else {
                                    "Send Reset Link".into_any()
                                }}
                            </button>
                            <Link to="/login" class="btn btn-ghost btn-sm gap-1">
                                <ArrowLeft attr:class="h-4 w-4" />
                                "Back to Login"
                            </Link>
                        </form>
                    </AuthCard>
                }
            }
        >
            <AuthCard title="Check Your Email" subtitle="">
                <div class="text-center flex flex-col items-center gap-3">
                    <Mail attr:class="h-14 w-14 text-success" />
                    <p>"We've sent a password reset link to " <strong>{move || email.get()}</strong></p>
                    <p class="text-sm text-base-content/70">
                        "Please check your email and click the link to reset your password. The link will expire in 1 hour."
                    </p>
                    <div class="flex gap-2 mt-2">
                        <Link to="/login" class="btn btn-outline">"Back to Login"</Link>
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| {
                                set_email.set(String::new());
                                set_sent.set(false);
                            }
                        >
                            "Try Different Email"
                        </button>
                    </div>
                </div>
            </AuthCard>
        </Show>
    }
}
