//! 认证相关页面：登录、注册、找回与重置密码

mod forgot_password;
mod login;
mod register;
mod reset_password;

pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use reset_password::ResetPasswordPage;

use leptos::prelude::*;

/// 居中的认证卡片
#[component]
fn AuthCard(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-[80vh] flex items-center justify-center bg-gradient-to-br from-primary/20 to-secondary/20 px-4 py-12">
            <div class=format!("card w-full max-w-md bg-base-100 shadow-2xl {class}")>
                <div class="card-body">
                    <div class="text-center mb-4">
                        <div class="w-16 h-16 mx-auto mb-3 rounded-full bg-primary text-primary-content flex items-center justify-center text-2xl font-bold">
                            "FL"
                        </div>
                        <h1 class="text-3xl font-bold">{title}</h1>
                        <p class="text-base-content/70 mt-1">{subtitle}</p>
                    </div>
                    {children()}
                </div>
            </div>
        </div>
    }
}
