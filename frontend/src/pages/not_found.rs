use crate::auth::use_auth;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let auth = use_auth();
    // 已登录用户回到各自角色的首页
    let home = move || {
        auth.state
            .with(|s| s.role())
            .map(|role| role.home_path())
            .unwrap_or("/")
    };

    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-primary">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <p class="text-base-content/60 mt-2">"The page you are looking for does not exist or has been moved."</p>
                {move || view! { <Link to=home() class="btn btn-primary mt-6">"Go Home"</Link> }}
            </div>
        </div>
    }
}
