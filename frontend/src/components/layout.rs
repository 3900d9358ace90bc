//! 页面外壳
//!
//! - `PublicLayout`: 顶部导航 + 页脚（公共页面）
//! - `AppShell`: 侧边栏 + 顶栏（登录后页面），导航项按角色过滤

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::cart::use_cart;
use crate::components::icons::*;
use crate::components::notification_bell::NotificationBell;
use crate::theme::use_theme;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use fitlife_shared::Role;
use leptos::prelude::*;

// =========================================================
// 导航表 (Navigation Table)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Profile,
    Calculator,
    Progress,
    Calendar,
    Store,
    Users,
    Stethoscope,
    Orders,
    Analytics,
    Reports,
    Bell,
    Feedback,
    Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
    pub roles: &'static [Role],
}

const EVERYONE: &[Role] = &Role::ALL;
const ADMIN: &[Role] = &[Role::Admin];
const CONSULTANT: &[Role] = &[Role::Consultant];

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Dashboard", path: "/dashboard", icon: NavIcon::Dashboard, roles: EVERYONE },
    NavItem { label: "Profile", path: "/profile", icon: NavIcon::Profile, roles: EVERYONE },
    NavItem { label: "Health Calculators", path: "/calculators", icon: NavIcon::Calculator, roles: EVERYONE },
    NavItem { label: "Progress Tracking", path: "/progress", icon: NavIcon::Progress, roles: EVERYONE },
    NavItem { label: "Consultations", path: "/consultations", icon: NavIcon::Calendar, roles: EVERYONE },
    NavItem { label: "Products", path: "/products", icon: NavIcon::Store, roles: EVERYONE },
    NavItem { label: "My Orders", path: "/orders", icon: NavIcon::Orders, roles: EVERYONE },
    NavItem { label: "Admin Dashboard", path: "/admin", icon: NavIcon::Dashboard, roles: ADMIN },
    NavItem { label: "User Management", path: "/admin/users", icon: NavIcon::Users, roles: ADMIN },
    NavItem { label: "Consultant Management", path: "/admin/consultants", icon: NavIcon::Stethoscope, roles: ADMIN },
    NavItem { label: "Product Management", path: "/admin/products", icon: NavIcon::Store, roles: ADMIN },
    NavItem { label: "Order Management", path: "/admin/orders", icon: NavIcon::Orders, roles: ADMIN },
    NavItem { label: "Consultation Management", path: "/admin/consultations", icon: NavIcon::Calendar, roles: ADMIN },
    NavItem { label: "Analytics", path: "/admin/analytics", icon: NavIcon::Analytics, roles: ADMIN },
    NavItem { label: "Reports", path: "/admin/reports", icon: NavIcon::Reports, roles: ADMIN },
    NavItem { label: "Notifications", path: "/admin/notifications", icon: NavIcon::Bell, roles: ADMIN },
    NavItem { label: "Feedback", path: "/admin/feedback", icon: NavIcon::Feedback, roles: ADMIN },
    NavItem { label: "Consultant Dashboard", path: "/consultant", icon: NavIcon::Dashboard, roles: CONSULTANT },
    NavItem { label: "My Clients", path: "/consultant/clients", icon: NavIcon::Users, roles: CONSULTANT },
    NavItem { label: "Appointments", path: "/consultant/appointments", icon: NavIcon::Calendar, roles: CONSULTANT },
    NavItem { label: "Availability", path: "/consultant/availability", icon: NavIcon::Clock, roles: CONSULTANT },
];

/// 某角色可见的导航项（保持表内顺序）
pub fn nav_items_for(role: Role) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| item.roles.contains(&role))
        .copied()
        .collect()
}

fn nav_icon(icon: NavIcon) -> AnyView {
    let class = "h-5 w-5";
    match icon {
        NavIcon::Dashboard => view! { <LayoutDashboard attr:class=class /> }.into_any(),
        NavIcon::Profile => view! { <UserIcon attr:class=class /> }.into_any(),
        NavIcon::Calculator => view! { <Calculator attr:class=class /> }.into_any(),
        NavIcon::Progress => view! { <TrendingUp attr:class=class /> }.into_any(),
        NavIcon::Calendar => view! { <Calendar attr:class=class /> }.into_any(),
        NavIcon::Store => view! { <Package attr:class=class /> }.into_any(),
        NavIcon::Users => view! { <Users attr:class=class /> }.into_any(),
        NavIcon::Stethoscope => view! { <Stethoscope attr:class=class /> }.into_any(),
        NavIcon::Orders => view! { <ClipboardList attr:class=class /> }.into_any(),
        NavIcon::Analytics => view! { <BarChart attr:class=class /> }.into_any(),
        NavIcon::Reports => view! { <FileText attr:class=class /> }.into_any(),
        NavIcon::Bell => view! { <Bell attr:class=class /> }.into_any(),
        NavIcon::Feedback => view! { <MessageSquare attr:class=class /> }.into_any(),
        NavIcon::Clock => view! { <Clock attr:class=class /> }.into_any(),
    }
}

// =========================================================
// 公共外壳 (Public Layout)
// =========================================================

#[component]
fn CartButton() -> impl IntoView {
    let count = use_cart().item_count();
    view! {
        <Link to="/cart" class="btn btn-ghost btn-circle">
            <div class="indicator">
                <ShoppingCart attr:class="h-5 w-5" />
                <Show when=move || { count.get() > 0 }>
                    <span class="badge badge-sm badge-primary indicator-item">{move || count.get()}</span>
                </Show>
            </div>
        </Link>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let user = auth.user();

    let on_logout = move |_| {
        router.go(AppRoute::Home);
        logout(&auth, &api);
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm sticky top-0 z-40">
            <div class="flex-1 gap-2">
                <Link to="/" class="btn btn-ghost text-xl gap-2">
                    <Heart attr:class="h-6 w-6 text-primary" />
                    "FitLife360"
                </Link>
                <div class="hidden md:flex gap-1">
                    <Link to="/products" class="btn btn-ghost btn-sm">"Products"</Link>
                    <Link to="/consultants" class="btn btn-ghost btn-sm">"Consultants"</Link>
                </div>
            </div>
            <div class="flex-none gap-2">
                <CartButton />
                {move || match user.get() {
                    Some(user) => {
                        let home = user.role.home_path();
                        view! {
                            <Link to=home class="btn btn-ghost btn-sm">"Dashboard"</Link>
                            <div class="avatar placeholder">
                                <div class="bg-primary text-primary-content rounded-full w-9">
                                    <span class="text-sm">{user.initials()}</span>
                                </div>
                            </div>
                            <button class="btn btn-ghost btn-sm" on:click=on_logout.clone()>
                                <LogOut attr:class="h-4 w-4" />
                            </button>
                        }
                        .into_any()
                    }
                    None => view! {
                        <Link to="/login" class="btn btn-ghost btn-sm">"Login"</Link>
                        <Link to="/register" class="btn btn-primary btn-sm">"Register"</Link>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-neutral text-neutral-content mt-auto">
            <div class="footer max-w-7xl mx-auto p-10">
                <aside>
                    <h3 class="text-lg font-bold">"FitLife360"</h3>
                    <p class="max-w-xs text-sm opacity-80">
                        "Your comprehensive weight management platform connecting you with certified experts and providing personalized health solutions."
                    </p>
                </aside>
                <nav>
                    <h6 class="footer-title">"Quick Links"</h6>
                    <Link to="/products" class="link link-hover">"Products"</Link>
                    <Link to="/consultants" class="link link-hover">"Consultants"</Link>
                    <Link to="/calculators" class="link link-hover">"Health Calculators"</Link>
                    <Link to="/progress" class="link link-hover">"Progress Tracking"</Link>
                </nav>
                <nav>
                    <h6 class="footer-title">"Services"</h6>
                    <span>"Personalized Consultations"</span>
                    <span>"Health Monitoring Tools"</span>
                    <span>"Progress Tracking"</span>
                    <span>"E-commerce Platform"</span>
                </nav>
                <nav>
                    <h6 class="footer-title">"Contact"</h6>
                    <span>"support@fitlife360.com"</span>
                    <span>"+1 (555) 123-4567"</span>
                </nav>
            </div>
            <div class="text-center text-sm opacity-70 pb-6">
                "© 2024 FitLife360. All rights reserved."
            </div>
        </footer>
    }
}

#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <Navbar />
            <main class="flex-1">{children()}</main>
            <Footer />
        </div>
    }
}

// =========================================================
// 应用外壳 (App Shell)
// =========================================================

#[component]
fn Sidebar(#[prop(into)] on_navigate: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let theme = use_theme();
    let current = router.current_route();

    let items = move || {
        auth.state
            .with(|s| s.role())
            .map(nav_items_for)
            .unwrap_or_default()
    };

    view! {
        <aside class="min-h-full w-72 bg-base-100 border-r border-base-300 flex flex-col">
            <div class="p-6 text-center border-b border-base-300">
                <div class="w-14 h-14 mx-auto rounded-full bg-gradient-to-br from-primary to-secondary text-primary-content flex items-center justify-center text-xl font-bold">
                    "FL"
                </div>
                <h2 class="mt-3 font-bold text-lg">"FitLife360"</h2>
                <p class="text-xs text-base-content/60">{move || theme.palette.get().portal_label()}</p>
            </div>
            <ul class="menu p-4 gap-1 flex-1">
                <For
                    each=items
                    key=|item| item.path
                    children=move |item: NavItem| {
                        let active = move || current.get().to_path() == item.path;
                        view! {
                            <li on:click=move |_| on_navigate.run(())>
                                <Link to=item.path class="">
                                    <span class={move || if active() { "flex items-center gap-3 text-primary font-semibold" } else { "flex items-center gap-3" }}>
                                        {nav_icon(item.icon)}
                                        {item.label}
                                    </span>
                                </Link>
                            </li>
                        }
                    }
                />
            </ul>
        </aside>
    }
}

#[component]
fn UserMenu() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let user = auth.user();

    let on_logout = move |_| {
        router.go(AppRoute::Home);
        logout(&auth, &api);
    };

    view! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                <div class="avatar placeholder">
                    <div class="bg-primary text-primary-content rounded-full w-8">
                        <span class="text-xs">{move || user.get().map(|u| u.initials()).unwrap_or_default()}</span>
                    </div>
                </div>
                <span class="hidden md:inline">{move || user.get().map(|u| u.display_name()).unwrap_or_default()}</span>
                <span class="badge badge-outline badge-sm hidden md:inline-flex">
                    {move || user.get().map(|u| u.role.label()).unwrap_or_default()}
                </span>
            </div>
            <ul tabindex="0" class="dropdown-content menu bg-base-100 rounded-box z-50 w-52 p-2 shadow-lg">
                <li><Link to="/profile">"Profile"</Link></li>
                <li><Link to="/orders">"My Orders"</Link></li>
                <li>
                    <button class="text-error" on:click=on_logout>
                        <LogOut attr:class="h-4 w-4" />
                        "Logout"
                    </button>
                </li>
            </ul>
        </div>
    }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let (drawer_open, set_drawer_open) = signal(false);
    let title = move || router.current_route().get().title();
    let shows_cart = move || auth.state.with(|s| s.role()) == Some(Role::User);

    view! {
        <div class="drawer lg:drawer-open">
            <input
                id="app-drawer"
                type="checkbox"
                class="drawer-toggle"
                prop:checked=drawer_open
                on:change=move |ev| set_drawer_open.set(event_target_checked(&ev))
            />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow-sm sticky top-0 z-30">
                    <div class="flex-none lg:hidden">
                        <label for="app-drawer" class="btn btn-square btn-ghost">
                            <Menu attr:class="h-5 w-5" />
                        </label>
                    </div>
                    <div class="flex-1 px-2">
                        <h1 class="text-lg font-semibold">{title}</h1>
                    </div>
                    <div class="flex-none gap-1">
                        <Show when=shows_cart>
                            <CartButton />
                        </Show>
                        <NotificationBell />
                        <UserMenu />
                    </div>
                </div>
                <main class="flex-1 p-4 md:p-8">
                    <div class="max-w-7xl mx-auto">{children()}</div>
                </main>
            </div>
            <div class="drawer-side z-40">
                <label for="app-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <Sidebar on_navigate=move |_| set_drawer_open.set(false) />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(role: Role) -> Vec<&'static str> {
        nav_items_for(role).iter().map(|i| i.path).collect()
    }

    #[test]
    fn user_sees_only_member_pages() {
        let user = paths(Role::User);
        assert_eq!(user.len(), 7);
        assert_eq!(user[0], "/dashboard");
        assert!(!user.iter().any(|p| p.starts_with("/admin") || p.starts_with("/consultant")));
    }

    #[test]
    fn admin_and_consultant_get_their_sections() {
        let admin = paths(Role::Admin);
        assert!(admin.contains(&"/admin/reports"));
        assert!(admin.contains(&"/admin/feedback"));
        assert!(!admin.contains(&"/consultant/clients"));

        let consultant = paths(Role::Consultant);
        assert!(consultant.contains(&"/consultant/availability"));
        assert!(!consultant.contains(&"/admin"));
    }

    #[test]
    fn every_nav_path_is_a_known_route() {
        for item in NAV_ITEMS {
            assert_ne!(AppRoute::from_path(item.path), AppRoute::NotFound, "{}", item.path);
            for role in item.roles {
                assert_eq!(
                    crate::web::route::guard(
                        &AppRoute::from_path(item.path),
                        crate::web::route::Viewer::Member(*role)
                    ),
                    crate::web::route::Guard::Allow
                );
            }
        }
    }
}
