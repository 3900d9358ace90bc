//! FitLife360 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义、访问级别与守卫
//! - `web::router`: 路由服务（核心引擎）
//! - `api`: 类型化的 REST 客户端
//! - `auth` / `cart` / `theme`: 全局上下文
//! - `pages`: 按角色划分的页面
//! - `components`: 共享 UI 组件

#[macro_use]
mod logging;

mod api;
mod auth;
mod cart;
mod config;
mod payment;
mod serde_helper;
mod theme;

mod components {
    pub mod alert;
    pub mod card;
    pub mod form;
    pub mod icons;
    pub mod layout;
    pub mod modal;
    pub mod notification_bell;
    pub mod pagination;
    pub mod reveal;
    pub mod spinner;
}
mod pages;

// 原生 Web API 封装模块
pub(crate) mod web;

use crate::api::{FitLifeApi, provide_api};
use crate::auth::{AuthContext, init_auth};
use crate::cart::provide_cart;
use crate::components::layout::{AppShell, PublicLayout};
use crate::config::{RuntimeConfig, provide_config};
use crate::pages::admin::{
    AdminAnalyticsPage, AdminConsultantsPage, AdminConsultationsPage, AdminDashboardPage,
    AdminFeedbackPage, AdminNotificationsPage, AdminOrdersPage, AdminProductsPage,
    AdminReportsPage, AdminUsersPage,
};
use crate::pages::auth::{ForgotPasswordPage, LoginPage, RegisterPage, ResetPasswordPage};
use crate::pages::calculators::CalculatorsPage;
use crate::pages::cart::CartPage;
use crate::pages::checkout::CheckoutPage;
use crate::pages::consultant::{
    ConsultantAppointmentsPage, ConsultantAvailabilityPage, ConsultantClientsPage,
    ConsultantDashboardPage,
};
use crate::pages::consultants::ConsultantsPage;
use crate::pages::consultations::ConsultationsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::orders::OrdersPage;
use crate::pages::product_detail::ProductDetailPage;
use crate::pages::products::ProductsPage;
use crate::pages::profile::ProfilePage;
use crate::pages::progress::ProgressPage;
use crate::theme::provide_theme;

use leptos::prelude::*;

use web::route::{AppRoute, Layout};
use web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login { .. } => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword { token } => view! { <ResetPasswordPage token=token /> }.into_any(),

        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Calculators => view! { <CalculatorsPage /> }.into_any(),
        AppRoute::Progress => view! { <ProgressPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::ProductDetail(id) => view! { <ProductDetailPage id=id /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Checkout => view! { <CheckoutPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::Consultants => view! { <ConsultantsPage /> }.into_any(),
        AppRoute::Consultations => view! { <ConsultationsPage /> }.into_any(),

        AppRoute::ConsultantDashboard => view! { <ConsultantDashboardPage /> }.into_any(),
        AppRoute::ConsultantClients => view! { <ConsultantClientsPage /> }.into_any(),
        AppRoute::ConsultantAppointments => view! { <ConsultantAppointmentsPage /> }.into_any(),
        AppRoute::ConsultantAvailability => view! { <ConsultantAvailabilityPage /> }.into_any(),

        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::AdminUsers => view! { <AdminUsersPage /> }.into_any(),
        AppRoute::AdminConsultants => view! { <AdminConsultantsPage /> }.into_any(),
        AppRoute::AdminProducts => view! { <AdminProductsPage /> }.into_any(),
        AppRoute::AdminOrders => view! { <AdminOrdersPage /> }.into_any(),
        AppRoute::AdminConsultations => view! { <AdminConsultationsPage /> }.into_any(),
        AppRoute::AdminAnalytics => view! { <AdminAnalyticsPage /> }.into_any(),
        AppRoute::AdminReports => view! { <AdminReportsPage /> }.into_any(),
        AppRoute::AdminNotifications => view! { <AdminNotificationsPage /> }.into_any(),
        AppRoute::AdminFeedback => view! { <AdminFeedbackPage /> }.into_any(),

        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

/// 按当前路由选择页面外壳；外壳只在布局切换时重建
#[component]
fn LayoutSwitch() -> impl IntoView {
    let router = use_router();
    let layout = Memo::new(move |_| router.current_route().with(AppRoute::layout));

    move || match layout.get() {
        Layout::Public => view! {
            <PublicLayout>
                <RouterOutlet matcher=route_matcher />
            </PublicLayout>
        }
        .into_any(),
        Layout::Shell => view! {
            <AppShell>
                <RouterOutlet matcher=route_matcher />
            </AppShell>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 运行时配置与 API 客户端
    let config = RuntimeConfig::from_env();
    let api = FitLifeApi::browser(&config.api_base);
    provide_config(config);
    provide_api(api.clone());

    // 2. 认证上下文：恢复令牌并注册 401 回调
    let auth = AuthContext::new();
    provide_context(auth);
    init_auth(&auth, &api);

    // 3. 购物车与主题
    provide_cart();
    provide_theme(&auth);

    log_info!("[App] FitLife360 started");

    view! {
        // 4. 路由器组件：注入访问者信号实现守卫
        <Router viewer=auth.viewer_signal()>
            <LayoutSwitch />
        </Router>
    }
}
