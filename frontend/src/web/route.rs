//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、访问级别、布局，以及唯一的守卫函数 `guard`。

use fitlife_shared::Role;
use std::fmt::Display;

pub use fitlife_shared::Viewer;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    /// `next`: 登录后返回的路径
    Login { next: Option<String> },
    Register,
    ForgotPassword,
    ResetPassword { token: Option<String> },

    Dashboard,
    Profile,
    Calculators,
    Progress,
    Products,
    ProductDetail(i64),
    Cart,
    Checkout,
    Orders,
    Consultants,
    Consultations,

    ConsultantDashboard,
    ConsultantClients,
    ConsultantAppointments,
    ConsultantAvailability,

    AdminDashboard,
    AdminUsers,
    AdminConsultants,
    AdminProducts,
    AdminOrders,
    AdminConsultations,
    AdminAnalytics,
    AdminReports,
    AdminNotifications,
    AdminFeedback,

    NotFound,
}

/// 路由访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// 仅未登录访问（登录、注册）
    GuestOnly,
    /// 任意已登录用户
    Member,
    Role(Role),
}

/// 页面外壳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 顶部导航 + 页脚
    Public,
    /// 侧边栏 + 顶栏
    Shell,
}

/// 守卫结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Allow,
    /// 会话恢复中
    Wait,
    Redirect(AppRoute),
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| urlencoding::decode(v).ok())
        .map(|v| v.into_owned())
        .filter(|v| !v.is_empty())
}

impl AppRoute {
    /// 将 URL（path 与可选的 `?query`）解析为路由枚举
    pub fn from_path(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match path {
            "/" => Self::Home,
            "/login" => Self::Login {
                next: query_param(query, "next"),
            },
            "/register" => Self::Register,
            "/forgot-password" => Self::ForgotPassword,
            "/reset-password" => Self::ResetPassword {
                token: query_param(query, "token"),
            },
            "/dashboard" => Self::Dashboard,
            "/profile" => Self::Profile,
            "/calculators" => Self::Calculators,
            "/progress" => Self::Progress,
            "/products" => Self::Products,
            "/cart" => Self::Cart,
            "/checkout" => Self::Checkout,
            "/orders" => Self::Orders,
            "/consultants" => Self::Consultants,
            "/consultations" => Self::Consultations,
            "/consultant" => Self::ConsultantDashboard,
            "/consultant/clients" => Self::ConsultantClients,
            "/consultant/appointments" => Self::ConsultantAppointments,
            "/consultant/availability" => Self::ConsultantAvailability,
            "/admin" => Self::AdminDashboard,
            "/admin/users" => Self::AdminUsers,
            "/admin/consultants" => Self::AdminConsultants,
            "/admin/products" => Self::AdminProducts,
            "/admin/orders" => Self::AdminOrders,
            "/admin/consultations" => Self::AdminConsultations,
            "/admin/analytics" => Self::AdminAnalytics,
            "/admin/reports" => Self::AdminReports,
            "/admin/notifications" => Self::AdminNotifications,
            "/admin/feedback" => Self::AdminFeedback,
            other => other
                .strip_prefix("/products/")
                .and_then(|id| id.parse::<i64>().ok())
                .map(Self::ProductDetail)
                .unwrap_or(Self::NotFound),
        }
    }

    /// 获取路由对应的 URL（含查询串）
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Login { next: None } => "/login".into(),
            Self::Login { next: Some(next) } => {
                format!("/login?next={}", urlencoding::encode(next))
            }
            Self::Register => "/register".into(),
            Self::ForgotPassword => "/forgot-password".into(),
            Self::ResetPassword { token: None } => "/reset-password".into(),
            Self::ResetPassword { token: Some(token) } => {
                format!("/reset-password?token={}", urlencoding::encode(token))
            }
            Self::Dashboard => "/dashboard".into(),
            Self::Profile => "/profile".into(),
            Self::Calculators => "/calculators".into(),
            Self::Progress => "/progress".into(),
            Self::Products => "/products".into(),
            Self::ProductDetail(id) => format!("/products/{id}"),
            Self::Cart => "/cart".into(),
            Self::Checkout => "/checkout".into(),
            Self::Orders => "/orders".into(),
            Self::Consultants => "/consultants".into(),
            Self::Consultations => "/consultations".into(),
            Self::ConsultantDashboard => "/consultant".into(),
            Self::ConsultantClients => "/consultant/clients".into(),
            Self::ConsultantAppointments => "/consultant/appointments".into(),
            Self::ConsultantAvailability => "/consultant/availability".into(),
            Self::AdminDashboard => "/admin".into(),
            Self::AdminUsers => "/admin/users".into(),
            Self::AdminConsultants => "/admin/consultants".into(),
            Self::AdminProducts => "/admin/products".into(),
            Self::AdminOrders => "/admin/orders".into(),
            Self::AdminConsultations => "/admin/consultations".into(),
            Self::AdminAnalytics => "/admin/analytics".into(),
            Self::AdminReports => "/admin/reports".into(),
            Self::AdminNotifications => "/admin/notifications".into(),
            Self::AdminFeedback => "/admin/feedback".into(),
            Self::NotFound => "/404".into(),
        }
    }

    /// 各角色登录后的落地页
    pub fn home_for(role: Role) -> Self {
        Self::from_path(role.home_path())
    }

    /// **核心守卫配置：该路由的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::Home
            | Self::Products
            | Self::ProductDetail(_)
            | Self::Consultants
            | Self::ForgotPassword
            | Self::ResetPassword { .. }
            | Self::NotFound => Access::Public,
            Self::Login { .. } | Self::Register => Access::GuestOnly,
            Self::ConsultantDashboard
            | Self::ConsultantClients
            | Self::ConsultantAppointments
            | Self::ConsultantAvailability => Access::Role(Role::Consultant),
            Self::AdminDashboard
            | Self::AdminUsers
            | Self::AdminConsultants
            | Self::AdminProducts
            | Self::AdminOrders
            | Self::AdminConsultations
            | Self::AdminAnalytics
            | Self::AdminReports
            | Self::AdminNotifications
            | Self::AdminFeedback => Access::Role(Role::Admin),
            _ => Access::Member,
        }
    }

    pub fn layout(&self) -> Layout {
        match self.access() {
            Access::Member | Access::Role(_) => Layout::Shell,
            Access::Public | Access::GuestOnly => Layout::Public,
        }
    }

    /// 顶栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Profile => "Profile",
            Self::Calculators => "Health Calculators",
            Self::Progress => "Progress Tracking",
            Self::Consultations => "Consultations",
            Self::Cart => "Shopping Cart",
            Self::Checkout => "Checkout",
            Self::Orders => "My Orders",
            Self::ConsultantDashboard => "Consultant Dashboard",
            Self::ConsultantClients => "My Clients",
            Self::ConsultantAppointments => "Appointments",
            Self::ConsultantAvailability => "Availability",
            Self::AdminDashboard => "Admin Dashboard",
            _ if matches!(self.access(), Access::Role(Role::Admin)) => "Admin Panel",
            _ => "FitLife360",
        }
    }
}

/// 唯一的访问守卫：根据访问者决定放行、等待或重定向
pub fn guard(route: &AppRoute, viewer: Viewer) -> Guard {
    match (route.access(), viewer) {
        (Access::Public, _) => Guard::Allow,

        (Access::GuestOnly, Viewer::Guest) => Guard::Allow,
        (Access::GuestOnly, Viewer::Loading) => Guard::Wait,
        (Access::GuestOnly, Viewer::Member(role)) => {
            // 登录页携带的 next 仅在该角色可访问时采用
            let next = match route {
                AppRoute::Login { next: Some(next) } => Some(AppRoute::from_path(next)),
                _ => None,
            };
            match next {
                Some(target) if guard(&target, viewer) == Guard::Allow => Guard::Redirect(target),
                _ => Guard::Redirect(AppRoute::home_for(role)),
            }
        }

        (Access::Member | Access::Role(_), Viewer::Loading) => Guard::Wait,
        (Access::Member | Access::Role(_), Viewer::Guest) => Guard::Redirect(AppRoute::Login {
            next: Some(route.to_path()),
        }),
        (Access::Member, Viewer::Member(_)) => Guard::Allow,
        (Access::Role(required), Viewer::Member(role)) if required == role => Guard::Allow,
        (Access::Role(_), Viewer::Member(role)) => Guard::Redirect(AppRoute::home_for(role)),
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths_and_parameters() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/orders/"), AppRoute::Orders);
        assert_eq!(AppRoute::from_path("/products/42"), AppRoute::ProductDetail(42));
        assert_eq!(AppRoute::from_path("/products/abc"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/login?next=%2Fcheckout"),
            AppRoute::Login {
                next: Some("/checkout".into())
            }
        );
        assert_eq!(
            AppRoute::from_path("/reset-password?token=abc123"),
            AppRoute::ResetPassword {
                token: Some("abc123".into())
            }
        );
        assert_eq!(AppRoute::from_path("/admin/settings"), AppRoute::NotFound);
    }

    #[test]
    fn paths_survive_formatting() {
        let routes = [
            AppRoute::Login {
                next: Some("/admin/users".into()),
            },
            AppRoute::ProductDetail(7),
            AppRoute::ConsultantAvailability,
            AppRoute::AdminFeedback,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn authenticated_user_leaves_login_for_role_home() {
        let login = AppRoute::Login { next: None };
        assert_eq!(
            guard(&login, Viewer::Member(Role::Admin)),
            Guard::Redirect(AppRoute::AdminDashboard)
        );
        assert_eq!(
            guard(&login, Viewer::Member(Role::Consultant)),
            Guard::Redirect(AppRoute::ConsultantDashboard)
        );
        assert_eq!(
            guard(&login, Viewer::Member(Role::User)),
            Guard::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn protected_route_sends_guest_to_login_with_next() {
        assert_eq!(
            guard(&AppRoute::Orders, Viewer::Guest),
            Guard::Redirect(AppRoute::Login {
                next: Some("/orders".into())
            })
        );
        assert_eq!(guard(&AppRoute::Orders, Viewer::Loading), Guard::Wait);
        assert_eq!(guard(&AppRoute::Products, Viewer::Guest), Guard::Allow);
    }

    #[test]
    fn login_honours_next_when_permitted() {
        let login = AppRoute::Login {
            next: Some("/checkout".into()),
        };
        assert_eq!(
            guard(&login, Viewer::Member(Role::User)),
            Guard::Redirect(AppRoute::Checkout)
        );

        // 普通用户不能被带到管理页
        let login = AppRoute::Login {
            next: Some("/admin/users".into()),
        };
        assert_eq!(
            guard(&login, Viewer::Member(Role::User)),
            Guard::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn wrong_role_goes_to_own_home() {
        assert_eq!(
            guard(&AppRoute::AdminUsers, Viewer::Member(Role::Consultant)),
            Guard::Redirect(AppRoute::ConsultantDashboard)
        );
        assert_eq!(
            guard(&AppRoute::ConsultantClients, Viewer::Member(Role::Consultant)),
            Guard::Allow
        );
        assert_eq!(guard(&AppRoute::Dashboard, Viewer::Member(Role::Admin)), Guard::Allow);
    }

    #[test]
    fn layout_follows_access() {
        assert_eq!(AppRoute::Products.layout(), Layout::Public);
        assert_eq!(AppRoute::Checkout.layout(), Layout::Shell);
        assert_eq!(AppRoute::AdminReports.layout(), Layout::Shell);
        assert_eq!(AppRoute::AdminReports.title(), "Admin Panel");
    }
}
