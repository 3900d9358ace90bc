//! FitLife360 共享领域层
//!
//! 不依赖浏览器 API 的纯逻辑，前端与主机端测试共用：
//! - 领域模型：用户、顾问、商品、订单、咨询、通知、管理统计
//! - `protocol`: 后端 REST 端点目录（请求类型 ↔ 响应类型）
//! - `session` / `cart` / `notification`: 客户端状态存储
//! - `health` / `csv` / `listing` / `date` / `cache`: 展示层计算

use serde::{Deserialize, Serialize};

pub mod admin;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod consultation;
pub mod csv;
pub mod date;
pub mod error;
pub mod health;
pub mod listing;
pub mod notification;
pub mod order;
pub mod protocol;
pub mod session;
pub mod user;

pub use admin::{AdminDashboardStats, Analytics, ConsultantDashboard};
pub use cart::{CartItem, CartStore, format_amount};
pub use catalog::{Product, ProductReview};
pub use consultation::{AvailabilitySlot, Consultant, Consultation, ConsultationStatus};
pub use date::Timestamp;
pub use error::{ApiError, ApiResult};
pub use health::BmiCategory;
pub use notification::{Notification, NotificationInbox};
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use session::{SessionState, Viewer};
pub use user::{Role, User};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const STORAGE_TOKEN_KEY: &str = "fitlife_token";
pub const STORAGE_CART_KEY: &str = "fitlife_cart";
pub const DEFAULT_PAGE_SIZE: usize = 12;

// =========================================================
// 展示色调 (Display Tone)
// =========================================================

/// 徽章/提示框的语义色调，对应 daisyUI 的颜色修饰类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
    #[default]
    Neutral,
}

impl Tone {
    pub fn badge_class(&self) -> &'static str {
        match self {
            Tone::Success => "badge badge-success",
            Tone::Warning => "badge badge-warning",
            Tone::Error => "badge badge-error",
            Tone::Info => "badge badge-info",
            Tone::Neutral => "badge badge-ghost",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            Tone::Success => "text-success",
            Tone::Warning => "text-warning",
            Tone::Error => "text-error",
            Tone::Info => "text-info",
            Tone::Neutral => "text-base-content",
        }
    }
}

/// 通用状态字符串到色调的映射（报表、列表中的状态徽章）
pub fn status_tone(status: &str) -> Tone {
    match status {
        "active" | "completed" | "confirmed" | "delivered" => Tone::Success,
        "pending" | "scheduled" | "rescheduled" => Tone::Warning,
        "shipped" => Tone::Info,
        "cancelled" | "inactive" | "failed" => Tone::Error,
        _ => Tone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tone_covers_report_statuses() {
        assert_eq!(status_tone("active"), Tone::Success);
        assert_eq!(status_tone("pending"), Tone::Warning);
        assert_eq!(status_tone("cancelled"), Tone::Error);
        assert_eq!(status_tone("whatever"), Tone::Neutral);
    }
}
