use crate::Tone;
use crate::catalog::Product;
use crate::date::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// 订单状态
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn tone(&self) -> Tone {
        match self {
            OrderStatus::Pending => Tone::Warning,
            OrderStatus::Confirmed => Tone::Info,
            OrderStatus::Shipped => Tone::Info,
            OrderStatus::Delivered => Tone::Success,
            OrderStatus::Cancelled => Tone::Error,
        }
    }

    /// 用户只能取消尚未发货的订单
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            PaymentStatus::Pending => Tone::Warning,
            PaymentStatus::Completed => Tone::Success,
            PaymentStatus::Failed => Tone::Error,
            PaymentStatus::Refunded => Tone::Neutral,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 订单
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default)]
    pub product: Option<Product>,
}

impl OrderItem {
    pub fn product_name(&self) -> String {
        self.product
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Product #{}", self.product_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub order_number: String,
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.order_items.iter().map(|item| item.quantity).sum()
    }

    pub fn awaiting_payment(&self) -> bool {
        self.payment_status == PaymentStatus::Pending && self.status != OrderStatus::Cancelled
    }
}

// =========================================================
// 下单与支付载荷
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderLine>,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 结账页可选的支付方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Razorpay,
    Card,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Razorpay,
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Razorpay => "razorpay",
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Razorpay => "Razorpay (Credit/Debit Card, UPI, Net Banking)",
            PaymentMethod::Card => "Credit/Debit Card (Simulated)",
            PaymentMethod::Paypal => "PayPal (Simulated)",
            PaymentMethod::BankTransfer => "Bank Transfer (Simulated)",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .unwrap_or_default()
    }

    pub fn uses_widget(&self) -> bool {
        matches!(self, PaymentMethod::Razorpay)
    }
}

/// `/api/orders/{id}/create-payment` 的返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub order_id: String,
    /// 最小货币单位（派士）
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(default)]
    pub key_id: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

/// 非组件支付方式使用的模拟支付号
pub fn simulated_payment_id(now_millis: i64) -> String {
    format!("sim_{now_millis}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_parses_backend_payload() {
        let order: Order = serde_json::from_value(json!({
            "id": 3,
            "user_id": 1,
            "order_number": "ORD-0003",
            "total_amount": 35.0,
            "status": "shipped",
            "payment_status": "completed",
            "created_at": "2024-02-02T10:00:00.5",
            "order_items": [
                { "id": 1, "product_id": 10, "quantity": 2, "unit_price": 10.0, "total_price": 20.0 },
                { "id": 2, "product_id": 5, "quantity": 3, "unit_price": 5.0, "total_price": 15.0 }
            ]
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.item_count(), 5);
        assert!(!order.awaiting_payment());
        assert_eq!(order.order_items[0].product_name(), "Product #10");
    }

    #[test]
    fn status_parse_and_cancel_rule() {
        assert_eq!(OrderStatus::parse("delivered"), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::parse("lost"), None);
        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
    }

    #[test]
    fn payment_method_round_trip_and_default() {
        assert_eq!(PaymentMethod::parse("paypal"), PaymentMethod::Paypal);
        assert_eq!(PaymentMethod::parse("bitcoin"), PaymentMethod::Razorpay);
        assert!(!PaymentMethod::BankTransfer.uses_widget());
        assert_eq!(simulated_payment_id(42), "sim_42");
    }
}
