use crate::date::Timestamp;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// 商城商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub nutritional_info: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    pub fn stock_label(&self) -> String {
        match self.stock_quantity {
            0 => "Out of stock".to_string(),
            n if n < 10 => format!("Only {n} left"),
            n => format!("{n} in stock"),
        }
    }
}

/// 管理员创建 / 更新商品的表单
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductInput {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            stock_quantity: product.stock_quantity,
            image_url: product.image_url.clone(),
            ingredients: product.ingredients.clone(),
            nutritional_info: product.nutritional_info.clone(),
            is_active: Some(product.is_active),
        }
    }
}

/// 商品评价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReview {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub user: Option<User>,
}

impl ProductReview {
    pub fn author(&self) -> String {
        self.user
            .as_ref()
            .map(User::display_name)
            .unwrap_or_else(|| format!("User #{}", self.user_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub product_id: i64,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

/// 评分过滤（反馈管理页）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    /// 4 星及以上
    High,
    /// 2 星及以下
    Low,
}

impl RatingFilter {
    pub fn matches(&self, rating: u8) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::High => rating >= 4,
            RatingFilter::Low => rating <= 2,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "high" => RatingFilter::High,
            "low" => RatingFilter::Low,
            _ => RatingFilter::All,
        }
    }
}

/// 星级显示，如 `★★★☆☆`
pub fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_product(id: i64, price: f64) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Product {id}"),
            "category": "supplements",
            "price": price,
            "stock_quantity": 20
        }))
        .unwrap()
    }

    #[test]
    fn product_defaults_optional_fields() {
        let p = sample_product(1, 9.5);
        assert!(p.is_active);
        assert_eq!(p.total_reviews, 0);
        assert!(p.in_stock());
        assert_eq!(p.stock_label(), "20 in stock");
    }

    #[test]
    fn rating_filter_bounds() {
        assert!(RatingFilter::High.matches(4));
        assert!(!RatingFilter::High.matches(3));
        assert!(RatingFilter::Low.matches(2));
        assert!(!RatingFilter::Low.matches(3));
        assert!(RatingFilter::parse("other").matches(3));
    }

    #[test]
    fn star_rendering() {
        assert_eq!(stars(4.4), "★★★★☆");
        assert_eq!(stars(7.0), "★★★★★");
    }
}
