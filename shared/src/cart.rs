//! 购物车存储
//!
//! 有序的 商品 id → 购物车行 映射，序列化为 JSON 数组保存在本地存储中。
//! 每行保存加入时的商品快照（名称、价格、图片），结账时只提交 id 与数量。

use crate::catalog::Product;
use crate::order::OrderLine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock_quantity: u32,
    pub quantity: u32,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            stock_quantity: product.stock_quantity,
            quantity,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入商品，已存在时累加数量
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem::from_product(product, quantity)),
        }
    }

    /// 设置数量；0 表示移除该行
    pub fn set_quantity(&mut self, id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, id: i64) {
        self.items.retain(|item| item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 商品件数（导航栏徽章）
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn formatted_total(&self) -> String {
        format_amount(self.total())
    }

    pub fn to_order_items(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|item| OrderLine {
                product_id: item.id,
                quantity: item.quantity,
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// 从存储恢复；内容损坏时得到空购物车，数量为 0 的行被丢弃
    pub fn from_json(raw: &str) -> Self {
        let items: Vec<CartItem> = serde_json::from_str(raw).unwrap_or_default();
        Self {
            items: items.into_iter().filter(|item| item.quantity > 0).collect(),
        }
    }
}

/// 金额保留两位小数
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_product;

    #[test]
    fn total_over_lines() {
        let mut cart = CartStore::new();
        cart.add(&sample_product(1, 10.0), 2);
        cart.add(&sample_product(2, 5.0), 3);
        assert_eq!(cart.total(), 35.0);
        assert_eq!(cart.formatted_total(), "35.00");
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn add_merges_and_keeps_order() {
        let mut cart = CartStore::new();
        cart.add(&sample_product(2, 5.0), 1);
        cart.add(&sample_product(1, 10.0), 1);
        cart.add(&sample_product(2, 5.0), 4);
        let ids: Vec<i64> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(cart.get(2).map(|i| i.quantity), Some(5));
    }

    #[test]
    fn set_quantity_zero_removes() {
        let mut cart = CartStore::new();
        cart.add(&sample_product(1, 10.0), 2);
        cart.set_quantity(1, 7);
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(7));
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn persisted_form_round_trips_and_tolerates_garbage() {
        let mut cart = CartStore::new();
        cart.add(&sample_product(3, 2.5), 4);
        let restored = CartStore::from_json(&cart.to_json());
        assert_eq!(restored, cart);
        assert!(CartStore::from_json("{not json").is_empty());
    }

    #[test]
    fn order_lines_carry_only_ids_and_quantities() {
        let mut cart = CartStore::new();
        cart.add(&sample_product(3, 2.5), 4);
        assert_eq!(
            cart.to_order_items(),
            vec![OrderLine {
                product_id: 3,
                quantity: 4
            }]
        );
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234.567), "1234.57");
    }
}
