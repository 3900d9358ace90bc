//! 购物车上下文
//!
//! 内存中的 `CartStore` 包在信号里，每次修改后写回 LocalStorage。

use crate::web::LocalStorage;
use fitlife_shared::{CartStore, Product, STORAGE_CART_KEY};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CartContext {
    pub cart: ReadSignal<CartStore>,
    set_cart: WriteSignal<CartStore>,
}

impl CartContext {
    /// 从 LocalStorage 恢复购物车
    pub fn restore() -> Self {
        let store = LocalStorage::get(STORAGE_CART_KEY)
            .map(|raw| CartStore::from_json(&raw))
            .unwrap_or_default();
        let (cart, set_cart) = signal(store);
        Self { cart, set_cart }
    }

    fn mutate(&self, f: impl FnOnce(&mut CartStore)) {
        self.set_cart.update(|cart| {
            f(cart);
            if !LocalStorage::set(STORAGE_CART_KEY, &cart.to_json()) {
                log_warn!("[Cart] Failed to persist cart");
            }
        });
    }

    pub fn add(&self, product: &Product, quantity: u32) {
        log_info!("[Cart] +{} x {}", quantity, product.name);
        self.mutate(|cart| cart.add(product, quantity));
    }

    /// 数量为 0 时移除该行
    pub fn set_quantity(&self, id: i64, quantity: u32) {
        self.mutate(|cart| cart.set_quantity(id, quantity));
    }

    pub fn remove(&self, id: i64) {
        self.mutate(|cart| cart.remove(id));
    }

    pub fn clear(&self) {
        self.mutate(CartStore::clear);
    }

    /// 顶栏徽章：商品件数
    pub fn item_count(&self) -> Signal<u32> {
        let cart = self.cart;
        Signal::derive(move || cart.with(CartStore::item_count))
    }
}

pub fn provide_cart() -> CartContext {
    let ctx = CartContext::restore();
    provide_context(ctx);
    ctx
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}
