use crate::cart::use_cart;
use crate::components::card::PageHeader;
use crate::components::icons::{Minus, Package, Plus, ShoppingCart, Trash};
use crate::web::router::Link;
use fitlife_shared::{CartItem, CartStore, format_amount};
use leptos::prelude::*;

/// 金额汇总（运费免费，税额为零）
#[component]
pub fn OrderSummary(#[prop(optional)] children: Option<Children>) -> impl IntoView {
    let cart = use_cart().cart;
    let total = move || cart.with(CartStore::formatted_total);

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Order Summary"</h2>
                <div class="flex justify-between"><span>"Subtotal:"</span><span>{move || format!("₹{}", total())}</span></div>
                <div class="flex justify-between"><span>"Shipping:"</span><span class="text-success">"Free"</span></div>
                <div class="flex justify-between"><span>"Tax:"</span><span>"₹0.00"</span></div>
                <div class="divider my-1"></div>
                <div class="flex justify-between text-lg font-bold">
                    <span>"Total:"</span>
                    <span class="text-primary">{move || format!("₹{}", total())}</span>
                </div>
                {children.map(|c| c())}
            </div>
        </div>
    }
}

#[component]
fn CartRow(item: CartItem) -> impl IntoView {
    let cart = use_cart();
    let id = item.id;
    let quantity = move || cart.cart.with(|c| c.get(id).map(|i| i.quantity).unwrap_or(0));
    let subtotal = move || cart.cart.with(|c| c.get(id).map(CartItem::subtotal).unwrap_or(0.0));

    view! {
        <li class="flex flex-wrap items-center gap-4 py-4">
            <div class="w-20 h-20 rounded-box bg-base-200 overflow-hidden flex items-center justify-center">
                {match item.image_url.clone() {
                    Some(src) => view! { <img src=src alt=item.name.clone() class="h-full w-full object-cover" /> }.into_any(),
                    None => view! { <Package attr:class="h-8 w-8 text-base-content/30" /> }.into_any(),
                }}
            </div>
            <div class="flex-1 min-w-40">
                <Link to=format!("/products/{id}") class="font-semibold hover:link">{item.name.clone()}</Link>
                <p class="text-sm text-base-content/60">{item.category.clone()}</p>
                <p class="text-primary font-semibold">{format!("₹{}", format_amount(item.price))}</p>
            </div>
            <div class="join">
                <button
                    class="btn btn-sm join-item"
                    disabled={move || quantity() <= 1}
                    on:click=move |_| cart.set_quantity(id, quantity().saturating_sub(1))
                >
                    <Minus attr:class="h-4 w-4" />
                </button>
                <input
                    type="number"
                    min="1"
                    class="input input-bordered input-sm join-item w-16 text-center"
                    prop:value=move || quantity().to_string()
                    on:change=move |ev| {
                        let n = event_target_value(&ev).trim().parse::<u32>().unwrap_or(1).max(1);
                        cart.set_quantity(id, n);
                    }
                />
                <button class="btn btn-sm join-item" on:click=move |_| cart.set_quantity(id, quantity() + 1)>
                    <Plus attr:class="h-4 w-4" />
                </button>
            </div>
            <span class="w-24 text-right font-semibold">{move || format!("₹{}", format_amount(subtotal()))}</span>
            <button class="btn btn-ghost btn-sm text-error" title="Remove" on:click=move |_| cart.remove(id)>
                <Trash attr:class="h-4 w-4" />
            </button>
        </li>
    }
}

#[component]
pub fn CartPage() -> impl IntoView {
    let cart = use_cart();

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <Show
                when=move || cart.cart.with(|c| !c.is_empty())
                fallback=move || view! {
                    <div class="text-center py-20">
                        <ShoppingCart attr:class="h-20 w-20 mx-auto text-base-content/30 mb-4" />
                        <h1 class="text-3xl font-bold mb-2">"Your cart is empty"</h1>
                        <p class="text-base-content/60 mb-6">"Add some products to get started"</p>
                        <Link to="/products" class="btn btn-primary btn-lg">"Browse Products"</Link>
                    </div>
                }
            >
                <PageHeader title="Shopping Cart" subtitle="Review your items before checkout" />
                <div class="grid lg:grid-cols-3 gap-6">
                    <div class="card bg-base-100 shadow lg:col-span-2">
                        <div class="card-body">
                            <h2 class="card-title">{move || format!("Cart Items ({})", cart.cart.with(CartStore::len))}</h2>
                            <ul class="divide-y divide-base-200">
                                <For
                                    each=move || cart.cart.with(|c| c.items().to_vec())
                                    key=|item| item.id
                                    children=|item: CartItem| view! { <CartRow item=item /> }
                                />
                            </ul>
                            <div class="card-actions justify-end">
                                <button class="btn btn-outline btn-error btn-sm" on:click=move |_| cart.clear()>
                                    "Clear Cart"
                                </button>
                            </div>
                        </div>
                    </div>
                    <OrderSummary>
                        <Link to="/checkout" class="btn btn-primary mt-4">"Proceed to Checkout"</Link>
                        <Link to="/products" class="btn btn-ghost btn-sm">"Continue Shopping"</Link>
                    </OrderSummary>
                </div>
            </Show>
        </div>
    }
}
