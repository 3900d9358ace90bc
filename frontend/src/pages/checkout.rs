//! 结账页：下单后按支付方式走支付组件或模拟支付

use crate::api::{FitLifeApi, use_api};
use crate::auth::use_auth;
use crate::cart::{CartContext, use_cart};
use crate::components::alert::ErrorAlert;
use crate::components::card::PageHeader;
use crate::components::modal::confirm;
use crate::config::use_config;
use crate::pages::cart::OrderSummary;
use crate::pages::{Remote, fetch, non_empty};
use crate::payment::{
    CheckoutOptions, load_script, open_checkout, settle_simulated_payment, settle_widget_payment,
};
use crate::web::CancelToken;
use crate::web::router::{Link, RouterService, use_router};
use fitlife_shared::order::{OrderCreate, PaymentConfig, PaymentMethod};
use fitlife_shared::protocol::{CreatePayment, GetPaymentConfig, PlaceOrder};
use fitlife_shared::{CartItem, CartStore, Order, User, format_amount};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Default, PartialEq)]
struct CheckoutForm {
    shipping_address: String,
    billing_address: String,
    payment_method: PaymentMethod,
    notes: String,
}

impl CheckoutForm {
    fn to_order(&self, cart: &CartStore) -> Result<OrderCreate, &'static str> {
        if cart.is_empty() {
            return Err("Your cart is empty");
        }
        let shipping = self.shipping_address.trim();
        if shipping.is_empty() {
            return Err("Shipping address is required");
        }
        let billing = self.billing_address.trim();
        if billing.is_empty() {
            return Err("Billing address is required");
        }
        Ok(OrderCreate {
            items: cart.to_order_items(),
            shipping_address: shipping.to_string(),
            billing_address: billing.to_string(),
            payment_method: self.payment_method.as_str().to_string(),
            notes: non_empty(self.notes.clone()),
        })
    }
}

/// 支付成功：清空购物车并跳转到订单列表
fn finish(cart: CartContext, router: RouterService) {
    cart.clear();
    router.navigate("/orders");
}

/// 支付组件流程：加载脚本、创建支付单、打开结账窗口
#[allow(clippy::too_many_arguments)]
async fn pay_with_widget(
    api: FitLifeApi,
    order: Order,
    key: String,
    script: String,
    user: Option<User>,
    error: RwSignal<Option<String>>,
    token: CancelToken,
    on_paid: impl FnOnce() + 'static,
) {
    let opened = async {
        load_script(&script).await.map_err(|e| e.to_string())?;
        let payment = api
            .send(&CreatePayment { order_id: order.id })
            .await
            .map_err(|e| e.user_message())?;
        let options = CheckoutOptions::new(&key, &payment, &order.order_number, user.as_ref());
        let order_id = order.id;
        let verify_token = token.clone();
        open_checkout(&options, move |verification| {
            spawn_local(async move {
                // 支付已完成，无论页面是否仍在都要登记支付号
                let settled = settle_widget_payment(&api, order_id, verification).await;
                if verify_token.is_cancelled() {
                    log_info!("[Checkout] Payment for order {} settled after leaving checkout", order_id);
                    return;
                }
                match settled {
                    Ok(()) => on_paid(),
                    Err(e) => {
                        log_error!("[Checkout] Verification failed: {}", e.user_message());
                        error.set(Some("Payment verification failed".to_string()));
                    }
                }
            });
        })
        .map_err(|e| e.to_string())
    }
    .await;

    if let Err(reason) = opened {
        log_error!("[Checkout] Payment init failed: {}", reason);
        if !token.is_cancelled() {
            error.set(Some("Payment initialization failed".to_string()));
        }
    }
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let api = use_api();
    let cart = use_cart();
    let user = use_auth().user();
    let router = use_router();
    let script = use_config().payment_script;

    let payment_config = Remote::<PaymentConfig>::new();
    fetch(&api, GetPaymentConfig, payment_config);

    let form = RwSignal::new(CheckoutForm::default());
    let error = RwSignal::new(Option::<String>::None);
    let (processing, set_processing) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let create = match cart.cart.with_untracked(|c| form.with_untracked(|f| f.to_order(c))) {
            Ok(create) => create,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        let method = form.with_untracked(|f| f.payment_method);
        let widget_key = payment_config
            .data
            .with_untracked(|c| c.as_ref().and_then(|c| c.key_id.clone()));
        if method.uses_widget() && widget_key.is_none() {
            error.set(Some("Payment configuration not loaded. Please try again.".to_string()));
            return;
        }

        error.set(None);
        set_processing.set(true);
        let api = api.clone();
        let script = script.clone();
        let total = cart.cart.with_untracked(CartStore::formatted_total);
        // 任务可能在页面卸载后才完成，需要的页面状态在启动前读出
        let user = user.get_untracked();
        let token = CancelToken::scoped();
        spawn_local(async move {
            let placed = api.send(&PlaceOrder(create)).await;
            if token.is_cancelled() {
                if let Ok(order) = &placed {
                    log_warn!("[Checkout] Left checkout before paying order {}", order.order_number);
                }
                return;
            }
            let order = match placed {
                Ok(order) => order,
                Err(e) => {
                    let msg = e.user_message();
                    error.set(Some(if msg.is_empty() { "Checkout failed".to_string() } else { msg }));
                    set_processing.set(false);
                    return;
                }
            };
            log_info!("[Checkout] Order {} placed ({})", order.order_number, method.as_str());

            match widget_key {
                Some(key) if method.uses_widget() => {
                    let paid = move || finish(cart, router);
                    pay_with_widget(api, order, key, script, user, error, token.clone(), paid).await;
                }
                _ => {
                    let prompt = format!("Complete payment of ₹{} for Order #{}?", total, order.order_number);
                    if confirm(&prompt) {
                        let now = js_sys::Date::now() as i64;
                        let settled = settle_simulated_payment(&api, order.id, now).await;
                        if token.is_cancelled() {
                            return;
                        }
                        match settled {
                            Ok(()) => finish(cart, router),
                            Err(_) => error.set(Some("Payment processing failed".to_string())),
                        }
                    }
                }
            }
            if !token.is_cancelled() {
                set_processing.set(false);
            }
        });
    };

    let text_field = move |label: &'static str, get: fn(&CheckoutForm) -> String, set: fn(&mut CheckoutForm, String), required: bool| {
        view! {
            <label class="form-control">
                <span class="label-text mb-1">{label}</span>
                <textarea
                    class="textarea textarea-bordered"
                    rows="3"
                    required=required
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                ></textarea>
            </label>
        }
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <Show
                when=move || cart.cart.with(|c| !c.is_empty())
                fallback=|| view! {
                    <div role="alert" class="alert alert-warning">
                        <span>"Your cart is empty. Please add some products before checkout."</span>
                    </div>
                    <Link to="/products" class="btn btn-primary mt-4">"Browse Products"</Link>
                }
            >
                <PageHeader title="Checkout" subtitle="Complete your order" />
                <div class="grid lg:grid-cols-3 gap-6">
                    <form class="card bg-base-100 shadow lg:col-span-2" on:submit=on_submit.clone()>
                        <div class="card-body gap-4">
                            <h2 class="card-title">"Shipping & Payment"</h2>
                            <ErrorAlert message=error />
                            {text_field("Shipping Address", |f| f.shipping_address.clone(), |f, v| f.shipping_address = v, true)}
                            {text_field("Billing Address", |f| f.billing_address.clone(), |f, v| f.billing_address = v, true)}
                            <label class="form-control">
                                <span class="label-text mb-1">"Payment Method"</span>
                                <select
                                    class="select select-bordered"
                                    prop:value=move || form.with(|f| f.payment_method.as_str())
                                    on:change=move |ev| {
                                        let method = PaymentMethod::parse(&event_target_value(&ev));
                                        form.update(|f| f.payment_method = method);
                                    }
                                >
                                    {PaymentMethod::ALL
                                        .into_iter()
                                        .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                                        .collect_view()}
                                </select>
                            </label>
                            {text_field("Order Notes (Optional)", |f| f.notes.clone(), |f, v| f.notes = v, false)}
                            <div class="card-actions justify-end">
                                <button type="submit" class="btn btn-primary btn-wide" disabled=move || processing.get()>
                                    <Show when=move || processing.get()>
                                        <span class="loading loading-spinner loading-sm"></span>
                                    </Show>
                                    {move || if processing.get() { "Processing..." } else { "Place Order" }}
                                </button>
                            </div>
                        </div>
                    </form>
                    <div class="flex flex-col gap-4">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">"Items"</h2>
                                <ul class="text-sm space-y-1">
                                    <For
                                        each=move || cart.cart.with(|c| c.items().to_vec())
                                        key=|item| (item.id, item.quantity)
                                        children=|item: CartItem| view! {
                                            <li class="flex justify-between gap-2">
                                                <span>{format!("{} x {}", item.name, item.quantity)}</span>
                                                <span>{format!("₹{}", format_amount(item.subtotal()))}</span>
                                            </li>
                                        }
                                    />
                                </ul>
                            </div>
                        </div>
                        <OrderSummary />
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlife_shared::Product;
    use serde_json::json;

    fn cart_with_item() -> CartStore {
        let product: Product = serde_json::from_value(json!({
            "id": 11,
            "name": "Whey Protein",
            "description": "",
            "category": "supplements",
            "price": 1499.0,
            "stock_quantity": 8
        }))
        .unwrap();
        let mut cart = CartStore::new();
        cart.add(&product, 2);
        cart
    }

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            shipping_address: " 12 Park Road ".into(),
            billing_address: "12 Park Road".into(),
            payment_method: PaymentMethod::Card,
            notes: "  ".into(),
        }
    }

    #[test]
    fn order_payload_from_cart_and_form() {
        let order = filled_form().to_order(&cart_with_item()).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.shipping_address, "12 Park Road");
        assert_eq!(order.payment_method, "card");
        assert_eq!(order.notes, None);
    }

    #[test]
    fn missing_address_or_empty_cart_is_rejected() {
        let mut form = filled_form();
        form.billing_address.clear();
        assert_eq!(form.to_order(&cart_with_item()), Err("Billing address is required"));
        assert_eq!(filled_form().to_order(&CartStore::new()), Err("Your cart is empty"));
    }
}
