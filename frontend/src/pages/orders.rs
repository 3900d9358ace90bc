use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::icons::{FileText, Package, X};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::PageSpinner;
use crate::pages::{Remote, fetch, submit};
use crate::web::router::Link;
use fitlife_shared::protocol::{CancelOrder, ListOrders};
use fitlife_shared::{Order, OrderItem, OrderStatus, format_amount};
use leptos::prelude::*;

fn order_date(order: &Order) -> String {
    order.created_at.map(|t| t.format_date()).unwrap_or_default()
}

#[component]
fn OrderDetail(order: Order) -> impl IntoView {
    let address = |label: &'static str, value: Option<String>| {
        value.map(|v| view! {
            <div>
                <p class="font-semibold text-sm">{label}</p>
                <p class="text-sm whitespace-pre-line text-base-content/70">{v}</p>
            </div>
        })
    };

    view! {
        <div class="flex flex-col gap-4">
            <div class="flex flex-wrap gap-2 items-center">
                <span class=order.status.tone().badge_class()>{order.status.as_str()}</span>
                <span class=order.payment_status.tone().badge_class()>
                    {format!("payment: {}", order.payment_status)}
                </span>
                <span class="text-sm text-base-content/60">{order_date(&order)}</span>
            </div>
            <table class="table table-sm">
                <thead>
                    <tr><th>"Product"</th><th class="text-right">"Qty"</th><th class="text-right">"Price"</th><th class="text-right">"Total"</th></tr>
                </thead>
                <tbody>
                    {order
                        .order_items
                        .iter()
                        .map(|item: &OrderItem| view! {
                            <tr>
                                <td>{item.product_name()}</td>
                                <td class="text-right">{item.quantity}</td>
                                <td class="text-right">{format!("₹{}", format_amount(item.unit_price))}</td>
                                <td class="text-right">{format!("₹{}", format_amount(item.total_price))}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
                <tfoot>
                    <tr>
                        <th colspan="3">"Total"</th>
                        <th class="text-right">{format!("₹{}", format_amount(order.total_amount))}</th>
                    </tr>
                </tfoot>
            </table>
            <div class="grid sm:grid-cols-2 gap-3">
                {address("Shipping Address", order.shipping_address.clone())}
                {address("Billing Address", order.billing_address.clone())}
            </div>
            {order.notes.clone().map(|n| view! { <p class="text-sm italic text-base-content/60">{n}</p> })}
        </div>
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api = use_api();
    let orders = Remote::<Vec<Order>>::new();
    fetch(&api, ListOrders, orders);

    let selected = RwSignal::new(Option::<Order>::None);
    let open = RwSignal::new(false);
    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);

    let view_order = move |order: Order| {
        selected.set(Some(order));
        open.set(true);
    };

    let cancel_order = Callback::new(move |(id, number): (i64, String)| {
        if !confirm(&format!("Cancel order #{number}?")) {
            return;
        }
        submit(&api, CancelOrder { id }, action_error, move |_| {
            orders.patch(|list| {
                if let Some(o) = list.iter_mut().find(|o| o.id == id) {
                    o.status = OrderStatus::Cancelled;
                }
            });
            notice.set(Some(Notice::success("Order cancelled")));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="My Orders" subtitle="Track your order history and status" />
        <ErrorAlert message=orders.error />
        <ErrorAlert message=action_error />

        <Show when=move || !orders.is_loading() fallback=|| view! { <PageSpinner /> }>
            <Show
                when=move || !orders.value().is_empty()
                fallback=|| view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center py-16">
                            <Package attr:class="h-20 w-20 text-base-content/30" />
                            <h2 class="text-2xl font-bold">"No orders yet"</h2>
                            <p class="text-base-content/60 mb-4">"Start shopping to see your orders here"</p>
                            <Link to="/products" class="btn btn-primary btn-lg">"Browse Products"</Link>
                        </div>
                    </div>
                }
            >
                <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Order #"</th>
                                <th>"Date"</th>
                                <th>"Items"</th>
                                <th>"Total"</th>
                                <th>"Status"</th>
                                <th>"Payment"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || orders.value()
                                key=|o| (o.id, o.status)
                                children=move |order: Order| {
                                    let id = order.id;
                                    let number = order.order_number.clone();
                                    let can_cancel = order.status.can_cancel();
                                    let stored = StoredValue::new(order.clone());
                                    view! {
                                        <tr class="hover">
                                            <td class="font-bold">{order.order_number.clone()}</td>
                                            <td>{order_date(&order)}</td>
                                            <td>{format!("{} item(s)", order.order_items.len())}</td>
                                            <td class="font-semibold">{format!("₹{}", format_amount(order.total_amount))}</td>
                                            <td><span class=order.status.tone().badge_class()>{order.status.as_str()}</span></td>
                                            <td>
                                                <span class=order.payment_status.tone().badge_class()>
                                                    {order.payment_status.as_str()}
                                                </span>
                                            </td>
                                            <td class="flex gap-1">
                                                <button class="btn btn-ghost btn-xs gap-1" on:click=move |_| view_order(stored.get_value())>
                                                    <FileText attr:class="h-4 w-4" />
                                                    "View"
                                                </button>
                                                <Show when=move || can_cancel>
                                                    <button
                                                        class="btn btn-ghost btn-xs gap-1 text-error"
                                                        on:click={
                                                            let number = number.clone();
                                                            move |_| cancel_order.run((id, number.clone()))
                                                        }
                                                    >
                                                        <X attr:class="h-4 w-4" />
                                                        "Cancel"
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </Show>

        <Modal
            open=open
            title=Signal::derive(move || {
                selected.with(|o| o.as_ref().map(|o| format!("Order #{}", o.order_number)).unwrap_or_default())
            })
            class="max-w-2xl"
        >
            {move || selected.get().map(|order| view! { <OrderDetail order=order /> })}
        </Modal>
    }
}
