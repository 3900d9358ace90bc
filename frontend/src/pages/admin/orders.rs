use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, submit};
use fitlife_shared::protocol::{AdminListOrders, UpdateOrderStatus};
use fitlife_shared::{Order, OrderStatus, format_amount};
use leptos::prelude::*;

#[component]
pub fn AdminOrdersPage() -> impl IntoView {
    let api = use_api();
    let orders = Remote::<Vec<Order>>::new();
    fetch(&api, AdminListOrders, orders);

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let (status_filter, set_status_filter) = signal(Option::<OrderStatus>::None);

    let visible = Memo::new(move |_| {
        let filter = status_filter.get();
        orders
            .value()
            .into_iter()
            .filter(|o| filter.is_none_or(|s| o.status == s))
            .collect::<Vec<_>>()
    });

    let change_status = Callback::new(move |(id, status): (i64, OrderStatus)| {
        submit(&api, UpdateOrderStatus { id, status }, action_error, move |_| {
            orders.patch(|list| {
                if let Some(o) = list.iter_mut().find(|o| o.id == id) {
                    o.status = status;
                }
            });
            notice.set(Some(Notice::success(format!("Order status updated to {status}"))));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="Order Management" subtitle="Track and update customer orders">
            <select
                class="select select-bordered"
                on:change=move |ev| set_status_filter.set(OrderStatus::parse(&event_target_value(&ev)))
            >
                <option value="">"All Statuses"</option>
                {OrderStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                    .collect_view()}
            </select>
        </PageHeader>
        <ErrorAlert message=orders.error />
        <ErrorAlert message=action_error />

        <Show when=move || !orders.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Order #"</th>
                            <th>"Customer"</th>
                            <th>"Date"</th>
                            <th>"Items"</th>
                            <th>"Total"</th>
                            <th>"Status"</th>
                            <th>"Payment"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || visible.with(Vec::is_empty)>
                            <EmptyRow colspan=8 text="No orders found" />
                        </Show>
                        <For
                            each=move || visible.get()
                            key=|o| (o.id, o.status)
                            children=move |order: Order| {
                                let id = order.id;
                                let current = order.status;
                                view! {
                                    <tr class="hover">
                                        <td class="font-bold">{order.order_number.clone()}</td>
                                        <td>{format!("User #{}", order.user_id)}</td>
                                        <td>{order.created_at.map(|t| t.format_date()).unwrap_or_default()}</td>
                                        <td>{order.item_count()}</td>
                                        <td>{format!("₹{}", format_amount(order.total_amount))}</td>
                                        <td><span class=current.tone().badge_class()>{current.as_str()}</span></td>
                                        <td>
                                            <span class=order.payment_status.tone().badge_class()>
                                                {order.payment_status.as_str()}
                                            </span>
                                        </td>
                                        <td>
                                            <select
                                                class="select select-bordered select-xs"
                                                prop:value=current.as_str()
                                                on:change=move |ev| {
                                                    if let Some(status) = OrderStatus::parse(&event_target_value(&ev)) {
                                                        if status != current {
                                                            change_status.run((id, status));
                                                        }
                                                    }
                                                }
                                            >
                                                {OrderStatus::ALL
                                                    .into_iter()
                                                    .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                                                    .collect_view()}
                                            </select>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
