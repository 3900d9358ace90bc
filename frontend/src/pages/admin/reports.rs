//! 报表导出：按类型与时间范围筛选记录，预览并导出为 CSV

use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::icons::Download;
use crate::components::spinner::PageSpinner;
use crate::pages::{Remote, fetch};
use crate::web::download::save_text;
use fitlife_shared::csv::{report_filename, to_csv};
use fitlife_shared::protocol::{
    AdminListConsultations, AdminListOrders, AdminListProducts, AdminListUsers,
};
use fitlife_shared::{Consultation, Order, Product, Timestamp, User};
use leptos::prelude::*;
use serde_json::{Value, json};

const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Users,
    Orders,
    Consultations,
    Products,
}

impl ReportKind {
    const ALL: [ReportKind; 4] = [
        ReportKind::Users,
        ReportKind::Orders,
        ReportKind::Consultations,
        ReportKind::Products,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Users => "users",
            ReportKind::Orders => "orders",
            ReportKind::Consultations => "consultations",
            ReportKind::Products => "products",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReportKind::Users => "Users Report",
            ReportKind::Orders => "Orders Report",
            ReportKind::Consultations => "Consultations Report",
            ReportKind::Products => "Products Report",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// 无创建时间的记录总是保留；`days` 为 `None` 表示不限
fn within_range(created: Option<Timestamp>, days: Option<i64>, now: Timestamp) -> bool {
    match (created, days) {
        (Some(created), Some(days)) => created.days_before(now) <= days,
        _ => true,
    }
}

fn date_text(t: Option<Timestamp>) -> String {
    t.map(|t| t.format_date()).unwrap_or_default()
}

fn user_rows(users: &[User]) -> Vec<Value> {
    users
        .iter()
        .map(|u| {
            json!({
                "id": u.id,
                "username": u.username,
                "name": u.full_name(),
                "email": u.email,
                "role": u.role.as_str(),
                "status": if u.is_active { "Active" } else { "Inactive" },
                "created": date_text(u.created_at),
            })
        })
        .collect()
}

fn order_rows(orders: &[Order]) -> Vec<Value> {
    orders
        .iter()
        .map(|o| {
            json!({
                "order_number": o.order_number,
                "user_id": o.user_id,
                "amount": o.total_amount,
                "status": o.status.as_str(),
                "payment_status": o.payment_status.as_str(),
                "created": date_text(o.created_at),
            })
        })
        .collect()
}

fn consultation_rows(consultations: &[Consultation]) -> Vec<Value> {
    consultations
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "user": c.client_name(),
                "consultant": c.consultant_name(),
                "scheduled_time": c.scheduled_time.format_date_time(),
                "status": c.status.as_str(),
                "rating": c.rating,
                "created": date_text(c.created_at),
            })
        })
        .collect()
}

fn product_rows(products: &[Product]) -> Vec<Value> {
    products
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "category": p.category,
                "price": p.price,
                "stock": p.stock_quantity,
                "status": if p.is_active { "Active" } else { "Inactive" },
                "created": date_text(p.created_at),
            })
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[component]
fn ReportSection(
    kind: ReportKind,
    rows: Signal<Vec<Value>>,
    on_export: Callback<ReportKind>,
) -> impl IntoView {
    let headers = move || {
        rows.with(|rows| match rows.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex items-center justify-between gap-2">
                    <h2 class="card-title">
                        {kind.label()}
                        <span class="badge badge-ghost">{move || rows.with(Vec::len)}</span>
                    </h2>
                    <button class="btn btn-sm btn-outline gap-2" on:click=move |_| on_export.run(kind)>
                        <Download attr:class="h-4 w-4" />
                        "Export"
                    </button>
                </div>
                <div class="overflow-x-auto">
                    <table class="table table-xs">
                        <thead>
                            <tr>{move || headers().into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}</tr>
                        </thead>
                        <tbody>
                            {move || {
                                let keys = headers();
                                rows.with(|rows| {
                                    rows.iter()
                                        .take(PREVIEW_ROWS)
                                        .map(|row| {
                                            let cells = keys
                                                .iter()
                                                .map(|k| view! { <td>{row.get(k).map(cell_text).unwrap_or_default()}</td> })
                                                .collect_view();
                                            view! { <tr>{cells}</tr> }
                                        })
                                        .collect_view()
                                })
                            }}
                        </tbody>
                    </table>
                </div>
                <Show when={move || rows.with(|r| r.len() > PREVIEW_ROWS)}>
                    <p class="text-xs text-base-content/60">
                        {move || format!("Showing {} of {} records. Export to see all.", PREVIEW_ROWS, rows.with(Vec::len))}
                    </p>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn AdminReportsPage() -> impl IntoView {
    let api = use_api();
    let users = Remote::<Vec<User>>::new();
    let orders = Remote::<Vec<Order>>::new();
    let consultations = Remote::<Vec<Consultation>>::new();
    let products = Remote::<Vec<Product>>::new();
    fetch(&api, AdminListUsers, users);
    fetch(&api, AdminListOrders, orders);
    fetch(&api, AdminListConsultations, consultations);
    fetch(&api, AdminListProducts, products);

    let (selected, set_selected) = signal(Option::<ReportKind>::None);
    let (range, set_range) = signal(Some(30i64));
    let notice = RwSignal::new(Option::<Notice>::None);
    let error = RwSignal::new(Option::<String>::None);

    let loading = move || {
        users.is_loading() || orders.is_loading() || consultations.is_loading() || products.is_loading()
    };

    // 在响应式上下文中调用时会追踪数据与时间范围
    let rows_for = move |kind: ReportKind| -> Vec<Value> {
        let days = range.get();
        let now = Timestamp::now();
        let keep = |created: Option<Timestamp>| within_range(created, days, now);
        match kind {
            ReportKind::Users => users.data.with(|d| {
                let list: Vec<User> = d.iter().flatten().filter(|u| keep(u.created_at)).cloned().collect();
                user_rows(&list)
            }),
            ReportKind::Orders => orders.data.with(|d| {
                let list: Vec<Order> = d.iter().flatten().filter(|o| keep(o.created_at)).cloned().collect();
                order_rows(&list)
            }),
            ReportKind::Consultations => consultations.data.with(|d| {
                let list: Vec<Consultation> = d.iter().flatten().filter(|c| keep(c.created_at)).cloned().collect();
                consultation_rows(&list)
            }),
            ReportKind::Products => products.data.with(|d| {
                let list: Vec<Product> = d.iter().flatten().filter(|p| keep(p.created_at)).cloned().collect();
                product_rows(&list)
            }),
        }
    };

    let export = Callback::new(move |kind: ReportKind| {
        let rows = rows_for(kind);
        if rows.is_empty() {
            notice.set(Some(Notice::error(format!("No {} to export", kind.as_str()))));
            return;
        }
        let filename = report_filename(kind.as_str());
        match save_text(&filename, &to_csv(&rows), "text/csv;charset=utf-8") {
            Ok(()) => {
                log_info!("[Reports] Exported {} rows to {}", rows.len(), filename);
                notice.set(Some(Notice::success(format!("Downloaded {filename}"))));
            }
            Err(e) => {
                log_error!("[Reports] Export failed: {:?}", e);
                error.set(Some("Failed to export report".to_string()));
            }
        }
    });

    let export_selected = move |_| match selected.get_untracked() {
        Some(kind) => export.run(kind),
        None => ReportKind::ALL.into_iter().for_each(|kind| export.run(kind)),
    };

    let error_of = move || {
        [users.error, orders.error, consultations.error, products.error]
            .into_iter()
            .find_map(|e| e.get())
    };

    view! {
        <Toast notice=notice />
        <PageHeader title="Reports" subtitle="Generate and export platform data">
            <button class="btn btn-primary gap-2" on:click=export_selected>
                <Download attr:class="h-4 w-4" />
                "Export CSV"
            </button>
        </PageHeader>
        <ErrorAlert message=Signal::derive(error_of) />
        <ErrorAlert message=error />

        <div class="card bg-base-100 shadow mb-6">
            <div class="card-body grid sm:grid-cols-2 gap-3">
                <label class="form-control">
                    <span class="label-text mb-1">"Report Type"</span>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| set_selected.set(ReportKind::parse(&event_target_value(&ev)))
                    >
                        <option value="all">"All Reports"</option>
                        {ReportKind::ALL
                            .into_iter()
                            .map(|k| view! { <option value=k.as_str()>{k.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Date Range"</span>
                    <select
                        class="select select-bordered"
                        prop:value=move || range.get().map(|d| d.to_string()).unwrap_or_default()
                        on:change=move |ev| set_range.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="7">"Last 7 days"</option>
                        <option value="30">"Last 30 days"</option>
                        <option value="90">"Last 3 months"</option>
                        <option value="365">"Last year"</option>
                        <option value="">"All time"</option>
                    </select>
                </label>
            </div>
        </div>

        <Show when=move || !loading() fallback=|| view! { <PageSpinner /> }>
            <div class="flex flex-col gap-6">
                {ReportKind::ALL
                    .into_iter()
                    .map(|kind| view! {
                        <Show when=move || selected.get().is_none_or(|s| s == kind)>
                            <ReportSection kind=kind rows=Signal::derive(move || rows_for(kind)) on_export=export />
                        </Show>
                    })
                    .collect_view()}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlife_shared::csv::to_csv;

    #[test]
    fn date_range_filter() {
        let now = Timestamp::parse("2024-06-30T12:00").unwrap();
        let recent = Timestamp::parse("2024-06-25T09:00");
        let old = Timestamp::parse("2024-01-01T09:00");
        assert!(within_range(recent, Some(7), now));
        assert!(!within_range(old, Some(30), now));
        assert!(within_range(old, None, now));
        assert!(within_range(None, Some(7), now));
    }

    #[test]
    fn product_report_is_flat() {
        let product: Product = serde_json::from_value(json!({
            "id": 4,
            "name": "Oats, rolled",
            "description": "",
            "category": "food",
            "price": 250.0,
            "stock_quantity": 3
        }))
        .unwrap();
        let csv = to_csv(&product_rows(&[product]));
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,name,category,price,stock,status,created"));
        assert_eq!(lines.next(), Some("4,\"Oats, rolled\",food,250.0,3,Active,"));
    }

    #[test]
    fn report_kinds_round_trip_names() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ReportKind::parse("all"), None);
    }
}
