use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::card::{StatCard, StatusBadge};
use crate::components::icons::*;
use crate::components::reveal::{FadeIn, ScaleIn};
use crate::pages::{Remote, fetch};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use fitlife_shared::date::current_greeting;
use fitlife_shared::health::{Metric, ProgressRecord, trend};
use fitlife_shared::protocol::{ListConsultations, ListOrders, ListProgress};
use fitlife_shared::{Consultation, Order, Role, Tone, format_amount};
use leptos::prelude::*;

const RECENT: usize = 3;

struct QuickAction {
    title: &'static str,
    description: &'static str,
    path: &'static str,
}

const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        title: "Health Calculators",
        description: "Calculate BMI, calories, and body fat",
        path: "/calculators",
    },
    QuickAction {
        title: "Book Consultation",
        description: "Schedule with certified experts",
        path: "/consultations",
    },
    QuickAction {
        title: "Track Progress",
        description: "Log your health metrics",
        path: "/progress",
    },
    QuickAction {
        title: "Shop Products",
        description: "Browse health products",
        path: "/products",
    },
];

fn action_icon(path: &str) -> AnyView {
    let class = "h-6 w-6";
    match path {
        "/calculators" => view! { <Calculator attr:class=class /> }.into_any(),
        "/consultations" => view! { <Calendar attr:class=class /> }.into_any(),
        "/progress" => view! { <TrendingUp attr:class=class /> }.into_any(),
        _ => view! { <ShoppingCart attr:class=class /> }.into_any(),
    }
}

/// 最近的若干条，按创建时间倒序
fn latest<T: Clone>(items: &[T], key: impl Fn(&T) -> Option<fitlife_shared::Timestamp>) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(key(item)));
    sorted.truncate(RECENT);
    sorted
}

/// 普通用户的仪表盘；顾问与管理员被送往各自的首页
#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();
    let user = auth.user();

    Effect::new(move |_| {
        if let Some(role) = auth.state.with(|s| s.role()) {
            if role != Role::User {
                router.go(AppRoute::home_for(role));
            }
        }
    });

    let consultations = Remote::<Vec<Consultation>>::new();
    let orders = Remote::<Vec<Order>>::new();
    let progress = Remote::<Vec<ProgressRecord>>::new();
    fetch(&api, ListConsultations, consultations);
    fetch(&api, ListOrders, orders);
    fetch(&api, ListProgress, progress);

    let count = |n: usize| n.to_string();
    let upcoming = move || {
        consultations.data.with(|d| {
            d.as_ref()
                .map(|list| list.iter().filter(|c| c.status.is_open()).count())
                .unwrap_or(0)
        })
    };

    view! {
        <div class="space-y-8">
            <FadeIn>
                <h1 class="text-3xl font-bold">
                    {move || {
                        let name = user.get().map(|u| u.first_name).unwrap_or_default();
                        format!("{}, {}!", current_greeting(), name)
                    }}
                </h1>
                <p class="text-base-content/70 mt-1">
                    "Welcome to your health dashboard. Here's what's happening with your journey."
                </p>
            </FadeIn>

            <Show when=move || user.get().is_some_and(|u| !u.has_complete_profile())>
                <div role="alert" class="alert alert-info">
                    <UserIcon attr:class="h-5 w-5" />
                    <span>"Complete your profile to get personalized recommendations."</span>
                    <Link to="/profile" class="btn btn-sm">"Update Profile"</Link>
                </div>
            </Show>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                <ScaleIn>
                    <StatCard
                        title="Consultations"
                        value=Signal::derive(move || count(consultations.value().len()))
                        desc="Total consultations"
                        tone=Tone::Info
                    />
                </ScaleIn>
                <ScaleIn delay=100>
                    <StatCard
                        title="Upcoming"
                        value=Signal::derive(move || count(upcoming()))
                        desc="Scheduled sessions"
                        tone=Tone::Warning
                    />
                </ScaleIn>
                <ScaleIn delay=200>
                    <StatCard
                        title="Orders"
                        value=Signal::derive(move || count(orders.value().len()))
                        desc="Total orders"
                        tone=Tone::Success
                    />
                </ScaleIn>
                <ScaleIn delay=300>
                    <StatCard
                        title="Progress"
                        value=Signal::derive(move || count(progress.value().len()))
                        desc="Progress entries"
                    />
                </ScaleIn>
            </div>

            <section>
                <h2 class="text-xl font-bold mb-4">"Quick Actions"</h2>
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                    {QUICK_ACTIONS
                        .iter()
                        .enumerate()
                        .map(|(i, action)| {
                            view! {
                                <FadeIn delay=(i as u32) * 100>
                                    <Link to=action.path class="card bg-base-100 shadow hover:shadow-lg transition-shadow h-full">
                                        <div class="card-body">
                                            <div class="text-primary">{action_icon(action.path)}</div>
                                            <h3 class="font-bold">{action.title}</h3>
                                            <p class="text-sm text-base-content/70">{action.description}</p>
                                        </div>
                                    </Link>
                                </FadeIn>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <Show when=move || !progress.value().is_empty()>
                <section>
                    <h2 class="text-xl font-bold mb-4">"Latest Measurements"</h2>
                    <div class="stats stats-vertical md:stats-horizontal shadow w-full">
                        {move || {
                            let records = progress.value();
                            Metric::ALL
                                .iter()
                                .filter_map(|metric| trend(&records, *metric))
                                .map(|t| {
                                    let delta = t
                                        .delta
                                        .map(|d| format!("{:+.1} {} since last entry", d, t.metric.unit()))
                                        .unwrap_or_else(|| "First entry".to_string());
                                    view! {
                                        <div class="stat">
                                            <div class="stat-title">{t.metric.label()}</div>
                                            <div class="stat-value text-2xl">{format!("{:.1} {}", t.latest, t.metric.unit())}</div>
                                            <div class="stat-desc">{delta}</div>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </section>
            </Show>

            <div class="grid lg:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <div class="flex justify-between items-center">
                            <h2 class="card-title">"Recent Consultations"</h2>
                            <Link to="/consultations" class="btn btn-ghost btn-sm">"View All"</Link>
                        </div>
                        <Show
                            when=move || !consultations.value().is_empty()
                            fallback=|| view! { <p class="text-base-content/50 py-4">"No consultations yet"</p> }
                        >
                            <ul class="divide-y divide-base-200">
                                {move || {
                                    latest(&consultations.value(), |c| Some(c.scheduled_time))
                                        .into_iter()
                                        .map(|c| view! {
                                            <li class="py-3 flex justify-between items-center">
                                                <div>
                                                    <p class="font-semibold">{c.consultant_name()}</p>
                                                    <p class="text-sm text-base-content/60">{c.scheduled_time.format_date_time()}</p>
                                                </div>
                                                <StatusBadge status=c.status.as_str() />
                                            </li>
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <div class="flex justify-between items-center">
                            <h2 class="card-title">"Recent Orders"</h2>
                            <Link to="/orders" class="btn btn-ghost btn-sm">"View All"</Link>
                        </div>
                        <Show
                            when=move || !orders.value().is_empty()
                            fallback=|| view! { <p class="text-base-content/50 py-4">"No orders yet"</p> }
                        >
                            <ul class="divide-y divide-base-200">
                                {move || {
                                    latest(&orders.value(), |o| o.created_at)
                                        .into_iter()
                                        .map(|o| view! {
                                            <li class="py-3 flex justify-between items-center">
                                                <div>
                                                    <p class="font-semibold">{format!("Order #{}", o.order_number)}</p>
                                                    <p class="text-sm text-base-content/60">
                                                        {format!("{} items", o.item_count())}
                                                    </p>
                                                </div>
                                                <div class="text-right">
                                                    <p class="font-bold text-primary">{format!("₹{}", format_amount(o.total_amount))}</p>
                                                    <StatusBadge status=o.status.as_str() />
                                                </div>
                                            </li>
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlife_shared::Timestamp;

    #[test]
    fn latest_keeps_newest_first() {
        let items = vec![
            ("a", Timestamp::parse("2024-01-01T08:00:00")),
            ("b", Timestamp::parse("2024-03-01T08:00:00")),
            ("c", None),
            ("d", Timestamp::parse("2024-02-01T08:00:00")),
        ];
        let names: Vec<_> = latest(&items, |(_, t)| *t).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "d", "a"]);
    }
}
