use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::components::card::{PageHeader, StatCard};
use crate::components::icons::{
    BarChart, Calendar, Download, Mail, MessageSquare, Package, ShoppingCart, Stethoscope, Users,
};
use crate::components::reveal::ScaleIn;
use crate::components::spinner::PageSpinner;
use crate::pages::{Remote, fetch};
use crate::web::router::Link;
use fitlife_shared::admin::CountPair;
use fitlife_shared::protocol::{GetAdminDashboard, GetAnalytics};
use fitlife_shared::{AdminDashboardStats, Analytics, Tone, format_amount};
use leptos::prelude::*;

const ACTIONS: [(&str, &str, &str); 9] = [
    ("Manage Users", "Add, edit and approve accounts", "/admin/users"),
    ("Manage Consultants", "Profiles, rates and availability", "/admin/consultants"),
    ("Manage Products", "Catalogue and stock levels", "/admin/products"),
    ("View Orders", "Track fulfilment and payments", "/admin/orders"),
    ("Manage Consultations", "Every booked session", "/admin/consultations"),
    ("Monitor Feedback", "Reviews and session ratings", "/admin/feedback"),
    ("Send Notifications", "Message one user or everyone", "/admin/notifications"),
    ("View Analytics", "Revenue and performance", "/admin/analytics"),
    ("Export Reports", "Download CSV reports", "/admin/reports"),
];

fn action_icon(path: &str) -> AnyView {
    let class = "h-6 w-6";
    match path {
        "/admin/users" => view! { <Users attr:class=class /> }.into_any(),
        "/admin/consultants" => view! { <Stethoscope attr:class=class /> }.into_any(),
        "/admin/products" => view! { <Package attr:class=class /> }.into_any(),
        "/admin/orders" => view! { <ShoppingCart attr:class=class /> }.into_any(),
        "/admin/consultations" => view! { <Calendar attr:class=class /> }.into_any(),
        "/admin/feedback" => view! { <MessageSquare attr:class=class /> }.into_any(),
        "/admin/notifications" => view! { <Mail attr:class=class /> }.into_any(),
        "/admin/analytics" => view! { <BarChart attr:class=class /> }.into_any(),
        _ => view! { <Download attr:class=class /> }.into_any(),
    }
}

#[component]
fn RateBar(#[prop(into)] label: String, value: Signal<f64>) -> impl IntoView {
    view! {
        <div>
            <div class="flex justify-between text-sm mb-1">
                <span>{label}</span>
                <span class="font-semibold">{move || format!("{:.0}%", value.get())}</span>
            </div>
            <progress class="progress progress-primary w-full" value=move || value.get() max="100"></progress>
        </div>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_api();
    let stats = Remote::<AdminDashboardStats>::new();
    let analytics = Remote::<Analytics>::new();
    fetch(&api, GetAdminDashboard, stats);
    fetch(&api, GetAnalytics, analytics);

    let count = move |pick: fn(&AdminDashboardStats) -> CountPair| {
        Signal::derive(move || stats.data.with(|s| s.as_ref().map(pick).unwrap_or_default().total.to_string()))
    };
    let active = move |pick: fn(&AdminDashboardStats) -> CountPair| {
        stats.data.with_untracked(|s| s.as_ref().map(pick).unwrap_or_default().active)
    };

    view! {
        <PageHeader title="Admin Dashboard" subtitle="Platform overview and management shortcuts" />
        <ErrorAlert message=stats.error />

        <Show when=move || !stats.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4 mb-8">
                <ScaleIn>
                    <StatCard
                        title="Total Users"
                        value=count(|s| s.users)
                        desc=format!("{} active", active(|s| s.users))
                        tone=Tone::Info
                    />
                </ScaleIn>
                <ScaleIn delay=50>
                    <StatCard
                        title="Consultants"
                        value=count(|s| s.consultants)
                        desc=format!("{} active", active(|s| s.consultants))
                    />
                </ScaleIn>
                <ScaleIn delay=100>
                    <StatCard
                        title="Products"
                        value=count(|s| s.products)
                        desc=format!("{} active", active(|s| s.products))
                    />
                </ScaleIn>
                <ScaleIn delay=150>
                    <StatCard
                        title="Orders"
                        value=count(|s| s.orders)
                        desc=format!("{} pending", active(|s| s.orders))
                        tone=Tone::Warning
                    />
                </ScaleIn>
                <ScaleIn delay=200>
                    <StatCard
                        title="Consultations"
                        value=count(|s| s.consultations)
                        desc=format!("{} scheduled", active(|s| s.consultations))
                    />
                </ScaleIn>
                <ScaleIn delay=250>
                    <StatCard
                        title="Revenue"
                        value=Signal::derive(move || format!("₹{}", format_amount(analytics.value().revenue.total)))
                        desc="Monthly figure on the analytics page"
                        tone=Tone::Success
                    />
                </ScaleIn>
            </div>

            <div class="grid lg:grid-cols-3 gap-6">
                <div class="lg:col-span-2">
                    <h2 class="text-xl font-bold mb-4">"Quick Actions"</h2>
                    <div class="grid sm:grid-cols-2 xl:grid-cols-3 gap-4">
                        {ACTIONS
                            .iter()
                            .map(|(title, description, path)| view! {
                                <Link to=*path class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                                    <div class="card-body p-4">
                                        <div class="text-primary">{action_icon(path)}</div>
                                        <h3 class="font-bold">{*title}</h3>
                                        <p class="text-sm text-base-content/70">{*description}</p>
                                    </div>
                                </Link>
                            })
                            .collect_view()}
                    </div>
                </div>
                <div class="card bg-base-100 shadow h-fit">
                    <div class="card-body gap-4">
                        <h2 class="card-title">"Platform Health"</h2>
                        <RateBar
                            label="Consultation Success"
                            value=Signal::derive(move || analytics.value().consultation_completion_rate())
                        />
                        <RateBar
                            label="Order Fulfillment"
                            value=Signal::derive(move || analytics.value().order_completion_rate())
                        />
                        <p class="text-sm text-base-content/60">
                            {move || format!("{} new users this month", analytics.value().users.new_this_month)}
                        </p>
                    </div>
                </div>
            </div>
        </Show>
    }
}
