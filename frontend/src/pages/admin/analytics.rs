use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::components::card::{PageHeader, StatCard, Stars};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch};
use fitlife_shared::admin::{TopConsultant, TopProduct};
use fitlife_shared::protocol::GetAnalytics;
use fitlife_shared::{Analytics, Tone, format_amount};
use leptos::prelude::*;

#[component]
pub fn AdminAnalyticsPage() -> impl IntoView {
    let api = use_api();
    let analytics = Remote::<Analytics>::new();
    fetch(&api, GetAnalytics, analytics);

    let metric = move |f: fn(&Analytics) -> String| Signal::derive(move || f(&analytics.value()));

    view! {
        <PageHeader title="Analytics" subtitle="Revenue, orders and consultation performance" />
        <ErrorAlert message=analytics.error />

        <Show when=move || !analytics.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-8">
                <StatCard
                    title="Total Revenue"
                    value=metric(|a| format!("₹{}", format_amount(a.revenue.total)))
                    tone=Tone::Success
                />
                <StatCard
                    title="Monthly Revenue"
                    value=metric(|a| format!("₹{}", format_amount(a.revenue.monthly)))
                    tone=Tone::Success
                />
                <StatCard title="Total Orders" value=metric(|a| a.orders.total.to_string()) />
                <StatCard
                    title="Completed Orders"
                    value=metric(|a| a.orders.completed.to_string())
                    desc="Delivered to customers"
                    tone=Tone::Info
                />
                <StatCard title="Pending Orders" value=metric(|a| a.orders.pending.to_string()) tone=Tone::Warning />
                <StatCard title="New Users (30 days)" value=metric(|a| a.users.new_this_month.to_string()) tone=Tone::Info />
                <StatCard title="Total Consultations" value=metric(|a| a.consultations.total.to_string()) />
                <StatCard
                    title="Completed Consultations"
                    value=metric(|a| a.consultations.completed.to_string())
                    desc="Sessions marked completed"
                    tone=Tone::Success
                />
            </div>

            <div class="grid lg:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Top Products"</h2>
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>"Product Name"</th>
                                    <th class="text-right">"Units Sold"</th>
                                    <th class="text-right">"Revenue"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || analytics.value().top_products.is_empty()>
                                    <EmptyRow colspan=3 text="No sales yet" />
                                </Show>
                                <For
                                    each=move || analytics.value().top_products
                                    key=|p| p.name.clone()
                                    children=|p: TopProduct| view! {
                                        <tr>
                                            <td>{p.name}</td>
                                            <td class="text-right">{p.total_sold}</td>
                                            <td class="text-right">{format!("₹{}", format_amount(p.total_revenue))}</td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Top Consultants"</h2>
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>"Consultant ID"</th>
                                    <th>"Specialization"</th>
                                    <th>"Rating"</th>
                                    <th class="text-right">"Sessions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || analytics.value().top_consultants.is_empty()>
                                    <EmptyRow colspan=4 text="No consultations yet" />
                                </Show>
                                <For
                                    each=move || analytics.value().top_consultants
                                    key=|c| c.id
                                    children=|c: TopConsultant| view! {
                                        <tr>
                                            <td>{format!("#{}", c.id)}</td>
                                            <td>{c.specialization}</td>
                                            <td><Stars rating=c.rating /></td>
                                            <td class="text-right">{c.total_consultations}</td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Show>
    }
}
