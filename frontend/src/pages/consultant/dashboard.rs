use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::alert::ErrorAlert;
use crate::components::card::{StatCard, StatusBadge};
use crate::components::icons::{Calendar, Clock, MessageSquare, UserIcon};
use crate::components::reveal::{FadeIn, ScaleIn};
use crate::components::spinner::PageSpinner;
use crate::pages::{Remote, fetch};
use crate::web::router::Link;
use fitlife_shared::admin::DashboardConsultation;
use fitlife_shared::date::current_greeting;
use fitlife_shared::protocol::GetConsultantDashboard;
use fitlife_shared::{ConsultantDashboard, Tone, format_amount};
use leptos::prelude::*;

const ACTIONS: [(&str, &str, &str); 4] = [
    ("My Consultations", "View and manage your sessions", "/consultations"),
    ("Update Profile", "Keep your details current", "/profile"),
    ("Set Availability", "Publish the slots clients can book", "/consultant/availability"),
    ("Client Messages", "See who you have been working with", "/consultant/clients"),
];

fn action_icon(path: &str) -> AnyView {
    match path {
        "/consultations" => view! { <Calendar attr:class="h-6 w-6" /> }.into_any(),
        "/profile" => view! { <UserIcon attr:class="h-6 w-6" /> }.into_any(),
        "/consultant/availability" => view! { <Clock attr:class="h-6 w-6" /> }.into_any(),
        _ => view! { <MessageSquare attr:class="h-6 w-6" /> }.into_any(),
    }
}

#[component]
fn SessionList(
    #[prop(into)] title: String,
    sessions: Signal<Vec<DashboardConsultation>>,
    #[prop(into)] empty: String,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                <Show
                    when=move || sessions.with(|s| !s.is_empty())
                    fallback=move || view! { <p class="text-base-content/50 text-sm">{empty.clone()}</p> }
                >
                    <ul class="divide-y divide-base-200">
                        <For
                            each=move || sessions.get()
                            key=|c| c.id
                            children=|c: DashboardConsultation| view! {
                                <li class="py-2 flex items-center justify-between gap-2">
                                    <div>
                                        <p class="font-semibold">{c.client_name.clone()}</p>
                                        <p class="text-xs text-base-content/60">
                                            {c.scheduled_at.map(|t| t.format_date_time()).unwrap_or_default()}
                                        </p>
                                    </div>
                                    <StatusBadge status=c.status.clone() />
                                </li>
                            }
                        />
                    </ul>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn ConsultantDashboardPage() -> impl IntoView {
    let api = use_api();
    let user = use_auth().user();
    let dashboard = Remote::<ConsultantDashboard>::new();
    fetch(&api, GetConsultantDashboard, dashboard);

    let stat = move |f: fn(&ConsultantDashboard) -> String| Signal::derive(move || f(&dashboard.value()));

    view! {
        <div class="space-y-8">
            <FadeIn>
                <h1 class="text-3xl font-bold">
                    {move || {
                        let name = user.get().map(|u| u.first_name).unwrap_or_default();
                        format!("{}, {}!", current_greeting(), name)
                    }}
                </h1>
                <p class="text-base-content/70 mt-1">"Here is an overview of your consultation practice."</p>
            </FadeIn>

            <ErrorAlert message=dashboard.error />
            <Show when=move || !dashboard.is_loading() fallback=|| view! { <PageSpinner /> }>
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                    <ScaleIn>
                        <StatCard
                            title="Total Consultations"
                            value=stat(|d| d.total_consultations.to_string())
                            desc="All sessions booked with you"
                            tone=Tone::Info
                        />
                    </ScaleIn>
                    <ScaleIn delay=100>
                        <StatCard
                            title="Pending"
                            value=stat(|d| d.pending_consultations.to_string())
                            desc="Awaiting sessions"
                            tone=Tone::Warning
                        />
                    </ScaleIn>
                    <ScaleIn delay=200>
                        <StatCard
                            title="Total Earnings"
                            value=stat(|d| format!("₹{}", format_amount(d.total_earnings)))
                            desc="From completed sessions"
                            tone=Tone::Success
                        />
                    </ScaleIn>
                    <ScaleIn delay=300>
                        <StatCard
                            title="Average Rating"
                            value=stat(|d| format!("{:.1}", d.average_rating))
                            desc="Client feedback"
                        />
                    </ScaleIn>
                </div>

                <div>
                    <h2 class="text-xl font-bold mb-4">"Quick Actions"</h2>
                    <div class="grid sm:grid-cols-2 lg:grid-cols-4 gap-4">
                        {ACTIONS
                            .iter()
                            .map(|(title, description, path)| view! {
                                <Link to=*path class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                                    <div class="card-body">
                                        <div class="text-primary">{action_icon(path)}</div>
                                        <h3 class="font-bold">{*title}</h3>
                                        <p class="text-sm text-base-content/70">{*description}</p>
                                    </div>
                                </Link>
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="grid lg:grid-cols-2 gap-6">
                    <SessionList
                        title="Recent Consultations"
                        sessions=Signal::derive(move || dashboard.value().recent_consultations)
                        empty="No recent consultations"
                    />
                    <SessionList
                        title="Upcoming Consultations"
                        sessions=Signal::derive(move || dashboard.value().upcoming_consultations)
                        empty="No upcoming consultations"
                    />
                </div>
            </Show>
        </div>
    }
}
