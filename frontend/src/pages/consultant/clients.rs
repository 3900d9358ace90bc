use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::components::card::{PageHeader, StatCard};
use crate::components::icons::Calendar;
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch};
use crate::web::router::Link;
use fitlife_shared::admin::ClientSummary;
use fitlife_shared::protocol::GetConsultantDashboard;
use fitlife_shared::{ConsultantDashboard, Tone};
use leptos::prelude::*;

fn name_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[component]
pub fn ConsultantClientsPage() -> impl IntoView {
    let api = use_api();
    let dashboard = Remote::<ConsultantDashboard>::new();
    fetch(&api, GetConsultantDashboard, dashboard);

    let clients = Memo::new(move |_| dashboard.data.with(|d| d.as_ref().map(|d| d.clients()).unwrap_or_default()));
    let client_count = Signal::derive(move || clients.with(Vec::len).to_string());

    view! {
        <PageHeader title="My Clients" subtitle="Manage your client relationships and track their progress" />
        <ErrorAlert message=dashboard.error />
        <Show when=move || !dashboard.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-6">
                <StatCard title="Total Clients" value=client_count tone=Tone::Info />
                <StatCard title="Active Clients" value=client_count tone=Tone::Success />
                <StatCard
                    title="Total Consultations"
                    value=Signal::derive(move || dashboard.value().total_consultations.to_string())
                />
                <StatCard
                    title="Average Rating"
                    value=Signal::derive(move || format!("{:.1}", dashboard.value().average_rating))
                    tone=Tone::Warning
                />
            </div>

            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Client"</th>
                            <th>"Last Consultation"</th>
                            <th>"Total Sessions"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || clients.with(Vec::is_empty)>
                            <EmptyRow colspan=5 text="No clients yet" />
                        </Show>
                        <For
                            each=move || clients.get()
                            key=|c| c.name.clone()
                            children=|client: ClientSummary| view! {
                                <tr class="hover">
                                    <td>
                                        <div class="flex items-center gap-3">
                                            <div class="avatar placeholder">
                                                <div class="bg-primary text-primary-content rounded-full w-10">
                                                    <span>{name_initials(&client.name)}</span>
                                                </div>
                                            </div>
                                            <span class="font-semibold">{client.name.clone()}</span>
                                        </div>
                                    </td>
                                    <td>{client.last_consultation.map(|t| t.format_date()).unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{client.consultations}</td>
                                    <td><span class="badge badge-success">"Active"</span></td>
                                    <td>
                                        <Link to="/consultant/appointments" class="btn btn-ghost btn-xs gap-1">
                                            <Calendar attr:class="h-4 w-4" />
                                            "Schedule"
                                        </Link>
                                    </td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_from_full_name() {
        assert_eq!(name_initials("ravi kumar"), "RK");
        assert_eq!(name_initials("  Ana "), "A");
        assert_eq!(name_initials(""), "");
    }
}
