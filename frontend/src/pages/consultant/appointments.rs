use super::{count_on_day, update_session};
use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::{PageHeader, StatCard, StatusBadge};
use crate::components::icons::{Calendar, Check};
use crate::components::modal::Modal;
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, non_empty, submit};
use fitlife_shared::admin::DashboardConsultation;
use fitlife_shared::consultation::ConsultationUpdate;
use fitlife_shared::protocol::{GetConsultantDashboard, UpdateConsultation};
use fitlife_shared::{ConsultantDashboard, ConsultationStatus, Timestamp, Tone};
use leptos::prelude::*;

/// 仍可完成或改期的咨询
fn is_actionable(session: &DashboardConsultation) -> bool {
    ConsultationStatus::parse(&session.status).is_some_and(|s| s.is_open())
}

#[component]
fn RescheduleDialog(
    open: RwSignal<bool>,
    target: RwSignal<Option<i64>>,
    dashboard: Remote<ConsultantDashboard>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let (when, set_when) = signal(String::new());
    let (notes, set_notes) = signal(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = target.get_untracked() else {
            return;
        };
        let Some(at) = Timestamp::parse(&when.get_untracked()) else {
            error.set(Some("Please choose a new date and time".to_string()));
            return;
        };
        let notes = non_empty(notes.get_untracked());
        let update = ConsultationUpdate::reschedule(at, notes.clone());
        submit(&api, UpdateConsultation { id, update }, error, move |_| {
            dashboard.patch(|d| {
                update_session(d, id, |c| {
                    c.scheduled_at = Some(at);
                    c.status = ConsultationStatus::Rescheduled.as_str().to_string();
                    if notes.is_some() {
                        c.notes = notes.clone();
                    }
                })
            });
            open.set(false);
            set_when.set(String::new());
            set_notes.set(String::new());
            notice.set(Some(Notice::success("Appointment rescheduled")));
        });
    };

    view! {
        <Modal open=open title="Reschedule Appointment">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <label class="form-control">
                    <span class="label-text mb-1">"New Date & Time"</span>
                    <input
                        type="datetime-local"
                        class="input input-bordered"
                        required=true
                        prop:value=when
                        on:input=move |ev| set_when.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Notes (Optional)"</span>
                    <textarea
                        class="textarea textarea-bordered"
                        rows="3"
                        prop:value=notes
                        on:input=move |ev| set_notes.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Reschedule"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn ConsultantAppointmentsPage() -> impl IntoView {
    let api = use_api();
    let dashboard = Remote::<ConsultantDashboard>::new();
    fetch(&api, GetConsultantDashboard, dashboard);

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let reschedule_open = RwSignal::new(false);
    let reschedule_target = RwSignal::new(Option::<i64>::None);

    let sessions = Memo::new(move |_| {
        dashboard.data.with(|d| d.as_ref().map(ConsultantDashboard::all_consultations).unwrap_or_default())
    });

    let complete = Callback::new(move |id: i64| {
        submit(&api, UpdateConsultation { id, update: ConsultationUpdate::complete() }, action_error, move |_| {
            dashboard.patch(|d| {
                update_session(d, id, |c| c.status = ConsultationStatus::Completed.as_str().to_string())
            });
            notice.set(Some(Notice::success("Appointment marked as completed")));
        });
    });

    let reschedule = move |id: i64| {
        reschedule_target.set(Some(id));
        reschedule_open.set(true);
    };

    view! {
        <Toast notice=notice />
        <PageHeader title="My Appointments" subtitle="Manage your upcoming and past consultations" />
        <ErrorAlert message=dashboard.error />
        <ErrorAlert message=action_error />

        <Show when=move || !dashboard.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-6">
                <StatCard
                    title="Today's Appointments"
                    value=Signal::derive(move || sessions.with(|s| count_on_day(s, Timestamp::now())).to_string())
                    tone=Tone::Info
                />
                <StatCard
                    title="Upcoming"
                    value=Signal::derive(move || dashboard.value().upcoming_consultations.len().to_string())
                    tone=Tone::Warning
                />
                <StatCard
                    title="Completed"
                    value=Signal::derive(move || dashboard.value().completed_consultations.to_string())
                    tone=Tone::Success
                />
                <StatCard
                    title="Total Clients"
                    value=Signal::derive(move || dashboard.data.with(|d| d.as_ref().map_or(0, |d| d.clients().len())).to_string())
                />
            </div>

            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Client"</th>
                            <th>"Date & Time"</th>
                            <th>"Notes"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || sessions.with(Vec::is_empty)>
                            <EmptyRow colspan=5 text="No appointments found" />
                        </Show>
                        <For
                            each=move || sessions.get()
                            key=|c| (c.id, c.status.clone(), c.scheduled_at)
                            children=move |session: DashboardConsultation| {
                                let id = session.id;
                                let actionable = is_actionable(&session);
                                view! {
                                    <tr class="hover">
                                        <td class="font-semibold">{session.client_name.clone()}</td>
                                        <td>{session.scheduled_at.map(|t| t.format_date_time()).unwrap_or_default()}</td>
                                        <td class="text-sm text-base-content/60 max-w-xs truncate">
                                            {session.notes.clone().unwrap_or_else(|| "-".to_string())}
                                        </td>
                                        <td><StatusBadge status=session.status.clone() /></td>
                                        <td>
                                            <Show when=move || actionable>
                                                <div class="flex gap-1">
                                                    <button class="btn btn-success btn-xs gap-1" on:click=move |_| complete.run(id)>
                                                        <Check attr:class="h-3 w-3" />
                                                        "Complete"
                                                    </button>
                                                    <button class="btn btn-outline btn-xs gap-1" on:click=move |_| reschedule(id)>
                                                        <Calendar attr:class="h-3 w-3" />
                                                        "Reschedule"
                                                    </button>
                                                </div>
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

        <RescheduleDialog open=reschedule_open target=reschedule_target dashboard=dashboard notice=notice />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(status: &str) -> DashboardConsultation {
        DashboardConsultation {
            id: 1,
            client_name: "Asha".into(),
            scheduled_at: None,
            status: status.into(),
            notes: None,
        }
    }

    #[test]
    fn only_open_sessions_have_actions() {
        assert!(is_actionable(&session("scheduled")));
        assert!(!is_actionable(&session("completed")));
        assert!(!is_actionable(&session("cancelled")));
        assert!(!is_actionable(&session("unknown")));
    }
}
