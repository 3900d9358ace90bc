use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::{PageHeader, Stars};
use crate::components::form::TextAreaField;
use crate::components::icons::{Pencil, Trash};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, non_empty, submit};
use fitlife_shared::consultation::ConsultationUpdate;
use fitlife_shared::protocol::{
    AdminDeleteConsultation, AdminListConsultations, AdminUpdateConsultation, SetConsultationStatus,
};
use fitlife_shared::{Consultation, ConsultationStatus};
use leptos::prelude::*;

/// 编辑对话框只修改状态与备注
fn edit_update(status: ConsultationStatus, notes: String) -> ConsultationUpdate {
    ConsultationUpdate {
        status: Some(status),
        notes: non_empty(notes),
        ..Default::default()
    }
}

#[component]
fn EditDialog(
    open: RwSignal<bool>,
    target: RwSignal<Option<i64>>,
    status: RwSignal<ConsultationStatus>,
    notes: RwSignal<String>,
    consultations: Remote<Vec<Consultation>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = target.get_untracked() else {
            return;
        };
        let update = edit_update(status.get_untracked(), notes.get_untracked());
        let patch = update.clone();
        submit(&api, AdminUpdateConsultation { id, update }, error, move |_| {
            consultations.patch(|list| {
                if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                    if let Some(status) = patch.status {
                        c.status = status;
                    }
                    if patch.notes.is_some() {
                        c.notes = patch.notes;
                    }
                }
            });
            open.set(false);
            notice.set(Some(Notice::success("Consultation updated successfully")));
        });
    };

    view! {
        <Modal open=open title="Edit Consultation">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <label class="form-control w-full">
                    <span class="label-text mb-1">"Status"</span>
                    <select
                        class="select select-bordered w-full"
                        prop:value=move || status.get().as_str()
                        on:change=move |ev| {
                            if let Some(s) = ConsultationStatus::parse(&event_target_value(&ev)) {
                                status.set(s);
                            }
                        }
                    >
                        {ConsultationStatus::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <TextAreaField label="Notes" value=notes rows=4 />
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn AdminConsultationsPage() -> impl IntoView {
    let api = use_api();
    let consultations = Remote::<Vec<Consultation>>::new();
    fetch(&api, AdminListConsultations, consultations);

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let edit_open = RwSignal::new(false);
    let edit_target = RwSignal::new(Option::<i64>::None);
    let edit_status = RwSignal::new(ConsultationStatus::Scheduled);
    let edit_notes = RwSignal::new(String::new());

    let open_edit = move |c: &Consultation| {
        edit_target.set(Some(c.id));
        edit_status.set(c.status);
        edit_notes.set(c.notes.clone().unwrap_or_default());
        edit_open.set(true);
    };

    let set_status = Callback::new({
        let api = api.clone();
        move |(id, status): (i64, ConsultationStatus)| {
            submit(&api, SetConsultationStatus { id, status }, action_error, move |_| {
                consultations.patch(|list| {
                    if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                        c.status = status;
                    }
                });
                notice.set(Some(Notice::success("Consultation status updated successfully")));
            });
        }
    });

    let remove = Callback::new(move |id: i64| {
        if !confirm("Are you sure you want to delete this consultation?") {
            return;
        }
        submit(&api, AdminDeleteConsultation { id }, action_error, move |_| {
            consultations.patch(|list| list.retain(|c| c.id != id));
            notice.set(Some(Notice::success("Consultation deleted successfully")));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="Consultation Management" subtitle="Oversee every booked session on the platform" />
        <ErrorAlert message=consultations.error />
        <ErrorAlert message=action_error />

        <Show when=move || !consultations.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Consultation"</th>
                            <th>"User"</th>
                            <th>"Consultant"</th>
                            <th>"Date & Time"</th>
                            <th>"Status"</th>
                            <th>"Rating"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || consultations.value().is_empty()>
                            <EmptyRow colspan=7 text="No consultations found" />
                        </Show>
                        <For
                            each=move || consultations.value()
                            key=|c| (c.id, c.status, c.notes.clone())
                            children=move |c: Consultation| {
                                let id = c.id;
                                let current = c.status;
                                let stored = StoredValue::new(c.clone());
                                view! {
                                    <tr class="hover">
                                        <td>
                                            <p class="font-semibold">{format!("#{}", c.id)}</p>
                                            <p class="text-xs text-base-content/60">{format!("{} min", c.duration_minutes)}</p>
                                        </td>
                                        <td>{c.client_name()}</td>
                                        <td>{c.consultant_name()}</td>
                                        <td>{c.scheduled_time.format_date_time()}</td>
                                        <td>
                                            <select
                                                class=format!("select select-xs select-bordered {}", current.tone().text_class())
                                                prop:value=current.as_str()
                                                on:change=move |ev| {
                                                    if let Some(status) = ConsultationStatus::parse(&event_target_value(&ev)) {
                                                        if status != current {
                                                            set_status.run((id, status));
                                                        }
                                                    }
                                                }
                                            >
                                                {ConsultationStatus::ALL
                                                    .into_iter()
                                                    .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                                                    .collect_view()}
                                            </select>
                                        </td>
                                        <td>
                                            {match c.rating {
                                                Some(r) => view! { <Stars rating=f64::from(r) /> }.into_any(),
                                                None => view! { <span class="text-base-content/40">"-"</span> }.into_any(),
                                            }}
                                        </td>
                                        <td>
                                            <div class="flex gap-1">
                                                <button class="btn btn-ghost btn-xs" title="Edit" on:click=move |_| stored.with_value(|c| open_edit(c))>
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button class="btn btn-ghost btn-xs text-error" title="Delete" on:click=move |_| remove.run(id)>
                                                    <Trash attr:class="h-4 w-4" />
                                                </button>
                                            </div>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>

        <EditDialog
            open=edit_open
            target=edit_target
            status=edit_status
            notes=edit_notes
            consultations=consultations
            notice=notice
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_sends_status_and_trimmed_notes() {
        let update = edit_update(ConsultationStatus::Completed, "  follow up in 2 weeks ".into());
        assert_eq!(update.status, Some(ConsultationStatus::Completed));
        assert_eq!(update.notes.as_deref(), Some("follow up in 2 weeks"));
        assert_eq!(update.scheduled_time, None);

        let body = serde_json::to_value(edit_update(ConsultationStatus::Scheduled, String::new())).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "scheduled" }));
    }
}
