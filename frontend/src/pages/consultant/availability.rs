//! 顾问可预约时段：列表、添加、删除

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::icons::{Plus, Trash};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, submit};
use fitlife_shared::consultation::SlotInput;
use fitlife_shared::protocol::{CreateAvailability, DeleteAvailability, ListAvailability, ListConsultants};
use fitlife_shared::{AvailabilitySlot, Consultant, Timestamp};
use leptos::prelude::*;

/// 解析表单中的两个 `datetime-local` 值
fn slot_from_inputs(start: &str, end: &str) -> Result<SlotInput, &'static str> {
    let start_time = Timestamp::parse(start).ok_or("Please choose a start time")?;
    let end_time = Timestamp::parse(end).ok_or("Please choose an end time")?;
    let slot = SlotInput { start_time, end_time };
    slot.validate()?;
    Ok(slot)
}

#[component]
fn AddSlotDialog(
    open: RwSignal<bool>,
    consultant_id: Signal<Option<i64>>,
    slots: Remote<Vec<AvailabilitySlot>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let (start, set_start) = signal(String::new());
    let (end, set_end) = signal(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(consultant_id) = consultant_id.get_untracked() else {
            error.set(Some("Consultant profile not found".to_string()));
            return;
        };
        let slot = match slot_from_inputs(&start.get_untracked(), &end.get_untracked()) {
            Ok(slot) => slot,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        submit(&api, CreateAvailability { consultant_id, slot }, error, move |created| {
            slots.patch(|list| {
                list.push(created);
                list.sort_by_key(|s| s.start_time);
            });
            open.set(false);
            set_start.set(String::new());
            set_end.set(String::new());
            notice.set(Some(Notice::success("Availability slot added")));
        });
    };

    let time_input = move |label: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <label class="form-control">
                <span class="label-text mb-1">{label}</span>
                <input
                    type="datetime-local"
                    class="input input-bordered"
                    required=true
                    prop:value=value
                    on:input=move |ev| set.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <Modal open=open title="Add Availability Slot">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                {time_input("Start Date & Time", start, set_start)}
                {time_input("End Date & Time", end, set_end)}
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Add Slot"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn ConsultantAvailabilityPage() -> impl IntoView {
    let api = use_api();
    let user = use_auth().user();
    let consultants = Remote::<Vec<Consultant>>::new();
    let slots = Remote::<Vec<AvailabilitySlot>>::new();
    fetch(&api, ListConsultants::default(), consultants);

    // 顾问档案通过 user_id 关联当前用户
    let consultant_id = Memo::new(move |_| {
        let me = user.with(|u| u.as_ref().map(|u| u.id))?;
        consultants.data.with(|list| {
            list.as_ref()
                .and_then(|list| list.iter().find(|c| c.user_id == me))
                .map(|c| c.id)
        })
    });

    let list_api = api.clone();
    Effect::new(move |_| {
        if consultants.is_loading() {
            return;
        }
        match consultant_id.get() {
            Some(consultant_id) => fetch(&list_api, ListAvailability { consultant_id }, slots),
            None => {
                slots.loading.set(false);
                if consultants.error.with_untracked(Option::is_none) {
                    slots.error.set(Some("Consultant profile not found".to_string()));
                }
            }
        }
    });

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let add_open = RwSignal::new(false);

    let remove = Callback::new(move |slot_id: i64| {
        if !confirm("Are you sure you want to delete this availability slot?") {
            return;
        }
        submit(&api, DeleteAvailability { slot_id }, action_error, move |_| {
            slots.patch(|list| list.retain(|s| s.id != slot_id));
            notice.set(Some(Notice::success("Availability slot deleted")));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="Manage Availability" subtitle="Set your available time slots for consultations">
            <button
                class="btn btn-primary gap-2"
                disabled=move || consultant_id.get().is_none()
                on:click=move |_| add_open.set(true)
            >
                <Plus attr:class="h-4 w-4" />
                "Add Slot"
            </button>
        </PageHeader>
        <ErrorAlert message=consultants.error />
        <ErrorAlert message=slots.error />
        <ErrorAlert message=action_error />

        <Show when=move || !consultants.is_loading() && !slots.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Start Date & Time"</th>
                            <th>"End Date & Time"</th>
                            <th>"Duration"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || slots.value().is_empty()>
                            <EmptyRow colspan=5 text="No availability slots yet. Add one to start accepting bookings." />
                        </Show>
                        <For
                            each=move || slots.value()
                            key=|s| s.id
                            children=move |slot: AvailabilitySlot| {
                                let id = slot.id;
                                let booked = slot.is_booked;
                                view! {
                                    <tr class="hover">
                                        <td>{slot.start_time.format_date_time()}</td>
                                        <td>{slot.end_time.format_date_time()}</td>
                                        <td>{format!("{} min", slot.duration_minutes())}</td>
                                        <td>
                                            <span class={if booked { "badge badge-warning" } else { "badge badge-success" }}>
                                                {if booked { "Booked" } else { "Available" }}
                                            </span>
                                        </td>
                                        <td>
                                            <button
                                                class="btn btn-ghost btn-xs text-error"
                                                title="Delete slot"
                                                disabled=booked
                                                on:click=move |_| remove.run(id)
                                            >
                                                <Trash attr:class="h-4 w-4" />
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>

        <AddSlotDialog
            open=add_open
            consultant_id=Signal::derive(move || consultant_id.get())
            slots=slots
            notice=notice
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_inputs_are_validated() {
        let slot = slot_from_inputs("2024-06-01T09:00", "2024-06-01T10:30").unwrap();
        assert_eq!((slot.end_time.inner() - slot.start_time.inner()).num_minutes(), 90);

        assert_eq!(
            slot_from_inputs("2024-06-01T10:00", "2024-06-01T09:00"),
            Err("End time must be after start time")
        );
        assert_eq!(slot_from_inputs("", "2024-06-01T09:00"), Err("Please choose a start time"));
    }
}
