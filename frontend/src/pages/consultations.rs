//! 咨询页
//!
//! 普通用户：预约、取消、评价；顾问：查看自己负责的咨询（来自顾问仪表盘）。

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::icons::{Calendar, Plus, Star, X};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, non_empty, submit};
use crate::web::router::Link;
use fitlife_shared::admin::DashboardConsultation;
use fitlife_shared::consultation::ConsultationCreate;
use fitlife_shared::protocol::{
    BookConsultation, CancelConsultation, GetConsultantDashboard, ListConsultants,
    ListConsultations, RateConsultation,
};
use fitlife_shared::{
    Consultant, Consultation, ConsultationStatus, ConsultantDashboard, Role, Timestamp, status_tone,
};
use leptos::prelude::*;

const DEFAULT_DURATION: u32 = 60;

#[derive(Debug, Clone, PartialEq)]
struct BookingForm {
    consultant_id: String,
    scheduled_time: String,
    duration_minutes: String,
    user_health_data: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            consultant_id: String::new(),
            scheduled_time: String::new(),
            duration_minutes: DEFAULT_DURATION.to_string(),
            user_health_data: String::new(),
        }
    }
}

impl BookingForm {
    fn to_create(&self) -> Result<ConsultationCreate, &'static str> {
        let consultant_id = self
            .consultant_id
            .parse::<i64>()
            .map_err(|_| "Please select a consultant")?;
        let scheduled_time =
            Timestamp::parse(&self.scheduled_time).ok_or("Please choose a date and time")?;
        let duration_minutes = self
            .duration_minutes
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|d| *d > 0)
            .ok_or("Duration must be a positive number of minutes")?;
        Ok(ConsultationCreate {
            consultant_id,
            scheduled_time,
            duration_minutes,
            user_health_data: non_empty(self.user_health_data.clone()),
        })
    }
}

#[component]
fn RatingDialog(
    open: RwSignal<bool>,
    target: RwSignal<Option<i64>>,
    consultations: Remote<Vec<Consultation>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let (rating, set_rating) = signal(5u8);
    let (feedback, set_feedback) = signal(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = target.get_untracked() else {
            return;
        };
        let rating = rating.get_untracked();
        let feedback = non_empty(feedback.get_untracked());
        let req = RateConsultation {
            id,
            rating,
            feedback: feedback.clone(),
        };
        submit(&api, req, error, move |_| {
            consultations.patch(|list| {
                if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                    c.rating = Some(rating);
                    c.feedback = feedback;
                }
            });
            open.set(false);
            set_feedback.set(String::new());
            notice.set(Some(Notice::success("Thank you for your feedback!")));
        });
    };

    view! {
        <Modal open=open title="Rate Consultation">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <div class="flex gap-1 justify-center">
                    {(1..=5u8)
                        .map(|n| view! {
                            <button
                                type="button"
                                class="btn btn-ghost btn-sm px-1"
                                class:text-warning={move || rating.get() >= n}
                                on:click=move |_| set_rating.set(n)
                            >
                                <Star attr:class="h-6 w-6" />
                            </button>
                        })
                        .collect_view()}
                </div>
                <textarea
                    class="textarea textarea-bordered"
                    rows="3"
                    placeholder="Share your experience (optional)"
                    prop:value=feedback
                    on:input=move |ev| set_feedback.set(event_target_value(&ev))
                ></textarea>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Submit Rating"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn BookingDialog(
    open: RwSignal<bool>,
    consultations: Remote<Vec<Consultation>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let consultants = Remote::<Vec<Consultant>>::new();
    fetch(&api, ListConsultants::default(), consultants);

    let form = RwSignal::new(BookingForm::default());
    let error = RwSignal::new(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    Effect::new(move |_| {
        if error.get().is_some() {
            set_submitting.set(false);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let create = match form.with_untracked(BookingForm::to_create) {
            Ok(create) => create,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        set_submitting.set(true);
        submit(&api, BookConsultation(create), error, move |booked| {
            consultations.patch(|list| list.insert(0, booked));
            form.set(BookingForm::default());
            set_submitting.set(false);
            open.set(false);
            notice.set(Some(Notice::success("Consultation booked successfully!")));
        });
    };

    let bind = move |set: fn(&mut BookingForm, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| set(f, value));
        }
    };

    view! {
        <Modal open=open title="Book New Consultation" class="max-w-lg">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <ErrorAlert message=consultants.error />
                <label class="form-control">
                    <span class="label-text mb-1">"Consultant"</span>
                    <select
                        class="select select-bordered"
                        prop:value=move || form.with(|f| f.consultant_id.clone())
                        on:change=bind(|f, v| f.consultant_id = v)
                    >
                        <option value="" disabled=true>"Select a consultant"</option>
                        {move || consultants
                            .value()
                            .into_iter()
                            .filter(|c| c.is_available)
                            .map(|c| view! {
                                <option value=c.id.to_string()>
                                    {format!("{} - {}", c.display_name(), c.specialization)}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Scheduled Time"</span>
                    <input
                        type="datetime-local"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.scheduled_time.clone())
                        on:input=bind(|f, v| f.scheduled_time = v)
                    />
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Duration (minutes)"</span>
                    <input
                        type="number"
                        min="15"
                        step="15"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.duration_minutes.clone())
                        on:input=bind(|f, v| f.duration_minutes = v)
                    />
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Health Data (Optional)"</span>
                    <textarea
                        class="textarea textarea-bordered"
                        rows="3"
                        placeholder="Share any relevant health information..."
                        prop:value=move || form.with(|f| f.user_health_data.clone())
                        on:input=bind(|f, v| f.user_health_data = v)
                    ></textarea>
                </label>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Booking..." } else { "Book Consultation" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

/// 普通用户（以及管理员）视角：自己的咨询列表
#[component]
fn MemberConsultations(can_book: bool) -> impl IntoView {
    let api = use_api();
    let consultations = Remote::<Vec<Consultation>>::new();
    fetch(&api, ListConsultations, consultations);

    let booking_open = RwSignal::new(false);
    let rating_open = RwSignal::new(false);
    let rating_target = RwSignal::new(Option::<i64>::None);
    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);

    let cancel = Callback::new(move |id: i64| {
        if !confirm("Cancel this consultation?") {
            return;
        }
        submit(&api, CancelConsultation { id }, action_error, move |_| {
            consultations.patch(|list| {
                if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                    c.status = ConsultationStatus::Cancelled;
                }
            });
            notice.set(Some(Notice::success("Consultation cancelled")));
        });
    });

    let rate = move |id: i64| {
        rating_target.set(Some(id));
        rating_open.set(true);
    };

    let book_button = move || {
        can_book.then(|| view! {
            <button class="btn btn-primary gap-2" on:click=move |_| booking_open.set(true)>
                <Plus attr:class="h-4 w-4" />
                "Book Consultation"
            </button>
        })
    };

    view! {
        <Toast notice=notice />
        <PageHeader title="My Consultations" subtitle="Book and manage your expert consultations">
            {book_button()}
        </PageHeader>
        <ErrorAlert message=consultations.error />
        <ErrorAlert message=action_error />

        <Show when=move || !consultations.is_loading() fallback=|| view! { <PageSpinner /> }>
            <Show
                when=move || !consultations.value().is_empty()
                fallback=move || view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center py-16">
                            <Calendar attr:class="h-16 w-16 text-base-content/30" />
                            <h2 class="text-2xl font-bold">"No consultations yet"</h2>
                            <p class="text-base-content/60 mb-4">"Book your first consultation with our expert professionals"</p>
                            {book_button()}
                        </div>
                    </div>
                }
            >
                <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Consultant"</th>
                                <th>"Date & Time"</th>
                                <th>"Duration"</th>
                                <th>"Status"</th>
                                <th>"Rating"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || consultations.value()
                                key=|c| (c.id, c.status, c.rating)
                                children=move |c: Consultation| {
                                    let id = c.id;
                                    let specialization = c
                                        .consultant
                                        .as_ref()
                                        .map(|x| x.specialization.clone())
                                        .unwrap_or_default();
                                    let can_cancel = c.status == ConsultationStatus::Scheduled;
                                    let can_rate = c.status == ConsultationStatus::Completed && c.rating.is_none();
                                    view! {
                                        <tr>
                                            <td>
                                                <div class="font-semibold">{c.consultant_name()}</div>
                                                <div class="text-xs text-base-content/60">{specialization}</div>
                                            </td>
                                            <td>{c.scheduled_time.format_date_time()}</td>
                                            <td>{format!("{} minutes", c.duration_minutes)}</td>
                                            <td><span class=c.status.tone().badge_class()>{c.status.as_str()}</span></td>
                                            <td>
                                                {match c.rating {
                                                    Some(r) => view! { <span>{format!("{r}/5")}</span> }.into_any(),
                                                    None => view! { <span class="text-base-content/50">"Not rated"</span> }.into_any(),
                                                }}
                                            </td>
                                            <td class="flex gap-1">
                                                <Show when=move || can_cancel>
                                                    <button class="btn btn-ghost btn-xs text-error gap-1" on:click=move |_| cancel.run(id)>
                                                        <X attr:class="h-4 w-4" />
                                                        "Cancel"
                                                    </button>
                                                </Show>
                                                <Show when=move || can_rate>
                                                    <button class="btn btn-ghost btn-xs text-warning gap-1" on:click=move |_| rate(id)>
                                                        <Star attr:class="h-4 w-4" />
                                                        "Rate"
                                                    </button>
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
        </Show>

        {can_book.then(|| view! {
            <BookingDialog open=booking_open consultations=consultations notice=notice />
        })}
        <RatingDialog open=rating_open target=rating_target consultations=consultations notice=notice />
    }
}

/// 顾问视角：仪表盘中的近期与即将到来的咨询
#[component]
fn ConsultantSessions() -> impl IntoView {
    let api = use_api();
    let dashboard = Remote::<ConsultantDashboard>::new();
    fetch(&api, GetConsultantDashboard, dashboard);

    let sessions = move || dashboard.value().all_consultations();

    view! {
        <PageHeader title="My Consultations" subtitle="Manage consultations you provide to clients">
            <Link to="/consultant/appointments" class="btn btn-primary btn-sm">"Manage Appointments"</Link>
        </PageHeader>
        <ErrorAlert message=dashboard.error />
        <Show when=move || !dashboard.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr><th>"Client"</th><th>"Date & Time"</th><th>"Status"</th><th>"Notes"</th></tr>
                    </thead>
                    <tbody>
                        <For
                            each=sessions
                            key=|c| c.id
                            children=|c: DashboardConsultation| view! {
                                <tr>
                                    <td class="font-semibold">{c.client_name.clone()}</td>
                                    <td>{c.scheduled_at.map(|t| t.format_date_time()).unwrap_or_default()}</td>
                                    <td><span class=status_tone(&c.status).badge_class()>{c.status.clone()}</span></td>
                                    <td class="max-w-xs truncate">{c.notes.clone().unwrap_or_default()}</td>
                                </tr>
                            }
                        />
                        <Show when=move || sessions().is_empty()>
                            <EmptyRow
                                colspan=4
                                text="You haven't provided any consultations yet. Clients will book sessions with you."
                            />
                        </Show>
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

#[component]
pub fn ConsultationsPage() -> impl IntoView {
    let user = use_auth().user();
    let role = Memo::new(move |_| user.with(|u| u.as_ref().map(|u| u.role)));

    move || match role.get() {
        Some(Role::Consultant) => view! { <ConsultantSessions /> }.into_any(),
        Some(role) => view! { <MemberConsultations can_book={role == Role::User} /> }.into_any(),
        None => view! { <PageSpinner /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookingForm {
        BookingForm {
            consultant_id: "4".into(),
            scheduled_time: "2024-06-01T09:30".into(),
            user_health_data: " ".into(),
            ..BookingForm::default()
        }
    }

    #[test]
    fn booking_form_builds_request() {
        let create = form().to_create().unwrap();
        assert_eq!(create.consultant_id, 4);
        assert_eq!(create.duration_minutes, DEFAULT_DURATION);
        assert_eq!(create.scheduled_time.to_input_value(), "2024-06-01T09:30");
        assert_eq!(create.user_health_data, None);
    }

    #[test]
    fn booking_form_rejects_missing_fields() {
        let mut f = form();
        f.consultant_id.clear();
        assert_eq!(f.to_create(), Err("Please select a consultant"));

        let mut f = form();
        f.scheduled_time = "tomorrow".into();
        assert_eq!(f.to_create(), Err("Please choose a date and time"));

        let mut f = form();
        f.duration_minutes = "0".into();
        assert!(f.to_create().is_err());
    }
}
