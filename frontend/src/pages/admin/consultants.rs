use super::{Editing, upsert};
use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::{PageHeader, Stars};
use crate::components::form::{TextAreaField, TextField};
use crate::components::icons::{Pencil, Plus, Trash};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, parse_opt, submit};
use fitlife_shared::consultation::{ConsultantInput, SPECIALIZATIONS};
use fitlife_shared::protocol::{
    AdminCreateConsultant, AdminDeleteConsultant, AdminListConsultants, AdminUpdateConsultant,
    SetConsultantAvailability,
};
use fitlife_shared::{Consultant, format_amount};
use leptos::prelude::*;

#[derive(Clone, Copy)]
struct ConsultantForm {
    user_id: RwSignal<String>,
    specialization: RwSignal<String>,
    experience_years: RwSignal<String>,
    qualifications: RwSignal<String>,
    bio: RwSignal<String>,
    hourly_rate: RwSignal<String>,
}

impl ConsultantForm {
    fn new() -> Self {
        Self {
            user_id: RwSignal::new(String::new()),
            specialization: RwSignal::new(String::new()),
            experience_years: RwSignal::new(String::new()),
            qualifications: RwSignal::new(String::new()),
            bio: RwSignal::new(String::new()),
            hourly_rate: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        for field in [
            self.user_id,
            self.specialization,
            self.experience_years,
            self.qualifications,
            self.bio,
            self.hourly_rate,
        ] {
            field.set(String::new());
        }
    }

    fn load(&self, c: &Consultant) {
        self.user_id.set(c.user_id.to_string());
        self.specialization.set(c.specialization.clone());
        self.experience_years.set(c.experience_years.to_string());
        self.qualifications.set(c.qualifications.clone());
        self.bio.set(c.bio.clone());
        self.hourly_rate.set(c.hourly_rate.to_string());
    }

    /// 新建时需要关联用户 id；编辑时不发送
    fn to_input(&self, editing: Editing) -> Result<ConsultantInput, &'static str> {
        let user_id = match editing {
            Editing::New => Some(
                parse_opt::<i64>(&self.user_id.get_untracked()).ok_or("A valid user ID is required")?,
            ),
            Editing::Existing(_) => None,
        };
        let specialization = self.specialization.get_untracked().trim().to_string();
        if specialization.is_empty() {
            return Err("Specialization is required");
        }
        let hourly_rate = parse_opt::<f64>(&self.hourly_rate.get_untracked())
            .filter(|r| *r >= 0.0)
            .ok_or("Hourly rate must be a non-negative number")?;
        Ok(ConsultantInput {
            user_id,
            specialization,
            experience_years: parse_opt(&self.experience_years.get_untracked()).unwrap_or(0),
            qualifications: self.qualifications.get_untracked().trim().to_string(),
            bio: self.bio.get_untracked().trim().to_string(),
            hourly_rate,
        })
    }
}

#[component]
fn ConsultantDialog(
    open: RwSignal<bool>,
    editing: RwSignal<Editing>,
    form: ConsultantForm,
    consultants: Remote<Vec<Consultant>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let mode = editing.get_untracked();
        let input = match form.to_input(mode) {
            Ok(input) => input,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        let on_saved = move |saved: Consultant, text: &'static str| {
            consultants.patch(|list| upsert(list, saved, |c| c.id));
            open.set(false);
            form.reset();
            notice.set(Some(Notice::success(text)));
        };
        match mode {
            Editing::New => submit(&api, AdminCreateConsultant(input), error, move |c| {
                on_saved(c, "Consultant created successfully")
            }),
            Editing::Existing(id) => submit(&api, AdminUpdateConsultant { id, input }, error, move |c| {
                on_saved(c, "Consultant updated successfully")
            }),
        }
    };

    view! {
        <Modal open=open title=Signal::derive(move || editing.get().title("Consultant")) class="max-w-2xl">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <div class="grid sm:grid-cols-2 gap-3">
                    <Show when=move || editing.get() == Editing::New>
                        <TextField label="User ID" value=form.user_id kind="number" required=true />
                    </Show>
                    <label class="form-control w-full">
                        <span class="label-text mb-1">"Specialization"</span>
                        <select
                            class="select select-bordered w-full"
                            required=true
                            prop:value=move || form.specialization.get()
                            on:change=move |ev| form.specialization.set(event_target_value(&ev))
                        >
                            <option value="">"Select specialization"</option>
                            {SPECIALIZATIONS
                                .iter()
                                .map(|s| view! { <option value=*s>{*s}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <TextField label="Experience (Years)" value=form.experience_years kind="number" />
                    <TextField label="Hourly Rate (₹)" value=form.hourly_rate kind="number" required=true />
                </div>
                <TextAreaField label="Qualifications" value=form.qualifications rows=2 />
                <TextAreaField label="Bio" value=form.bio rows=4 />
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn AdminConsultantsPage() -> impl IntoView {
    let api = use_api();
    let consultants = Remote::<Vec<Consultant>>::new();
    fetch(&api, AdminListConsultants, consultants);

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Editing::New);
    let form = ConsultantForm::new();

    let open_edit = move |c: &Consultant| {
        form.load(c);
        editing.set(Editing::Existing(c.id));
        dialog_open.set(true);
    };

    let toggle = Callback::new({
        let api = api.clone();
        move |(id, is_available): (i64, bool)| {
            submit(&api, SetConsultantAvailability { id, is_available }, action_error, move |_| {
                consultants.patch(|list| {
                    if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                        c.is_available = is_available;
                    }
                });
                notice.set(Some(Notice::success("Consultant status updated successfully")));
            });
        }
    });

    let remove = Callback::new(move |id: i64| {
        if !confirm("Are you sure you want to delete this consultant?") {
            return;
        }
        submit(&api, AdminDeleteConsultant { id }, action_error, move |_| {
            consultants.patch(|list| list.retain(|c| c.id != id));
            notice.set(Some(Notice::success("Consultant deleted successfully")));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="Consultant Management" subtitle="Manage consultant profiles and availability">
            <button
                class="btn btn-primary gap-2"
                on:click=move |_| {
                    form.reset();
                    editing.set(Editing::New);
                    dialog_open.set(true);
                }
            >
                <Plus attr:class="h-4 w-4" />
                "Add Consultant"
            </button>
        </PageHeader>
        <ErrorAlert message=consultants.error />
        <ErrorAlert message=action_error />

        <Show when=move || !consultants.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Consultant"</th>
                            <th>"Specialization"</th>
                            <th>"Experience"</th>
                            <th>"Rating"</th>
                            <th>"Rate"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || consultants.value().is_empty()>
                            <EmptyRow colspan=7 text="No consultants yet" />
                        </Show>
                        <For
                            each=move || consultants.value()
                            key=|c| (c.id, c.is_available, c.specialization.clone(), c.hourly_rate.to_bits(), c.experience_years)
                            children=move |c: Consultant| {
                                let id = c.id;
                                let available = c.is_available;
                                let stored = StoredValue::new(c.clone());
                                view! {
                                    <tr class="hover">
                                        <td>
                                            <p class="font-semibold">{c.display_name()}</p>
                                            <p class="text-xs text-base-content/60">
                                                {c.user.as_ref().map(|u| u.email.clone()).unwrap_or_default()}
                                            </p>
                                        </td>
                                        <td>{c.specialization.clone()}</td>
                                        <td>{format!("{} years", c.experience_years)}</td>
                                        <td><Stars rating=c.rating /></td>
                                        <td>{format!("₹{}/hr", format_amount(c.hourly_rate))}</td>
                                        <td>
                                            <button
                                                class={if available { "badge badge-success cursor-pointer" } else { "badge badge-ghost cursor-pointer" }}
                                                title="Toggle availability"
                                                on:click=move |_| toggle.run((id, !available))
                                            >
                                                {if available { "Available" } else { "Unavailable" }}
                                            </button>
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

        <ConsultantDialog open=dialog_open editing=editing form=form consultants=consultants notice=notice />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_consultant_requires_user_id() {
        let owner = Owner::new();
        owner.set();

        let form = ConsultantForm::new();
        form.specialization.set("Yoga Instructor".into());
        form.hourly_rate.set("800".into());
        assert_eq!(form.to_input(Editing::New), Err("A valid user ID is required"));

        form.user_id.set("12".into());
        let input = form.to_input(Editing::New).unwrap();
        assert_eq!(input.user_id, Some(12));
        assert_eq!(input.experience_years, 0);

        let edit = form.to_input(Editing::Existing(5)).unwrap();
        assert_eq!(edit.user_id, None);
        assert_eq!(edit.hourly_rate, 800.0);
    }

    #[test]
    fn rate_must_be_valid() {
        let owner = Owner::new();
        owner.set();

        let form = ConsultantForm::new();
        form.specialization.set("Dietitian".into());
        form.hourly_rate.set("-1".into());
        assert_eq!(
            form.to_input(Editing::Existing(1)),
            Err("Hourly rate must be a non-negative number")
        );
    }
}
