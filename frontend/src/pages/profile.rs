use crate::api::use_api;
use crate::auth::{update_profile, use_auth};
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::icons::{Pencil, X};
use crate::components::spinner::PageSpinner;
use crate::pages::{non_empty, parse_opt};
use crate::web::spawn_scoped;
use fitlife_shared::health::{ACTIVITY_LEVELS, GENDERS, GOALS, humanize};
use fitlife_shared::user::UserUpdate;
use fitlife_shared::{BmiCategory, User};
use leptos::prelude::*;

/// 资料表单的输入文本
#[derive(Debug, Clone, Default, PartialEq)]
struct ProfileForm {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    age: String,
    gender: String,
    height: String,
    weight: String,
    activity_level: String,
    goal: String,
}

impl ProfileForm {
    fn from_user(user: &User) -> Self {
        let text = |v: Option<String>| v.unwrap_or_default();
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: text(user.phone.clone()),
            age: user.age.map(|a| a.to_string()).unwrap_or_default(),
            gender: text(user.gender.clone()),
            height: num(user.height),
            weight: num(user.weight),
            activity_level: text(user.activity_level.clone()),
            goal: text(user.goal.clone()),
        }
    }

    fn to_update(&self) -> UserUpdate {
        UserUpdate {
            first_name: non_empty(self.first_name.clone()),
            last_name: non_empty(self.last_name.clone()),
            email: non_empty(self.email.clone()),
            phone: non_empty(self.phone.clone()),
            age: parse_opt(&self.age),
            gender: non_empty(self.gender.clone()),
            height: parse_opt(&self.height),
            weight: parse_opt(&self.weight),
            activity_level: non_empty(self.activity_level.clone()),
            goal: non_empty(self.goal.clone()),
        }
    }
}

/// 由身高（cm）与体重（kg）在本地估算 BMI，仅用于资料卡展示
fn local_bmi(user: &User) -> Option<f64> {
    let (height, weight) = (user.height?, user.weight?);
    (height > 0.0).then(|| weight / (height / 100.0).powi(2))
}

#[component]
fn TextInput(
    form: RwSignal<ProfileForm>,
    editing: ReadSignal<bool>,
    #[prop(into)] label: String,
    #[prop(optional, into)] input_type: Option<String>,
    get: fn(&ProfileForm) -> &String,
    set: fn(&mut ProfileForm, String),
) -> impl IntoView {
    view! {
        <label class="form-control">
            <span class="label-text mb-1">{label}</span>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                class="input input-bordered"
                disabled=move || !editing.get()
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}

#[component]
fn SelectInput(
    form: RwSignal<ProfileForm>,
    editing: ReadSignal<bool>,
    #[prop(into)] label: String,
    options: &'static [(&'static str, &'static str)],
    get: fn(&ProfileForm) -> &String,
    set: fn(&mut ProfileForm, String),
) -> impl IntoView {
    view! {
        <label class="form-control">
            <span class="label-text mb-1">{label}</span>
            <select
                class="select select-bordered"
                disabled=move || !editing.get()
                prop:value=move || form.with(|f| get(f).clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            >
                <option value="">"Not set"</option>
                {options
                    .iter()
                    .map(|(value, text)| view! { <option value=*value>{*text}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let user = auth.user();

    let form = RwSignal::new(ProfileForm::default());
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);
    let notice = RwSignal::new(Option::<Notice>::None);

    // 非编辑状态下表单跟随会话中的用户
    Effect::new(move |_| {
        if let Some(u) = user.get() {
            if !editing.get_untracked() {
                form.set(ProfileForm::from_user(&u));
            }
        }
    });

    let cancel = move |_| {
        if let Some(u) = user.get_untracked() {
            form.set(ProfileForm::from_user(&u));
        }
        error_msg.set(None);
        set_editing.set(false);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = form.with_untracked(ProfileForm::to_update);
        set_saving.set(true);
        error_msg.set(None);
        let api = api.clone();
        spawn_scoped(async move { update_profile(&auth, &api, update).await }, move |result| {
            match result {
                Ok(_) => {
                    set_editing.set(false);
                    notice.set(Some(Notice::success("Profile updated successfully")));
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Toast notice=notice />
        <PageHeader title="My Profile" subtitle="Manage your personal and health information">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <button class="btn btn-primary gap-2" on:click=move |_| set_editing.set(true)>
                        <Pencil attr:class="h-4 w-4" />
                        "Edit Profile"
                    </button>
                }
            >
                <button class="btn btn-ghost gap-2" on:click=cancel>
                    <X attr:class="h-4 w-4" />
                    "Cancel"
                </button>
            </Show>
        </PageHeader>

        <Show when=move || user.get().is_some() fallback=|| view! { <PageSpinner /> }>
            <div class="grid lg:grid-cols-3 gap-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body items-center text-center">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content rounded-full w-24">
                                <span class="text-3xl">{move || user.get().map(|u| u.initials()).unwrap_or_default()}</span>
                            </div>
                        </div>
                        <h2 class="card-title mt-2">{move || user.get().map(|u| u.display_name()).unwrap_or_default()}</h2>
                        <p class="text-base-content/60">{move || user.get().map(|u| format!("@{}", u.username)).unwrap_or_default()}</p>
                        <span class="badge badge-primary">{move || user.get().map(|u| u.role.label()).unwrap_or_default()}</span>
                        <div class="divider"></div>
                        {move || {
                            user.get().map(|u| {
                                let bmi = local_bmi(&u).map(|b| {
                                    let category = BmiCategory::from_bmi(b);
                                    view! {
                                        <div class="stat p-0">
                                            <div class="stat-title">"BMI"</div>
                                            <div class="stat-value text-2xl">{format!("{b:.1}")}</div>
                                            <div class=format!("stat-desc {}", category.tone().text_class())>{category.label()}</div>
                                        </div>
                                    }
                                });
                                let since = u
                                    .created_at
                                    .map(|t| format!("Member since {}", t.format_date()))
                                    .unwrap_or_default();
                                view! {
                                    {bmi}
                                    <div class="text-sm text-base-content/70 space-y-1 mt-2">
                                        {u.goal.as_deref().map(|g| view! { <p>{format!("Goal: {}", humanize(g))}</p> })}
                                        {u.activity_level.as_deref().map(|a| view! { <p>{format!("Activity: {}", humanize(a))}</p> })}
                                        <p>{since}</p>
                                    </div>
                                }
                            })
                        }}
                    </div>
                </div>

                <form class="card bg-base-100 shadow lg:col-span-2" on:submit=on_submit.clone()>
                    <div class="card-body gap-4">
                        <ErrorAlert message=error_msg />
                        <h3 class="font-bold">"Personal Information"</h3>
                        <div class="grid md:grid-cols-2 gap-3">
                            <TextInput form=form editing=editing label="First Name" get=|f| &f.first_name set=|f, v| f.first_name = v />
                            <TextInput form=form editing=editing label="Last Name" get=|f| &f.last_name set=|f, v| f.last_name = v />
                            <TextInput form=form editing=editing label="Email" input_type="email" get=|f| &f.email set=|f, v| f.email = v />
                            <TextInput form=form editing=editing label="Phone" input_type="tel" get=|f| &f.phone set=|f, v| f.phone = v />
                            <TextInput form=form editing=editing label="Age" input_type="number" get=|f| &f.age set=|f, v| f.age = v />
                            <SelectInput form=form editing=editing label="Gender" options=&GENDERS get=|f| &f.gender set=|f, v| f.gender = v />
                        </div>
                        <h3 class="font-bold mt-2">"Health Information"</h3>
                        <div class="grid md:grid-cols-2 gap-3">
                            <TextInput form=form editing=editing label="Height (cm)" input_type="number" get=|f| &f.height set=|f, v| f.height = v />
                            <TextInput form=form editing=editing label="Weight (kg)" input_type="number" get=|f| &f.weight set=|f, v| f.weight = v />
                            <SelectInput
                                form=form
                                editing=editing
                                label="Activity Level"
                                options=&ACTIVITY_LEVELS
                                get=|f| &f.activity_level
                                set=|f, v| f.activity_level = v
                            />
                            <SelectInput form=form editing=editing label="Goal" options=&GOALS get=|f| &f.goal set=|f, v| f.goal = v />
                        </div>
                        <Show when=move || editing.get()>
                            <div class="card-actions justify-end">
                                <button class="btn btn-primary" disabled=move || saving.get()>
                                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                                </button>
                            </div>
                        </Show>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlife_shared::Role;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({
            "id": 3,
            "username": "sam",
            "email": "sam@example.com",
            "first_name": "Sam",
            "last_name": "Lee",
            "height": 180.0,
            "weight": 81.0,
            "goal": "weight_loss",
            "role": Role::User.as_str(),
            "is_active": true,
            "is_verified": false
        }))
        .unwrap()
    }

    #[test]
    fn form_round_trips_user_fields() {
        let form = ProfileForm::from_user(&user());
        assert_eq!(form.height, "180");
        assert_eq!(form.phone, "");
        let update = form.to_update();
        assert_eq!(update.height, Some(180.0));
        assert_eq!(update.goal.as_deref(), Some("weight_loss"));
        assert_eq!(update.phone, None);
        assert_eq!(update.age, None);
    }

    #[test]
    fn bmi_from_profile_metrics() {
        let bmi = local_bmi(&user()).unwrap();
        assert!((bmi - 25.0).abs() < 0.01);
        let mut missing = user();
        missing.height = None;
        assert_eq!(local_bmi(&missing), None);
    }
}
