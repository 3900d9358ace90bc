use super::AuthCard;
use crate::api::use_api;
use crate::auth::{register, use_auth};
use crate::components::alert::ErrorAlert;
use crate::pages::{non_empty, parse_opt};
use crate::web::router::Link;
use crate::web::spawn_scoped;
use fitlife_shared::health::{ACTIVITY_LEVELS, GENDERS, GOALS};
use fitlife_shared::user::UserCreate;
use leptos::prelude::*;

const STEPS: [&str; 3] = ["Personal Information", "Account Details", "Health Profile"];

/// 注册表单的原始输入
#[derive(Debug, Clone, Default, PartialEq)]
struct RegisterForm {
    first_name: String,
    last_name: String,
    phone: String,
    age: String,
    gender: String,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
    height: String,
    weight: String,
    activity_level: String,
    goal: String,
}

impl RegisterForm {
    /// 当前步骤的必填项是否齐全
    fn step_complete(&self, step: usize) -> bool {
        match step {
            0 => !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty(),
            1 => {
                !self.username.trim().is_empty()
                    && !self.email.trim().is_empty()
                    && !self.password.is_empty()
                    && !self.confirm_password.is_empty()
            }
            _ => true,
        }
    }

    fn to_create(&self) -> Result<UserCreate, &'static str> {
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(UserCreate {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: non_empty(self.phone.clone()),
            age: parse_opt(&self.age),
            gender: non_empty(self.gender.clone()),
            height: parse_opt(&self.height),
            weight: parse_opt(&self.weight),
            activity_level: non_empty(self.activity_level.clone()),
            goal: non_empty(self.goal.clone()),
            role: None,
        })
    }
}

/// 文本输入，绑定到表单的某个字段
#[component]
fn Field(
    form: RwSignal<RegisterForm>,
    #[prop(into)] label: String,
    #[prop(optional, into)] input_type: Option<String>,
    get: fn(&RegisterForm) -> &String,
    set: fn(&mut RegisterForm, String),
) -> impl IntoView {
    view! {
        <label class="form-control">
            <span class="label-text mb-1">{label}</span>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                class="input input-bordered"
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
fn Choice(
    form: RwSignal<RegisterForm>,
    #[prop(into)] label: String,
    options: &'static [(&'static str, &'static str)],
    get: fn(&RegisterForm) -> &String,
    set: fn(&mut RegisterForm, String),
) -> impl IntoView {
    view! {
        <label class="form-control">
            <span class="label-text mb-1">{label}</span>
            <select
                class="select select-bordered"
                prop:value=move || form.with(|f| get(f).clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            >
                <option value="">"Select..."</option>
                {options
                    .iter()
                    .map(|(value, text)| view! { <option value=*value>{*text}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let form = RwSignal::new(RegisterForm::default());
    let (step, set_step) = signal(0usize);
    let (is_submitting, set_is_submitting) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    let last_step = STEPS.len() - 1;
    let can_advance = move || form.with(|f| f.step_complete(step.get()));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if step.get_untracked() < last_step {
            if can_advance() {
                set_step.update(|s| *s += 1);
            }
            return;
        }

        let data = match form.with_untracked(RegisterForm::to_create) {
            Ok(data) => data,
            Err(msg) => {
                error_msg.set(Some(msg.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        error_msg.set(None);
        let api = api.clone();
        spawn_scoped(async move { register(&auth, &api, data).await }, move |result| {
            if let Err(e) = result {
                log_warn!("[Register] Failed: {}", e);
                error_msg.set(Some(e.user_message()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <AuthCard
            title="Join FitLife360"
            subtitle="Start your personalized health journey today"
            class="max-w-2xl"
        >
            <ul class="steps w-full mb-4">
                {STEPS
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        view! {
                            <li class={move || if step.get() >= i { "step step-primary" } else { "step" }}>
                                {*label}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error_msg />

                {move || match step.get() {
                    0 => view! {
                        <div class="grid md:grid-cols-2 gap-3">
                            <Field form=form label="First Name" get=|f| &f.first_name set=|f, v| f.first_name = v />
                            <Field form=form label="Last Name" get=|f| &f.last_name set=|f, v| f.last_name = v />
                            <Field form=form label="Phone Number" input_type="tel" get=|f| &f.phone set=|f, v| f.phone = v />
                            <Field form=form label="Age" input_type="number" get=|f| &f.age set=|f, v| f.age = v />
                            <Choice form=form label="Gender" options=&GENDERS get=|f| &f.gender set=|f, v| f.gender = v />
                        </div>
                    }
                    .into_any(),
                    1 => view! {
                        <div class="grid gap-3">
                            <Field form=form label="Username" get=|f| &f.username set=|f, v| f.username = v />
                            <Field form=form label="Email Address" input_type="email" get=|f| &f.email set=|f, v| f.email = v />
                            <Field form=form label="Password" input_type="password" get=|f| &f.password set=|f, v| f.password = v />
                            <Field
                                form=form
                                label="Confirm Password"
                                input_type="password"
                                get=|f| &f.confirm_password
                                set=|f, v| f.confirm_password = v
                            />
                        </div>
                    }
                    .into_any(),
                    _ => view! {
                        <div class="grid md:grid-cols-2 gap-3">
                            <Field form=form label="Height (cm)" input_type="number" get=|f| &f.height set=|f, v| f.height = v />
                            <Field form=form label="Weight (kg)" input_type="number" get=|f| &f.weight set=|f, v| f.weight = v />
                            <Choice
                                form=form
                                label="Activity Level"
                                options=&ACTIVITY_LEVELS
                                get=|f| &f.activity_level
                                set=|f, v| f.activity_level = v
                            />
                            <Choice form=form label="Goal" options=&GOALS get=|f| &f.goal set=|f, v| f.goal = v />
                        </div>
                    }
                    .into_any(),
                }}

                <div class="flex justify-between mt-4">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        disabled=move || step.get() == 0
                        on:click=move |_| set_step.update(|s| *s = s.saturating_sub(1))
                    >
                        "Back"
                    </button>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || is_submitting.get() || !can_advance()
                    >
                        {move || {
                            if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating Account..." }.into_any()
                            } else if step.get() == last_step {
                                "Create Account".into_any()
                            } else {
                                "Next".into_any()
                            }
                        }}
                    </button>
                </div>

                <p class="text-center text-sm text-base-content/70 mt-2">
                    "Already have an account? "
                    <Link to="/login" class="link link-primary">"Sign in here"</Link>
                </p>
            </form>
        </AuthCard>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterForm {
        RegisterForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            username: " jdoe ".into(),
            email: "jdoe@example.com".into(),
            password: "Secret123".into(),
            confirm_password: "Secret123".into(),
            age: "31".into(),
            height: "".into(),
            weight: "64.5".into(),
            ..Default::default()
        }
    }

    #[test]
    fn steps_require_their_fields() {
        let mut form = RegisterForm::default();
        assert!(!form.step_complete(0));
        form.first_name = "Jane".into();
        form.last_name = "Doe".into();
        assert!(form.step_complete(0));
        assert!(!form.step_complete(1));
        assert!(form.step_complete(2));
    }

    #[test]
    fn builds_create_request_with_optional_numbers() {
        let data = filled().to_create().unwrap();
        assert_eq!(data.username, "jdoe");
        assert_eq!(data.age, Some(31));
        assert_eq!(data.height, None);
        assert_eq!(data.weight, Some(64.5));
        assert_eq!(data.gender, None);
        assert_eq!(data.role, None);
    }

    #[test]
    fn rejects_mismatched_passwords() {
        let mut form = filled();
        form.confirm_password = "Other123".into();
        assert_eq!(form.to_create(), Err("Passwords do not match"));
    }
}
