//! 用户管理：列表、创建、编辑、启停、批准为顾问、删除

use super::{Editing, upsert};
use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::form::{CheckboxField, TextField};
use crate::components::icons::{Pencil, Plus, Search, ShieldCheck, Trash};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, non_empty, submit};
use fitlife_shared::listing::matches_search;
use fitlife_shared::protocol::{
    AdminCreateUser, AdminDeleteUser, AdminListUsers, AdminUpdateUser, SetUserRole, SetUserStatus,
};
use fitlife_shared::user::{AdminUserUpdate, UserCreate};
use fitlife_shared::{Role, User};
use leptos::prelude::*;

/// 用户编辑表单
#[derive(Clone, Copy)]
struct UserForm {
    username: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    phone: RwSignal<String>,
    role: RwSignal<Role>,
    is_active: RwSignal<bool>,
}

impl UserForm {
    fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            role: RwSignal::new(Role::User),
            is_active: RwSignal::new(true),
        }
    }

    fn reset(&self) {
        self.username.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.first_name.set(String::new());
        self.last_name.set(String::new());
        self.phone.set(String::new());
        self.role.set(Role::User);
        self.is_active.set(true);
    }

    fn load(&self, user: &User) {
        self.username.set(user.username.clone());
        self.email.set(user.email.clone());
        self.password.set(String::new());
        self.first_name.set(user.first_name.clone());
        self.last_name.set(user.last_name.clone());
        self.phone.set(user.phone.clone().unwrap_or_default());
        self.role.set(user.role);
        self.is_active.set(user.is_active);
    }

    fn check_required(&self) -> Result<(), &'static str> {
        let filled = |s: RwSignal<String>| !s.with_untracked(|v| v.trim().is_empty());
        if filled(self.username) && filled(self.email) && filled(self.first_name) && filled(self.last_name) {
            Ok(())
        } else {
            Err("Username, email and name are required")
        }
    }

    fn to_create(&self) -> Result<UserCreate, &'static str> {
        self.check_required()?;
        let password = self.password.get_untracked();
        if password.len() < 8 {
            return Err("Password must be at least 8 characters");
        }
        Ok(UserCreate {
            username: self.username.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            password,
            first_name: self.first_name.get_untracked().trim().to_string(),
            last_name: self.last_name.get_untracked().trim().to_string(),
            phone: non_empty(self.phone.get_untracked()),
            role: Some(self.role.get_untracked()),
            ..Default::default()
        })
    }

    fn to_update(&self) -> Result<AdminUserUpdate, &'static str> {
        self.check_required()?;
        Ok(AdminUserUpdate {
            username: non_empty(self.username.get_untracked()),
            email: non_empty(self.email.get_untracked()),
            first_name: non_empty(self.first_name.get_untracked()),
            last_name: non_empty(self.last_name.get_untracked()),
            phone: non_empty(self.phone.get_untracked()),
            role: Some(self.role.get_untracked()),
            is_active: Some(self.is_active.get_untracked()),
        })
    }
}

fn user_matches(user: &User, query: &str, role: Option<Role>) -> bool {
    role.is_none_or(|r| user.role == r)
        && matches_search(
            query,
            &[&user.username, &user.email, &user.first_name, &user.last_name],
        )
}

fn role_badge(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge badge-error",
        Role::Consultant => "badge badge-info",
        Role::User => "badge badge-ghost",
    }
}

#[component]
fn UserDialog(
    open: RwSignal<bool>,
    editing: RwSignal<Editing>,
    form: UserForm,
    users: Remote<Vec<User>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let on_saved = move |user: User| {
            users.patch(|list| upsert(list, user, |u| u.id));
            open.set(false);
            form.reset();
        };
        match editing.get_untracked() {
            Editing::New => match form.to_create() {
                Ok(create) => submit(&api, AdminCreateUser(create), error, move |user| {
                    on_saved(user);
                    notice.set(Some(Notice::success("User created successfully")));
                }),
                Err(msg) => error.set(Some(msg.to_string())),
            },
            Editing::Existing(id) => match form.to_update() {
                Ok(update) => submit(&api, AdminUpdateUser { id, update }, error, move |user| {
                    on_saved(user);
                    notice.set(Some(Notice::success("User updated successfully")));
                }),
                Err(msg) => error.set(Some(msg.to_string())),
            },
        }
    };

    view! {
        <Modal open=open title=Signal::derive(move || editing.get().title("User")) class="max-w-2xl">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <div class="grid sm:grid-cols-2 gap-3">
                    <TextField label="Username" value=form.username required=true />
                    <TextField label="Email" value=form.email kind="email" required=true />
                    <TextField label="First Name" value=form.first_name required=true />
                    <TextField label="Last Name" value=form.last_name required=true />
                    <TextField label="Phone" value=form.phone kind="tel" />
                    <label class="form-control w-full">
                        <span class="label-text mb-1">"Role"</span>
                        <select
                            class="select select-bordered w-full"
                            prop:value=move || form.role.get().as_str()
                            on:change=move |ev| {
                                if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                    form.role.set(role);
                                }
                            }
                        >
                            {Role::ALL
                                .into_iter()
                                .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <Show
                    when=move || editing.get() == Editing::New
                    fallback=move || view! { <CheckboxField label="Active" value=form.is_active /> }
                >
                    <TextField label="Password" value=form.password kind="password" required=true />
                </Show>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">
                        {move || if editing.get() == Editing::New { "Create" } else { "Update" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let api = use_api();
    let users = Remote::<Vec<User>>::new();
    fetch(&api, AdminListUsers, users);

    let (search, set_search) = signal(String::new());
    let (role_filter, set_role_filter) = signal(Option::<Role>::None);
    let visible = Memo::new(move |_| {
        let query = search.get();
        let role = role_filter.get();
        users.value().into_iter().filter(|u| user_matches(u, &query, role)).collect::<Vec<_>>()
    });

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Editing::New);
    let form = UserForm::new();

    let open_new = move |_| {
        form.reset();
        editing.set(Editing::New);
        dialog_open.set(true);
    };

    let open_edit = move |user: &User| {
        form.load(user);
        editing.set(Editing::Existing(user.id));
        dialog_open.set(true);
    };

    let toggle_status = Callback::new({
        let api = api.clone();
        move |(id, is_active): (i64, bool)| {
            submit(&api, SetUserStatus { id, is_active }, action_error, move |_| {
                users.patch(|list| {
                    if let Some(u) = list.iter_mut().find(|u| u.id == id) {
                        u.is_active = is_active;
                    }
                });
                notice.set(Some(Notice::success("User status updated successfully")));
            });
        }
    });

    let approve = Callback::new({
        let api = api.clone();
        move |id: i64| {
            submit(&api, SetUserRole { id, role: Role::Consultant }, action_error, move |_| {
                users.patch(|list| {
                    if let Some(u) = list.iter_mut().find(|u| u.id == id) {
                        u.role = Role::Consultant;
                    }
                });
                notice.set(Some(Notice::success("User approved as consultant successfully")));
            });
        }
    });

    let remove = Callback::new(move |id: i64| {
        if !confirm("Are you sure you want to delete this user?") {
            return;
        }
        submit(&api, AdminDeleteUser { id }, action_error, move |_| {
            users.patch(|list| list.retain(|u| u.id != id));
            notice.set(Some(Notice::success("User deleted successfully")));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="User Management" subtitle="Manage all platform users and approve consultant registrations">
            <button class="btn btn-primary gap-2" on:click=open_new>
                <Plus attr:class="h-4 w-4" />
                "Add User"
            </button>
        </PageHeader>
        <ErrorAlert message=users.error />
        <ErrorAlert message=action_error />

        <div class="flex flex-col sm:flex-row gap-3 mb-4">
            <label class="input input-bordered flex items-center gap-2 grow">
                <Search attr:class="h-4 w-4 opacity-60" />
                <input
                    type="search"
                    class="grow"
                    placeholder="Search by name, username or email"
                    prop:value=search
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </label>
            <select
                class="select select-bordered"
                on:change=move |ev| set_role_filter.set(Role::parse(&event_target_value(&ev)))
            >
                <option value="">"All Roles"</option>
                {Role::ALL
                    .into_iter()
                    .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                    .collect_view()}
            </select>
        </div>

        <Show when=move || !users.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"User"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Status"</th>
                            <th>"Joined"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || visible.with(Vec::is_empty)>
                            <EmptyRow colspan=6 text="No users found" />
                        </Show>
                        <For
                            each=move || visible.get()
                            key=|u| (u.id, u.role, u.is_active, u.email.clone(), u.first_name.clone(), u.last_name.clone())
                            children=move |user: User| {
                                let id = user.id;
                                let active = user.is_active;
                                let pending_user = user.role == Role::User;
                                let stored = StoredValue::new(user.clone());
                                view! {
                                    <tr class="hover">
                                        <td>
                                            <div class="flex items-center gap-3">
                                                <div class="avatar placeholder">
                                                    <div class="bg-neutral text-neutral-content rounded-full w-10">
                                                        <span>{user.initials()}</span>
                                                    </div>
                                                </div>
                                                <div>
                                                    <p class="font-semibold">{user.full_name()}</p>
                                                    <p class="text-xs text-base-content/60">{format!("@{}", user.username)}</p>
                                                </div>
                                            </div>
                                        </td>
                                        <td>{user.email.clone()}</td>
                                        <td><span class=role_badge(user.role)>{user.role.label()}</span></td>
                                        <td>
                                            <span class={if active { "badge badge-success" } else { "badge badge-ghost" }}>
                                                {if active { "Active" } else { "Inactive" }}
                                            </span>
                                        </td>
                                        <td>{user.created_at.map(|t| t.format_date()).unwrap_or_default()}</td>
                                        <td>
                                            <div class="flex flex-wrap gap-1">
                                                <button class="btn btn-ghost btn-xs" title="Edit" on:click=move |_| stored.with_value(|u| open_edit(u))>
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button class="btn btn-ghost btn-xs" on:click=move |_| toggle_status.run((id, !active))>
                                                    {if active { "Deactivate" } else { "Activate" }}
                                                </button>
                                                <Show when=move || pending_user>
                                                    <button
                                                        class="btn btn-ghost btn-xs text-info"
                                                        title="Approve as consultant"
                                                        on:click=move |_| approve.run(id)
                                                    >
                                                        <ShieldCheck attr:class="h-4 w-4" />
                                                    </button>
                                                </Show>
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

        <UserDialog open=dialog_open editing=editing form=form users=users notice=notice />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(role: &str) -> User {
        serde_json::from_value(json!({
            "id": 3,
            "username": "meera",
            "email": "meera@fitlife.io",
            "first_name": "Meera",
            "last_name": "Shah",
            "role": role
        }))
        .unwrap()
    }

    #[test]
    fn filters_by_query_and_role() {
        let u = user("CONSULTANT");
        assert!(user_matches(&u, "shah", None));
        assert!(user_matches(&u, "FITLIFE", Some(Role::Consultant)));
        assert!(!user_matches(&u, "", Some(Role::Admin)));
        assert!(!user_matches(&u, "ravi", None));
    }

    #[test]
    fn form_builds_create_and_update() {
        let owner = Owner::new();
        owner.set();

        let form = UserForm::new();
        form.load(&user("USER"));
        assert_eq!(form.to_create(), Err("Password must be at least 8 characters"));
        form.password.set("Secret123".into());
        let create = form.to_create().unwrap();
        assert_eq!(create.username, "meera");
        assert_eq!(create.role, Some(Role::User));

        form.role.set(Role::Admin);
        form.is_active.set(false);
        let update = form.to_update().unwrap();
        assert_eq!(update.role, Some(Role::Admin));
        assert_eq!(update.is_active, Some(false));
        assert_eq!(update.phone, None);

        form.reset();
        assert_eq!(form.to_update(), Err("Username, email and name are required"));
    }
}
