//! 通知管理：查看全部通知、标记已读、发送与广播

use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::form::{CheckboxField, TextAreaField, TextField};
use crate::components::icons::{CheckCheck, Check, Send};
use crate::components::modal::Modal;
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, submit};
use fitlife_shared::notification::{NotificationDraft, NotificationKind};
use fitlife_shared::protocol::{
    AdminListNotifications, AdminListUsers, AdminMarkAllNotificationsRead,
    AdminMarkNotificationRead, BroadcastNotification, SendNotification,
};
use fitlife_shared::{Notification, User};
use leptos::prelude::*;

#[derive(Clone, Copy)]
struct DraftForm {
    title: RwSignal<String>,
    message: RwSignal<String>,
    kind: RwSignal<NotificationKind>,
    /// 空串表示广播
    recipient: RwSignal<String>,
    send_email: RwSignal<bool>,
    send_sms: RwSignal<bool>,
}

impl DraftForm {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            message: RwSignal::new(String::new()),
            kind: RwSignal::new(NotificationKind::System),
            recipient: RwSignal::new(String::new()),
            send_email: RwSignal::new(false),
            send_sms: RwSignal::new(false),
        }
    }

    fn reset(&self) {
        self.title.set(String::new());
        self.message.set(String::new());
        self.kind.set(NotificationKind::System);
        self.recipient.set(String::new());
        self.send_email.set(false);
        self.send_sms.set(false);
    }

    fn to_draft(&self) -> Result<NotificationDraft, &'static str> {
        let draft = NotificationDraft {
            user_id: self.recipient.with_untracked(|r| r.parse().ok()),
            title: self.title.get_untracked().trim().to_string(),
            message: self.message.get_untracked().trim().to_string(),
            kind: self.kind.get_untracked(),
            send_email: self.send_email.get_untracked(),
            send_sms: self.send_sms.get_untracked(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn channels(n: &Notification) -> String {
    let mut list = vec!["In-app"];
    if n.sent_via_email {
        list.push("Email");
    }
    if n.sent_via_sms {
        list.push("SMS");
    }
    list.join(", ")
}

#[component]
fn SendDialog(
    open: RwSignal<bool>,
    form: DraftForm,
    reload: RwSignal<u32>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let users = Remote::<Vec<User>>::new();
    fetch(&api, AdminListUsers, users);
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        let on_sent = move |text: &'static str| {
            open.set(false);
            form.reset();
            reload.update(|n| *n += 1);
            notice.set(Some(Notice::success(text)));
        };
        if draft.user_id.is_some() {
            submit(&api, SendNotification(draft), error, move |_| on_sent("Notification sent successfully"));
        } else {
            submit(&api, BroadcastNotification(draft), error, move |_| {
                on_sent("Notification broadcast to all users")
            });
        }
    };

    view! {
        <Modal open=open title="Send Notification" class="max-w-xl">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <TextField label="Title" value=form.title required=true />
                <TextAreaField label="Message" value=form.message rows=4 />
                <div class="grid sm:grid-cols-2 gap-3">
                    <label class="form-control w-full">
                        <span class="label-text mb-1">"Type"</span>
                        <select
                            class="select select-bordered w-full"
                            prop:value=move || form.kind.get().as_str()
                            on:change=move |ev| form.kind.set(NotificationKind::parse(&event_target_value(&ev)))
                        >
                            {NotificationKind::SENDABLE
                                .into_iter()
                                .map(|k| view! { <option value=k.as_str()>{k.as_str()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text mb-1">"Send To"</span>
                        <select
                            class="select select-bordered w-full"
                            prop:value=move || form.recipient.get()
                            on:change=move |ev| form.recipient.set(event_target_value(&ev))
                        >
                            <option value="">"All Users (Broadcast)"</option>
                            {move || {
                                users
                                    .value()
                                    .into_iter()
                                    .map(|u| view! {
                                        <option value=u.id.to_string()>{format!("{} ({})", u.display_name(), u.email)}</option>
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                </div>
                <div class="flex gap-6">
                    <CheckboxField label="Send via Email" value=form.send_email />
                    <CheckboxField label="Send via SMS" value=form.send_sms />
                </div>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary gap-2">
                        <Send attr:class="h-4 w-4" />
                        "Send"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn AdminNotificationsPage() -> impl IntoView {
    let api = use_api();
    let notifications = Remote::<Vec<Notification>>::new();
    let reload = RwSignal::new(0u32);
    let list_api = api.clone();
    Effect::new(move |_| {
        reload.track();
        fetch(&list_api, AdminListNotifications, notifications);
    });

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let send_open = RwSignal::new(false);
    let form = DraftForm::new();

    let mark_read = Callback::new({
        let api = api.clone();
        move |id: i64| {
            submit(&api, AdminMarkNotificationRead { id }, action_error, move |_| {
                notifications.patch(|list| {
                    if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                        n.is_read = true;
                    }
                });
            });
        }
    });

    let mark_all = move |_| {
        submit(&api, AdminMarkAllNotificationsRead, action_error, move |_| {
            notifications.patch(|list| list.iter_mut().for_each(|n| n.is_read = true));
            notice.set(Some(Notice::success("All notifications marked as read")));
        });
    };

    let unread = move || notifications.value().iter().filter(|n| !n.is_read).count();

    view! {
        <Toast notice=notice />
        <PageHeader title="Notification Management" subtitle="Send announcements and review delivered notifications">
            <button class="btn btn-outline gap-2" disabled=move || unread() == 0 on:click=mark_all>
                <CheckCheck attr:class="h-4 w-4" />
                "Mark All Read"
            </button>
            <button
                class="btn btn-primary gap-2"
                on:click=move |_| {
                    form.reset();
                    send_open.set(true);
                }
            >
                <Send attr:class="h-4 w-4" />
                "Send Notification"
            </button>
        </PageHeader>
        <ErrorAlert message=notifications.error />
        <ErrorAlert message=action_error />

        <Show when=move || !notifications.is_loading() fallback=|| view! { <PageSpinner /> }>
            <p class="text-sm text-base-content/60 mb-2">
                {move || format!("{} total, {} unread", notifications.value().len(), unread())}
            </p>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Title"</th>
                            <th>"Message"</th>
                            <th>"Type"</th>
                            <th>"User"</th>
                            <th>"Status"</th>
                            <th>"Channels"</th>
                            <th>"Created"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || notifications.value().is_empty()>
                            <EmptyRow colspan=9 text="No notifications yet" />
                        </Show>
                        <For
                            each=move || notifications.value()
                            key=|n| (n.id, n.is_read)
                            children=move |n: Notification| {
                                let id = n.id;
                                let read = n.is_read;
                                view! {
                                    <tr class="hover" class:font-semibold=!read>
                                        <td>{n.id}</td>
                                        <td>{n.title.clone()}</td>
                                        <td class="max-w-xs truncate" title=n.message.clone()>{n.message.clone()}</td>
                                        <td><span class=n.kind().tone().badge_class()>{n.kind.clone()}</span></td>
                                        <td>{format!("#{}", n.user_id)}</td>
                                        <td>
                                            <span class={if read { "badge badge-ghost" } else { "badge badge-primary" }}>
                                                {if read { "Read" } else { "Unread" }}
                                            </span>
                                        </td>
                                        <td class="text-xs">{channels(&n)}</td>
                                        <td>{n.created_at.map(|t| t.format_date_time()).unwrap_or_default()}</td>
                                        <td>
                                            <Show when=move || !read>
                                                <button class="btn btn-ghost btn-xs" title="Mark as Read" on:click=move |_| mark_read.run(id)>
                                                    <Check attr:class="h-4 w-4" />
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

        <SendDialog open=send_open form=form reload=reload notice=notice />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_recipient_means_broadcast() {
        let owner = Owner::new();
        owner.set();

        let form = DraftForm::new();
        assert_eq!(form.to_draft(), Err("Title and message are required"));

        form.title.set("Maintenance".into());
        form.message.set("Back at 6pm".into());
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.user_id, None);
        assert_eq!(draft.kind, NotificationKind::System);

        form.recipient.set("42".into());
        form.send_email.set(true);
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.user_id, Some(42));
        assert!(draft.send_email);
    }

    #[test]
    fn channel_summary() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "t", "sent_via_email": true
        }))
        .unwrap();
        assert_eq!(channels(&n), "In-app, Email");
    }
}
