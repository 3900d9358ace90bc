//! 顶栏通知铃铛
//!
//! 定时轮询收件箱；打开下拉框时立即刷新。标记已读与删除只改本地状态，
//! 不重新拉取。

use crate::api::use_api;
use crate::components::icons::{Bell, CheckCheck, Trash, X};
use crate::components::modal::confirm;
use crate::config::use_config;
use crate::web::{CancelToken, Interval, spawn_guarded};
use fitlife_shared::notification::relative_age;
use fitlife_shared::protocol::{
    DeleteAllNotifications, DeleteNotification, ListNotifications, MarkAllNotificationsRead,
    MarkNotificationRead,
};
use fitlife_shared::{Notification, NotificationInbox, Timestamp};
use leptos::prelude::*;

#[component]
pub fn NotificationBell() -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let inbox = RwSignal::new(NotificationInbox::new());
    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let token = CancelToken::scoped();

    let fetch = Callback::new({
        let api = api.clone();
        let token = token.clone();
        move |()| {
            set_loading.set(true);
            let api = api.clone();
            spawn_guarded(&token, async move { api.send(&ListNotifications).await }, move |result| {
                match result {
                    Ok(list) => inbox.update(|i| i.replace(list)),
                    Err(e) => log_warn!("[Notifications] Refresh failed: {}", e),
                }
                set_loading.set(false);
            });
        }
    });

    fetch.run(());
    let poller = StoredValue::new_local(Interval::new(config.poll_millis(), move || fetch.run(())));
    on_cleanup(move || {
        poller.try_update_value(|p| p.cancel());
    });

    let toggle = move |_| {
        let opening = !open.get_untracked();
        set_open.set(opening);
        if opening {
            fetch.run(());
        }
    };

    let mark_read = Callback::new({
        let api = api.clone();
        let token = token.clone();
        move |id: i64| {
            let api = api.clone();
            spawn_guarded(&token, async move { api.send(&MarkNotificationRead { id }).await }, move |result| {
                match result {
                    Ok(_) => inbox.update(|i| i.mark_read(id)),
                    Err(e) => log_warn!("[Notifications] Mark read failed: {}", e),
                }
            });
        }
    });

    let delete_one = Callback::new({
        let api = api.clone();
        let token = token.clone();
        move |id: i64| {
            let api = api.clone();
            spawn_guarded(&token, async move { api.send(&DeleteNotification { id }).await }, move |result| {
                match result {
                    Ok(_) => inbox.update(|i| i.remove(id)),
                    Err(e) => log_warn!("[Notifications] Delete failed: {}", e),
                }
            });
        }
    });

    let mark_all = Callback::new({
        let api = api.clone();
        let token = token.clone();
        move |()| {
            let api = api.clone();
            spawn_guarded(&token, async move { api.send(&MarkAllNotificationsRead).await }, move |result| {
                match result {
                    Ok(_) => inbox.update(NotificationInbox::mark_all_read),
                    Err(e) => log_warn!("[Notifications] Mark all failed: {}", e),
                }
            });
        }
    });

    let delete_all = Callback::new(move |()| {
        if !confirm("Delete all notifications? This cannot be undone.") {
            return;
        }
        let api = api.clone();
        spawn_guarded(&token, async move { api.send(&DeleteAllNotifications).await }, move |result| {
            match result {
                Ok(_) => inbox.update(NotificationInbox::clear),
                Err(e) => log_warn!("[Notifications] Delete all failed: {}", e),
            }
        });
    });

    let unread = move || inbox.with(NotificationInbox::unread_count);

    view! {
        <div class="relative">
            <button class="btn btn-ghost btn-circle" on:click=toggle>
                <div class="indicator">
                    <Bell attr:class="h-5 w-5" />
                    <Show when=move || { unread() > 0 }>
                        <span class="badge badge-xs badge-error indicator-item">{unread}</span>
                    </Show>
                </div>
            </button>

            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-96 max-w-[90vw] card bg-base-100 shadow-2xl z-50">
                    <div class="card-body p-4 gap-2">
                        <div class="flex items-center justify-between">
                            <h3 class="font-bold">"Notifications"</h3>
                            <div class="flex gap-1">
                                <button
                                    class="btn btn-ghost btn-xs"
                                    title="Mark all as read"
                                    disabled=move || unread() == 0
                                    on:click=move |_| mark_all.run(())
                                >
                                    <CheckCheck attr:class="h-4 w-4" />
                                </button>
                                <button
                                    class="btn btn-ghost btn-xs text-error"
                                    title="Delete all"
                                    disabled=move || inbox.with(NotificationInbox::is_empty)
                                    on:click=move |_| delete_all.run(())
                                >
                                    <Trash attr:class="h-4 w-4" />
                                </button>
                                <button class="btn btn-ghost btn-xs" on:click=move |_| set_open.set(false)>
                                    <X attr:class="h-4 w-4" />
                                </button>
                            </div>
                        </div>

                        <Show
                            when=move || !inbox.with(NotificationInbox::is_empty)
                            fallback=move || view! {
                                <p class="text-center text-sm text-base-content/50 py-6">
                                    {move || if loading.get() { "Loading..." } else { "No notifications" }}
                                </p>
                            }
                        >
                            <ul class="max-h-96 overflow-y-auto divide-y divide-base-200">
                                <For
                                    each=move || inbox.with(|i| i.items().to_vec())
                                    key=|n| (n.id, n.is_read)
                                    children=move |n: Notification| {
                                        let id = n.id;
                                        view! {
                                            <NotificationRow
                                                notification=n
                                                on_read=Callback::new(move |_| mark_read.run(id))
                                                on_delete=Callback::new(move |_| delete_one.run(id))
                                            />
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn NotificationRow(
    notification: Notification,
    on_read: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    let kind = notification.kind();
    let age = notification
        .created_at
        .map(|t| relative_age(t.inner(), Timestamp::now().inner()))
        .unwrap_or_default();
    let row_class = if notification.is_read {
        "py-2 flex gap-2 items-start"
    } else {
        "py-2 flex gap-2 items-start bg-primary/5 rounded"
    };
    let unread = !notification.is_read;

    view! {
        <li class=row_class>
            <div class="flex-1 min-w-0">
                <div class="flex items-center gap-2">
                    <span class=format!("{} badge-sm", kind.tone().badge_class())>{kind.as_str()}</span>
                    <span class="font-semibold text-sm truncate">{notification.title}</span>
                </div>
                <p class="text-xs text-base-content/70 mt-1">{notification.message}</p>
                <p class="text-xs text-base-content/40 mt-1">{age}</p>
            </div>
            <div class="flex flex-col gap-1">
                <Show when=move || unread>
                    <button class="btn btn-ghost btn-xs" title="Mark as read" on:click=move |_| on_read.run(())>
                        <CheckCheck attr:class="h-3 w-3" />
                    </button>
                </Show>
                <button class="btn btn-ghost btn-xs text-error" title="Delete" on:click=move |_| on_delete.run(())>
                    <Trash attr:class="h-3 w-3" />
                </button>
            </div>
        </li>
    }
}
