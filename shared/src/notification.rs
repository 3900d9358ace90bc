//! 通知收件箱
//!
//! 下拉框在本地维护通知列表与未读数：标记已读、删除后直接修改本地状态，
//! 不重新拉取；定时轮询时整体替换。

use crate::Tone;
use crate::date::Timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub sent_via_email: bool,
    #[serde(default)]
    pub sent_via_sms: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::parse(&self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Consultation,
    Order,
    Reminder,
    Promotion,
    System,
    Warning,
    Error,
    Other,
}

impl NotificationKind {
    /// 管理员发送通知时可选的类型
    pub const SENDABLE: [NotificationKind; 5] = [
        NotificationKind::System,
        NotificationKind::Consultation,
        NotificationKind::Order,
        NotificationKind::Reminder,
        NotificationKind::Promotion,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "consultation" => NotificationKind::Consultation,
            "order" => NotificationKind::Order,
            "reminder" => NotificationKind::Reminder,
            "promotion" => NotificationKind::Promotion,
            "system" => NotificationKind::System,
            "warning" => NotificationKind::Warning,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Consultation => "consultation",
            NotificationKind::Order => "order",
            NotificationKind::Reminder => "reminder",
            NotificationKind::Promotion => "promotion",
            NotificationKind::System => "system",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            NotificationKind::Other => "other",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            NotificationKind::Consultation | NotificationKind::Promotion => Tone::Info,
            NotificationKind::Order => Tone::Success,
            NotificationKind::Reminder | NotificationKind::Warning => Tone::Warning,
            NotificationKind::Error => Tone::Error,
            NotificationKind::System | NotificationKind::Other => Tone::Neutral,
        }
    }
}

// =========================================================
// 收件箱状态
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationInbox {
    items: Vec<Notification>,
    unread: usize,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// 轮询结果整体替换，未读数按 `is_read == false` 重新计算
    pub fn replace(&mut self, items: Vec<Notification>) {
        self.unread = items.iter().filter(|n| !n.is_read).count();
        self.items = items;
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 标记单条已读；已读或不存在的通知不影响计数
    pub fn mark_read(&mut self, id: i64) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id && !n.is_read) {
            n.is_read = true;
            self.unread = self.unread.saturating_sub(1);
        }
    }

    pub fn mark_all_read(&mut self) {
        self.items.iter_mut().for_each(|n| n.is_read = true);
        self.unread = 0;
    }

    pub fn remove(&mut self, id: i64) {
        if let Some(pos) = self.items.iter().position(|n| n.id == id) {
            let removed = self.items.remove(pos);
            if !removed.is_read {
                self.unread = self.unread.saturating_sub(1);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.unread = 0;
    }
}

/// 下拉框中的相对时间
pub fn relative_age(created: NaiveDateTime, now: NaiveDateTime) -> String {
    let minutes = (now - created).num_minutes();
    let hours = minutes / 60;
    if minutes < 60 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if hours < 48 {
        "Yesterday".to_string()
    } else {
        created.format("%-m/%-d/%Y").to_string()
    }
}

/// 管理员发送 / 广播通知的表单
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    /// `None` 表示广播给所有用户
    pub user_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub send_email: bool,
    pub send_sms: bool,
}

impl NotificationDraft {
    /// 后端以查询参数接收这些字段
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(user_id) = self.user_id {
            pairs.push(("user_id", user_id.to_string()));
        }
        pairs.push(("title", self.title.clone()));
        pairs.push(("message", self.message.clone()));
        pairs.push(("notification_type", self.kind.as_str().to_string()));
        pairs.push(("send_email", self.send_email.to_string()));
        pairs.push(("send_sms", self.send_sms.to_string()));
        pairs
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() || self.message.trim().is_empty() {
            Err("Title and message are required")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inbox() -> NotificationInbox {
        let items: Vec<Notification> = serde_json::from_value(json!([
            { "id": 1, "title": "a", "message": "", "type": "order", "is_read": false },
            { "id": 2, "title": "b", "message": "", "type": "system", "is_read": true },
            { "id": 3, "title": "c", "message": "", "type": "reminder" }
        ]))
        .unwrap();
        let mut inbox = NotificationInbox::new();
        inbox.replace(items);
        inbox
    }

    #[test]
    fn unread_counts_falsy_flags() {
        assert_eq!(inbox().unread_count(), 2);
    }

    #[test]
    fn mark_read_decrements_once() {
        let mut inbox = inbox();
        inbox.mark_read(1);
        assert_eq!(inbox.unread_count(), 1);
        inbox.mark_read(1);
        inbox.mark_read(2);
        inbox.mark_read(99);
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn remove_adjusts_unread_only_for_unread() {
        let mut inbox = inbox();
        inbox.remove(2);
        assert_eq!(inbox.unread_count(), 2);
        inbox.remove(3);
        assert_eq!(inbox.unread_count(), 1);
        assert_eq!(inbox.items().len(), 1);
        inbox.mark_all_read();
        assert_eq!(inbox.unread_count(), 0);
        inbox.clear();
        assert!(inbox.is_empty());
    }

    #[test]
    fn kind_from_type_field() {
        let inbox = inbox();
        assert_eq!(inbox.items()[0].kind(), NotificationKind::Order);
        assert_eq!(NotificationKind::parse("newsletter"), NotificationKind::Other);
    }

    #[test]
    fn relative_age_buckets() {
        let now = Timestamp::parse("2024-03-10T12:00:00").unwrap().inner();
        let at = |s: &str| Timestamp::parse(s).unwrap().inner();
        assert_eq!(relative_age(at("2024-03-10T11:30:00"), now), "Just now");
        assert_eq!(relative_age(at("2024-03-10T07:00:00"), now), "5h ago");
        assert_eq!(relative_age(at("2024-03-09T06:00:00"), now), "Yesterday");
        assert_eq!(relative_age(at("2024-03-01T06:00:00"), now), "3/1/2024");
    }

    #[test]
    fn draft_query_omits_user_for_broadcast() {
        let draft = NotificationDraft {
            user_id: None,
            title: "Hi".into(),
            message: "All".into(),
            kind: NotificationKind::System,
            send_email: false,
            send_sms: true,
        };
        let keys: Vec<&str> = draft.query().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["title", "message", "notification_type", "send_email", "send_sms"]
        );
        assert!(draft.validate().is_ok());
    }
}
