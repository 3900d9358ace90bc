//! 管理后台页面
//!
//! 列表都是一次性拉取后在本地增删改；写操作成功后直接修补 `Remote` 中的数据，
//! 不重新请求整个列表。

mod analytics;
mod consultants;
mod consultations;
mod dashboard;
mod feedback;
mod notifications;
mod orders;
mod products;
mod reports;
mod users;

pub use analytics::AdminAnalyticsPage;
pub use consultants::AdminConsultantsPage;
pub use consultations::AdminConsultationsPage;
pub use dashboard::AdminDashboardPage;
pub use feedback::AdminFeedbackPage;
pub use notifications::AdminNotificationsPage;
pub use orders::AdminOrdersPage;
pub use products::AdminProductsPage;
pub use reports::AdminReportsPage;
pub use users::AdminUsersPage;

/// 按 id 替换已有记录，不存在时插到最前
pub(crate) fn upsert<T>(list: &mut Vec<T>, item: T, id: impl Fn(&T) -> i64) {
    let key = id(&item);
    match list.iter_mut().find(|existing| id(existing) == key) {
        Some(existing) => *existing = item,
        None => list.insert(0, item),
    }
}

/// 编辑对话框的模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Editing {
    #[default]
    New,
    Existing(i64),
}

impl Editing {
    pub fn title(&self, noun: &str) -> String {
        match self {
            Editing::New => format!("Add {noun}"),
            Editing::Existing(_) => format!("Edit {noun}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_or_prepends() {
        let mut list = vec![(1, "a"), (2, "b")];
        upsert(&mut list, (2, "B"), |x| x.0);
        assert_eq!(list, vec![(1, "a"), (2, "B")]);
        upsert(&mut list, (3, "c"), |x| x.0);
        assert_eq!(list, vec![(3, "c"), (1, "a"), (2, "B")]);
    }

    #[test]
    fn dialog_titles() {
        assert_eq!(Editing::New.title("User"), "Add User");
        assert_eq!(Editing::Existing(4).title("Product"), "Edit Product");
    }
}
