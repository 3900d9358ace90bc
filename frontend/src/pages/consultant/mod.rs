//! 顾问专属页面

mod appointments;
mod availability;
mod clients;
mod dashboard;

pub use appointments::ConsultantAppointmentsPage;
pub use availability::ConsultantAvailabilityPage;
pub use clients::ConsultantClientsPage;
pub use dashboard::ConsultantDashboardPage;

use fitlife_shared::admin::DashboardConsultation;
use fitlife_shared::{ConsultantDashboard, Timestamp};

/// 在仪表盘的两个列表中就地更新同一条咨询
pub(crate) fn update_session(
    dashboard: &mut ConsultantDashboard,
    id: i64,
    f: impl Fn(&mut DashboardConsultation),
) {
    dashboard
        .recent_consultations
        .iter_mut()
        .chain(dashboard.upcoming_consultations.iter_mut())
        .filter(|c| c.id == id)
        .for_each(f);
}

/// 与 `today` 同一天的咨询数
pub(crate) fn count_on_day(sessions: &[DashboardConsultation], today: Timestamp) -> usize {
    let day = today.inner().date();
    sessions
        .iter()
        .filter(|c| c.scheduled_at.is_some_and(|t| t.inner().date() == day))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: i64, at: &str, status: &str) -> DashboardConsultation {
        DashboardConsultation {
            id,
            client_name: format!("Client {id}"),
            scheduled_at: Timestamp::parse(at),
            status: status.to_string(),
            notes: None,
        }
    }

    #[test]
    fn update_touches_both_lists() {
        let mut dashboard = ConsultantDashboard {
            recent_consultations: vec![session(1, "2024-05-01T09:00", "scheduled")],
            upcoming_consultations: vec![session(1, "2024-05-01T09:00", "scheduled"), session(2, "2024-05-02T09:00", "scheduled")],
            ..Default::default()
        };
        update_session(&mut dashboard, 1, |c| c.status = "completed".into());
        assert_eq!(dashboard.recent_consultations[0].status, "completed");
        assert_eq!(dashboard.upcoming_consultations[0].status, "completed");
        assert_eq!(dashboard.upcoming_consultations[1].status, "scheduled");
    }

    #[test]
    fn counts_sessions_on_same_day() {
        let sessions = vec![
            session(1, "2024-05-01T09:00", "scheduled"),
            session(2, "2024-05-01T17:30", "scheduled"),
            session(3, "2024-05-02T09:00", "scheduled"),
        ];
        let today = Timestamp::parse("2024-05-01T12:00").unwrap();
        assert_eq!(count_on_day(&sessions, today), 2);
    }
}
