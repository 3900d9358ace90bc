use crate::Tone;
use crate::date::Timestamp;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顾问目录的专长过滤选项
pub const SPECIALIZATIONS: [&str; 5] = [
    "Dietitian",
    "Fitness Trainer",
    "Nutritionist",
    "Weight Loss Specialist",
    "Sports Nutritionist",
];

// =========================================================
// 顾问 (Consultant)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultant {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub qualifications: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_consultations: u32,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_available() -> bool {
    true
}

impl Consultant {
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(User::display_name)
            .unwrap_or_else(|| format!("Consultant #{}", self.id))
    }
}

/// 管理员创建 / 更新顾问档案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultantInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub specialization: String,
    pub experience_years: u32,
    pub qualifications: String,
    pub bio: String,
    pub hourly_rate: f64,
}

impl ConsultantInput {
    pub fn from_consultant(c: &Consultant) -> Self {
        Self {
            user_id: None,
            specialization: c.specialization.clone(),
            experience_years: c.experience_years,
            qualifications: c.qualifications.clone(),
            bio: c.bio.clone(),
            hourly_rate: c.hourly_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: i64,
    pub consultant_id: i64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub is_booked: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl AvailabilitySlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time.inner() - self.start_time.inner()).num_minutes()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotInput {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl SlotInput {
    /// 结束时间必须晚于开始时间
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.end_time <= self.start_time {
            Err("End time must be after start time")
        } else {
            Ok(())
        }
    }
}

// =========================================================
// 咨询 (Consultation)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl ConsultationStatus {
    pub const ALL: [ConsultationStatus; 4] = [
        ConsultationStatus::Scheduled,
        ConsultationStatus::Completed,
        ConsultationStatus::Cancelled,
        ConsultationStatus::Rescheduled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Scheduled => "scheduled",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Cancelled => "cancelled",
            ConsultationStatus::Rescheduled => "rescheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn tone(&self) -> Tone {
        match self {
            ConsultationStatus::Scheduled => Tone::Info,
            ConsultationStatus::Completed => Tone::Success,
            ConsultationStatus::Cancelled => Tone::Error,
            ConsultationStatus::Rescheduled => Tone::Warning,
        }
    }

    /// 仍未结束的预约
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            ConsultationStatus::Scheduled | ConsultationStatus::Rescheduled
        )
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub user_id: i64,
    pub consultant_id: i64,
    pub scheduled_time: Timestamp,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub status: ConsultationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user_health_data: Option<String>,
    #[serde(default)]
    pub consultant_plan: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub consultant: Option<Consultant>,
}

fn default_duration() -> u32 {
    60
}

impl Consultation {
    pub fn client_name(&self) -> String {
        self.user
            .as_ref()
            .map(User::display_name)
            .unwrap_or_else(|| format!("User #{}", self.user_id))
    }

    pub fn consultant_name(&self) -> String {
        self.consultant
            .as_ref()
            .map(Consultant::display_name)
            .unwrap_or_else(|| format!("Consultant #{}", self.consultant_id))
    }

    pub fn has_feedback(&self) -> bool {
        self.rating.is_some() || self.feedback.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// 预约请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationCreate {
    pub consultant_id: i64,
    pub scheduled_time: Timestamp,
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_health_data: Option<String>,
}

/// 部分更新：完成、改期、备注、评价
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsultationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ConsultationUpdate {
    pub fn complete() -> Self {
        Self {
            status: Some(ConsultationStatus::Completed),
            ..Default::default()
        }
    }

    pub fn reschedule(at: Timestamp, notes: Option<String>) -> Self {
        Self {
            scheduled_time: Some(at),
            status: Some(ConsultationStatus::Rescheduled),
            notes,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn consultation_with_nested_records() {
        let c: Consultation = serde_json::from_value(json!({
            "id": 1,
            "user_id": 2,
            "consultant_id": 3,
            "scheduled_time": "2024-05-01T10:00:00",
            "status": "rescheduled",
            "consultant": {
                "id": 3,
                "user_id": 9,
                "specialization": "Dietitian",
                "user": { "id": 9, "username": "coach", "email": "c@x.io", "first_name": "Ann", "last_name": "Lee" }
            }
        }))
        .unwrap();
        assert_eq!(c.duration_minutes, 60);
        assert!(c.status.is_open());
        assert_eq!(c.consultant_name(), "Ann Lee");
        assert_eq!(c.client_name(), "User #2");
        assert!(!c.has_feedback());
    }

    #[test]
    fn reschedule_update_only_sends_changed_fields() {
        let at = Timestamp::parse("2024-05-02T09:30").unwrap();
        let body = serde_json::to_value(ConsultationUpdate::reschedule(at, None)).unwrap();
        assert_eq!(
            body,
            json!({ "scheduled_time": "2024-05-02T09:30:00", "status": "rescheduled" })
        );
    }

    #[test]
    fn slot_validation() {
        let slot = SlotInput {
            start_time: Timestamp::parse("2024-05-02T10:00").unwrap(),
            end_time: Timestamp::parse("2024-05-02T09:00").unwrap(),
        };
        assert!(slot.validate().is_err());
    }
}
