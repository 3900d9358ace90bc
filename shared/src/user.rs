use crate::date::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// 角色 (Role)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Consultant,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Consultant, Role::Admin];

    /// 登录后该角色的落地页
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Consultant => "/consultant",
            Role::User => "/dashboard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Consultant => "CONSULTANT",
            Role::User => "USER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Consultant => "Consultant",
            Role::User => "Member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "CONSULTANT" => Some(Role::Consultant),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 用户 (User)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// 有姓名时显示姓名，否则回退到用户名
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.username.clone()
        } else {
            name
        }
    }

    pub fn initials(&self) -> String {
        let name = self.display_name();
        name.split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }

    /// BMI 计算器需要身高与体重
    pub fn has_body_metrics(&self) -> bool {
        self.height.is_some_and(|h| h > 0.0) && self.weight.is_some_and(|w| w > 0.0)
    }

    /// 卡路里计算需要完整档案
    pub fn has_complete_profile(&self) -> bool {
        self.has_body_metrics()
            && self.age.is_some()
            && self.gender.as_deref().is_some_and(|g| !g.is_empty())
            && self.activity_level.as_deref().is_some_and(|a| !a.is_empty())
            && self.goal.as_deref().is_some_and(|g| !g.is_empty())
    }
}

/// 注册 / 管理员创建用户
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// 档案更新，仅发送已填写的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl UserUpdate {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: None,
            phone: user.phone.clone(),
            age: user.age,
            gender: user.gender.clone(),
            height: user.height,
            weight: user.weight,
            activity_level: user.activity_level.clone(),
            goal: user.goal.clone(),
        }
    }
}

/// 管理员编辑用户（账号字段 + 角色与启用状态）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// 登录成功返回的令牌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// 新密码强度检查
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub min_length: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
}

impl PasswordStrength {
    pub const MIN_LENGTH: usize = 8;

    pub fn check(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= Self::MIN_LENGTH,
            has_upper: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_upper && self.has_lower && self.has_digit
    }

    /// 每条规则及是否满足，供表单逐项提示
    pub fn rules(&self) -> [(&'static str, bool); 4] {
        [
            ("At least 8 characters", self.min_length),
            ("One uppercase letter", self.has_upper),
            ("One lowercase letter", self.has_lower),
            ("One number", self.has_digit),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_user(role: Role) -> User {
        serde_json::from_value(json!({
            "id": 7,
            "username": "jdoe",
            "email": "jdoe@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "role": role.as_str(),
            "is_active": true,
            "is_verified": true,
            "created_at": "2024-01-01T08:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn role_home_paths() {
        assert_eq!(Role::Admin.home_path(), "/admin");
        assert_eq!(Role::Consultant.home_path(), "/consultant");
        assert_eq!(Role::User.home_path(), "/dashboard");
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Consultant).unwrap(), "\"CONSULTANT\"");
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("guest"), None);
    }

    #[test]
    fn user_tolerates_missing_optional_fields() {
        let user = sample_user(Role::User);
        assert_eq!(user.full_name(), "Jane Doe");
        assert_eq!(user.initials(), "JD");
        assert!(!user.has_body_metrics());
        assert!(!user.has_complete_profile());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = sample_user(Role::User);
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "jdoe");
    }

    #[test]
    fn update_skips_unset_fields() {
        let update = UserUpdate {
            weight: Some(72.5),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "weight": 72.5 }));
    }

    #[test]
    fn password_strength_rules() {
        assert!(PasswordStrength::check("Secret123").is_valid());
        let weak = PasswordStrength::check("secret");
        assert!(!weak.is_valid());
        assert!(!weak.min_length);
        assert!(!weak.has_upper);
        assert!(weak.has_lower);
        assert!(!weak.has_digit);
        assert_eq!(weak.rules().iter().filter(|(_, ok)| *ok).count(), 1);
    }
}
