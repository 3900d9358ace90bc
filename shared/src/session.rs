//! 会话生命周期
//!
//! `Anonymous → Restoring(token) → Authenticated{user, token}`，
//! 任意状态遇到 401 都回到 `Anonymous`。

use crate::user::{Role, User};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    /// 本地存有令牌，正在通过 `/api/auth/me` 取回用户
    Restoring { token: String },
    Authenticated { user: User, token: String },
}

/// 路由守卫看到的访问者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// 会话恢复中，尚不能判断
    Loading,
    Guest,
    Member(Role),
}

impl SessionState {
    /// 启动时根据存储中的令牌决定初始状态
    pub fn restore(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.trim().is_empty() => SessionState::Restoring { token },
            _ => SessionState::Anonymous,
        }
    }

    pub fn authenticated(user: User, token: String) -> Self {
        SessionState::Authenticated { user, token }
    }

    /// 用户资料已取回（恢复完成或资料更新）
    ///
    /// 匿名状态下没有令牌，保持不变。
    pub fn user_loaded(self, user: User) -> Self {
        match self {
            SessionState::Restoring { token } | SessionState::Authenticated { token, .. } => {
                SessionState::Authenticated { user, token }
            }
            SessionState::Anonymous => SessionState::Anonymous,
        }
    }

    pub fn invalidate(self) -> Self {
        SessionState::Anonymous
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Restoring { token } | SessionState::Authenticated { token, .. } => {
                Some(token)
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Restoring { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn viewer(&self) -> Viewer {
        match self {
            SessionState::Anonymous => Viewer::Guest,
            SessionState::Restoring { .. } => Viewer::Loading,
            SessionState::Authenticated { user, .. } => Viewer::Member(user.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::tests::sample_user;

    #[test]
    fn restore_requires_non_empty_token() {
        assert_eq!(SessionState::restore(None), SessionState::Anonymous);
        assert_eq!(SessionState::restore(Some("  ".into())), SessionState::Anonymous);
        let state = SessionState::restore(Some("abc".into()));
        assert!(state.is_loading());
        assert_eq!(state.viewer(), Viewer::Loading);
        assert_eq!(state.token(), Some("abc"));
    }

    #[test]
    fn restoring_then_user_loaded() {
        let state = SessionState::restore(Some("abc".into()))
            .user_loaded(sample_user(Role::Consultant));
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Consultant));
        assert_eq!(state.viewer(), Viewer::Member(Role::Consultant));
        assert_eq!(state.token(), Some("abc"));
    }

    #[test]
    fn anonymous_ignores_user_loaded() {
        let state = SessionState::Anonymous.user_loaded(sample_user(Role::User));
        assert_eq!(state, SessionState::Anonymous);
    }

    #[test]
    fn invalidate_drops_everything() {
        let state = SessionState::authenticated(sample_user(Role::Admin), "t".into()).invalidate();
        assert_eq!(state.viewer(), Viewer::Guest);
        assert!(state.token().is_none());
        assert!(state.user().is_none());
    }
}
