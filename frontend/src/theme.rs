//! 主题上下文
//!
//! 按当前用户角色选择 daisyUI 主题，写入 `<html data-theme>`。

use crate::auth::AuthContext;
use fitlife_shared::Role;
use leptos::prelude::*;

/// 角色对应的 daisyUI 主题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// 访客与普通用户
    Wellness,
    Consultant,
    Admin,
}

impl Palette {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Self::Admin,
            Some(Role::Consultant) => Self::Consultant,
            Some(Role::User) | None => Self::Wellness,
        }
    }

    pub fn daisy_theme(&self) -> &'static str {
        match self {
            Self::Wellness => "emerald",
            Self::Consultant => "garden",
            Self::Admin => "corporate",
        }
    }

    /// 侧边栏品牌下方的副标题
    pub fn portal_label(&self) -> &'static str {
        match self {
            Self::Wellness => "Wellness Platform",
            Self::Consultant => "Consultant Portal",
            Self::Admin => "Admin Portal",
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub palette: Memo<Palette>,
}

fn apply_theme(theme: &str) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme);
    }
}

/// 跟随会话角色切换主题
pub fn provide_theme(auth: &AuthContext) -> ThemeContext {
    let state = auth.state;
    let palette = Memo::new(move |_| Palette::for_role(state.with(|s| s.role())));

    Effect::new(move |_| apply_theme(palette.get().daisy_theme()));

    let ctx = ThemeContext { palette };
    provide_context(ctx);
    ctx
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_role() {
        assert_eq!(Palette::for_role(None), Palette::Wellness);
        assert_eq!(Palette::for_role(Some(Role::User)), Palette::Wellness);
        assert_eq!(Palette::for_role(Some(Role::Consultant)).daisy_theme(), "garden");
        assert_eq!(Palette::for_role(Some(Role::Admin)).daisy_theme(), "corporate");
        assert_eq!(Palette::for_role(Some(Role::Admin)).portal_label(), "Admin Portal");
    }
}
