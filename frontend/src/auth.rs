//! 认证模块
//!
//! 管理会话状态（`SessionState`），与路由系统解耦：
//! 路由服务只通过注入的 `Viewer` 信号感知认证变化。

use crate::api::FitLifeApi;
use crate::web::LocalStorage;
use fitlife_shared::protocol::{CurrentUser, Login, Register, UpdateProfile};
use fitlife_shared::user::{UserCreate, UserUpdate};
use fitlife_shared::{ApiResult, STORAGE_TOKEN_KEY, SessionState, User, Viewer};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 访问者信号（用于路由服务注入）
    pub fn viewer_signal(&self) -> Signal<Viewer> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::viewer))
    }

    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().cloned()))
    }

    fn invalidate(&self) {
        LocalStorage::delete(STORAGE_TOKEN_KEY);
        self.set_state.update(|state| {
            *state = std::mem::take(state).invalidate();
        });
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 恢复令牌并取回用户；令牌失效时清除。
/// 同时注册 API 客户端的 401 回调。
pub fn init_auth(ctx: &AuthContext, api: &FitLifeApi) {
    let ctx = *ctx;
    api.on_unauthorized(move || {
        log_warn!("[Auth] Session rejected by server, signing out.");
        ctx.invalidate();
    });

    let restored = SessionState::restore(LocalStorage::get(STORAGE_TOKEN_KEY));
    let token = restored.token().map(str::to_string);
    ctx.set_state.set(restored);

    let Some(token) = token else {
        return;
    };
    api.set_token(Some(token));

    let api = api.clone();
    spawn_local(async move {
        match api.send(&CurrentUser).await {
            Ok(user) => {
                log_info!("[Auth] Session restored for {}", user.username);
                ctx.set_state
                    .update(|state| *state = std::mem::take(state).user_loaded(user));
            }
            Err(e) => {
                log_warn!("[Auth] Stored token rejected: {}", e);
                api.set_token(None);
                ctx.invalidate();
            }
        }
    });
}

/// 登录：取得令牌后拉取用户资料，成功才持久化令牌
///
/// 跳转由路由服务根据访问者变化完成（含 `next` 参数）。
pub async fn login(
    ctx: &AuthContext,
    api: &FitLifeApi,
    username: String,
    password: String,
) -> ApiResult<User> {
    let token = api.send(&Login { username, password }).await?;
    api.set_token(Some(token.access_token.clone()));

    let user = match api.send(&CurrentUser).await {
        Ok(user) => user,
        Err(e) => {
            api.set_token(None);
            return Err(e);
        }
    };

    LocalStorage::set(STORAGE_TOKEN_KEY, &token.access_token);
    log_info!("[Auth] Logged in as {} ({})", user.username, user.role.label());
    ctx.set_state.set(SessionState::authenticated(
        user.clone(),
        token.access_token,
    ));
    Ok(user)
}

/// 注册后自动登录
pub async fn register(ctx: &AuthContext, api: &FitLifeApi, data: UserCreate) -> ApiResult<User> {
    let username = data.username.clone();
    let password = data.password.clone();
    api.send(&Register(data)).await?;
    login(ctx, api, username, password).await
}

/// 注销并清除状态
///
/// 受保护页面的重定向由路由服务监听访问者变化自动处理。
pub fn logout(ctx: &AuthContext, api: &FitLifeApi) {
    api.set_token(None);
    ctx.invalidate();
    log_info!("[Auth] Logged out");
}

/// 更新个人资料并刷新会话中的用户
pub async fn update_profile(
    ctx: &AuthContext,
    api: &FitLifeApi,
    update: UserUpdate,
) -> ApiResult<User> {
    let user = api.send(&UpdateProfile(update)).await?;
    ctx.set_state
        .update(|state| *state = std::mem::take(state).user_loaded(user.clone()));
    Ok(user)
}

/// 重新拉取当前用户
pub async fn refresh_user(ctx: &AuthContext, api: &FitLifeApi) -> ApiResult<User> {
    let user = api.send(&CurrentUser).await?;
    ctx.set_state
        .update(|state| *state = std::mem::take(state).user_loaded(user.clone()));
    Ok(user)
}
