//! 页面组件
//!
//! 每个页面挂载时通过 `fetch` 拉取数据（随组件卸载取消），
//! 写操作通过 `submit` 发出并在成功后刷新或修改本地状态。

pub mod admin;
pub mod auth;
pub mod calculators;
pub mod cart;
pub mod checkout;
pub mod consultant;
pub mod consultants;
pub mod consultations;
pub mod dashboard;
pub mod home;
pub mod not_found;
pub mod orders;
pub mod product_detail;
pub mod products;
pub mod profile;
pub mod progress;

use crate::api::FitLifeApi;
use crate::web::spawn_scoped;
use fitlife_shared::protocol::ApiRequest;
use fitlife_shared::ApiError;
use leptos::prelude::*;

/// 远程数据的三态：数据 / 加载中 / 错误信息
pub struct Remote<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for Remote<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Remote<T> {}

impl<T: Send + Sync + 'static> Remote<T> {
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
        }
    }

    pub fn fail(&self, err: &ApiError) {
        if !err.is_cancelled() {
            self.error.set(Some(err.user_message()));
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// 在数据上就地修改（乐观更新）
    pub fn patch(&self, f: impl FnOnce(&mut T)) {
        self.data.update(|data| {
            if let Some(data) = data.as_mut() {
                f(data);
            }
        });
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Remote<T> {
    /// 追踪读取；未加载时返回默认值
    pub fn value(&self) -> T {
        self.data.get().unwrap_or_default()
    }
}

/// 发起 GET 并写入 `remote`；组件卸载后结果被丢弃
pub fn fetch<R>(api: &FitLifeApi, req: R, remote: Remote<R::Response>)
where
    R: ApiRequest + 'static,
    R::Response: Send + Sync + 'static,
{
    remote.loading.set(true);
    remote.error.set(None);
    let api = api.clone();
    spawn_scoped(async move { api.send(&req).await }, move |result| {
        match result {
            Ok(value) => remote.data.set(Some(value)),
            Err(e) => remote.fail(&e),
        }
        remote.loading.set(false);
    });
}

/// 发起写操作；失败信息写入 `error`
///
/// 与 `fetch` 一样绑定到调用方的 owner：页面卸载后既不调用 `on_ok`，也不写入 `error`。
pub fn submit<R, F>(api: &FitLifeApi, req: R, error: RwSignal<Option<String>>, on_ok: F)
where
    R: ApiRequest + 'static,
    F: FnOnce(R::Response) + 'static,
{
    error.set(None);
    let api = api.clone();
    spawn_scoped(async move { api.send(&req).await }, move |result| match result {
        Ok(value) => on_ok(value),
        Err(e) => error.set(Some(e.user_message())),
    });
}

/// 表单数字输入：空串视为未填写
pub(crate) fn parse_opt<T: std::str::FromStr>(input: &str) -> Option<T> {
    let s = input.trim();
    if s.is_empty() { None } else { s.parse().ok() }
}

pub(crate) fn non_empty(input: String) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_inputs() {
        assert_eq!(parse_opt::<f64>(" 72.5 "), Some(72.5));
        assert_eq!(parse_opt::<u32>(""), None);
        assert_eq!(parse_opt::<u32>("abc"), None);
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" note ".into()).as_deref(), Some("note"));
    }
}
