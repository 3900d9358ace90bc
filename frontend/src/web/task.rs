//! 组件作用域内的异步任务
//!
//! `spawn_scoped` 启动的任务绑定到当前响应式 owner：owner 被清理（组件卸载、
//! 路由切换）后，任务的结果被丢弃，不会写入已销毁的信号。

use fitlife_shared::{ApiError, ApiResult};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 取消标记
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// 已取消时把结果替换为 `ApiError::Cancelled`
    pub fn guard<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if self.is_cancelled() {
            Err(ApiError::Cancelled)
        } else {
            result
        }
    }

    /// 创建一个随当前 owner 清理而取消的标记
    pub fn scoped() -> Self {
        let token = Self::new();
        let on_drop = token.clone();
        on_cleanup(move || on_drop.cancel());
        token
    }
}

/// 构造任务：`token` 被取消后不再调用 `on_done`
pub fn guarded_task<F, T, D>(token: CancelToken, future: F, on_done: D) -> impl Future<Output = ()>
where
    F: Future<Output = T> + 'static,
    T: 'static,
    D: FnOnce(T) + 'static,
{
    async move {
        let output = future.await;
        if !token.is_cancelled() {
            on_done(output);
        }
    }
}

/// 构造绑定到当前 owner 的任务；须在 owner 上下文中调用
pub fn scoped_task<F, T, D>(future: F, on_done: D) -> impl Future<Output = ()>
where
    F: Future<Output = T> + 'static,
    T: 'static,
    D: FnOnce(T) + 'static,
{
    guarded_task(CancelToken::scoped(), future, on_done)
}

/// 启动任务，仅在 owner 仍存活时调用 `on_done`
///
/// 事件处理函数运行在组件的 owner 下，因此在 handler 中调用同样有效。
pub fn spawn_scoped<F, T, D>(future: F, on_done: D)
where
    F: Future<Output = T> + 'static,
    T: 'static,
    D: FnOnce(T) + 'static,
{
    spawn_local(scoped_task(future, on_done));
}

/// 使用已有的取消标记启动任务
pub fn spawn_guarded<F, T, D>(token: &CancelToken, future: F, on_done: D)
where
    F: Future<Output = T> + 'static,
    T: 'static,
    D: FnOnce(T) + 'static,
{
    spawn_local(guarded_task(token.clone(), future, on_done));
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn guard_replaces_late_results() {
        let token = CancelToken::new();
        assert_eq!(token.guard(Ok(1)), Ok(1));
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.guard(Ok(1)), Err(ApiError::Cancelled));
    }

    #[test]
    fn scoped_token_cancels_on_owner_cleanup() {
        let owner = Owner::new();
        let token = owner.with(CancelToken::scoped);
        assert!(!token.is_cancelled());
        owner.cleanup();
        assert!(token.is_cancelled());
    }

    #[test]
    fn completion_runs_while_owner_alive() {
        let owner = Owner::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let task = owner.with(|| {
            let hits = Arc::clone(&hits);
            scoped_task(async { 2 }, move |n| {
                hits.fetch_add(n, Ordering::SeqCst);
            })
        });
        block_on(task);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn completion_dropped_after_owner_cleanup() {
        let owner = Owner::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let task = owner.with(|| {
            let hits = Arc::clone(&hits);
            scoped_task(async { 1 }, move |n| {
                hits.fetch_add(n, Ordering::SeqCst);
            })
        });
        // 请求尚未完成时组件已卸载
        owner.cleanup();
        block_on(task);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
