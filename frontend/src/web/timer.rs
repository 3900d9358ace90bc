//! 定时器封装模块
//!
//! 基于 `gloo-timers` 的周期定时器。底层 `Interval` 在 drop 时调用
//! `clearInterval`，因此持有者被销毁即停止。

/// 周期性定时器
pub struct Interval {
    inner: Option<gloo_timers::callback::Interval>,
}

impl Interval {
    /// 每 `millis` 毫秒触发一次 `callback`
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            inner: Some(gloo_timers::callback::Interval::new(millis, callback)),
        }
    }

    /// 提前取消
    pub fn cancel(&mut self) {
        self.inner = None;
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}
