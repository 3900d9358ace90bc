//! 浏览器 API 封装模块
//!
//! 页面与上下文只通过这里接触 fetch、LocalStorage、定时器与 History API。

pub mod download;
pub mod http;
pub mod route;
pub mod router;
mod storage;
pub mod task;
mod timer;

pub use http::FetchTransport;
pub use storage::LocalStorage;
pub use task::{CancelToken, spawn_guarded, spawn_scoped};
pub use timer::Interval;
