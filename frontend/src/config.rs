//! 运行时配置
//!
//! 构建时通过环境变量注入（`option_env!`），未设置时使用默认值。

use fitlife_shared::DEFAULT_PAGE_SIZE;
use leptos::prelude::*;

const DEFAULT_PAYMENT_SCRIPT: &str = "https://checkout.razorpay.com/v1/checkout.js";
const DEFAULT_POLL_SECS: u32 = 30;

/// 前端运行时配置结构体
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// 后端地址，空字符串表示同源
    pub api_base: String,
    pub payment_script: String,
    /// 通知轮询间隔（秒）
    pub notification_poll_secs: u32,
    pub page_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

/// 未设置或只含空白的变量视为未设置
fn non_empty(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

impl RuntimeConfig {
    /// 从编译期环境变量加载
    pub fn from_env() -> Self {
        Self::resolve(
            option_env!("FITLIFE_API_BASE"),
            option_env!("FITLIFE_PAYMENT_SCRIPT"),
            option_env!("FITLIFE_NOTIFICATION_POLL_SECS"),
        )
    }

    fn resolve(api_base: Option<&str>, payment_script: Option<&str>, poll: Option<&str>) -> Self {
        Self {
            api_base: non_empty(api_base)
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            payment_script: non_empty(payment_script)
                .unwrap_or(DEFAULT_PAYMENT_SCRIPT)
                .to_string(),
            notification_poll_secs: non_empty(poll)
                .and_then(|s| s.parse::<u32>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_POLL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn poll_millis(&self) -> u32 {
        self.notification_poll_secs.saturating_mul(1000)
    }
}

pub fn provide_config(config: RuntimeConfig) {
    provide_context(config);
}

pub fn use_config() -> RuntimeConfig {
    use_context::<RuntimeConfig>().expect("RuntimeConfig should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = RuntimeConfig::default();
        assert_eq!(config.api_base, "");
        assert_eq!(config.payment_script, DEFAULT_PAYMENT_SCRIPT);
        assert_eq!(config.notification_poll_secs, 30);
        assert_eq!(config.poll_millis(), 30_000);
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn trims_trailing_slash_and_rejects_bad_poll() {
        let config = RuntimeConfig::resolve(Some("https://api.fitlife360.io/"), Some(" "), Some("0"));
        assert_eq!(config.api_base, "https://api.fitlife360.io");
        assert_eq!(config.payment_script, DEFAULT_PAYMENT_SCRIPT);
        assert_eq!(config.notification_poll_secs, 30);

        let config = RuntimeConfig::resolve(None, None, Some("45"));
        assert_eq!(config.notification_poll_secs, 45);
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert_eq!(non_empty(Some("  https://cdn.example/pay.js ")), Some("https://cdn.example/pay.js"));
        assert_eq!(non_empty(Some("\t")), None);
        assert_eq!(non_empty(None), None);
    }
}
