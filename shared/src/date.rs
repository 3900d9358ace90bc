//! 时间类型模块
//!
//! 后端以不带时区的 ISO 8601 字符串返回时间（`2024-01-15T10:00:00.123456`），
//! 少数字段带 `Z` 或偏移量。`Timestamp` 统一解析为 UTC 的 `NaiveDateTime`，
//! 并提供页面上使用的几种格式化方式。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// 服务器时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    #[inline]
    pub const fn new(inner: NaiveDateTime) -> Self {
        Self(inner)
    }

    pub fn now() -> Self {
        Self(Utc::now().naive_utc())
    }

    /// 解析服务器或表单给出的时间字符串
    ///
    /// 依次尝试：RFC 3339、带小数秒的 naive 格式、`datetime-local` 输入格式、纯日期。
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc).naive_utc()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, INPUT_FORMAT) {
            return Some(Self(dt));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }

    #[inline]
    pub fn inner(&self) -> NaiveDateTime {
        self.0
    }

    /// 到 `now` 为止经过的整天数
    pub fn days_before(&self, now: Timestamp) -> i64 {
        (now.0 - self.0).num_days()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// `1/15/2024`
    pub fn format_date(&self) -> String {
        self.0.format("%-m/%-d/%Y").to_string()
    }

    /// `1/15/2024 10:00`
    pub fn format_date_time(&self) -> String {
        self.0.format("%-m/%-d/%Y %H:%M").to_string()
    }

    /// `<input type="datetime-local">` 使用的格式
    pub fn to_input_value(&self) -> String {
        self.0.format(INPUT_FORMAT).to_string()
    }

    pub fn to_wire(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// 仪表盘问候语
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// 本地时间的问候语
pub fn current_greeting() -> &'static str {
    greeting_for_hour(chrono::Local::now().hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_naive_timestamps_with_fraction() {
        let ts = Timestamp::parse("2024-01-15T10:00:00.123456").unwrap();
        assert_eq!(ts.format_date(), "1/15/2024");
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn parses_rfc3339_into_utc() {
        let ts = Timestamp::parse("2024-01-20T14:30:00+02:00").unwrap();
        assert_eq!(ts.format_date_time(), "1/20/2024 12:30");
    }

    #[test]
    fn parses_datetime_local_input() {
        let ts = Timestamp::parse("2024-03-01T09:15").unwrap();
        assert_eq!(ts.to_input_value(), "2024-03-01T09:15");
        assert_eq!(ts.to_wire(), "2024-03-01T09:15:00");
    }

    #[test]
    fn whole_days_between() {
        let now = Timestamp::parse("2024-06-30T12:00").unwrap();
        let earlier = Timestamp::parse("2024-06-23T18:00").unwrap();
        assert_eq!(earlier.days_before(now), 6);
        assert_eq!(now.days_before(earlier), -6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn serde_uses_wire_format() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-18T09:15:00Z\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-01-18T09:15:00\"");
    }

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good Morning");
        assert_eq!(greeting_for_hour(11), "Good Morning");
        assert_eq!(greeting_for_hour(12), "Good Afternoon");
        assert_eq!(greeting_for_hour(17), "Good Afternoon");
        assert_eq!(greeting_for_hour(18), "Good Evening");
    }
}
