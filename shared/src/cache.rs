//! GET 响应缓存
//!
//! 键为 `path?query`，存放原始响应体文本；任何写操作成功后按路径前缀失效。

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: HashMap<String, String>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }
        format!("{path}?{}", encode_query(query))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn put(&mut self, key: String, body: String) {
        self.entries.insert(key, body);
    }

    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `a=1&b=x%20y`
pub fn encode_query(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_encoded_query() {
        assert_eq!(ResponseCache::key("/api/products/", &[]), "/api/products/");
        assert_eq!(
            ResponseCache::key("/api/products/", &[("search", "whey protein".into())]),
            "/api/products/?search=whey%20protein"
        );
    }

    #[test]
    fn invalidate_by_prefix() {
        let mut cache = ResponseCache::new();
        cache.put("/api/products/".into(), "[]".into());
        cache.put("/api/products/categories".into(), "[]".into());
        cache.put("/api/consultants/".into(), "[]".into());
        cache.invalidate_prefix("/api/products");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("/api/consultants/"), Some("[]"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
