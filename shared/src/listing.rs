//! 客户端分页与过滤
//!
//! 列表接口一次返回全部数据，分页在客户端完成；数据量大时这是上限所在。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 从 1 开始
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// 至少一页
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total_items.div_ceil(per_page).max(1)
}

/// 取第 `page` 页（从 1 开始），超出范围时夹到最后一页
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let pages = total_pages(items.len(), per_page);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages: pages,
        total_items: items.len(),
    }
}

/// 商品目录过滤条件，发送为查询参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: String,
    pub category: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.trim().to_string()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.query().is_empty()
    }
}

/// 对若干字段做不区分大小写的子串匹配；空查询匹配所有
pub fn matches_search(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// 价格输入框：空或非法视为未设置
pub fn parse_price(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_of_twelve() {
        let items: Vec<u32> = (1..=30).collect();
        let page = paginate(&items, 3, 12);
        assert_eq!(page.items, (25..=30).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 30);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items = vec![1, 2, 3];
        assert_eq!(paginate(&items, 9, 12).page, 1);
        assert_eq!(paginate(&items, 0, 2).items, vec![1, 2]);
        let empty: Vec<u8> = Vec::new();
        let page = paginate(&empty, 1, 12);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn filter_query_skips_empty_fields() {
        let filter = ProductFilter {
            search: "  whey ".into(),
            category: String::new(),
            min_price: Some(10.0),
            max_price: None,
        };
        assert_eq!(
            filter.query(),
            vec![("search", "whey".to_string()), ("min_price", "10".to_string())]
        );
        assert!(ProductFilter::default().is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_search("JANE", &["jane doe", "jd@example.com"]));
        assert!(!matches_search("sam", &["jane doe"]));
        assert!(matches_search("", &[]));
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("12.5"), Some(12.5));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-1"), None);
    }
}
