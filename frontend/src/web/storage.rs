//! LocalStorage 封装模块
//!
//! 基于 `gloo-storage`，只存取原始字符串（令牌、购物车 JSON）。

use gloo_storage::Storage;

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    /// 获取存储的字符串值
    ///
    /// 键不存在或存储不可用时返回 `None`。
    pub fn get(key: &str) -> Option<String> {
        gloo_storage::LocalStorage::raw().get_item(key).ok().flatten()
    }

    /// 设置存储值，成功返回 `true`
    pub fn set(key: &str, value: &str) -> bool {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .is_ok()
    }

    pub fn delete(key: &str) {
        gloo_storage::LocalStorage::delete(key);
    }
}
