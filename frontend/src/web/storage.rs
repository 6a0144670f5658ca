//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，并实现共享层的 `SessionStorage`。

use panelworks_shared::SessionStorage;

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 键不存在或发生错误时返回 `None`
    pub fn read(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn write(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn remove(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::read(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::write(key, value)
    }

    fn delete(&self, key: &str) -> bool {
        Self::remove(key)
    }
}
