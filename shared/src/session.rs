//! 会话模型
//!
//! 登录用户与 token 的组合。启动时从持久化存储恢复，
//! 只在登录、注销和会话失效时修改。

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::UserProfile;

pub const STORAGE_TOKEN_KEY: &str = "auth_token";
pub const STORAGE_USER_KEY: &str = "auth_user";

/// 持久化键值存储（浏览器中为 LocalStorage）
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
}

impl Session {
    /// 从存储中恢复上次的会话
    ///
    /// 用户信息无法解析时视为不存在。
    pub fn restore(storage: &impl SessionStorage) -> Self {
        let token = storage
            .get(STORAGE_TOKEN_KEY)
            .filter(|token| !token.is_empty());
        let user = storage.get(STORAGE_USER_KEY).and_then(|raw| {
            serde_json::from_str::<UserProfile>(&raw)
                .inspect_err(|e| warn!(error = %e, "discarding unreadable persisted user"))
                .ok()
        });
        Self { user, token }
    }

    /// 登录成功：写入存储并返回新会话
    pub fn establish(storage: &impl SessionStorage, user: UserProfile, token: String) -> Self {
        storage.set(STORAGE_TOKEN_KEY, &token);
        match serde_json::to_string(&user) {
            Ok(raw) => {
                storage.set(STORAGE_USER_KEY, &raw);
            }
            Err(e) => warn!(error = %e, "user profile not persisted"),
        }
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    /// 注销或会话失效：清除存储并返回空会话
    pub fn clear(storage: &impl SessionStorage) -> Self {
        storage.delete(STORAGE_TOKEN_KEY);
        storage.delete(STORAGE_USER_KEY);
        Self::default()
    }

    /// 资料修改成功后更新当前用户；未登录时不做任何事
    pub fn replace_user(&mut self, storage: &impl SessionStorage, user: UserProfile) {
        if !self.is_authenticated() {
            return;
        }
        match serde_json::to_string(&user) {
            Ok(raw) => {
                storage.set(STORAGE_USER_KEY, &raw);
            }
            Err(e) => warn!(error = %e, "user profile not persisted"),
        }
        self.user = Some(user);
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn user_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 内存存储，记录所有写操作
    #[derive(Default)]
    pub struct MemoryStorage {
        pub items: RefCell<HashMap<String, String>>,
        pub log: RefCell<Vec<String>>,
    }

    impl SessionStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.log.borrow_mut().push(format!("set:{}", key));
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn delete(&self, key: &str) -> bool {
            self.log.borrow_mut().push(format!("delete:{}", key));
            self.items.borrow_mut().remove(key).is_some()
        }
    }

    fn asha() -> UserProfile {
        UserProfile {
            id: Some(1),
            name: "Asha".into(),
            email: "asha@example.com".into(),
        }
    }

    #[test]
    fn establish_then_restore_round_trips_through_storage() {
        let storage = MemoryStorage::default();
        let session = Session::establish(&storage, asha(), "tok".into());
        assert!(session.is_authenticated());

        let restored = Session::restore(&storage);
        assert_eq!(restored, session);
        assert_eq!(restored.bearer(), Some("tok"));
        assert_eq!(restored.user_name(), "Asha");
    }

    #[test]
    fn token_without_user_is_not_authenticated() {
        let storage = MemoryStorage::default();
        storage.set(STORAGE_TOKEN_KEY, "tok");
        storage.set(STORAGE_USER_KEY, "{not json");

        let session = Session::restore(&storage);
        assert_eq!(session.user, None);
        assert_eq!(session.bearer(), Some("tok"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clear_removes_both_keys() {
        let storage = MemoryStorage::default();
        Session::establish(&storage, asha(), "tok".into());
        storage.log.borrow_mut().clear();

        let session = Session::clear(&storage);
        assert!(!session.is_authenticated());
        assert!(storage.items.borrow().is_empty());
        assert_eq!(
            *storage.log.borrow(),
            vec!["delete:auth_token".to_string(), "delete:auth_user".to_string()]
        );
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let storage = MemoryStorage::default();
        storage.set(STORAGE_TOKEN_KEY, "");
        let session = Session::restore(&storage);
        assert_eq!(session.token, None);
    }

    #[test]
    fn replace_user_persists_only_while_logged_in() {
        let storage = MemoryStorage::default();
        let mut session = Session::establish(&storage, asha(), "tok".into());
        let renamed = UserProfile {
            name: "Asha K".into(),
            ..asha()
        };
        session.replace_user(&storage, renamed.clone());
        assert_eq!(session.user_name(), "Asha K");
        assert_eq!(Session::restore(&storage).user, Some(renamed));

        let mut anonymous = Session::default();
        storage.log.borrow_mut().clear();
        anonymous.replace_user(&storage, asha());
        assert_eq!(anonymous.user, None);
        assert!(storage.log.borrow().is_empty());
    }
}
