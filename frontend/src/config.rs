//! 构建期配置
//!
//! 通过环境变量在编译时注入，缺失或无法解析时使用默认值：
//! - `PANELWORKS_API_BASE`：API 前缀，默认 `/api`
//! - `PANELWORKS_TOAST_MILLIS`：提示消息显示时长，默认 3000

use leptos::prelude::*;
use panelworks_shared::DEFAULT_API_BASE;

pub const DEFAULT_TOAST_MILLIS: u32 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub toast_millis: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            toast_millis: DEFAULT_TOAST_MILLIS,
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::resolve(
            option_env!("PANELWORKS_API_BASE"),
            option_env!("PANELWORKS_TOAST_MILLIS"),
        )
    }

    fn resolve(api_base: Option<&str>, toast_millis: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            api_base: api_base
                .map(str::trim)
                .filter(|base| !base.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.api_base),
            toast_millis: toast_millis
                .and_then(|ms| ms.trim().parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.toast_millis),
        }
    }
}

pub fn provide_config() -> StoredValue<AppConfig> {
    let config = StoredValue::new(AppConfig::from_build_env());
    provide_context(config);
    config
}

pub fn use_config() -> StoredValue<AppConfig> {
    use_context::<StoredValue<AppConfig>>().expect("AppConfig should be provided")
}
