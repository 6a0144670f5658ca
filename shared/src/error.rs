use std::collections::BTreeMap;

use thiserror::Error;

use crate::order::OptionCategory;

/// 字段名 -> 第一条错误信息
pub type FieldMessages = BTreeMap<String, String>;

/// 传输层错误（请求尚未得到 HTTP 响应）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// 请求构建失败
    #[error("request build failed: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    Network(String),
    /// 响应体读取失败
    #[error("response read failed: {0}")]
    ResponseRead(String),
}

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// 2xx 响应，但响应体不符合预期结构
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// 401/403/419/500：会话已被清除
    #[error("session expired (HTTP {status})")]
    SessionExpired { status: u16 },

    /// 后端返回了结构化的字段校验错误
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldMessages),

    /// 其他非 2xx 响应
    #[error("request rejected (HTTP {status})")]
    Rejected { status: u16, message: Option<String> },
}

impl ApiError {
    /// 后端给出的说明文字（如有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired { .. })
    }
}

/// 单个选项列表加载失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {category}: {source}")]
pub struct FetchError {
    pub category: OptionCategory,
    #[source]
    pub source: ApiError,
}

impl FetchError {
    pub fn new(category: OptionCategory, source: ApiError) -> Self {
        Self { category, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_convert_into_api_errors() {
        let err: ApiError = TransportError::Network("offline".into()).into();
        assert_eq!(err.to_string(), "network error: offline");
        assert!(!err.is_session_expired());
    }

    #[test]
    fn fetch_error_names_its_category() {
        let err = FetchError::new(
            OptionCategory::FrameSizes,
            ApiError::Rejected {
                status: 404,
                message: None,
            },
        );
        assert_eq!(
            err.to_string(),
            "failed to load frame sizes: request rejected (HTTP 404)"
        );
    }
}
