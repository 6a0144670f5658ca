//! panelworks 共享层
//!
//! 不依赖 DOM 的纯 Rust 部分：领域模型、接口协议、API 客户端、
//! 会话模型以及订单草稿构建器。前端只负责渲染和事件绑定。

pub mod client;
pub mod error;
pub mod forms;
pub mod model;
pub mod order;
pub mod pagination;
pub mod protocol;
mod serde_helper;
pub mod session;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 默认 API 前缀（开发服务器会将其代理到后端）
pub const DEFAULT_API_BASE: &str = "/api";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 任何请求只要返回这些状态码，就视为会话失效
pub const SESSION_EXPIRY_STATUSES: [u16; 4] = [401, 403, 419, 500];

pub use client::{ApiClient, HttpRequest, HttpResponse, SessionHandle, Transport};
pub use error::{ApiError, FetchError, FieldMessages, TransportError};
pub use model::*;
pub use pagination::{ListQuery, PageMeta, Paginated};
pub use protocol::{ApiRequest, HttpMethod};
pub use session::{Session, SessionStorage};
