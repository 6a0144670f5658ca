//! API 客户端
//!
//! - `Transport`：发送一次原始 HTTP 请求（浏览器中是 fetch，测试中是内存 mock）
//! - `SessionHandle`：提供 bearer token，并在会话失效时被通知
//! - `ApiClient`：拼接 URL、注入认证头、统一处理响应状态码

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::error::{ApiError, FieldMessages, TransportError};
use crate::protocol::{ApiRequest, HttpMethod};
use crate::{HEADER_AUTHORIZATION, SESSION_EXPIRY_STATUSES};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 传输特性
///
/// (?Send) 是因为浏览器环境下的 fetch future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// 会话句柄：客户端通过它读取 token，并在会话失效时清除会话
pub trait SessionHandle {
    fn bearer_token(&self) -> Option<String>;
    fn expire(&self);
}

// =========================================================
// ApiClient
// =========================================================

#[derive(Debug, Clone)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    session: S,
}

/// 非 2xx 响应体中可能出现的字段
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    message: Option<String>,
}

impl<T: Transport, S: SessionHandle> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, session: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            session,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    fn build<R: ApiRequest>(&self, request: &R) -> Result<HttpRequest, ApiError> {
        let url = self.url(&request.path(), &request.query());
        let mut req =
            HttpRequest::new(&url, R::METHOD).with_header("Accept", "application/json");

        if let Some(token) = self.session.bearer_token().filter(|t| !t.is_empty()) {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_value(request)
                .map_err(|e| TransportError::RequestBuild(e.to_string()))?;
            if !body.is_null() {
                req = req
                    .with_header("Content-Type", "application/json")
                    .with_body(body.to_string());
            }
        }
        Ok(req)
    }

    /// 发送请求并解析响应
    ///
    /// 401/403/419/500 会先清除会话，再返回 `ApiError::SessionExpired`。
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let req = self.build(request)?;
        let method = req.method;
        let url = req.url.clone();
        debug!(method = method.as_str(), %url, "api request");

        let response = self.transport.send(req).await?;

        if response.ok() {
            return serde_json::from_str(&response.body).map_err(|e| {
                error!(%url, error = %e, "response body did not match the expected shape");
                ApiError::Decode(e.to_string())
            });
        }

        if SESSION_EXPIRY_STATUSES.contains(&response.status) {
            warn!(status = response.status, %url, "session rejected by server, clearing");
            self.session.expire();
            return Err(ApiError::SessionExpired {
                status: response.status,
            });
        }

        Err(rejection(response))
    }
}

fn rejection(response: HttpResponse) -> ApiError {
    let parsed = serde_json::from_str::<ErrorBody>(&response.body).ok();
    let (errors, message) = match parsed {
        Some(body) => (body.errors, body.message),
        None => (None, None),
    };

    if let Some(errors) = errors {
        let fields: FieldMessages = errors
            .into_iter()
            .filter_map(|(field, messages)| messages.into_iter().next().map(|m| (field, m)))
            .collect();
        if !fields.is_empty() {
            return ApiError::Validation(fields);
        }
    }

    ApiError::Rejected {
        status: response.status,
        message,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{DataEnvelope, TitledOption};
    use crate::protocol::{DesignTypeOptionsRequest, LogoutRequest};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    // =========================================================
    // Shared Mock Components
    // =========================================================

    /// 按顺序返回预设响应，并记录收到的请求
    #[derive(Default)]
    pub struct MockTransport {
        pub sent: RefCell<Vec<HttpRequest>>,
        replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        routes: RefCell<Vec<(String, HttpResponse)>>,
    }

    impl MockTransport {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        /// 下一次请求的回复（不区分路径）
        pub fn reply(&self, status: u16, body: &str) {
            self.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        pub fn fail_next(&self, err: TransportError) {
            self.replies.borrow_mut().push_back(Err(err));
        }

        /// URL 以 `suffix` 结尾的请求总是得到该回复
        pub fn route(&self, suffix: &str, status: u16, body: &str) {
            self.routes.borrow_mut().push((
                suffix.to_string(),
                HttpResponse {
                    status,
                    body: body.to_string(),
                },
            ));
        }

        pub fn urls(&self) -> Vec<String> {
            self.sent.borrow().iter().map(|r| r.url.clone()).collect()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for Rc<MockTransport> {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            let routed = self
                .routes
                .borrow()
                .iter()
                .find(|(suffix, _)| req.url.ends_with(suffix.as_str()))
                .map(|(_, resp)| resp.clone());
            self.sent.borrow_mut().push(req);
            if let Some(resp) = routed {
                return Ok(resp);
            }
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no reply scripted".into())))
        }
    }

    #[derive(Default)]
    pub struct MockSession {
        pub token: RefCell<Option<String>>,
        pub expired: Cell<u32>,
    }

    impl MockSession {
        pub fn with_token(token: &str) -> Rc<Self> {
            let session = Self::default();
            *session.token.borrow_mut() = Some(token.to_string());
            Rc::new(session)
        }
    }

    impl SessionHandle for Rc<MockSession> {
        fn bearer_token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn expire(&self) {
            self.expired.set(self.expired.get() + 1);
            self.token.borrow_mut().take();
        }
    }

    pub type TestClient = ApiClient<Rc<MockTransport>, Rc<MockSession>>;

    pub fn setup() -> (Rc<MockTransport>, Rc<MockSession>, TestClient) {
        let transport = MockTransport::new();
        let session = MockSession::with_token("tok-1");
        let client = ApiClient::new("/api/", transport.clone(), session.clone());
        (transport, session, client)
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_decodes_data() {
        let (transport, _session, client) = setup();
        transport.reply(200, r#"{"data": [{"id": 3, "title": "Flush"}]}"#);

        let resp: DataEnvelope<Vec<TitledOption>> =
            client.call(&DesignTypeOptionsRequest).await.unwrap();
        assert_eq!(resp.data[0].title, "Flush");

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].url, "/api/sales/get-design-types");
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok-1"));
        assert_eq!(sent[0].body, None);
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let (transport, session, client) = setup();
        session.token.borrow_mut().take();
        transport.reply(200, r#"{"success": true, "message": "bye"}"#);

        client.call(&LogoutRequest).await.unwrap();
        let sent = transport.sent.borrow();
        assert_eq!(sent[0].header(HEADER_AUTHORIZATION), None);
        // 单元结构体序列化为 null，不发送请求体
        assert_eq!(sent[0].body, None);
    }

    #[tokio::test]
    async fn auth_statuses_expire_the_session() {
        for status in SESSION_EXPIRY_STATUSES {
            let (transport, session, client) = setup();
            transport.reply(status, "{}");

            let err = client.call(&DesignTypeOptionsRequest).await.unwrap_err();
            assert_eq!(err, ApiError::SessionExpired { status });
            assert_eq!(session.expired.get(), 1);
            assert_eq!(session.bearer_token(), None);
        }
    }

    #[tokio::test]
    async fn structured_errors_keep_first_message_per_field() {
        let (transport, session, client) = setup();
        transport.reply(
            422,
            r#"{"message": "invalid", "errors": {"customerName": ["required", "too short"], "brand": []}}"#,
        );

        let err = client.call(&LogoutRequest).await.unwrap_err();
        let mut expected = FieldMessages::new();
        expected.insert("customerName".into(), "required".into());
        assert_eq!(err, ApiError::Validation(expected));
        assert_eq!(session.expired.get(), 0);
    }

    #[tokio::test]
    async fn unstructured_rejection_keeps_server_message() {
        let (transport, _session, client) = setup();
        transport.reply(409, r#"{"message": "Already inactive"}"#);
        let err = client.call(&LogoutRequest).await.unwrap_err();
        assert_eq!(err.server_message(), Some("Already inactive"));

        transport.reply(404, "<html>not json</html>");
        let err = client.call(&LogoutRequest).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 404,
                message: None
            }
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let (transport, _session, client) = setup();
        transport.reply(200, r#"{"rows": []}"#);
        let err = client.call(&DesignTypeOptionsRequest).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn query_pairs_are_url_encoded() {
        use crate::pagination::ListQuery;
        use crate::protocol::CustomerListRequest;

        let (transport, _session, client) = setup();
        transport.reply(200, r#"{"data": [], "meta": {"current_page": 1, "per_page": 10, "total": 0, "last_page": 1}}"#);
        let request = CustomerListRequest {
            query: ListQuery::page(1).with_search("A & B"),
        };
        client.call(&request).await.unwrap();
        assert_eq!(
            transport.urls(),
            vec!["/api/sales/get-customers-list?page=1&per_page=10&search_key=A+%26+B".to_string()]
        );
    }
}
