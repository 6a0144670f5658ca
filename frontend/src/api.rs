//! API 客户端上下文

use leptos::prelude::*;
use panelworks_shared::ApiClient;

use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::web::FetchTransport;

/// 浏览器中的 API 客户端：fetch 传输 + 认证上下文
pub type Api = ApiClient<FetchTransport, AuthContext>;

pub fn provide_api(config: &AppConfig, auth: AuthContext) -> StoredValue<Api> {
    let api = StoredValue::new(ApiClient::new(config.api_base.clone(), FetchTransport, auth));
    provide_context(api);
    api
}

pub fn use_api() -> StoredValue<Api> {
    use_context::<StoredValue<Api>>().expect("Api should be provided")
}
