//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号检查状态，API 客户端通过 `SessionHandle` 读取 token。

use leptos::prelude::*;
use panelworks_shared::protocol::{LoginRequest, LogoutRequest};
use panelworks_shared::{ApiError, Session, SessionHandle};
use tracing::{info, warn};

use crate::api::Api;
use crate::web::LocalStorage;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<Session>,
    pub set_state: WriteSignal<Session>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复上次的会话
    pub fn new() -> Self {
        let (state, set_state) = signal(Session::restore(&LocalStorage));
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(Session::is_authenticated))
    }

    pub fn user_name(&self) -> Signal<String> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user_name().to_string()))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle for AuthContext {
    fn bearer_token(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.bearer().map(str::to_string))
    }

    /// 服务端拒绝会话：清除存储并通知路由
    fn expire(&self) {
        warn!("session expired");
        self.set_state.set(Session::clear(&LocalStorage));
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录并持久化会话
///
/// 导航由路由服务的认证状态监听处理。
pub async fn login(ctx: &AuthContext, api: &Api, request: LoginRequest) -> Result<(), ApiError> {
    let response = api.call(&request).await?;
    let payload = response.response;
    info!(user = %payload.user.name, "login succeeded");
    let session = Session::establish(&LocalStorage, payload.user, payload.token.plain_text_token);
    ctx.set_state.set(session);
    Ok(())
}

/// 注销：通知后端，无论结果如何都清除本地会话
pub async fn logout(ctx: &AuthContext, api: &Api) {
    if let Err(e) = api.call(&LogoutRequest).await {
        warn!(error = %e, "logout request failed, clearing session anyway");
    }
    ctx.set_state.set(Session::clear(&LocalStorage));
}
