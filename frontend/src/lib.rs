//! panelworks 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `config`: 构建期配置
//! - `auth`: 会话状态管理
//! - `api`: 注入会话的 API 客户端
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod components {
    pub mod customers;
    mod field;
    pub mod home;
    pub mod layout;
    pub mod loader;
    pub mod login;
    pub mod masters;
    pub mod orders;
    mod pagination;
    pub mod profile;
    pub mod toast;
}

use leptos::prelude::*;

use crate::api::provide_api;
use crate::auth::AuthContext;
use crate::components::customers::CustomersPage;
use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::masters::{MasterFormPage, MasterListPage};
use crate::components::orders::{OrderCreatePage, OrderDetailsPage, OrderListPage};
use crate::components::profile::{ChangePasswordPage, EditProfilePage};
use crate::components::toast::{ToastHost, provide_toasts};
use crate::config::provide_config;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装。
pub(crate) mod web {
    pub mod console;
    pub mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchTransport;
    pub use storage::LocalStorage;
    pub use timer::Timeout;
}

pub use web::console::MakeConsoleWriter;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，受保护页面包在 Layout 中。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <HomePage /> }.into_any(),
        AppRoute::Customers => view! { <CustomersPage /> }.into_any(),
        AppRoute::OrderCreate => view! { <OrderCreatePage /> }.into_any(),
        AppRoute::OrderList => view! { <OrderListPage /> }.into_any(),
        AppRoute::OrderDetails(id) => view! { <OrderDetailsPage id=id /> }.into_any(),
        AppRoute::MasterList(kind) => view! { <MasterListPage kind=kind /> }.into_any(),
        AppRoute::MasterAdd(kind) => view! { <MasterFormPage kind=kind id=None /> }.into_any(),
        AppRoute::MasterEdit(kind, id) => {
            view! { <MasterFormPage kind=kind id=Some(id) /> }.into_any()
        }
        AppRoute::ProfileEdit => view! { <EditProfilePage /> }.into_any(),
        AppRoute::ChangePassword => view! { <ChangePasswordPage /> }.into_any(),
    };
    view! { <Layout>{page}</Layout> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    let config = provide_config();

    // 2. 从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. API 客户端持有会话句柄，会话失效时由它清除
    config.with_value(|c| provide_api(c, auth_ctx));
    provide_toasts();

    // 4. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
