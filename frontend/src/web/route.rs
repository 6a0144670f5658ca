//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

use panelworks_shared::{MasterKind, RecordId};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面；未知路径也落到这里
    #[default]
    Login,
    Dashboard,
    Customers,
    OrderCreate,
    OrderList,
    OrderDetails(RecordId),
    MasterList(MasterKind),
    MasterAdd(MasterKind),
    MasterEdit(MasterKind, RecordId),
    ProfileEdit,
    ChangePassword,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["dashboard"] => Self::Dashboard,
            ["customers", "list"] => Self::Customers,
            ["orders", "create"] => Self::OrderCreate,
            ["orders", "list"] => Self::OrderList,
            ["orders", "details", id] => id.parse().map_or(Self::Login, Self::OrderDetails),
            ["master", kind] => MasterKind::from_resource(kind).map_or(Self::Login, Self::MasterList),
            ["master", kind, "add"] => {
                MasterKind::from_resource(kind).map_or(Self::Login, Self::MasterAdd)
            }
            ["master", kind, "edit", id] => match (MasterKind::from_resource(kind), id.parse()) {
                (Some(kind), Ok(id)) => Self::MasterEdit(kind, id),
                _ => Self::Login,
            },
            ["profile", "edit"] => Self::ProfileEdit,
            ["profile", "change-password"] => Self::ChangePassword,
            _ => Self::Login,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::Customers => "/customers/list".into(),
            Self::OrderCreate => "/orders/create".into(),
            Self::OrderList => "/orders/list".into(),
            Self::OrderDetails(id) => format!("/orders/details/{}", id),
            Self::MasterList(kind) => format!("/master/{}", kind.resource()),
            Self::MasterAdd(kind) => format!("/master/{}/add", kind.resource()),
            Self::MasterEdit(kind, id) => format!("/master/{}/edit/{}", kind.resource(), id),
            Self::ProfileEdit => "/profile/edit".into(),
            Self::ChangePassword => "/profile/change-password".into(),
        }
    }

    /// **核心守卫逻辑：除登录页外都需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// 已认证用户访问登录页时跳走
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 登录后没有记录的目标页时前往面板
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 侧边栏高亮用的分组
    pub fn section(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Customers => "customers",
            Self::OrderCreate | Self::OrderList | Self::OrderDetails(_) => "orders",
            Self::MasterList(kind) | Self::MasterAdd(kind) | Self::MasterEdit(kind, _) => {
                kind.resource()
            }
            Self::ProfileEdit | Self::ChangePassword => "profile",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips_through_its_path() {
        let routes = [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Customers,
            AppRoute::OrderCreate,
            AppRoute::OrderList,
            AppRoute::OrderDetails(42),
            AppRoute::MasterList(MasterKind::DesignType),
            AppRoute::MasterAdd(MasterKind::Color),
            AppRoute::MasterEdit(MasterKind::Finishing, 7),
            AppRoute::ProfileEdit,
            AppRoute::ChangePassword,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn unknown_or_malformed_paths_fall_back_to_login() {
        for path in ["/", "", "/nope", "/orders/details/abc", "/master/wood", "/master/color/edit/x"] {
            assert_eq!(AppRoute::from_path(path), AppRoute::Login, "{path}");
        }
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
    }

    #[test]
    fn only_login_is_public() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::OrderDetails(1).requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
    }
}
