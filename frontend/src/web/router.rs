//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 验证 -> 处理 -> 加载"。
//!
//! 被守卫拦下的访问会记住原目标，登录成功后回到该页面。

use leptos::prelude::*;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
    {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 用于重定向
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn write_history(path: &str, use_push: bool) {
    if use_push {
        push_history_state(path);
    } else {
        replace_history_state(path);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 被守卫拦下的原目标，登录后取出
    pending: RwSignal<Option<AppRoute>>,
    /// 认证状态（由外部注入）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由从 URL 解析，首次加载同样经过守卫。
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由外部注入实现解耦
    fn new(is_authenticated: Signal<bool>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let pending = RwSignal::new(None);

        let initial = if requested.requires_auth() && !is_authenticated.get_untracked() {
            pending.set(Some(requested));
            let redirect = AppRoute::auth_failure_redirect();
            replace_history_state(&redirect.to_path());
            redirect
        } else {
            if requested.to_path() != current_path() {
                replace_history_state(&requested.to_path());
            }
            requested
        };
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            pending,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 按路径导航，未知路径解析为登录页
    pub fn navigate(&self, path: &str) {
        self.go(AppRoute::from_path(path));
    }

    /// 导航到指定路由并写入一条历史记录
    pub fn go(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    /// 1. 未登录访问受保护页面：记住原目标，重定向到登录页
    /// 2. 已登录访问登录页：回到记住的原目标，否则面板
    /// 3. 其余情况直接写入历史并更新路由
    ///
    /// `use_push` 为 `false` 时替换当前历史记录（popstate、重定向）。
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();

        if target_route.requires_auth() && !is_auth {
            info!(target = %target_route, "access denied, redirecting to login");
            self.pending.set(Some(target_route));
            let redirect = AppRoute::auth_failure_redirect();
            write_history(&redirect.to_path(), use_push);
            self.set_route.set(redirect);
            return;
        }

        if target_route.should_redirect_when_authenticated() && is_auth {
            debug!("already authenticated, leaving login");
            let redirect = self.take_pending();
            write_history(&redirect.to_path(), use_push);
            self.set_route.set(redirect);
            return;
        }

        write_history(&target_route.to_path(), use_push);
        self.set_route.set(target_route);
    }

    /// 登录后的目标：记录的原目标，否则面板
    fn take_pending(&self) -> AppRoute {
        let mut taken = None;
        self.pending.update(|pending| taken = pending.take());
        taken.unwrap_or_else(AppRoute::auth_success_redirect)
    }

    /// 浏览器后退/前进按钮同样经过守卫
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            router.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    ///
    /// 会话失效（注销或服务端拒绝）时当前页面被记住，重新登录后返回。
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth {
                if route.should_redirect_when_authenticated() {
                    let redirect = router.take_pending();
                    info!(target = %redirect, "logged in");
                    push_history_state(&redirect.to_path());
                    router.set_route.set(redirect);
                }
            } else if route.requires_auth() {
                info!(from = %route, "session ended, redirecting to login");
                router.pending.set(Some(route));
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_path());
                router.set_route.set(redirect);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 根据当前路由状态渲染对应的组件
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击，改用路由服务导航
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.go(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
