//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout` 替代 `gloo-timers`。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 单次定时器
///
/// 在 drop 之前未触发时会被取消。
pub struct Timeout {
    handle: Option<i32>,
}

impl Timeout {
    /// `millis` 毫秒后执行一次 `callback`
    ///
    /// 无法获取 window 或设置失败时回调不会执行。
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let handle = web_sys::window().and_then(|window| {
            let closure = Closure::once_into_js(callback);
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.unchecked_ref(),
                    millis as i32,
                )
                .ok()
        });
        if handle.is_none() {
            tracing::warn!("setTimeout unavailable, callback dropped");
        }
        Self { handle }
    }

    /// 不再持有定时器，让它在到期时照常执行
    pub fn forget(mut self) {
        self.handle = None;
    }

    pub fn cancel(&mut self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
