//! 新建订单页面
//!
//! 所有状态都在 `OrderScreen` 中，这里只负责发请求和提示。

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::order::{DesignCodeTicket, OrderScreen, SubmitOutcome, load_catalog};
use tracing::debug;

use super::customer_details::CustomerDetails;
use super::design_details::DesignDetails;
use super::design_preview::DesignPreview;
use crate::api::use_api;
use crate::components::loader::PageLoader;
use crate::components::toast::use_toasts;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn OrderCreatePage() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();
    let router = use_router();

    let screen = RwSignal::new(OrderScreen::new());

    // 挂载时并发加载全部选项
    Effect::new(move |_| {
        spawn_local(async move {
            let client = api.get_value();
            let catalog = load_catalog(&client).await;
            screen.update(|s| s.finish_loading(catalog));
        });
    });

    let fetch_codes = move |ticket: DesignCodeTicket| {
        spawn_local(async move {
            let client = api.get_value();
            let result = client.call(&ticket.request()).await.map(|resp| resp.data);
            let accepted = screen
                .try_update(|s| s.accept_design_codes(ticket, result))
                .unwrap_or(false);
            if !accepted {
                debug!(generation = ticket.generation, "stale design codes dropped");
            }
        });
    };

    let on_add = move |_: ()| match screen.try_update(|s| s.add_line_item()) {
        Some(Ok(id)) => toasts.success(format!("Design {} added", id)),
        Some(Err(blocked)) => {
            if let Some(notice) = blocked.notice() {
                toasts.error(notice);
            }
        }
        None => {}
    };

    let on_submit = move |_| {
        let payload = match screen.try_update(|s| s.begin_submit()) {
            Some(Ok(payload)) => payload,
            Some(Err(blocked)) => {
                if let Some(notice) = blocked.notice() {
                    toasts.error(notice);
                }
                return;
            }
            None => return,
        };

        spawn_local(async move {
            let client = api.get_value();
            let result = client.call(&payload).await;
            let Some(outcome) = screen.try_update(|s| s.finish_submit(result)) else {
                return;
            };
            match &outcome {
                SubmitOutcome::Created { .. } => {
                    if let Some(notice) = outcome.notice() {
                        toasts.success(notice);
                    }
                    router.go(AppRoute::OrderList);
                }
                SubmitOutcome::FieldErrors(_) => {
                    let unmapped = screen.with_untracked(|s| s.unmapped_errors());
                    if unmapped.is_empty() {
                        toasts.error("Please correct the highlighted fields");
                    } else {
                        toasts.error(unmapped.join(" "));
                    }
                }
                _ => {
                    if let Some(notice) = outcome.notice() {
                        toasts.error(notice);
                    }
                }
            }
        });
    };

    view! {
        <Show
            when=move || !screen.with(OrderScreen::is_loading)
            fallback=|| view! { <PageLoader /> }
        >
            <div class="max-w-6xl mx-auto space-y-6">
                <h2 class="text-2xl font-bold">"Create Order"</h2>

                <CustomerDetails screen=screen />
                <DesignDetails screen=screen on_codes=fetch_codes on_add=on_add />
                <DesignPreview screen=screen />

                {move || {
                    let unmapped = screen.with(|s| s.unmapped_errors());
                    (!unmapped.is_empty()).then(|| view! {
                        <div role="alert" class="alert alert-error">
                            <ul>
                                {unmapped.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                            </ul>
                        </div>
                    })
                }}

                <div class="flex justify-end">
                    <button
                        class="btn btn-primary"
                        disabled=move || screen.with(OrderScreen::is_submitting)
                        on:click=on_submit
                    >
                        {move || if screen.with(OrderScreen::is_submitting) {
                            view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                        } else {
                            "Submit Order".into_any()
                        }}
                    </button>
                </div>
            </div>
        </Show>
    }
}
