use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::protocol::CurrentUserRequest;
use panelworks_shared::{MasterKind, UserProfile};
use tracing::warn;

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let (user, set_user) = signal(Option::<UserProfile>::None);

    // 拉取最新的用户信息（会话失效时由客户端统一处理）
    Effect::new(move |_| {
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&CurrentUserRequest).await {
                Ok(resp) => set_user.set(Some(resp.data)),
                Err(e) => warn!(error = %e, "current user unavailable"),
            }
        });
    });

    let shortcuts = [
        ("Create Order", "Start a new order with one or more designs", AppRoute::OrderCreate),
        ("Orders", "Browse and filter placed orders", AppRoute::OrderList),
        ("Customers", "Look up customer details", AppRoute::Customers),
    ];

    view! {
        <div class="max-w-6xl mx-auto space-y-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title text-2xl">
                        {move || match user.get() {
                            Some(u) if !u.name.is_empty() => format!("Welcome, {}", u.name),
                            _ => "Welcome".to_string(),
                        }}
                    </h2>
                    <p class="text-base-content/70">
                        {move || user.get().map(|u| u.email).unwrap_or_default()}
                    </p>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                {shortcuts
                    .into_iter()
                    .map(|(title, desc, route)| view! {
                        <Link to=route class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                            <div class="card-body">
                                <h3 class="card-title">{title}</h3>
                                <p class="text-sm text-base-content/70">{desc}</p>
                            </div>
                        </Link>
                    })
                    .collect_view()}
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"Masters"</h3>
                    <div class="flex flex-wrap gap-2">
                        {MasterKind::ALL
                            .into_iter()
                            .map(|kind| view! {
                                <Link to=AppRoute::MasterList(kind) class="btn btn-outline btn-sm">
                                    {kind.title()}
                                </Link>
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
