//! 订单列表：分页、搜索、按状态和日期筛选

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::protocol::OrderListRequest;
use panelworks_shared::{ListQuery, OrderStatus, OrderSummary, PageMeta};
use tracing::warn;

use super::status_badge_class;
use crate::api::use_api;
use crate::components::loader::TableStatus;
use crate::components::pagination::{Pager, SearchBox};
use crate::components::toast::use_toasts;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 筛选面板中尚未应用的输入
#[derive(Debug, Clone, Default, PartialEq)]
struct FilterInput {
    status: Option<OrderStatus>,
    start_date: String,
    end_date: String,
}

impl FilterInput {
    fn apply_to(&self, request: &mut OrderListRequest) {
        request.status = self.status;
        request.start_date = Some(self.start_date.clone()).filter(|s| !s.is_empty());
        request.end_date = Some(self.end_date.clone()).filter(|s| !s.is_empty());
        request.query.page = 1;
    }
}

fn parse_status(raw: &str) -> Option<OrderStatus> {
    OrderStatus::ALL.into_iter().find(|s| s.as_str() == raw)
}

#[component]
pub fn OrderListPage() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let request = RwSignal::new(OrderListRequest::default());
    let filters = RwSignal::new(FilterInput::default());
    let show_filters = RwSignal::new(false);
    let rows = RwSignal::new(Vec::<OrderSummary>::new());
    let meta = RwSignal::new(PageMeta::default());
    let loading = RwSignal::new(true);

    Effect::new(move |_| {
        let current = request.get();
        loading.set(true);
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&current).await {
                Ok(page) => {
                    meta.set(page.meta);
                    rows.set(page.data);
                }
                Err(e) => {
                    warn!(error = %e, "order list failed");
                    if !e.is_session_expired() {
                        toasts.error("Failed to load orders");
                    }
                }
            }
            loading.set(false);
        });
    });

    let on_search = move |text: String| {
        request.update(|r| r.query = ListQuery::page(1).with_search(text));
    };
    let on_page = move |page: u32| request.update(|r| r.query.page = page);
    let apply_filters = move |_| {
        request.update(|r| filters.with_untracked(|f| f.apply_to(r)));
        show_filters.set(false);
    };
    let clear_filters = move |_| {
        filters.set(FilterInput::default());
        request.update(|r| FilterInput::default().apply_to(r));
    };
    let active_filters = move || request.with(OrderListRequest::active_filter_count);

    view! {
        <div class="card bg-base-100 shadow-xl max-w-6xl mx-auto">
            <div class="card-body p-0">
                <div class="flex flex-col md:flex-row md:items-center justify-between gap-4 p-6 pb-2">
                    <h3 class="card-title">"Orders"</h3>
                    <div class="flex gap-2">
                        <SearchBox placeholder="Search orders..." on_search=on_search />
                        <button class="btn btn-sm btn-outline" on:click=move |_| show_filters.update(|open| *open = !*open)>
                            "Filters"
                            <Show when=move || { active_filters() > 0 }>
                                <span class="badge badge-primary badge-sm">{active_filters}</span>
                            </Show>
                        </button>
                        <Link to=AppRoute::OrderCreate class="btn btn-sm btn-primary">"+ New Order"</Link>
                    </div>
                </div>

                <Show when=move || show_filters.get()>
                    <div class="grid grid-cols-1 md:grid-cols-4 gap-4 px-6 pb-4 items-end">
                        <label class="form-control">
                            <span class="label-text">"Status"</span>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=move || filters.with(|f| f.status.map(|s| s.as_str()).unwrap_or_default())
                                on:change=move |ev| {
                                    let status = parse_status(&event_target_value(&ev));
                                    filters.update(|f| f.status = status);
                                }
                            >
                                <option value="">"All"</option>
                                {OrderStatus::ALL
                                    .into_iter()
                                    .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="form-control">
                            <span class="label-text">"From"</span>
                            <input
                                type="date"
                                class="input input-bordered input-sm"
                                prop:value=move || filters.with(|f| f.start_date.clone())
                                on:change=move |ev| filters.update(|f| f.start_date = event_target_value(&ev))
                            />
                        </label>
                        <label class="form-control">
                            <span class="label-text">"To"</span>
                            <input
                                type="date"
                                class="input input-bordered input-sm"
                                prop:value=move || filters.with(|f| f.end_date.clone())
                                on:change=move |ev| filters.update(|f| f.end_date = event_target_value(&ev))
                            />
                        </label>
                        <div class="flex gap-2">
                            <button class="btn btn-sm btn-primary" on:click=apply_filters>"Apply"</button>
                            <button class="btn btn-sm btn-ghost" on:click=clear_filters>"Clear"</button>
                        </div>
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Order"</th>
                                <th>"Customer"</th>
                                <th>"Delivery"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() || rows.with(Vec::is_empty)>
                                <TableStatus colspan=6 loading=loading.into() empty_text="No orders found." />
                            </Show>
                            <Show when=move || !loading.get()>
                                <For
                                    each=move || rows.get().into_iter().enumerate()
                                    key=move |(index, order)| (meta.get_untracked().serial(*index), order.id, order.status)
                                    children=move |(index, order)| {
                                        let serial = meta.get_untracked().serial(index);
                                        let customer = order.customer.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                                        view! {
                                            <tr>
                                                <td>{serial}</td>
                                                <td class="font-mono">{order.code.clone()}</td>
                                                <td>{customer}</td>
                                                <td>{order.delivery_date.clone().unwrap_or_default()}</td>
                                                <td>
                                                    <span class=status_badge_class(order.status)>{order.status.label()}</span>
                                                </td>
                                                <td class="text-right">
                                                    <Link to=AppRoute::OrderDetails(order.id) class="btn btn-xs btn-ghost">
                                                        "View"
                                                    </Link>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </Show>
                        </tbody>
                    </table>
                </div>

                <Pager meta=meta.into() on_page=on_page />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applying_filters_resets_to_first_page() {
        let mut request = OrderListRequest::default();
        request.query.page = 4;
        let input = FilterInput {
            status: Some(OrderStatus::Shipped),
            start_date: "2025-01-01".into(),
            end_date: String::new(),
        };
        input.apply_to(&mut request);

        assert_eq!(request.query.page, 1);
        assert_eq!(request.status, Some(OrderStatus::Shipped));
        assert_eq!(request.start_date.as_deref(), Some("2025-01-01"));
        assert_eq!(request.end_date, None);
        assert_eq!(request.active_filter_count(), 2);
    }

    #[test]
    fn clearing_filters_drops_every_constraint() {
        let mut request = OrderListRequest {
            status: Some(OrderStatus::Pending),
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-02-01".into()),
            ..OrderListRequest::default()
        };
        FilterInput::default().apply_to(&mut request);
        assert_eq!(request.active_filter_count(), 0);
    }

    #[test]
    fn status_select_values_parse_back() {
        assert_eq!(parse_status("delivered"), Some(OrderStatus::Delivered));
        assert_eq!(parse_status(""), None);
    }
}
