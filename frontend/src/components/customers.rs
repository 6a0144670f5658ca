//! 客户列表与详情面板

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::protocol::{CustomerDetailsRequest, CustomerListRequest};
use panelworks_shared::{CustomerRecord, ListQuery, PageMeta, RecordId};
use tracing::warn;

use crate::api::use_api;
use crate::components::loader::TableStatus;
use crate::components::pagination::{Pager, SearchBox};
use crate::components::toast::use_toasts;

/// 详情面板的状态
#[derive(Debug, Clone, PartialEq)]
enum DetailPanel {
    Closed,
    Loading(RecordId),
    Open(Box<CustomerRecord>),
}

fn status_badge(active: bool) -> (&'static str, &'static str) {
    if active {
        ("badge badge-success", "Active")
    } else {
        ("badge badge-error", "Inactive")
    }
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let query = RwSignal::new(ListQuery::default());
    let rows = RwSignal::new(Vec::<CustomerRecord>::new());
    let meta = RwSignal::new(PageMeta::default());
    let loading = RwSignal::new(true);
    let panel = RwSignal::new(DetailPanel::Closed);

    Effect::new(move |_| {
        let request = CustomerListRequest { query: query.get() };
        loading.set(true);
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&request).await {
                Ok(page) => {
                    meta.set(page.meta);
                    rows.set(page.data);
                }
                Err(e) => {
                    warn!(error = %e, "customer list failed");
                    if !e.is_session_expired() {
                        toasts.error("Failed to load customers");
                    }
                }
            }
            loading.set(false);
        });
    });

    let open_details = move |id: RecordId| {
        if panel.with_untracked(|p| matches!(p, DetailPanel::Loading(current) if *current == id)) {
            return;
        }
        panel.set(DetailPanel::Loading(id));
        spawn_local(async move {
            let client = api.get_value();
            let result = client.call(&CustomerDetailsRequest { id }).await;
            // 期间用户可能已关闭或打开了另一条
            if panel.with_untracked(|p| *p != DetailPanel::Loading(id)) {
                return;
            }
            match result {
                Ok(resp) => panel.set(DetailPanel::Open(Box::new(resp.data))),
                Err(e) => {
                    warn!(id, error = %e, "customer details failed");
                    panel.set(DetailPanel::Closed);
                    if !e.is_session_expired() {
                        toasts.error("Failed to load details");
                    }
                }
            }
        });
    };

    let on_search = move |text: String| query.set(ListQuery::page(1).with_search(text));
    let on_page = move |page: u32| query.update(|q| q.page = page);

    view! {
        <div class="max-w-6xl mx-auto space-y-4">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex flex-col md:flex-row md:items-center justify-between gap-4 p-6 pb-2">
                        <h3 class="card-title">"Customers"</h3>
                        <SearchBox placeholder="Search customers..." on_search=on_search />
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"#"</th>
                                    <th>"Name"</th>
                                    <th>"Phone"</th>
                                    <th>"Location"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get() || rows.with(Vec::is_empty)>
                                    <TableStatus
                                        colspan=6
                                        loading=loading.into()
                                        empty_text="No customers found."
                                    />
                                </Show>
                                <Show when=move || !loading.get()>
                                    <For
                                        each=move || rows.get().into_iter().enumerate()
                                        key=move |(index, c)| (meta.get_untracked().serial(*index), c.id)
                                        children=move |(index, customer)| {
                                            let serial = meta.get_untracked().serial(index);
                                            let id = customer.id;
                                            let (badge_class, badge_text) = status_badge(customer.status);
                                            view! {
                                                <tr class="hover">
                                                    <td>{serial}</td>
                                                    <td class="font-medium">{customer.name.clone()}</td>
                                                    <td>{customer.phone_no.clone()}</td>
                                                    <td>{customer.location_line()}</td>
                                                    <td><span class=badge_class>{badge_text}</span></td>
                                                    <td class="text-right">
                                                        <button
                                                            class="btn btn-xs btn-ghost"
                                                            on:click=move |_| open_details(id)
                                                        >
                                                            "View"
                                                        </button>
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

            {move || match panel.get() {
                DetailPanel::Closed => ().into_any(),
                DetailPanel::Loading(_) => view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center">
                            <span class="loading loading-spinner loading-md"></span>
                        </div>
                    </div>
                }
                .into_any(),
                DetailPanel::Open(customer) => view! {
                    <CustomerCard customer=*customer on_close=move || panel.set(DetailPanel::Closed) />
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn CustomerCard(customer: CustomerRecord, on_close: impl Fn() + 'static) -> impl IntoView {
    let (badge_class, badge_text) = status_badge(customer.status);
    let location = customer.location_line();
    let inactive_reason = customer
        .inactive_reason_label
        .clone()
        .filter(|reason| !customer.status && !reason.is_empty());

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex justify-between items-start">
                    <h3 class="card-title">{customer.name.clone()}</h3>
                    <button class="btn btn-sm btn-circle btn-ghost" on:click=move |_| on_close()>
                        "✕"
                    </button>
                </div>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-2 text-sm">
                    <div><span class="font-semibold">"Phone: "</span>{customer.phone_no.clone()}</div>
                    <div><span class="font-semibold">"Email: "</span>{customer.email.clone()}</div>
                    <div><span class="font-semibold">"Location: "</span>{location}</div>
                    <div>
                        <span class="font-semibold">"Status: "</span>
                        <span class=badge_class>{badge_text}</span>
                    </div>
                    {inactive_reason.map(|reason| view! {
                        <div><span class="font-semibold">"Reason: "</span>{reason}</div>
                    })}
                    {customer.created_at.clone().map(|created| view! {
                        <div><span class="font-semibold">"Created: "</span>{created}</div>
                    })}
                </div>
            </div>
        </div>
    }
}
