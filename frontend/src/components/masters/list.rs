//! 主数据列表：分页、搜索、切换状态

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::protocol::{ChangeMasterStatusRequest, MasterListRequest};
use panelworks_shared::{ListQuery, MasterKind, MasterRecord, PageMeta, RecordId};
use tracing::warn;

use crate::api::use_api;
use crate::components::loader::TableStatus;
use crate::components::pagination::{Pager, SearchBox};
use crate::components::toast::use_toasts;
use crate::web::dialog::confirm;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn MasterListPage(kind: MasterKind) -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let query = RwSignal::new(ListQuery::default());
    let rows = RwSignal::new(Vec::<MasterRecord>::new());
    let meta = RwSignal::new(PageMeta::default());
    let loading = RwSignal::new(true);
    // 正在切换状态的行
    let toggling = RwSignal::new(BTreeSet::<RecordId>::new());

    let load = move || {
        let request = MasterListRequest {
            kind,
            query: query.get_untracked(),
        };
        loading.set(true);
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&request).await {
                Ok(page) => {
                    meta.set(page.meta);
                    rows.set(page.data);
                }
                Err(e) => {
                    warn!(%kind, error = %e, "master list failed");
                    if !e.is_session_expired() {
                        toasts.error(format!("Failed to load {}", kind.title()));
                    }
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        query.track();
        load();
    });

    let on_search = move |text: String| query.set(ListQuery::page(1).with_search(text));
    let on_page = move |page: u32| query.update(|q| q.page = page);

    let toggle_status = move |record: MasterRecord| {
        if toggling.with_untracked(|set| set.contains(&record.id)) {
            return;
        }
        let action = if record.status { "deactivate" } else { "activate" };
        if !confirm(&format!("Are you sure you want to {} \"{}\"?", action, record.title)) {
            return;
        }
        toggling.update(|set| {
            set.insert(record.id);
        });
        let request = ChangeMasterStatusRequest {
            kind,
            id: record.id,
        };
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&request).await {
                Ok(resp) => {
                    toasts.success(resp.message);
                    load();
                }
                Err(e) => {
                    if !e.is_session_expired() {
                        toasts.error(
                            e.server_message()
                                .unwrap_or("Failed to update status")
                                .to_string(),
                        );
                    }
                }
            }
            toggling.update(|set| {
                set.remove(&record.id);
            });
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-6xl mx-auto">
            <div class="card-body p-0">
                <div class="flex flex-col md:flex-row md:items-center justify-between gap-4 p-6 pb-2">
                    <h3 class="card-title">{kind.title()}</h3>
                    <div class="flex gap-2">
                        <SearchBox placeholder="Search..." on_search=on_search />
                        <Link to=AppRoute::MasterAdd(kind) class="btn btn-sm btn-primary">
                            "+ Add"
                        </Link>
                    </div>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Name"</th>
                                <th>"Short Code"</th>
                                <th>"Status"</th>
                                <th class="text-right">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() || rows.with(Vec::is_empty)>
                                <TableStatus
                                    colspan=5
                                    loading=loading.into()
                                    empty_text="No records found."
                                />
                            </Show>
                            <Show when=move || !loading.get()>
                                <For
                                    each=move || rows.get().into_iter().enumerate()
                                    key=move |(index, record)| {
                                        (meta.get_untracked().serial(*index), record.id, record.status, record.title.clone())
                                    }
                                    children=move |(index, record)| {
                                        let serial = meta.get_untracked().serial(index);
                                        let id = record.id;
                                        let busy = move || toggling.with(|set| set.contains(&id));
                                        let badge = if record.status {
                                            ("badge badge-success", "Active")
                                        } else {
                                            ("badge badge-ghost", "Inactive")
                                        };
                                        let toggle_label = if record.status { "Deactivate" } else { "Activate" };
                                        let record_for_toggle = record.clone();
                                        view! {
                                            <tr>
                                                <td>{serial}</td>
                                                <td class="font-medium">{record.title.clone()}</td>
                                                <td>{record.short.clone()}</td>
                                                <td><span class=badge.0>{badge.1}</span></td>
                                                <td class="text-right space-x-2">
                                                    <Link to=AppRoute::MasterEdit(kind, id) class="btn btn-xs btn-ghost">
                                                        "Edit"
                                                    </Link>
                                                    <button
                                                        class="btn btn-xs btn-outline"
                                                        disabled=busy
                                                        on:click=move |_| toggle_status(record_for_toggle.clone())
                                                    >
                                                        {toggle_label}
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
    }
}
