//! 主数据新建/编辑表单

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::forms::{MasterInput, check};
use panelworks_shared::protocol::{CreateMasterRequest, MasterEditRequest, UpdateMasterRequest};
use panelworks_shared::{FieldMessages, MasterKind, RecordId};
use tracing::warn;

use crate::api::use_api;
use crate::components::field::{FieldError, absorb_field_errors};
use crate::components::loader::PageLoader;
use crate::components::toast::use_toasts;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn MasterFormPage(kind: MasterKind, id: Option<RecordId>) -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();
    let router = use_router();

    let input = RwSignal::new(MasterInput::default());
    let errors = RwSignal::new(FieldMessages::new());
    let loading = RwSignal::new(id.is_some());
    let saving = RwSignal::new(false);

    // 编辑时先载入现有记录
    if let Some(id) = id {
        Effect::new(move |_| {
            spawn_local(async move {
                let client = api.get_value();
                match client.call(&MasterEditRequest { kind, id }).await {
                    Ok(resp) => input.set(resp.data.into()),
                    Err(e) => {
                        warn!(%kind, id, error = %e, "master record unavailable");
                        if !e.is_session_expired() {
                            toasts.error(format!("{} not found", kind.title()));
                            router.go(AppRoute::MasterList(kind));
                        }
                    }
                }
                loading.set(false);
            });
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let current = input.get_untracked();
        if let Err(messages) = check(&current) {
            errors.set(messages);
            return;
        }
        errors.set(FieldMessages::new());
        saving.set(true);

        spawn_local(async move {
            let client = api.get_value();
            let result = match id {
                Some(id) => {
                    client
                        .call(&UpdateMasterRequest {
                            kind,
                            id,
                            input: current,
                        })
                        .await
                }
                None => {
                    client
                        .call(&CreateMasterRequest {
                            kind,
                            input: current,
                        })
                        .await
                }
            };
            match result {
                Ok(resp) => {
                    let message = if resp.message.is_empty() {
                        format!("{} saved", kind.title())
                    } else {
                        resp.message
                    };
                    toasts.success(message);
                    router.go(AppRoute::MasterList(kind));
                }
                Err(e) => {
                    if !absorb_field_errors(errors, &e) && !e.is_session_expired() {
                        toasts.error(e.server_message().unwrap_or("Failed to save").to_string());
                    }
                }
            }
            saving.set(false);
        });
    };

    let heading = if id.is_some() {
        format!("Edit {}", kind.title())
    } else {
        format!("Add {}", kind.title())
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <PageLoader /> }>
            <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
                <form class="card-body" on:submit=on_submit>
                    <h3 class="card-title">{heading.clone()}</h3>

                    <div class="form-control">
                        <label class="label" for="master-title">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input
                            id="master-title"
                            class="input input-bordered"
                            class:input-error=move || errors.with(|e| e.contains_key("title"))
                            prop:value=move || input.with(|i| i.title.clone())
                            on:input=move |ev| {
                                input.update(|i| i.title = event_target_value(&ev));
                                errors.update(|e| {
                                    e.remove("title");
                                });
                            }
                        />
                        <FieldError errors=errors field="title" />
                    </div>

                    <div class="form-control">
                        <label class="label" for="master-short">
                            <span class="label-text">"Short Code"</span>
                        </label>
                        <input
                            id="master-short"
                            class="input input-bordered"
                            class:input-error=move || errors.with(|e| e.contains_key("short"))
                            prop:value=move || input.with(|i| i.short.clone())
                            on:input=move |ev| {
                                input.update(|i| i.short = event_target_value(&ev));
                                errors.update(|e| {
                                    e.remove("short");
                                });
                            }
                        />
                        <FieldError errors=errors field="short" />
                    </div>

                    <label class="label cursor-pointer justify-start gap-3 mt-2">
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=move || input.with(|i| i.status)
                            on:change=move |ev| input.update(|i| i.status = event_target_checked(&ev))
                        />
                        <span class="label-text">"Active"</span>
                    </label>

                    <div class="card-actions justify-end mt-4">
                        <Link to=AppRoute::MasterList(kind) class="btn btn-ghost">"Cancel"</Link>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
