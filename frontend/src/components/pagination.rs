//! 分页条

use leptos::prelude::*;
use panelworks_shared::PageMeta;

#[component]
pub fn Pager(meta: Signal<PageMeta>, #[prop(into)] on_page: Callback<u32>) -> impl IntoView {
    view! {
        <div class="flex flex-col md:flex-row items-center justify-between gap-2 p-4">
            <span class="text-sm text-base-content/70">{move || meta.get().summary()}</span>
            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || !meta.get().has_prev()
                    on:click=move |_| on_page.run(meta.get_untracked().prev())
                >
                    "«"
                </button>
                <For
                    each={move || meta.get().pages().collect::<Vec<_>>()}
                    key=|page| *page
                    children=move |page| {
                        let class = move || {
                            if meta.get().current_page == page {
                                "join-item btn btn-sm btn-active"
                            } else {
                                "join-item btn btn-sm"
                            }
                        };
                        view! {
                            <button class=class on:click=move |_| on_page.run(page)>
                                {page}
                            </button>
                        }
                    }
                />
                <button
                    class="join-item btn btn-sm"
                    disabled=move || !meta.get().has_next()
                    on:click=move |_| on_page.run(meta.get_untracked().next())
                >
                    "»"
                </button>
            </div>
        </div>
    }
}

/// 列表页顶部的搜索框；回车或点击按钮时提交
#[component]
pub fn SearchBox(
    #[prop(into)] placeholder: String,
    #[prop(into)] on_search: Callback<String>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_search.run(text.get_untracked());
    };

    view! {
        <form class="join" on:submit=on_submit>
            <input
                type="search"
                class="input input-bordered input-sm join-item"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-sm btn-primary join-item">"Search"</button>
        </form>
    }
}
