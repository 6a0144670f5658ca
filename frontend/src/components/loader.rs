use leptos::prelude::*;

/// 整页加载指示
#[component]
pub fn PageLoader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 表格内的加载/空状态行
#[component]
pub fn TableStatus(
    colspan: u32,
    loading: Signal<bool>,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    view! {
        <tr>
            <td colspan=colspan class="text-center py-8 text-base-content/50">
                {move || if loading.get() {
                    view! { <span class="loading loading-dots loading-md"></span> }.into_any()
                } else {
                    empty_text.clone().into_any()
                }}
            </td>
        </tr>
    }
}
