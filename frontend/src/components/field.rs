use leptos::prelude::*;
use panelworks_shared::{ApiError, FieldMessages, OptionLabel, RecordId};

/// 字段下方的错误提示；没有错误时不渲染
#[component]
pub fn FieldError(errors: RwSignal<FieldMessages>, field: &'static str) -> impl IntoView {
    let message = move || errors.with(|map| map.get(field).cloned());

    view! {
        <Show when=move || message().is_some()>
            <span class="label-text-alt text-error mt-1">{move || message().unwrap_or_default()}</span>
        </Show>
    }
}

/// 提交结果中的字段错误写回表单；非字段错误返回给调用方提示
pub fn absorb_field_errors(errors: RwSignal<FieldMessages>, err: &ApiError) -> bool {
    match err {
        ApiError::Validation(fields) => {
            errors.set(fields.clone());
            true
        }
        _ => false,
    }
}

/// 以 id 为值的下拉框
///
/// `failed` 为真时在下方提示该列表未能加载。
#[component]
pub fn OptionSelect(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(RecordId, String)>>,
    #[prop(into)] selected: Signal<Option<RecordId>>,
    #[prop(into)] on_change: Callback<Option<RecordId>>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] failed: Signal<bool>,
) -> impl IntoView {
    let value = move || selected.get().map(|id| id.to_string()).unwrap_or_default();

    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <select
                class="select select-bordered w-full"
                class:select-error=move || error.with(Option::is_some)
                prop:value=value
                on:change=move |ev| on_change.run(event_target_value(&ev).parse().ok())
            >
                <option value="">{format!("Select {}", label)}</option>
                <For
                    each=move || options.get()
                    key=|(id, text)| (*id, text.clone())
                    children=move |(id, text)| {
                        view! {
                            <option value=id.to_string() selected=move || selected.get() == Some(id)>
                                {text}
                            </option>
                        }
                    }
                />
            </select>
            {move || error.get().filter(|m| !m.is_empty()).map(|m| view! {
                <span class="label-text-alt text-error mt-1">{m}</span>
            })}
            <Show when=move || failed.get()>
                <span class="label-text-alt text-warning mt-1">"Could not load options"</span>
            </Show>
        </div>
    }
}

/// 选项列表转换为下拉框使用的 (id, 标签)
pub fn option_pairs<T: OptionLabel>(items: &[T]) -> Vec<(RecordId, String)> {
    items
        .iter()
        .map(|item| (item.id(), item.label().to_string()))
        .collect()
}
