//! 设计行编辑：类型、表面处理、面板尺寸、设计编号和各项数量

use leptos::prelude::*;
use panelworks_shared::order::numeric::{is_rejected_key, parse_count, paste_is_numeric, sanitize_count};
use panelworks_shared::order::{DesignCodeTicket, LineItemField, OptionCategory, OrderScreen};
use panelworks_shared::{RecordId, SizeSlot};
use wasm_bindgen::JsCast;

use crate::components::field::{OptionSelect, option_pairs};

/// 只接受非负整数的数量输入框
///
/// 按键和粘贴阶段拦截非法字符，输入后再过滤一次。
#[component]
fn CountInput(
    #[prop(into)] value: Signal<Option<u32>>,
    #[prop(into)] on_change: Callback<Option<u32>>,
    #[prop(into, default = Signal::stored(false))] invalid: Signal<bool>,
    #[prop(optional)] id: &'static str,
) -> impl IntoView {
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if is_rejected_key(&ev.key()) {
            ev.prevent_default();
        }
    };
    let on_paste = move |ev: web_sys::ClipboardEvent| {
        let text = ev
            .clipboard_data()
            .and_then(|data| data.get_data("text").ok())
            .unwrap_or_default();
        if !paste_is_numeric(&text) {
            ev.prevent_default();
        }
    };
    let on_input = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        let clean = sanitize_count(&raw);
        if clean != raw
            && let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            input.set_value(&clean);
        }
        on_change.run(parse_count(&clean));
    };

    view! {
        <input
            id=id
            type="number"
            min="0"
            step="1"
            inputmode="numeric"
            class="input input-bordered input-sm w-full"
            class:input-error=move || invalid.get()
            prop:value=move || value.get().map(|n| n.to_string()).unwrap_or_default()
            on:keydown=on_keydown
            on:paste=on_paste
            on:input=on_input
        />
    }
}

/// 一组尺寸槽位的数量输入（A 段或框）
#[component]
fn SlotQuantities(
    title: &'static str,
    #[prop(into)] slots: Signal<Vec<SizeSlot>>,
    #[prop(into)] failed: Signal<bool>,
    read: fn(&OrderScreen, RecordId) -> Option<u32>,
    write: fn(&mut OrderScreen, RecordId, Option<u32>),
    screen: RwSignal<OrderScreen>,
) -> impl IntoView {
    view! {
        <div>
            <h4 class="font-semibold mb-2">{title}</h4>
            <Show when=move || failed.get()>
                <p class="text-sm text-warning">{format!("Could not load {} sizes", title)}</p>
            </Show>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-2">
                <For
                    each=move || slots.get()
                    key=|slot| slot.id
                    children=move |slot| {
                        let slot_id = slot.id;
                        view! {
                            <label class="form-control">
                                <span class="label-text text-xs">{slot.size.clone()}</span>
                                <CountInput
                                    value=Signal::derive(move || screen.with(|s| read(s, slot_id)))
                                    on_change={move |value: Option<u32>| screen.update(|s| write(s, slot_id, value))}
                                />
                            </label>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[component]
pub fn DesignDetails(
    screen: RwSignal<OrderScreen>,
    #[prop(into)] on_codes: Callback<DesignCodeTicket>,
    #[prop(into)] on_add: Callback<()>,
) -> impl IntoView {
    let error = move |field: LineItemField| Signal::derive(move || screen.with(|s| s.line_error(field)));
    let failed = move |category: OptionCategory| {
        Signal::derive(move || screen.with(|s| s.catalog().failed(category)))
    };

    let on_design_type = move |id: Option<RecordId>| {
        if let Some(ticket) = screen.try_update(|s| s.select_design_type(id)) {
            on_codes.run(ticket);
        }
    };
    let on_finishing = move |id: Option<RecordId>| {
        if let Some(ticket) = screen.try_update(|s| s.select_finishing(id)) {
            on_codes.run(ticket);
        }
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">"Design Details"</h3>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <OptionSelect
                        label="Design Type"
                        options=Signal::derive(move || screen.with(|s| option_pairs(s.catalog().design_types())))
                        selected=Signal::derive(move || screen.with(|s| s.draft().current.design_type))
                        on_change=on_design_type
                        error=error(LineItemField::DesignType)
                        failed=failed(OptionCategory::DesignTypes)
                    />
                    <OptionSelect
                        label="Finishing"
                        options=Signal::derive(move || screen.with(|s| option_pairs(s.catalog().finishings())))
                        selected=Signal::derive(move || screen.with(|s| s.draft().current.finishing))
                        on_change=on_finishing
                        error=error(LineItemField::Finishing)
                        failed=failed(OptionCategory::Finishings)
                    />
                    <OptionSelect
                        label="Panel Size"
                        options=Signal::derive(move || screen.with(|s| option_pairs(s.catalog().panel_sizes())))
                        selected=Signal::derive(move || screen.with(|s| s.draft().current.panel_size))
                        on_change={move |id: Option<RecordId>| screen.update(|s| s.select_panel_size(id))}
                        error=error(LineItemField::PanelSize)
                        failed=failed(OptionCategory::PanelSizes)
                    />
                    <OptionSelect
                        label="Design No"
                        options=Signal::derive(move || screen.with(|s| option_pairs(s.design_codes().codes())))
                        selected=Signal::derive(move || screen.with(|s| s.draft().current.design_no))
                        on_change={move |id: Option<RecordId>| screen.update(|s| s.select_design_no(id))}
                        error=error(LineItemField::DesignNo)
                        failed=Signal::derive(move || screen.with(|s| s.design_codes().failure().is_some()))
                    />
                    <div class="form-control">
                        <label class="label" for="nos">
                            <span class="label-text">"Nos"</span>
                        </label>
                        <CountInput
                            id="nos"
                            value=Signal::derive(move || screen.with(|s| s.draft().current.nos))
                            on_change={move |nos: Option<u32>| screen.update(|s| s.set_nos(nos))}
                            invalid=Signal::derive(move || screen.with(|s| s.line_error(LineItemField::Nos).is_some()))
                        />
                        {move || screen
                            .with(|s| s.line_error(LineItemField::Nos))
                            .filter(|m| !m.is_empty())
                            .map(|m| view! { <span class="label-text-alt text-error mt-1">{m}</span> })}
                    </div>
                </div>

                <div class="divider"></div>

                <SlotQuantities
                    title="A-Section"
                    slots=Signal::derive(move || screen.with(|s| s.catalog().a_section_sizes().to_vec()))
                    failed=failed(OptionCategory::ASectionSizes)
                    read=|s: &OrderScreen, slot| s.draft().current.a_section.get(&slot).copied()
                    write=|s: &mut OrderScreen, slot, value| s.set_a_section(slot, value)
                    screen=screen
                />
                <SlotQuantities
                    title="Frame"
                    slots=Signal::derive(move || screen.with(|s| s.catalog().frame_sizes().to_vec()))
                    failed=failed(OptionCategory::FrameSizes)
                    read=|s: &OrderScreen, slot| s.draft().current.frame.get(&slot).copied()
                    write=|s: &mut OrderScreen, slot, value| s.set_frame(slot, value)
                    screen=screen
                />

                <div class="card-actions justify-end mt-4">
                    <button
                        class="btn btn-secondary"
                        disabled=move || screen.with(OrderScreen::is_submitting)
                        on:click=move |_| on_add.run(())
                    >
                        "+ Add Design"
                    </button>
                </div>
            </div>
        </div>
    }
}
