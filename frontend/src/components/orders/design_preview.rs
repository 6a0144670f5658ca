//! 已添加设计行的预览

use leptos::prelude::*;
use panelworks_shared::order::OrderScreen;
use panelworks_shared::order::draft::{QuantityMap, quantity};
use panelworks_shared::SizeSlot;

/// 预览卡片需要的文字
#[derive(Debug, Clone, PartialEq)]
struct PreviewCard {
    serial: String,
    design_type: String,
    finishing: String,
    panel_size: String,
    design_code: String,
    nos: u32,
    a_sections: Vec<(String, u32)>,
    frames: Vec<(String, u32)>,
}

/// 只列出填写了数量的槽位
fn slot_lines(slots: &[SizeSlot], map: &QuantityMap) -> Vec<(String, u32)> {
    slots
        .iter()
        .map(|slot| (slot.size.clone(), quantity(map, slot.id)))
        .filter(|(_, n)| *n > 0)
        .collect()
}

fn preview_cards(screen: &OrderScreen) -> Vec<PreviewCard> {
    let catalog = screen.catalog();
    screen
        .draft()
        .saved()
        .iter()
        .map(|item| PreviewCard {
            serial: item.serial_label(),
            design_type: screen.design_type_label(item.design_type).to_string(),
            finishing: screen.finishing_label(item.finishing).to_string(),
            panel_size: screen.panel_size_label(item.panel_size).to_string(),
            design_code: screen.design_code_label(item.design_no).to_string(),
            nos: item.nos,
            a_sections: slot_lines(catalog.a_section_sizes(), &item.a_section),
            frames: slot_lines(catalog.frame_sizes(), &item.frame),
        })
        .collect()
}

fn quantity_list(title: &'static str, lines: Vec<(String, u32)>) -> impl IntoView {
    (!lines.is_empty()).then(|| {
        view! {
            <div>
                <span class="font-semibold">{title}": "</span>
                {lines
                    .into_iter()
                    .map(|(size, n)| view! { <span class="badge badge-outline mr-1">{format!("{} × {}", size, n)}</span> })
                    .collect_view()}
            </div>
        }
    })
}

#[component]
pub fn DesignPreview(screen: RwSignal<OrderScreen>) -> impl IntoView {
    let cards = Memo::new(move |_| screen.with(preview_cards));

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">
                    "Designs"
                    <span class="badge badge-neutral">{move || cards.with(Vec::len)}</span>
                </h3>
                <Show
                    when=move || !cards.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-base-content/60">"No designs added yet."</p> }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <For
                            each=move || cards.get()
                            key=|card| card.serial.clone()
                            children=|card| view! {
                                <div class="border border-base-300 rounded-box p-4 space-y-1 text-sm">
                                    <div class="font-bold">{card.serial}</div>
                                    <div><span class="font-semibold">"Design Type: "</span>{card.design_type}</div>
                                    <div><span class="font-semibold">"Finishing: "</span>{card.finishing}</div>
                                    <div><span class="font-semibold">"Panel Size: "</span>{card.panel_size}</div>
                                    <div><span class="font-semibold">"Design No: "</span>{card.design_code}</div>
                                    <div><span class="font-semibold">"Nos: "</span>{card.nos}</div>
                                    {quantity_list("A-Section", card.a_sections)}
                                    {quantity_list("Frame", card.frames)}
                                </div>
                            }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}
