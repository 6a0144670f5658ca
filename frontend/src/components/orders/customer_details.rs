//! 客户信息：客户、地点、品牌、交货日期

use chrono::NaiveDate;
use leptos::prelude::*;
use panelworks_shared::order::{CustomerField, OptionCategory, OrderScreen};
use panelworks_shared::{OptionLabel, RecordId};

use crate::components::field::{OptionSelect, option_pairs};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[component]
pub fn CustomerDetails(screen: RwSignal<OrderScreen>) -> impl IntoView {
    let options = Signal::derive(move || screen.with(|s| option_pairs(s.catalog().customers())));
    // 载荷中发送的是客户名称，下拉框按名称反查 id
    let selected = Signal::derive(move || {
        screen.with(|s| {
            let name = &s.draft().customer.customer_name;
            s.catalog()
                .customers()
                .iter()
                .find(|c| !name.is_empty() && c.label() == name.as_str())
                .map(OptionLabel::id)
        })
    });
    let on_customer = move |id: Option<RecordId>| {
        screen.update(|s| {
            let name = id
                .and_then(|id| s.catalog().customers().iter().find(|c| c.id() == id))
                .map(|c| c.label().to_string())
                .unwrap_or_default();
            s.set_customer_name(name);
        });
    };

    let date_value = move || {
        screen.with(|s| {
            s.draft()
                .customer
                .delivery_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        })
    };
    let date_error = move || screen.with(|s| s.customer_error(CustomerField::DeliveryDate));
    let place_error = move || screen.with(|s| s.server_error("place").map(str::to_string));
    let brand_error = move || screen.with(|s| s.server_error("brand").map(str::to_string));

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">"Customer Details"</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <OptionSelect
                        label="Customer"
                        options=options
                        selected=selected
                        on_change=on_customer
                        error=Signal::derive(move || screen.with(|s| s.customer_error(CustomerField::CustomerName)))
                        failed=Signal::derive(move || screen.with(|s| s.catalog().failed(OptionCategory::Customers)))
                    />

                    <div class="form-control">
                        <label class="label" for="delivery-date">
                            <span class="label-text">"Delivery Date"</span>
                        </label>
                        <input
                            id="delivery-date"
                            type="date"
                            class="input input-bordered w-full"
                            class:input-error=move || date_error().is_some()
                            prop:value=date_value
                            on:change=move |ev| {
                                let date = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT).ok();
                                screen.update(|s| s.set_delivery_date(date));
                            }
                        />
                        {move || date_error().filter(|m| !m.is_empty()).map(|m| view! {
                            <span class="label-text-alt text-error mt-1">{m}</span>
                        })}
                    </div>

                    <div class="form-control">
                        <label class="label" for="place">
                            <span class="label-text">"Place"</span>
                        </label>
                        <input
                            id="place"
                            class="input input-bordered w-full"
                            class:input-error=move || place_error().is_some()
                            prop:value=move || screen.with(|s| s.draft().customer.place.clone())
                            on:input=move |ev| screen.update(|s| s.set_place(event_target_value(&ev)))
                        />
                        {move || place_error().map(|m| view! {
                            <span class="label-text-alt text-error mt-1">{m}</span>
                        })}
                    </div>

                    <div class="form-control">
                        <label class="label" for="brand">
                            <span class="label-text">"Brand"</span>
                        </label>
                        <input
                            id="brand"
                            class="input input-bordered w-full"
                            class:input-error=move || brand_error().is_some()
                            prop:value=move || screen.with(|s| s.draft().customer.brand.clone())
                            on:input=move |ev| screen.update(|s| s.set_brand(event_target_value(&ev)))
                        />
                        {move || brand_error().map(|m| view! {
                            <span class="label-text-alt text-error mt-1">{m}</span>
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}
