//! 订单详情

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::protocol::OrderDetailsRequest;
use panelworks_shared::{OrderDesign, OrderDetails, RecordId, SizedQuantity};
use tracing::warn;

use super::status_badge_class;
use crate::api::use_api;
use crate::components::loader::PageLoader;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[derive(Debug, Clone, PartialEq)]
enum DetailState {
    Loading,
    Loaded(Box<OrderDetails>),
    NotFound,
}

#[component]
pub fn OrderDetailsPage(id: RecordId) -> impl IntoView {
    let api = use_api();
    let state = RwSignal::new(DetailState::Loading);

    Effect::new(move |_| {
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&OrderDetailsRequest { id }).await {
                Ok(resp) => state.set(DetailState::Loaded(Box::new(resp.data))),
                Err(e) => {
                    warn!(id, error = %e, "order details failed");
                    state.set(DetailState::NotFound);
                }
            }
        });
    });

    move || match state.get() {
        DetailState::Loading => view! { <PageLoader /> }.into_any(),
        DetailState::NotFound => view! {
            <div class="card bg-base-100 shadow max-w-xl mx-auto">
                <div class="card-body items-center text-center">
                    <h3 class="card-title">"Order Not Found"</h3>
                    <p class="text-base-content/70">"The order could not be loaded."</p>
                    <Link to=AppRoute::OrderList class="btn btn-primary btn-sm">"Back to Orders"</Link>
                </div>
            </div>
        }
        .into_any(),
        DetailState::Loaded(details) => view! { <OrderView details=*details /> }.into_any(),
    }
}

#[component]
fn OrderView(details: OrderDetails) -> impl IntoView {
    let total = details.total_panels();
    let OrderDetails {
        order,
        customer,
        order_designs,
    } = details;

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold font-mono">{order.code.clone()}</h2>
                <Link to=AppRoute::OrderList class="btn btn-ghost btn-sm">"← Orders"</Link>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="card bg-base-100 shadow">
                    <div class="card-body text-sm space-y-1">
                        <h3 class="card-title">"Order"</h3>
                        <div>
                            <span class="font-semibold">"Status: "</span>
                            <span class=status_badge_class(order.status)>{order.status.label()}</span>
                        </div>
                        <div><span class="font-semibold">"Delivery Date: "</span>{order.delivery_date.clone().unwrap_or_default()}</div>
                        <div><span class="font-semibold">"Created: "</span>{order.created_at.clone().unwrap_or_default()}</div>
                        <div><span class="font-semibold">"Total Panels: "</span>{total}</div>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body text-sm space-y-1">
                        <h3 class="card-title">"Customer"</h3>
                        <div class="font-medium">{customer.name.clone()}</div>
                        <div>{customer.email.clone()}</div>
                        <div>{customer.phone_no.clone()}</div>
                        <div>{customer.full_location.clone().unwrap_or_default()}</div>
                    </div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {order_designs
                    .into_iter()
                    .enumerate()
                    .map(|(index, design)| view! { <DesignCard index=index design=design /> })
                    .collect_view()}
            </div>
        </div>
    }
}

fn quantity_table(title: &'static str, rows: Vec<SizedQuantity>, total: u32) -> impl IntoView {
    (!rows.is_empty()).then(|| {
        view! {
            <div>
                <h4 class="font-semibold mt-2">{title}</h4>
                <table class="table table-xs">
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|row| view! {
                                <tr><td>{row.size}</td><td class="text-right">{row.quantity}</td></tr>
                            })
                            .collect_view()}
                        <tr class="font-semibold"><td>"Total"</td><td class="text-right">{total}</td></tr>
                    </tbody>
                </table>
            </div>
        }
    })
}

#[component]
fn DesignCard(index: usize, design: OrderDesign) -> impl IntoView {
    let a_total = design.a_section_total();
    let frame_total = design.frame_total();
    let design_type = design.design_type_title().to_string();
    let finishing = design.finishing_title().to_string();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body text-sm space-y-1">
                <h3 class="card-title">{format!("SL - {:02}", index + 1)}</h3>
                <div><span class="font-semibold">"Design Type: "</span>{design_type}</div>
                <div><span class="font-semibold">"Finishing: "</span>{finishing}</div>
                <div><span class="font-semibold">"Design Code: "</span>{design.design_code.clone()}</div>
                <div><span class="font-semibold">"Nos: "</span>{design.nos}</div>
                {quantity_table("A-Section", design.a_sections, a_total)}
                {quantity_table("Frame", design.frames, frame_total)}
            </div>
        </div>
    }
}
