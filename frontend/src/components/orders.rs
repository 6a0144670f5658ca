//! 订单：新建（草稿构建）、列表、详情

mod create;
mod customer_details;
mod design_details;
mod design_preview;
mod details;
mod list;

use panelworks_shared::OrderStatus;

pub use create::OrderCreatePage;
pub use details::OrderDetailsPage;
pub use list::OrderListPage;

/// 订单状态徽章样式
fn status_badge_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Confirmed => "badge badge-info",
        OrderStatus::Processing => "badge badge-primary",
        OrderStatus::Shipped => "badge badge-secondary",
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Cancelled => "badge badge-error",
    }
}
