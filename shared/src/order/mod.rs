//! 订单创建
//!
//! - `numeric`：数量输入过滤
//! - `draft`：草稿、设计行校验与追加、提交载荷
//! - `catalog`：挂载时并发拉取的选项列表
//! - `design_codes`：随选择变化的设计编号列表
//! - `screen`：页面状态机

pub mod catalog;
pub mod design_codes;
pub mod draft;
pub mod numeric;
pub mod screen;

#[cfg(test)]
mod tests;

pub use catalog::{load_catalog, Catalog, OptionCategory, OptionList};
pub use design_codes::{DesignCodeResolver, DesignCodeTicket};
pub use draft::{
    AddBlocked, CustomerField, CustomerSelection, DraftLineItem, LineItemField, MissingFields, OrderDraft,
    OrderSubmission, QuantityMap, SavedLineItem, SubmitBlocked,
};
pub use screen::{OrderScreen, ScreenPhase, SubmitOutcome};
