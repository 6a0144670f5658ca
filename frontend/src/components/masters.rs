//! 主数据（表面处理 / 设计类型 / 颜色）共用的列表与表单

mod form;
mod list;

pub use form::MasterFormPage;
pub use list::MasterListPage;
