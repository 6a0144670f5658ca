//! 下单页面状态机
//!
//! ```text
//! Loading -> Ready <-> ValidationError
//!            Ready -> Submitting -> Submitted
//!                               -> SubmissionError -> Ready
//! ```
//!
//! Loading 只在挂载时进入一次。页面组件把所有事件转发到这里，
//! 自身只负责渲染和发出请求。

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::{ApiError, FieldMessages};
use crate::model::{
    label_for, ActionResponse, DesignCodeOption, RecordId, LABEL_UNKNOWN,
};
use crate::order::catalog::Catalog;
use crate::order::design_codes::{DesignCodeResolver, DesignCodeTicket};
use crate::order::draft::{
    set_quantity, AddBlocked, CustomerField, LineItemField, OrderDraft, OrderSubmission,
    SubmitBlocked, NOTICE_NOT_CREATED, NOTICE_SERVER_ERROR,
};

const KEY_PLACE: &str = "place";
const KEY_BRAND: &str = "brand";

/// 页面上有对应输入框的错误键
fn is_mapped_key(key: &str) -> bool {
    key == KEY_PLACE
        || key == KEY_BRAND
        || LineItemField::REQUIRED.iter().any(|field| field.key() == key)
        || CustomerField::ALL.iter().any(|field| field.key() == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Loading,
    Ready,
    ValidationError,
    Submitting,
    Submitted,
    SubmissionError,
}

/// 提交请求结束后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 创建成功，草稿已丢弃
    Created { message: String },
    /// 2xx 但 `success` 为 false
    NotCreated,
    /// 后端返回字段错误，已映射到表单
    FieldErrors(FieldMessages),
    /// 会话失效，草稿已丢弃
    SessionExpired,
    /// 其他失败
    Failed,
}

impl SubmitOutcome {
    pub fn notice(&self) -> Option<String> {
        match self {
            SubmitOutcome::Created { message } => Some(message.clone()),
            SubmitOutcome::NotCreated => Some(NOTICE_NOT_CREATED.to_string()),
            SubmitOutcome::Failed => Some(NOTICE_SERVER_ERROR.to_string()),
            SubmitOutcome::FieldErrors(_) | SubmitOutcome::SessionExpired => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderScreen {
    phase: ScreenPhase,
    catalog: Catalog,
    codes: DesignCodeResolver,
    /// 曾经拉取到的设计编号标签，已保存行的预览不受后续拉取影响
    code_labels: BTreeMap<RecordId, String>,
    draft: OrderDraft,
    server_errors: FieldMessages,
}

impl Default for OrderScreen {
    fn default() -> Self {
        Self {
            phase: ScreenPhase::Loading,
            catalog: Catalog::default(),
            codes: DesignCodeResolver::default(),
            code_labels: BTreeMap::new(),
            draft: OrderDraft::default(),
            server_errors: FieldMessages::new(),
        }
    }
}

impl OrderScreen {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------
    // 读取
    // ---------------------------------------------------------

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ScreenPhase::Loading
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == ScreenPhase::Submitting
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn design_codes(&self) -> &DesignCodeResolver {
        &self.codes
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// 字段的错误信息：后端返回的文字优先，其次是本地必填标记
    pub fn line_error(&self, field: LineItemField) -> Option<String> {
        self.server_errors
            .get(field.key())
            .cloned()
            .or_else(|| self.draft.has_line_error(field).then(String::new))
    }

    pub fn customer_error(&self, field: CustomerField) -> Option<String> {
        self.server_errors
            .get(field.key())
            .cloned()
            .or_else(|| self.draft.has_customer_error(field).then(String::new))
    }

    pub fn server_errors(&self) -> &FieldMessages {
        &self.server_errors
    }

    /// 后端对单个键返回的错误文字
    pub fn server_error(&self, key: &str) -> Option<&str> {
        self.server_errors.get(key).map(String::as_str)
    }

    /// 没有对应输入框的后端错误（例如 `designs.0.nos`），按键排序
    pub fn unmapped_errors(&self) -> Vec<String> {
        self.server_errors
            .iter()
            .filter(|(key, _)| !is_mapped_key(key))
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn design_type_label(&self, id: RecordId) -> &str {
        label_for(self.catalog.design_types(), Some(id))
    }

    pub fn finishing_label(&self, id: RecordId) -> &str {
        label_for(self.catalog.finishings(), Some(id))
    }

    pub fn panel_size_label(&self, id: RecordId) -> &str {
        label_for(self.catalog.panel_sizes(), Some(id))
    }

    pub fn design_code_label(&self, id: RecordId) -> &str {
        self.code_labels
            .get(&id)
            .map(String::as_str)
            .unwrap_or(LABEL_UNKNOWN)
    }

    // ---------------------------------------------------------
    // 状态迁移
    // ---------------------------------------------------------

    /// 选项列表全部结束后调用；只生效一次
    pub fn finish_loading(&mut self, catalog: Catalog) {
        if self.phase != ScreenPhase::Loading {
            warn!(phase = ?self.phase, "catalog arrived after loading finished, ignoring");
            return;
        }
        for failure in catalog.failures() {
            debug!(category = %failure.category, "screen ready with empty list");
        }
        self.catalog = catalog;
        self.phase = ScreenPhase::Ready;
    }

    /// 任何编辑都让错误状态回到 Ready
    fn touch(&mut self) {
        if matches!(
            self.phase,
            ScreenPhase::ValidationError | ScreenPhase::SubmissionError
        ) {
            self.phase = ScreenPhase::Ready;
        }
    }

    fn clear_line_error(&mut self, field: LineItemField) {
        self.touch();
        self.draft.clear_line_error(field);
        self.server_errors.remove(field.key());
    }

    fn clear_customer_error(&mut self, field: CustomerField) {
        self.touch();
        self.draft.clear_customer_error(field);
        self.server_errors.remove(field.key());
    }

    fn refetch_codes(&mut self) -> DesignCodeTicket {
        let current = &self.draft.current;
        self.codes.begin(current.design_type, current.finishing)
    }

    /// 选择设计类型，返回需要发出的设计编号请求
    pub fn select_design_type(&mut self, id: Option<RecordId>) -> DesignCodeTicket {
        self.draft.current.design_type = id;
        self.clear_line_error(LineItemField::DesignType);
        self.refetch_codes()
    }

    pub fn select_finishing(&mut self, id: Option<RecordId>) -> DesignCodeTicket {
        self.draft.current.finishing = id;
        self.clear_line_error(LineItemField::Finishing);
        self.refetch_codes()
    }

    pub fn select_panel_size(&mut self, id: Option<RecordId>) {
        self.draft.current.panel_size = id;
        self.clear_line_error(LineItemField::PanelSize);
    }

    pub fn select_design_no(&mut self, id: Option<RecordId>) {
        self.draft.current.design_no = id;
        self.clear_line_error(LineItemField::DesignNo);
    }

    pub fn set_nos(&mut self, nos: Option<u32>) {
        self.draft.current.nos = nos;
        self.clear_line_error(LineItemField::Nos);
    }

    pub fn set_a_section(&mut self, slot: RecordId, value: Option<u32>) {
        self.touch();
        set_quantity(&mut self.draft.current.a_section, slot, value);
    }

    pub fn set_frame(&mut self, slot: RecordId, value: Option<u32>) {
        self.touch();
        set_quantity(&mut self.draft.current.frame, slot, value);
    }

    pub fn set_customer_name(&mut self, name: String) {
        self.draft.customer.customer_name = name;
        self.clear_customer_error(CustomerField::CustomerName);
    }

    pub fn set_place(&mut self, place: String) {
        self.touch();
        self.draft.customer.place = place;
        self.server_errors.remove(KEY_PLACE);
    }

    pub fn set_brand(&mut self, brand: String) {
        self.touch();
        self.draft.customer.brand = brand;
        self.server_errors.remove(KEY_BRAND);
    }

    pub fn set_delivery_date(&mut self, date: Option<chrono::NaiveDate>) {
        self.draft.customer.delivery_date = date;
        self.clear_customer_error(CustomerField::DeliveryDate);
    }

    /// 设计编号响应到达；过期响应返回 `false`
    pub fn accept_design_codes(
        &mut self,
        ticket: DesignCodeTicket,
        result: Result<Vec<DesignCodeOption>, ApiError>,
    ) -> bool {
        let labels: Vec<(RecordId, String)> = match &result {
            Ok(codes) => codes
                .iter()
                .map(|code| (code.id, code.design_code.clone()))
                .collect(),
            Err(_) => Vec::new(),
        };
        if !self.codes.complete(ticket, result) {
            return false;
        }
        self.code_labels.extend(labels);
        true
    }

    /// 点击「Add」
    ///
    /// 提交在途或已完成时拒绝，草稿此时已不会再被发送。
    pub fn add_line_item(&mut self) -> Result<u32, AddBlocked> {
        if matches!(self.phase, ScreenPhase::Submitting | ScreenPhase::Submitted) {
            debug!(phase = ?self.phase, "design line refused while order is locked");
            return Err(AddBlocked::Locked);
        }
        match self.draft.add_line_item() {
            Ok(saved) => {
                let id = saved.id;
                self.touch();
                for field in LineItemField::REQUIRED {
                    self.server_errors.remove(field.key());
                }
                info!(id, "design line added");
                Ok(id)
            }
            Err(missing) => {
                if self.phase == ScreenPhase::Ready {
                    self.phase = ScreenPhase::ValidationError;
                }
                Err(missing.into())
            }
        }
    }

    /// 点击「Submit」：通过前置检查后进入 Submitting，并返回请求载荷
    ///
    /// 请求在途时再次调用返回 `AlreadySubmitting`，不会产生第二个请求。
    pub fn begin_submit(&mut self) -> Result<OrderSubmission, SubmitBlocked> {
        match self.phase {
            ScreenPhase::Loading => return Err(SubmitBlocked::NotReady),
            ScreenPhase::Submitting | ScreenPhase::Submitted => {
                return Err(SubmitBlocked::AlreadySubmitting);
            }
            _ => {}
        }
        match self.draft.submission() {
            Ok(payload) => {
                self.server_errors.clear();
                self.phase = ScreenPhase::Submitting;
                Ok(payload)
            }
            Err(blocked) => {
                self.phase = ScreenPhase::ValidationError;
                Err(blocked)
            }
        }
    }

    /// 提交请求结束
    pub fn finish_submit(&mut self, result: Result<ActionResponse, ApiError>) -> SubmitOutcome {
        if self.phase != ScreenPhase::Submitting {
            warn!(phase = ?self.phase, "submit result without a submit in flight");
        }
        let outcome = match result {
            Ok(resp) if resp.success => {
                self.draft = OrderDraft::default();
                self.phase = ScreenPhase::Submitted;
                info!("order created");
                return SubmitOutcome::Created {
                    message: resp.message,
                };
            }
            Ok(_) => SubmitOutcome::NotCreated,
            Err(ApiError::Validation(fields)) => {
                self.server_errors = fields.clone();
                SubmitOutcome::FieldErrors(fields)
            }
            Err(ApiError::SessionExpired { status }) => {
                warn!(status, "session expired during submit, draft discarded");
                self.draft = OrderDraft::default();
                SubmitOutcome::SessionExpired
            }
            Err(err) => {
                warn!(error = %err, "order submission failed");
                SubmitOutcome::Failed
            }
        };
        self.phase = ScreenPhase::SubmissionError;
        outcome
    }
}
