//! 订单草稿
//!
//! 一张订单由客户信息和若干「设计」行组成。当前正在编辑的行通过校验后
//! 追加到已保存列表，最后整张草稿一次性提交。

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::RecordId;

/// 尺寸 id -> 数量。缺少的键等同于 0。
pub type QuantityMap = BTreeMap<RecordId, u32>;

/// 写入一个数量格；空值删除该键
pub fn set_quantity(map: &mut QuantityMap, slot: RecordId, value: Option<u32>) {
    match value {
        Some(v) => {
            map.insert(slot, v);
        }
        None => {
            map.remove(&slot);
        }
    }
}

pub fn quantity(map: &QuantityMap, slot: RecordId) -> u32 {
    map.get(&slot).copied().unwrap_or(0)
}

// =========================================================
// 字段标识 (Field keys)
// =========================================================

/// 设计行的必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineItemField {
    DesignType,
    DesignNo,
    PanelSize,
    Finishing,
    Nos,
}

impl LineItemField {
    pub const REQUIRED: [LineItemField; 5] = [
        LineItemField::DesignType,
        LineItemField::DesignNo,
        LineItemField::PanelSize,
        LineItemField::Finishing,
        LineItemField::Nos,
    ];

    /// 与提交载荷及后端 `errors` 中一致的字段名
    pub fn key(&self) -> &'static str {
        match self {
            LineItemField::DesignType => "designType",
            LineItemField::DesignNo => "designNo",
            LineItemField::PanelSize => "panelSize",
            LineItemField::Finishing => "finishing",
            LineItemField::Nos => "nos",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerField {
    CustomerName,
    DeliveryDate,
}

impl CustomerField {
    pub const ALL: [CustomerField; 2] = [CustomerField::CustomerName, CustomerField::DeliveryDate];

    pub fn key(&self) -> &'static str {
        match self {
            CustomerField::CustomerName => "customerName",
            CustomerField::DeliveryDate => "deliveryDate",
        }
    }
}

// =========================================================
// 客户信息 (Customer)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSelection {
    pub customer_name: String,
    pub place: String,
    pub brand: String,
    /// 只有日期，没有时间部分（`YYYY-MM-DD`）
    pub delivery_date: Option<NaiveDate>,
}

impl CustomerSelection {
    pub fn missing_fields(&self) -> BTreeSet<CustomerField> {
        let mut missing = BTreeSet::new();
        if self.customer_name.trim().is_empty() {
            missing.insert(CustomerField::CustomerName);
        }
        if self.delivery_date.is_none() {
            missing.insert(CustomerField::DeliveryDate);
        }
        missing
    }
}

// =========================================================
// 设计行 (Line items)
// =========================================================

/// 正在编辑的设计行，所有选择都可以为空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftLineItem {
    pub design_type: Option<RecordId>,
    pub finishing: Option<RecordId>,
    pub panel_size: Option<RecordId>,
    pub design_no: Option<RecordId>,
    pub nos: Option<u32>,
    pub a_section: QuantityMap,
    pub frame: QuantityMap,
}

impl DraftLineItem {
    /// 缺失的必填字段；数量为 0 也视为缺失
    pub fn missing_fields(&self) -> BTreeSet<LineItemField> {
        LineItemField::REQUIRED
            .into_iter()
            .filter(|field| match field {
                LineItemField::DesignType => self.design_type.is_none(),
                LineItemField::DesignNo => self.design_no.is_none(),
                LineItemField::PanelSize => self.panel_size.is_none(),
                LineItemField::Finishing => self.finishing.is_none(),
                LineItemField::Nos => self.nos.is_none_or(|n| n == 0),
            })
            .collect()
    }

    /// 下一行沿用设计类型、表面处理、面板尺寸和设计编号，数量清空
    pub fn carry_over(&self) -> Self {
        Self {
            design_type: self.design_type,
            finishing: self.finishing,
            panel_size: self.panel_size,
            design_no: self.design_no,
            ..Self::default()
        }
    }

    /// 校验通过时冻结为已保存行
    fn freeze(&self, id: u32) -> Result<SavedLineItem, MissingFields> {
        match (
            self.design_type,
            self.finishing,
            self.panel_size,
            self.design_no,
            self.nos.filter(|n| *n > 0),
        ) {
            (Some(design_type), Some(finishing), Some(panel_size), Some(design_no), Some(nos)) => {
                Ok(SavedLineItem {
                    id,
                    design_type,
                    finishing,
                    panel_size,
                    design_no,
                    nos,
                    a_section: self.a_section.clone(),
                    frame: self.frame.clone(),
                })
            }
            _ => Err(MissingFields(self.missing_fields())),
        }
    }
}

/// 已保存的设计行，`id` 为追加时的序号（从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLineItem {
    pub id: u32,
    pub design_type: RecordId,
    pub finishing: RecordId,
    pub panel_size: RecordId,
    pub design_no: RecordId,
    pub nos: u32,
    pub a_section: QuantityMap,
    pub frame: QuantityMap,
}

impl SavedLineItem {
    /// 预览卡片标题中的序号，如 `SL - 03`
    pub fn serial_label(&self) -> String {
        format!("SL - {:02}", self.id)
    }
}

/// 提交载荷：客户信息字段与 `designs` 数组平铺在同一个对象中
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSubmission {
    #[serde(flatten)]
    pub customer: CustomerSelection,
    pub designs: Vec<SavedLineItem>,
}

// =========================================================
// 错误 (Errors)
// =========================================================

pub const NOTICE_NOT_CREATED: &str = "Something went wrong";
pub const NOTICE_SERVER_ERROR: &str = "Server error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields!")]
pub struct MissingFields(pub BTreeSet<LineItemField>);

/// 设计行没有被追加的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddBlocked {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),
    /// 草稿已随请求发出，追加的行不会被提交
    #[error("order is already being submitted")]
    Locked,
}

impl AddBlocked {
    /// 需要提示给用户的文字；提交期间的点击不提示
    pub fn notice(&self) -> Option<String> {
        match self {
            AddBlocked::MissingFields(missing) => Some(missing.to_string()),
            AddBlocked::Locked => None,
        }
    }
}

/// 提交在发出请求前被拦下的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("Please fill in all customer details!")]
    MissingCustomerFields(BTreeSet<CustomerField>),
    #[error("Please add at least one design before submitting!")]
    NoLineItems,
    #[error("order is already being submitted")]
    AlreadySubmitting,
    #[error("options are still loading")]
    NotReady,
}

impl SubmitBlocked {
    /// 需要提示给用户的文字；重复点击不提示
    pub fn notice(&self) -> Option<String> {
        match self {
            SubmitBlocked::AlreadySubmitting | SubmitBlocked::NotReady => None,
            other => Some(other.to_string()),
        }
    }
}

// =========================================================
// 草稿 (Draft)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer: CustomerSelection,
    pub current: DraftLineItem,
    saved: Vec<SavedLineItem>,
    line_errors: BTreeSet<LineItemField>,
    customer_errors: BTreeSet<CustomerField>,
}

impl OrderDraft {
    pub fn saved(&self) -> &[SavedLineItem] {
        &self.saved
    }

    pub fn line_errors(&self) -> &BTreeSet<LineItemField> {
        &self.line_errors
    }

    pub fn customer_errors(&self) -> &BTreeSet<CustomerField> {
        &self.customer_errors
    }

    pub fn has_line_error(&self, field: LineItemField) -> bool {
        self.line_errors.contains(&field)
    }

    pub fn has_customer_error(&self, field: CustomerField) -> bool {
        self.customer_errors.contains(&field)
    }

    pub fn clear_line_error(&mut self, field: LineItemField) {
        self.line_errors.remove(&field);
    }

    pub fn clear_customer_error(&mut self, field: CustomerField) {
        self.customer_errors.remove(&field);
    }

    /// 下一行将获得的序号
    pub fn next_id(&self) -> u32 {
        self.saved.len() as u32 + 1
    }

    /// 校验当前行并追加
    ///
    /// 失败时已保存列表不变，当前行保留用户输入，错误集合恰好是缺失字段。
    pub fn add_line_item(&mut self) -> Result<&SavedLineItem, MissingFields> {
        let item = match self.current.freeze(self.next_id()) {
            Ok(item) => item,
            Err(missing) => {
                self.line_errors = missing.0.clone();
                return Err(missing);
            }
        };
        self.current = self.current.carry_over();
        self.line_errors.clear();
        self.saved.push(item);
        Ok(&self.saved[self.saved.len() - 1])
    }

    /// 检查提交前置条件并生成载荷
    pub fn submission(&mut self) -> Result<OrderSubmission, SubmitBlocked> {
        let missing = self.customer.missing_fields();
        if !missing.is_empty() {
            self.customer_errors = missing.clone();
            return Err(SubmitBlocked::MissingCustomerFields(missing));
        }
        self.customer_errors.clear();

        if self.saved.is_empty() {
            return Err(SubmitBlocked::NoLineItems);
        }

        Ok(OrderSubmission {
            customer: self.customer.clone(),
            designs: self.saved.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> DraftLineItem {
        DraftLineItem {
            design_type: Some(3),
            finishing: Some(7),
            panel_size: Some(2),
            design_no: Some(5),
            nos: Some(10),
            ..DraftLineItem::default()
        }
    }

    #[test]
    fn zero_nos_counts_as_missing() {
        let item = DraftLineItem {
            nos: Some(0),
            ..complete()
        };
        assert_eq!(
            item.missing_fields(),
            BTreeSet::from([LineItemField::Nos])
        );
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn quantity_map_is_sparse() {
        let mut map = QuantityMap::new();
        set_quantity(&mut map, 11, Some(4));
        set_quantity(&mut map, 12, Some(0));
        set_quantity(&mut map, 11, None);
        assert_eq!(map, QuantityMap::from([(12, 0)]));
        assert_eq!(quantity(&map, 11), 0);
    }

    #[test]
    fn customer_payload_uses_camel_case_and_iso_date() {
        let customer = CustomerSelection {
            customer_name: "Acme".into(),
            place: "Kochi".into(),
            brand: String::new(),
            delivery_date: NaiveDate::from_ymd_opt(2025, 1, 10),
        };
        let mut draft = OrderDraft {
            customer,
            current: complete(),
            ..OrderDraft::default()
        };
        draft.current.a_section.insert(21, 4);
        draft.add_line_item().unwrap();

        let body = serde_json::to_value(draft.submission().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "customerName": "Acme",
                "place": "Kochi",
                "brand": "",
                "deliveryDate": "2025-01-10",
                "designs": [{
                    "id": 1,
                    "designType": 3,
                    "finishing": 7,
                    "panelSize": 2,
                    "designNo": 5,
                    "nos": 10,
                    "aSection": {"21": 4},
                    "frame": {}
                }]
            })
        );
    }

    #[test]
    fn blank_customer_name_blocks_submission() {
        let mut draft = OrderDraft::default();
        draft.customer.customer_name = "   ".into();
        let err = draft.submission().unwrap_err();
        assert_eq!(
            err,
            SubmitBlocked::MissingCustomerFields(BTreeSet::from([
                CustomerField::CustomerName,
                CustomerField::DeliveryDate,
            ]))
        );
        assert_eq!(
            err.notice().as_deref(),
            Some("Please fill in all customer details!")
        );
        assert!(draft.has_customer_error(CustomerField::DeliveryDate));
    }

    #[test]
    fn serial_label_is_zero_padded() {
        let mut draft = OrderDraft {
            current: complete(),
            ..OrderDraft::default()
        };
        let saved = draft.add_line_item().unwrap();
        assert_eq!(saved.serial_label(), "SL - 01");
    }
}
