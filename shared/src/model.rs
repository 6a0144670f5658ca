use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize};

use crate::serde_helper::{flexible_bool, string_or_empty};

// =========================================================
// 通用 (Common)
// =========================================================

pub type RecordId = u64;

/// 选项缺失或找不到时显示的占位文字
pub const LABEL_UNKNOWN: &str = "N/A";

/// `{ "data": ... }` 响应包装
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// 写操作的通用响应 `{ success, message }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub message: String,
}

/// 只带 `message` 的响应（如切换状态）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub message: String,
}

/// 可以在下拉框中展示、并能由 id 反查标签的选项
pub trait OptionLabel {
    fn id(&self) -> RecordId;
    fn label(&self) -> &str;
}

/// 由 id 反查标签，找不到时返回 `N/A`
pub fn label_for<T: OptionLabel>(options: &[T], id: Option<RecordId>) -> &str {
    id.and_then(|id| options.iter().find(|opt| opt.id() == id))
        .map(OptionLabel::label)
        .unwrap_or(LABEL_UNKNOWN)
}

// =========================================================
// 下单选项 (Order options)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOption {
    pub id: RecordId,
    pub name: String,
}

/// 设计类型和表面处理共用的 `{id, title}` 形式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledOption {
    pub id: RecordId,
    pub title: String,
}

/// 门部件尺寸：面板尺寸、A 段尺寸和框尺寸都使用这个结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSlot {
    pub id: RecordId,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignCodeOption {
    pub id: RecordId,
    pub design_code: String,
}

impl OptionLabel for CustomerOption {
    fn id(&self) -> RecordId {
        self.id
    }
    fn label(&self) -> &str {
        &self.name
    }
}

impl OptionLabel for TitledOption {
    fn id(&self) -> RecordId {
        self.id
    }
    fn label(&self) -> &str {
        &self.title
    }
}

impl OptionLabel for SizeSlot {
    fn id(&self) -> RecordId {
        self.id
    }
    fn label(&self) -> &str {
        &self.size
    }
}

impl OptionLabel for DesignCodeOption {
    fn id(&self) -> RecordId {
        self.id
    }
    fn label(&self) -> &str {
        &self.design_code
    }
}

/// 门部件类别，对应 `get-door-part-sizes/{category}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorPart {
    Panel,
    ASection,
    Frame,
}

impl DoorPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoorPart::Panel => "panel",
            DoorPart::ASection => "a_section",
            DoorPart::Frame => "frame",
        }
    }
}

// =========================================================
// 用户 (User)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
}

// =========================================================
// 主数据 (Masters)
// =========================================================

/// 主数据类别，三者共享同一套列表/表单页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterKind {
    Finishing,
    DesignType,
    Color,
}

impl MasterKind {
    pub const ALL: [MasterKind; 3] = [MasterKind::Finishing, MasterKind::DesignType, MasterKind::Color];

    /// REST 资源路径段，同时也是前端路由段
    pub fn resource(&self) -> &'static str {
        match self {
            MasterKind::Finishing => "finishing",
            MasterKind::DesignType => "design-type",
            MasterKind::Color => "color",
        }
    }

    pub fn from_resource(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.resource() == segment)
    }

    pub fn title(&self) -> &'static str {
        match self {
            MasterKind::Finishing => "Finishing",
            MasterKind::DesignType => "Design Type",
            MasterKind::Color => "Color",
        }
    }
}

impl Display for MasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub short: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =========================================================
// 客户 (Customers)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub phone_no: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub state: Option<NamedRef>,
    #[serde(default)]
    pub district: Option<NamedRef>,
    #[serde(default)]
    pub location: Option<LocationRef>,
    #[serde(default)]
    pub full_location: Option<String>,
    #[serde(default)]
    pub inactive_reason_label: Option<String>,
}

impl CustomerRecord {
    /// "地点, 区, 州"，优先使用后端给出的 `full_location`
    pub fn location_line(&self) -> String {
        if let Some(full) = self.full_location.as_deref().filter(|s| !s.trim().is_empty()) {
            return full.to_string();
        }
        let parts: Vec<&str> = [
            self.location.as_ref().map(|l| l.location_name.as_str()),
            self.district.as_ref().map(|d| d.name.as_str()),
            self.state.as_ref().map(|s| s.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
        parts.join(", ")
    }
}

// =========================================================
// 订单 (Orders)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// 大小写不敏感；无法识别的状态按 `Pending` 处理
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(OrderStatus::parse).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub phone_no: String,
    #[serde(default)]
    pub full_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub code: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub code: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledRef {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
}

/// 某个尺寸槽位上的数量（A 段或框）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizedQuantity {
    pub id: RecordId,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDesign {
    pub id: RecordId,
    #[serde(default)]
    pub nos: u32,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub design_code: String,
    #[serde(default)]
    pub panel_size_id: Option<RecordId>,
    #[serde(default)]
    pub design_type: Option<TitledRef>,
    #[serde(default)]
    pub finishing: Option<TitledRef>,
    #[serde(default)]
    pub a_sections: Vec<SizedQuantity>,
    #[serde(default)]
    pub frames: Vec<SizedQuantity>,
}

impl OrderDesign {
    pub fn design_type_title(&self) -> &str {
        self.design_type.as_ref().map(|t| t.title.as_str()).unwrap_or(LABEL_UNKNOWN)
    }

    pub fn finishing_title(&self) -> &str {
        self.finishing.as_ref().map(|t| t.title.as_str()).unwrap_or(LABEL_UNKNOWN)
    }

    pub fn a_section_total(&self) -> u32 {
        self.a_sections.iter().map(|q| q.quantity).sum()
    }

    pub fn frame_total(&self) -> u32 {
        self.frames.iter().map(|q| q.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: OrderHeader,
    #[serde(default)]
    pub customer: OrderCustomer,
    #[serde(default)]
    pub order_designs: Vec<OrderDesign>,
}

impl OrderDetails {
    /// 整张订单的面板总数
    pub fn total_panels(&self) -> u32 {
        self.order_designs.iter().map(|d| d.nos).sum()
    }
}
