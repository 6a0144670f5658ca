use serde::{Serialize, de::DeserializeOwned};

use crate::forms::{MasterInput, PasswordChangeInput, ProfileInput};
use crate::model::*;
use crate::order::OrderSubmission;
use crate::pagination::{ListQuery, Paginated};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// Whether the request type is serialized into a JSON body.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters live on the request value, so the path is computed rather than
/// constant. Fields that only feed the path are `#[serde(skip)]` so they stay out of
/// the body.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the API base.
    fn path(&self) -> String;
    /// Query string pairs, already unencoded.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Session
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginResponse {
    pub response: LoginPayload,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginPayload {
    pub user: UserProfile,
    pub token: LoginToken,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginToken {
    #[serde(rename = "plainTextToken")]
    pub plain_text_token: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/login".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = ActionResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/sales/user/log-out".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = DataEnvelope<UserProfile>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/sales/user".into()
    }
}

// =========================================================
// Order options
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct CustomerOptionsRequest;

impl ApiRequest for CustomerOptionsRequest {
    type Response = DataEnvelope<Vec<CustomerOption>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/sales/get-customers".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignTypeOptionsRequest;

impl ApiRequest for DesignTypeOptionsRequest {
    type Response = DataEnvelope<Vec<TitledOption>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/sales/get-design-types".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FinishingOptionsRequest;

impl ApiRequest for FinishingOptionsRequest {
    type Response = DataEnvelope<Vec<TitledOption>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/sales/get-finishing".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoorPartSizesRequest {
    #[serde(skip)]
    pub part: DoorPart,
}

impl ApiRequest for DoorPartSizesRequest {
    type Response = DataEnvelope<Vec<SizeSlot>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/sales/get-door-part-sizes/{}", self.part.as_str())
    }
}

/// Design codes allowed for a (design type, finishing) pair. Either half may be unset,
/// in which case its path segment is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DesignCodesRequest {
    #[serde(skip)]
    pub design_type: Option<RecordId>,
    #[serde(skip)]
    pub finishing: Option<RecordId>,
}

impl ApiRequest for DesignCodesRequest {
    type Response = DataEnvelope<Vec<DesignCodeOption>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        let segment = |id: Option<RecordId>| id.map(|id| id.to_string()).unwrap_or_default();
        format!(
            "/sales/get-designs/{}/{}",
            segment(self.design_type),
            segment(self.finishing)
        )
    }
}

/// Create an order from the whole draft in one request.
impl ApiRequest for OrderSubmission {
    type Response = ActionResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/sales/order/create".into()
    }
}

// =========================================================
// Orders
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderListRequest {
    #[serde(skip)]
    pub query: ListQuery,
    #[serde(skip)]
    pub status: Option<OrderStatus>,
    #[serde(skip)]
    pub start_date: Option<String>,
    #[serde(skip)]
    pub end_date: Option<String>,
}

impl OrderListRequest {
    /// Number of filters (status, from, to) currently narrowing the list.
    pub fn active_filter_count(&self) -> usize {
        [
            self.status.is_some(),
            self.start_date.as_deref().is_some_and(|s| !s.is_empty()),
            self.end_date.as_deref().is_some_and(|s| !s.is_empty()),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

impl ApiRequest for OrderListRequest {
    type Response = Paginated<OrderSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/sales/order/get-order-list".into()
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.query.pairs();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(start) = self.start_date.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("start_date", start.clone()));
        }
        if let Some(end) = self.end_date.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("end_date", end.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderDetailsRequest {
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for OrderDetailsRequest {
    type Response = DataEnvelope<OrderDetails>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/sales/order/get-order-details/{}", self.id)
    }
}

// =========================================================
// Customers
// =========================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerListRequest {
    #[serde(skip)]
    pub query: ListQuery,
}

impl ApiRequest for CustomerListRequest {
    type Response = Paginated<CustomerRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/sales/get-customers-list".into()
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        self.query.pairs()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CustomerDetailsRequest {
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for CustomerDetailsRequest {
    type Response = DataEnvelope<CustomerRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/sales/get-customer-details/{}", self.id)
    }
}

// =========================================================
// Masters
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct MasterListRequest {
    #[serde(skip)]
    pub kind: MasterKind,
    #[serde(skip)]
    pub query: ListQuery,
}

impl ApiRequest for MasterListRequest {
    type Response = Paginated<MasterRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/{}", self.kind.resource())
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        self.query.pairs()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MasterEditRequest {
    #[serde(skip)]
    pub kind: MasterKind,
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for MasterEditRequest {
    type Response = DataEnvelope<MasterRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/{}/{}/edit", self.kind.resource(), self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMasterRequest {
    #[serde(skip)]
    pub kind: MasterKind,
    #[serde(flatten)]
    pub input: MasterInput,
}

impl ApiRequest for CreateMasterRequest {
    type Response = ActionResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/{}", self.kind.resource())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMasterRequest {
    #[serde(skip)]
    pub kind: MasterKind,
    #[serde(skip)]
    pub id: RecordId,
    #[serde(flatten)]
    pub input: MasterInput,
}

impl ApiRequest for UpdateMasterRequest {
    type Response = ActionResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/{}/{}", self.kind.resource(), self.id)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChangeMasterStatusRequest {
    #[serde(skip)]
    pub kind: MasterKind,
    #[serde(skip)]
    pub id: RecordId,
}

impl ApiRequest for ChangeMasterStatusRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/{}/change-status/{}", self.kind.resource(), self.id)
    }
}

// =========================================================
// Profile
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = DataEnvelope<ProfileInput>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/user/edit-profile".into()
    }
}

impl ApiRequest for ProfileInput {
    type Response = ActionResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/user/update-profile".into()
    }
}

impl ApiRequest for PasswordChangeInput {
    type Response = ActionResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/user/change-password".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_code_path_keeps_empty_segments() {
        let both = DesignCodesRequest {
            design_type: Some(3),
            finishing: Some(7),
        };
        assert_eq!(both.path(), "/sales/get-designs/3/7");

        let type_only = DesignCodesRequest {
            design_type: Some(3),
            finishing: None,
        };
        assert_eq!(type_only.path(), "/sales/get-designs/3/");

        let neither = DesignCodesRequest {
            design_type: None,
            finishing: None,
        };
        assert_eq!(neither.path(), "/sales/get-designs//");
    }

    #[test]
    fn order_list_query_carries_only_active_filters() {
        let request = OrderListRequest {
            query: ListQuery::page(2),
            status: Some(OrderStatus::Shipped),
            start_date: Some(String::new()),
            end_date: Some("2025-02-01".into()),
        };
        assert_eq!(
            request.query(),
            vec![
                ("page", "2".to_string()),
                ("per_page", "10".to_string()),
                ("status", "shipped".to_string()),
                ("end_date", "2025-02-01".to_string()),
            ]
        );
        assert_eq!(request.active_filter_count(), 2);
        assert_eq!(OrderListRequest::default().active_filter_count(), 0);
    }

    #[test]
    fn master_paths_follow_resource_names() {
        let edit = MasterEditRequest {
            kind: MasterKind::DesignType,
            id: 4,
        };
        assert_eq!(edit.path(), "/design-type/4/edit");

        let toggle = ChangeMasterStatusRequest {
            kind: MasterKind::Color,
            id: 9,
        };
        assert_eq!(toggle.path(), "/color/change-status/9");
        assert_eq!(ChangeMasterStatusRequest::METHOD, HttpMethod::Put);
    }

    #[test]
    fn master_body_omits_path_parameters() {
        let request = UpdateMasterRequest {
            kind: MasterKind::Finishing,
            id: 2,
            input: MasterInput {
                title: "Matte".into(),
                short: "MT".into(),
                status: true,
            },
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Matte", "short": "MT", "status": true})
        );
    }
}
