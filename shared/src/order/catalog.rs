//! 下单页面的选项列表
//!
//! 页面挂载时并发拉取六个互不依赖的列表，全部结束后才解除加载状态。
//! 每个列表单独保留成功或失败的结果，失败不影响页面渲染。

use std::fmt::{self, Display};

use tracing::warn;

use crate::client::{ApiClient, SessionHandle, Transport};
use crate::error::FetchError;
use crate::model::{CustomerOption, DataEnvelope, DoorPart, SizeSlot, TitledOption};
use crate::protocol::{
    ApiRequest, CustomerOptionsRequest, DesignTypeOptionsRequest, DoorPartSizesRequest,
    FinishingOptionsRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionCategory {
    Customers,
    DesignTypes,
    Finishings,
    PanelSizes,
    ASectionSizes,
    FrameSizes,
    DesignCodes,
}

impl Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptionCategory::Customers => "customers",
            OptionCategory::DesignTypes => "design types",
            OptionCategory::Finishings => "finishings",
            OptionCategory::PanelSizes => "panel sizes",
            OptionCategory::ASectionSizes => "A-section sizes",
            OptionCategory::FrameSizes => "frame sizes",
            OptionCategory::DesignCodes => "design codes",
        })
    }
}

pub type OptionList<T> = Result<Vec<T>, FetchError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub customers: OptionList<CustomerOption>,
    pub design_types: OptionList<TitledOption>,
    pub finishings: OptionList<TitledOption>,
    pub panel_sizes: OptionList<SizeSlot>,
    pub a_section_sizes: OptionList<SizeSlot>,
    pub frame_sizes: OptionList<SizeSlot>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            customers: Ok(Vec::new()),
            design_types: Ok(Vec::new()),
            finishings: Ok(Vec::new()),
            panel_sizes: Ok(Vec::new()),
            a_section_sizes: Ok(Vec::new()),
            frame_sizes: Ok(Vec::new()),
        }
    }
}

impl Catalog {
    pub fn customers(&self) -> &[CustomerOption] {
        self.customers.as_deref().unwrap_or_default()
    }

    pub fn design_types(&self) -> &[TitledOption] {
        self.design_types.as_deref().unwrap_or_default()
    }

    pub fn finishings(&self) -> &[TitledOption] {
        self.finishings.as_deref().unwrap_or_default()
    }

    pub fn panel_sizes(&self) -> &[SizeSlot] {
        self.panel_sizes.as_deref().unwrap_or_default()
    }

    pub fn a_section_sizes(&self) -> &[SizeSlot] {
        self.a_section_sizes.as_deref().unwrap_or_default()
    }

    pub fn frame_sizes(&self) -> &[SizeSlot] {
        self.frame_sizes.as_deref().unwrap_or_default()
    }

    /// 加载失败的列表，按字段顺序
    pub fn failures(&self) -> Vec<&FetchError> {
        [
            self.customers.as_ref().err(),
            self.design_types.as_ref().err(),
            self.finishings.as_ref().err(),
            self.panel_sizes.as_ref().err(),
            self.a_section_sizes.as_ref().err(),
            self.frame_sizes.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn failed(&self, category: OptionCategory) -> bool {
        self.failures().iter().any(|f| f.category == category)
    }
}

async fn fetch_list<T, S, R, O>(
    api: &ApiClient<T, S>,
    request: R,
    category: OptionCategory,
) -> OptionList<O>
where
    T: Transport,
    S: SessionHandle,
    R: ApiRequest<Response = DataEnvelope<Vec<O>>>,
{
    api.call(&request)
        .await
        .map(|envelope| envelope.data)
        .map_err(|source| {
            warn!(%category, error = %source, "option list unavailable");
            FetchError::new(category, source)
        })
}

/// 并发拉取全部选项列表，等待全部结束
pub async fn load_catalog<T: Transport, S: SessionHandle>(api: &ApiClient<T, S>) -> Catalog {
    let (customers, design_types, finishings, panel_sizes, a_section_sizes, frame_sizes) = futures::join!(
        fetch_list(api, CustomerOptionsRequest, OptionCategory::Customers),
        fetch_list(api, DesignTypeOptionsRequest, OptionCategory::DesignTypes),
        fetch_list(api, FinishingOptionsRequest, OptionCategory::Finishings),
        fetch_list(
            api,
            DoorPartSizesRequest {
                part: DoorPart::Panel
            },
            OptionCategory::PanelSizes
        ),
        fetch_list(
            api,
            DoorPartSizesRequest {
                part: DoorPart::ASection
            },
            OptionCategory::ASectionSizes
        ),
        fetch_list(
            api,
            DoorPartSizesRequest {
                part: DoorPart::Frame
            },
            OptionCategory::FrameSizes
        ),
    );

    Catalog {
        customers,
        design_types,
        finishings,
        panel_sizes,
        a_section_sizes,
        frame_sizes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::setup;
    use crate::error::ApiError;

    #[tokio::test]
    async fn one_failed_list_does_not_empty_the_others() {
        let (transport, _session, client) = setup();
        transport.route("/sales/get-customers", 200, r#"{"data": [{"id": 1, "name": "Acme"}]}"#);
        transport.route("/sales/get-design-types", 200, r#"{"data": [{"id": 3, "title": "Flush"}]}"#);
        transport.route("/sales/get-finishing", 200, r#"{"data": [{"id": 7, "title": "Matte"}]}"#);
        transport.route("/panel", 200, r#"{"data": [{"id": 2, "size": "7x3"}]}"#);
        transport.route("/a_section", 200, r#"{"data": [{"id": 21, "size": "4in"}, {"id": 22, "size": "6in"}]}"#);
        transport.route("/frame", 404, r#"{"message": "gone"}"#);

        let catalog = load_catalog(&client).await;

        assert_eq!(catalog.customers()[0].name, "Acme");
        assert_eq!(catalog.a_section_sizes().len(), 2);
        assert!(catalog.frame_sizes().is_empty());
        assert!(catalog.failed(OptionCategory::FrameSizes));
        assert!(!catalog.failed(OptionCategory::PanelSizes));

        let failures = catalog.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].source,
            ApiError::Rejected {
                status: 404,
                message: Some("gone".into())
            }
        );
        assert_eq!(transport.sent.borrow().len(), 6);
    }

    #[test]
    fn category_names_read_as_prose() {
        assert_eq!(OptionCategory::ASectionSizes.to_string(), "A-section sizes");
        assert_eq!(OptionCategory::DesignCodes.to_string(), "design codes");
    }
}
