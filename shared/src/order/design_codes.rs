//! 设计编号列表
//!
//! 设计编号取决于（设计类型，表面处理）组合。两者任一变化都会重新拉取，
//! 每次拉取带一个递增的代数，只有最新一代的响应会被接受。

use tracing::{debug, warn};

use crate::error::{ApiError, FetchError};
use crate::model::{DesignCodeOption, RecordId};
use crate::order::catalog::{OptionCategory, OptionList};
use crate::protocol::DesignCodesRequest;

/// 一次拉取的凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignCodeTicket {
    pub generation: u64,
    pub design_type: Option<RecordId>,
    pub finishing: Option<RecordId>,
}

impl DesignCodeTicket {
    pub fn request(&self) -> DesignCodesRequest {
        DesignCodesRequest {
            design_type: self.design_type,
            finishing: self.finishing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignCodeResolver {
    generation: u64,
    codes: OptionList<DesignCodeOption>,
}

impl Default for DesignCodeResolver {
    fn default() -> Self {
        Self {
            generation: 0,
            codes: Ok(Vec::new()),
        }
    }
}

impl DesignCodeResolver {
    /// 选择变化时调用，之前发出的请求随之作废
    pub fn begin(
        &mut self,
        design_type: Option<RecordId>,
        finishing: Option<RecordId>,
    ) -> DesignCodeTicket {
        self.generation += 1;
        DesignCodeTicket {
            generation: self.generation,
            design_type,
            finishing,
        }
    }

    /// 接收响应；过期的响应被丢弃并返回 `false`
    ///
    /// 失败时列表清空，不保留上一组的编号。
    pub fn complete(
        &mut self,
        ticket: DesignCodeTicket,
        result: Result<Vec<DesignCodeOption>, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale design code response"
            );
            return false;
        }
        self.codes = result.map_err(|source| {
            warn!(error = %source, "design codes unavailable");
            FetchError::new(OptionCategory::DesignCodes, source)
        });
        true
    }

    pub fn codes(&self) -> &[DesignCodeOption] {
        self.codes.as_deref().unwrap_or_default()
    }

    pub fn failure(&self) -> Option<&FetchError> {
        self.codes.as_ref().err()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
