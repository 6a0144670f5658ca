//! 分页列表的响应结构与页码计算

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 10;

/// `{ success, data: [...], meta: {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u32,
    pub last_page: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: DEFAULT_PER_PAGE,
            total: 0,
            last_page: 1,
        }
    }
}

impl PageMeta {
    /// 当前页第一条记录的序号（从 1 开始，空列表为 0）
    pub fn first_item(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.offset().saturating_add(1)
        }
    }

    pub fn last_item(&self) -> u32 {
        self.current_page
            .max(1)
            .saturating_mul(self.per_page)
            .min(self.total)
    }

    /// 表格中第 `index` 行（从 0 开始）的序号
    pub fn serial(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.offset().saturating_add(index).saturating_add(1)
    }

    /// 当前页之前的行数；后端给出异常页码时封顶而不溢出
    fn offset(&self) -> u32 {
        (self.current_page.max(1) - 1).saturating_mul(self.per_page)
    }

    pub fn last(&self) -> u32 {
        self.last_page.max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last()
    }

    pub fn prev(&self) -> u32 {
        self.current_page.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        self.current_page.saturating_add(1).min(self.last())
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        1..=self.last()
    }

    /// "Showing 11–20 of 42"
    pub fn summary(&self) -> String {
        format!(
            "Showing {}–{} of {}",
            self.first_item(),
            self.last_item(),
            self.total
        )
    }
}

/// 列表查询参数：`page`、`per_page`、`search_key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
        }
    }
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// 空的搜索词不发送
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search_key", search.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u32, per_page: u32, total: u32, last_page: u32) -> PageMeta {
        PageMeta {
            current_page,
            per_page,
            total,
            last_page,
        }
    }

    #[test]
    fn window_bounds_on_partial_last_page() {
        let m = meta(3, 10, 24, 3);
        assert_eq!(m.first_item(), 21);
        assert_eq!(m.last_item(), 24);
        assert_eq!(m.serial(0), 21);
        assert_eq!(m.serial(3), 24);
        assert_eq!(m.summary(), "Showing 21–24 of 24");
        assert!(m.has_prev());
        assert!(!m.has_next());
        assert_eq!(m.next(), 3);
        assert_eq!(m.prev(), 2);
    }

    #[test]
    fn oversized_server_values_saturate() {
        let m = meta(u32::MAX, u32::MAX, 5, u32::MAX);
        assert_eq!(m.first_item(), u32::MAX);
        assert_eq!(m.last_item(), 5);
        assert_eq!(m.serial(usize::MAX), u32::MAX);
        assert_eq!(m.next(), u32::MAX);
        assert!(!m.has_next());
    }

    #[test]
    fn empty_result_reads_zero_of_zero() {
        let m = meta(1, 10, 0, 0);
        assert_eq!(m.summary(), "Showing 0–0 of 0");
        assert_eq!(m.pages().collect::<Vec<_>>(), vec![1]);
        assert!(!m.has_prev());
        assert!(!m.has_next());
        assert_eq!(m.prev(), 1);
    }

    #[test]
    fn blank_search_is_not_sent() {
        let q = ListQuery::page(2).with_search("   ");
        assert_eq!(
            q.pairs(),
            vec![("page", "2".to_string()), ("per_page", "10".to_string())]
        );

        let q = ListQuery::default().with_search(" oak ");
        assert_eq!(q.pairs().last(), Some(&("search_key", "oak".to_string())));
    }

    #[test]
    fn paginated_response_tolerates_missing_meta() {
        let page: Paginated<u32> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.meta, PageMeta::default());
    }
}
