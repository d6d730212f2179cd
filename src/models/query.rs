use serde::{Deserialize, Serialize};

/// 注册处列表的固定每页条数
pub const PAGE_SIZE: usize = 10;

/// 搜索条件
///
/// 构造后不可变，由调用方提供
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub keywords: String,
    pub start_date: String,
    pub end_date: String,
    /// 期望抓取的最大条数，`None` 表示不限
    #[serde(default)]
    pub max_results: Option<u32>,
}

impl SearchQuery {
    pub fn new(
        keywords: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        max_results: Option<u32>,
    ) -> Self {
        Self {
            keywords: keywords.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            max_results,
        }
    }

    /// 按页计算的配额：`ceil(max_results / PAGE_SIZE)`
    ///
    /// `max_results` 为空或为 0 时不设配额
    pub fn page_quota(&self) -> Option<u32> {
        match self.max_results {
            None | Some(0) => None,
            Some(n) => Some(n.div_ceil(PAGE_SIZE as u32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(max_results: Option<u32>) -> SearchQuery {
        SearchQuery::new("probate", "01/01/2024", "31/01/2024", max_results)
    }

    #[test]
    fn quota_rounds_up_to_whole_pages() {
        assert_eq!(query(Some(25)).page_quota(), Some(3));
        assert_eq!(query(Some(30)).page_quota(), Some(3));
        assert_eq!(query(Some(1)).page_quota(), Some(1));
    }

    #[test]
    fn zero_or_absent_means_unlimited() {
        assert_eq!(query(None).page_quota(), None);
        assert_eq!(query(Some(0)).page_quota(), None);
    }

    #[test]
    fn deserializes_camel_case() {
        let q: SearchQuery = serde_json::from_str(
            r#"{"keywords":"estate","startDate":"2024-01-01","endDate":"2024-02-01"}"#,
        )
        .unwrap();
        assert_eq!(q.keywords, "estate");
        assert_eq!(q.max_results, None);
    }
}
