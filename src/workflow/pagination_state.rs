//! 翻页状态
//!
//! 只由 PaginationEngine 持有，每轮循环修改一次，循环结束即丢弃

use std::fmt::Display;

/// 翻页停止的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 结果列表在超时内未出现
    NoResults,
    /// 已达到页数配额
    QuotaExhausted,
    /// 本页不足一整页，视为最后一页
    ShortPage,
    /// 下一页控件不存在或不可用
    NoNextPage,
}

/// 翻页状态
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// 当前页号（从 1 开始）
    pub page_index: usize,
    /// 剩余页数配额，`None` 表示不限
    pub remaining_quota: Option<u32>,
    /// 已处理的页数
    pub pages_processed: usize,
    /// 已写出的记录数
    pub records_written: usize,
}

impl PaginationState {
    pub fn new(quota: Option<u32>) -> Self {
        Self {
            page_index: 1,
            remaining_quota: quota,
            pages_processed: 0,
            records_written: 0,
        }
    }

    /// 记录一页已处理
    pub fn record_page(&mut self, count: usize) {
        self.pages_processed += 1;
        self.records_written += count;
    }

    /// 先扣减配额再检查，返回配额是否已用完；不限配额时永远返回 false
    pub fn consume_quota(&mut self) -> bool {
        match self.remaining_quota.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        }
    }

    pub fn advance(&mut self) {
        self.page_index += 1;
    }
}

impl Display for PaginationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.remaining_quota {
            Some(q) => write!(f, "[第 {} 页 剩余配额 {}]", self.page_index, q),
            None => write!(f, "[第 {} 页]", self.page_index),
        }
    }
}

/// 翻页结束后的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationReport {
    pub pages: usize,
    pub records: usize,
    pub stop: StopReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_counts_down_to_exhaustion() {
        let mut state = PaginationState::new(Some(3));
        assert!(!state.consume_quota());
        assert!(!state.consume_quota());
        assert!(state.consume_quota());
    }

    #[test]
    fn unlimited_quota_never_exhausts() {
        let mut state = PaginationState::new(None);
        for _ in 0..100 {
            assert!(!state.consume_quota());
        }
        assert_eq!(state.remaining_quota, None);
    }

    #[test]
    fn display_includes_quota_when_present() {
        let mut state = PaginationState::new(Some(2));
        state.advance();
        assert_eq!(state.to_string(), "[第 2 页 剩余配额 2]");
        assert_eq!(PaginationState::new(None).to_string(), "[第 1 页]");
    }
}
