//! 翻页抓取流程 - 流程层
//!
//! 核心职责：驱动"等待列表 → 抽取 → 写出 → 判断 → 翻页"循环
//!
//! 状态流转：
//! Listing → Extracting → Deciding → { Paginating → Listing | Done }
//!
//! 任何未处理的错误直接向上抛出，由会话层统一处理

use std::path::PathBuf;

use tracing::{info, warn, Span};

use crate::config::Timeouts;
use crate::error::ScrapeResult;
use crate::infrastructure::Driver;
use crate::models::{SearchQuery, PAGE_SIZE};
use crate::services::{LayoutAdapter, ResultSink};
use crate::workflow::pagination_state::{PaginationReport, PaginationState, StopReason};

/// 循环中的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Listing,
    Extracting,
    Deciding { extracted: usize },
    Paginating,
    Done(StopReason),
}

/// 翻页引擎
///
/// - 不持有页面资源，只借用 driver
/// - 具体的抽取和翻页交给 [`LayoutAdapter`]
pub struct PaginationEngine<'a> {
    adapter: &'a dyn LayoutAdapter,
    timeouts: Timeouts,
    results_snapshot: Option<PathBuf>,
    span: Span,
}

impl<'a> PaginationEngine<'a> {
    pub fn new(adapter: &'a dyn LayoutAdapter, timeouts: Timeouts, span: Span) -> Self {
        Self {
            adapter,
            timeouts,
            results_snapshot: None,
            span,
        }
    }

    /// 第一页列表出现后截一张图（失败只记警告）
    pub fn with_results_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_snapshot = Some(path.into());
        self
    }

    pub async fn run(
        &self,
        driver: &dyn Driver,
        query: &SearchQuery,
        sink: &mut dyn ResultSink,
    ) -> ScrapeResult<PaginationReport> {
        let mut state = PaginationState::new(query.page_quota());
        let mut phase = Phase::Listing;

        loop {
            phase = match phase {
                Phase::Listing => self.wait_for_listing(driver, &state).await?,
                Phase::Extracting => {
                    info!(parent: &self.span, "📄 正在处理第 {} 页", state.page_index);
                    let records = self.adapter.extract_records(driver).await?;
                    info!(
                        parent: &self.span,
                        "第 {} 页找到 {} 条公告",
                        state.page_index,
                        records.len()
                    );
                    sink.write(&records)?;
                    state.record_page(records.len());
                    Phase::Deciding {
                        extracted: records.len(),
                    }
                }
                Phase::Deciding { extracted } => {
                    match self.decide(driver, &mut state, extracted).await? {
                        Some(reason) => Phase::Done(reason),
                        None => Phase::Paginating,
                    }
                }
                Phase::Paginating => {
                    info!(parent: &self.span, "➡️ 点击下一页 {}", state);
                    self.adapter.advance_to_next_page(driver).await?;
                    driver.pause(self.timeouts.page_settle()).await;
                    state.advance();
                    Phase::Listing
                }
                Phase::Done(stop) => {
                    let report = PaginationReport {
                        pages: state.pages_processed,
                        records: state.records_written,
                        stop,
                    };
                    info!(
                        parent: &self.span,
                        "✓ 翻页结束 ({:?}): 共 {} 页 {} 条",
                        report.stop,
                        report.pages,
                        report.records
                    );
                    return Ok(report);
                }
            };
        }
    }

    /// 等待结果列表；超时按空结果处理，不算失败
    async fn wait_for_listing(
        &self,
        driver: &dyn Driver,
        state: &PaginationState,
    ) -> ScrapeResult<Phase> {
        let listing = self.adapter.listing_locator();
        match driver.wait_for(listing, self.timeouts.listing_wait()).await {
            Ok(()) => {
                if state.page_index == 1 {
                    self.snapshot_results(driver).await;
                }
                Ok(Phase::Extracting)
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    parent: &self.span,
                    "⚠️ 第 {} 页未找到结果列表，可能是空结果",
                    state.page_index
                );
                Ok(Phase::Done(StopReason::NoResults))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 依次检查：配额、短页、下一页控件
    async fn decide(
        &self,
        driver: &dyn Driver,
        state: &mut PaginationState,
        extracted: usize,
    ) -> ScrapeResult<Option<StopReason>> {
        if state.consume_quota() {
            info!(parent: &self.span, "已达到最大结果数限制");
            return Ok(Some(StopReason::QuotaExhausted));
        }
        if extracted < PAGE_SIZE {
            info!(parent: &self.span, "已到达最后一页");
            return Ok(Some(StopReason::ShortPage));
        }
        if !self.adapter.has_next_page(driver).await? {
            info!(parent: &self.span, "未找到下一页按钮或按钮已禁用");
            return Ok(Some(StopReason::NoNextPage));
        }
        Ok(None)
    }

    async fn snapshot_results(&self, driver: &dyn Driver) {
        if let Some(path) = &self.results_snapshot {
            if let Err(e) = driver.screenshot(path).await {
                warn!(parent: &self.span, "结果页截图失败: {}", e);
            }
        }
    }
}
