//! 搜索表单填写 - 业务能力层
//!
//! 只负责"填表并提交"能力，不关心翻页

use tracing::{info, Span};

use crate::config::Timeouts;
use crate::error::ScrapeResult;
use crate::infrastructure::{Driver, Locator};
use crate::models::SearchQuery;
use crate::services::layout::{DateEntry, FieldMap};

/// 搜索表单填写服务
///
/// 每个字段都先等待可见再操作，等待超时视为致命错误直接抛出
pub struct FieldFiller {
    timeouts: Timeouts,
    span: Span,
}

impl FieldFiller {
    pub fn new(timeouts: Timeouts, span: Span) -> Self {
        Self { timeouts, span }
    }

    /// 填写关键词和两个日期，点击搜索并等待页面稳定
    pub async fn fill_and_submit(
        &self,
        driver: &dyn Driver,
        fields: &FieldMap,
        query: &SearchQuery,
    ) -> ScrapeResult<()> {
        info!(
            parent: &self.span,
            "搜索条件: 关键词={:?} 开始日期={:?} 结束日期={:?}",
            query.keywords,
            query.start_date,
            query.end_date
        );

        self.wait_visible(driver, &fields.keywords).await?;
        driver.fill(&fields.keywords, &query.keywords).await?;
        info!(parent: &self.span, "已填写关键词: {}", query.keywords);

        self.fill_date(driver, &fields.start_date, &query.start_date, fields.date_entry)
            .await?;
        info!(parent: &self.span, "已填写开始日期: {}", query.start_date);

        self.fill_date(driver, &fields.end_date, &query.end_date, fields.date_entry)
            .await?;
        info!(parent: &self.span, "已填写结束日期: {}", query.end_date);

        self.wait_visible(driver, &fields.submit).await?;
        driver.click(&fields.submit).await?;
        info!(parent: &self.span, "🔍 已点击搜索按钮");

        driver.pause(self.timeouts.search_settle()).await;
        Ok(())
    }

    async fn fill_date(
        &self,
        driver: &dyn Driver,
        locator: &Locator,
        value: &str,
        entry: DateEntry,
    ) -> ScrapeResult<()> {
        self.wait_visible(driver, locator).await?;
        match entry {
            DateEntry::Assign => driver.set_value(locator, value).await?,
            DateEntry::Type => driver.fill(locator, value).await?,
        }
        Ok(())
    }

    async fn wait_visible(&self, driver: &dyn Driver, locator: &Locator) -> ScrapeResult<()> {
        driver.wait_for(locator, self.timeouts.field_wait()).await?;
        Ok(())
    }
}
