//! 抓取会话 - 编排层
//!
//! 把"填表 → 翻页"包成一个整体，并作为唯一的错误转换点：
//! 内部组件只抛原始错误，这里先尽力截图，再附加上下文重新抛出。

use std::path::PathBuf;

use tracing::{error, field, info, info_span, warn, Span};

use crate::config::{Config, Timeouts};
use crate::error::{DiagnosticOutcome, LayoutError, ScrapeResult, SessionError, SessionPhase};
use crate::infrastructure::Driver;
use crate::models::{FallbackPolicy, SearchQuery};
use crate::services::{FieldFiller, LayoutAdapter, LayoutVariant, ResultSink};
use crate::workflow::{PaginationEngine, PaginationReport};

/// 第一页结果截图的文件名
pub const RESULTS_SNAPSHOT: &str = "search-results.png";

/// 一次搜索抓取会话，布局在构造时确定
pub struct Session {
    adapter: Box<dyn LayoutAdapter>,
    timeouts: Timeouts,
    diagnostics_dir: PathBuf,
    results_snapshot: bool,
    span: Span,
}

impl Session {
    pub fn new(
        layout: LayoutVariant,
        policy: FallbackPolicy,
        timeouts: Timeouts,
        diagnostics_dir: impl Into<PathBuf>,
    ) -> Result<Self, LayoutError> {
        let span = info_span!("session", layout = %layout, keywords = field::Empty);
        let adapter = layout.adapter(policy, span.clone())?;
        Ok(Self {
            adapter,
            timeouts,
            diagnostics_dir: diagnostics_dir.into(),
            results_snapshot: true,
            span,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LayoutError> {
        Self::new(
            config.layout,
            config.fallback_policy(),
            config.timeouts.clone(),
            &config.diagnostics_dir,
        )
    }

    /// 是否在第一页列表出现后截图，默认开启
    pub fn with_results_snapshot(mut self, enabled: bool) -> Self {
        self.results_snapshot = enabled;
        self
    }

    /// 运行整个会话
    ///
    /// 失败时先截取诊断图（截图失败不影响返回），再返回带上下文的错误
    pub async fn run(
        &self,
        driver: &dyn Driver,
        query: &SearchQuery,
        sink: &mut dyn ResultSink,
    ) -> Result<PaginationReport, SessionError> {
        self.span.record("keywords", query.keywords.as_str());
        let mut phase = SessionPhase::Search;

        match self.search_and_paginate(driver, query, sink, &mut phase).await {
            Ok(report) => Ok(report),
            Err(source) => {
                error!(parent: &self.span, "❌ 会话在 {} 阶段失败: {}", phase, source);
                let diagnostic = self.capture_diagnostic(driver, phase).await;
                Err(SessionError::new(phase, source, diagnostic))
            }
        }
    }

    async fn search_and_paginate(
        &self,
        driver: &dyn Driver,
        query: &SearchQuery,
        sink: &mut dyn ResultSink,
        phase: &mut SessionPhase,
    ) -> ScrapeResult<PaginationReport> {
        let filler = FieldFiller::new(self.timeouts.clone(), self.span.clone());
        filler
            .fill_and_submit(driver, self.adapter.field_map(), query)
            .await?;

        *phase = SessionPhase::Pagination;
        let mut engine =
            PaginationEngine::new(self.adapter.as_ref(), self.timeouts.clone(), self.span.clone());
        if self.results_snapshot {
            engine = engine.with_results_snapshot(self.diagnostics_dir.join(RESULTS_SNAPSHOT));
        }
        engine.run(driver, query, sink).await
    }

    /// 尽力截取诊断图，结果作为值返回而不是错误
    async fn capture_diagnostic(&self, driver: &dyn Driver, phase: SessionPhase) -> DiagnosticOutcome {
        let path = self.diagnostics_dir.join(format!("error-{}.png", phase));
        match driver.screenshot(&path).await {
            Ok(()) => {
                info!(parent: &self.span, "📸 已保存错误截图: {}", path.display());
                DiagnosticOutcome::Captured(path)
            }
            Err(e) => {
                warn!(parent: &self.span, "错误截图失败: {}", e);
                DiagnosticOutcome::Failed(e.to_string())
            }
        }
    }
}
