//! # Gazette Search
//!
//! 驱动浏览器在公告登记网站上搜索，逐页抓取结果并追加写入文件
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `Driver` - 等待、填写、点击、快照、截图
//! - `ChromiumDriver` - 基于 chromiumoxide 的实现
//!
//! ### ② 业务能力层（Services）
//! - `FieldFiller` - 填写关键词和日期并提交搜索
//! - `LayoutAdapter` - 两套页面模板的记录抽取与翻页
//! - `ResultSink` - 每页追加写入一行 JSON
//!
//! ### ③ 流程层（Workflow）
//! - `PaginationEngine` - 等待列表 → 抽取 → 写出 → 判断 → 翻页
//!
//! ### ④ 编排层（Orchestration）
//! - `Session` - 填表 + 翻页，唯一的错误转换点
//! - `App` - 浏览器生命周期
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{DiagnosticOutcome, ScrapeError, SessionError, SessionPhase};
pub use infrastructure::{ChromiumDriver, Driver, Locator};
pub use models::{FallbackPolicy, FieldValue, Record, SearchQuery, PAGE_SIZE};
pub use orchestrator::{App, Session};
pub use services::{JsonLinesSink, LayoutAdapter, LayoutVariant, ResultSink};
pub use workflow::{PaginationEngine, PaginationReport, StopReason};
