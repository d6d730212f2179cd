//! 页面布局适配 - 业务能力层
//!
//! 目标站点有两套结构完全不同的模板。每套模板只需要回答三个问题：
//! 当前页有哪些记录、有没有下一页、怎么翻到下一页。
//! 翻页流程本身只写一份，通过 [`LayoutAdapter`] 调用具体模板。

mod extract;
mod layout_a;
mod layout_b;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::Span;

use crate::error::{LayoutError, ScrapeResult};
use crate::infrastructure::{Driver, Locator};
use crate::models::{FallbackPolicy, Record};

pub use extract::{parse_selector, FieldRule, ListingExtractor, ListingSpec};
pub use layout_a::LayoutA;
pub use layout_b::LayoutB;

/// 页面布局，整个会话期间固定不变
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum LayoutVariant {
    #[default]
    #[serde(alias = "a", alias = "layout-a", alias = "layoutA")]
    A,
    #[serde(alias = "b", alias = "layout-b", alias = "layoutB")]
    B,
}

impl LayoutVariant {
    pub fn name(self) -> &'static str {
        match self {
            LayoutVariant::A => "Layout A",
            LayoutVariant::B => "Layout B",
        }
    }

    /// 构造该布局的适配器，构造时校验所有选择器和字段映射
    pub fn adapter(
        self,
        policy: FallbackPolicy,
        span: Span,
    ) -> Result<Box<dyn LayoutAdapter>, LayoutError> {
        Ok(match self {
            LayoutVariant::A => Box::new(LayoutA::new(policy, span)?),
            LayoutVariant::B => Box::new(LayoutB::new(policy, span)?),
        })
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "layout-a" | "layouta" => Ok(LayoutVariant::A),
            "b" | "layout-b" | "layoutb" => Ok(LayoutVariant::B),
            other => Err(format!("未知的页面布局: {}", other)),
        }
    }
}

/// 日期字段的写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEntry {
    /// 直接给 value 赋值（不触发事件）
    Assign,
    /// 像输入一样填写
    Type,
}

/// 搜索表单的字段映射
///
/// 日期框仍按文档中的位置定位，但映射是显式的、按名称的，
/// 并在适配器构造时校验
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub keywords: Locator,
    pub start_date: Locator,
    pub end_date: Locator,
    pub submit: Locator,
    pub date_entry: DateEntry,
}

impl FieldMap {
    pub fn validate(&self, layout: LayoutVariant) -> Result<(), LayoutError> {
        let invalid = |reason: &str| LayoutError::InvalidFieldMap {
            layout: layout.name().to_string(),
            reason: reason.to_string(),
        };

        if self.start_date == self.end_date {
            return Err(invalid("开始日期和结束日期指向同一个元素"));
        }
        if self.keywords == self.start_date || self.keywords == self.end_date {
            return Err(invalid("关键词输入框与日期字段重叠"));
        }
        for locator in [&self.keywords, &self.start_date, &self.end_date, &self.submit] {
            parse_selector(&locator.css)?;
        }
        Ok(())
    }
}

/// 页面布局适配器
#[async_trait]
pub trait LayoutAdapter: Send + Sync {
    fn variant(&self) -> LayoutVariant;

    /// 搜索表单字段映射
    fn field_map(&self) -> &FieldMap;

    /// 结果列表出现的标志元素
    fn listing_locator(&self) -> &Locator;

    /// 抓取当前页的全部记录（按文档顺序的快照）
    async fn extract_records(&self, driver: &dyn Driver) -> ScrapeResult<Vec<Record>>;

    /// 下一页控件是否存在且可用
    async fn has_next_page(&self, driver: &dyn Driver) -> ScrapeResult<bool>;

    /// 点击下一页，等待由调用方负责
    async fn advance_to_next_page(&self, driver: &dyn Driver) -> ScrapeResult<()>;
}
