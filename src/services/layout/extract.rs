//! 列表记录抽取
//!
//! 对一次 HTML 快照做纯函数式解析：同一份快照总是得到同样的记录序列

use scraper::{ElementRef, Html, Selector};

use crate::error::LayoutError;
use crate::models::{FallbackPolicy, FieldValue, Record};

/// 字段抽取规则
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// 子元素的文本内容（去掉首尾空白）
    Text(&'static str),
    /// 子元素的属性值
    Attr(&'static str, &'static str),
}

/// 一种布局的列表结构描述
#[derive(Debug, Clone, Copy)]
pub struct ListingSpec {
    /// 列表项选择器
    pub item: &'static str,
    /// 跳过前 N 个非记录元素
    pub skip: usize,
    pub newspaper: FieldRule,
    pub article_body: FieldRule,
    pub publish_date: FieldRule,
    pub pdf_link: FieldRule,
    pub county: FieldRule,
}

pub fn parse_selector(css: &str) -> Result<Selector, LayoutError> {
    Selector::parse(css).map_err(|e| LayoutError::InvalidSelector {
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

#[derive(Debug)]
struct CompiledRule {
    selector: Selector,
    attr: Option<&'static str>,
}

impl CompiledRule {
    fn compile(rule: FieldRule) -> Result<Self, LayoutError> {
        let (css, attr) = match rule {
            FieldRule::Text(css) => (css, None),
            FieldRule::Attr(css, attr) => (css, Some(attr)),
        };
        Ok(Self {
            selector: parse_selector(css)?,
            attr,
        })
    }

    fn raw(&self, item: &ElementRef<'_>) -> Option<String> {
        let el = item.select(&self.selector).next()?;
        match self.attr {
            Some(attr) => el.value().attr(attr).map(str::to_string),
            None => Some(el.text().collect::<String>().trim().to_string()),
        }
    }
}

/// 已编译的列表抽取器
#[derive(Debug)]
pub struct ListingExtractor {
    item: Selector,
    skip: usize,
    newspaper: CompiledRule,
    article_body: CompiledRule,
    publish_date: CompiledRule,
    pdf_link: CompiledRule,
    county: CompiledRule,
    policy: FallbackPolicy,
}

impl ListingExtractor {
    pub fn new(spec: &ListingSpec, policy: FallbackPolicy) -> Result<Self, LayoutError> {
        Ok(Self {
            item: parse_selector(spec.item)?,
            skip: spec.skip,
            newspaper: CompiledRule::compile(spec.newspaper)?,
            article_body: CompiledRule::compile(spec.article_body)?,
            publish_date: CompiledRule::compile(spec.publish_date)?,
            pdf_link: CompiledRule::compile(spec.pdf_link)?,
            county: CompiledRule::compile(spec.county)?,
            policy,
        })
    }

    /// 从 HTML 中抽取记录，缺失字段按策略兜底，从不报错
    pub fn extract(&self, html: &str) -> Vec<Record> {
        let document = Html::parse_document(html);
        document
            .select(&self.item)
            .skip(self.skip)
            .map(|item| Record {
                newspaper: self.resolve(&self.newspaper, &item),
                article_body: self.resolve(&self.article_body, &item),
                publish_date: self.resolve(&self.publish_date, &item),
                pdf_link: self.resolve(&self.pdf_link, &item),
                county: self.resolve(&self.county, &item),
            })
            .collect()
    }

    fn resolve(&self, rule: &CompiledRule, item: &ElementRef<'_>) -> FieldValue {
        self.policy.resolve(rule.raw(item))
    }
}
