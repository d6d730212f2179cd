use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, Span};

use super::extract::{parse_selector, FieldRule, ListingExtractor, ListingSpec};
use super::{DateEntry, FieldMap, LayoutAdapter, LayoutVariant};
use crate::error::{LayoutError, ScrapeResult};
use crate::infrastructure::{Driver, Locator};
use crate::models::{FallbackPolicy, Record};

/// 前三个 gridcell 是表头
const LISTING: ListingSpec = ListingSpec {
    item: r#"div[role="gridcell"]"#,
    skip: 3,
    newspaper: FieldRule::Text(".newspaper-name"),
    article_body: FieldRule::Text(".notice-body"),
    publish_date: FieldRule::Text(".publish-date"),
    pdf_link: FieldRule::Attr(r#"a[href*=".pdf"]"#, "href"),
    county: FieldRule::Text(".county-name"),
};

const NEXT_LINK: &str = r#"a[rel="next"]"#;

/// 表格模板：gridcell 列表 + 分页链接
pub struct LayoutB {
    fields: FieldMap,
    listing: Locator,
    extractor: ListingExtractor,
    next_link: Selector,
    span: Span,
}

impl LayoutB {
    pub fn new(policy: FallbackPolicy, span: Span) -> Result<Self, LayoutError> {
        let fields = FieldMap {
            keywords: Locator::css(r#"input[name="keywords"]"#),
            start_date: Locator::css(r#"input[type="date"]"#).nth(0),
            end_date: Locator::css(r#"input[type="date"]"#).nth(1),
            submit: Locator::css(r#"button[type="submit"]"#),
            date_entry: DateEntry::Type,
        };
        fields.validate(LayoutVariant::B)?;

        Ok(Self {
            fields,
            listing: Locator::css(LISTING.item),
            extractor: ListingExtractor::new(&LISTING, policy)?,
            next_link: parse_selector(NEXT_LINK)?,
            span,
        })
    }

    fn next_present(&self, html: &str) -> bool {
        Html::parse_document(html).select(&self.next_link).next().is_some()
    }
}

#[async_trait]
impl LayoutAdapter for LayoutB {
    fn variant(&self) -> LayoutVariant {
        LayoutVariant::B
    }

    fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    fn listing_locator(&self) -> &Locator {
        &self.listing
    }

    async fn extract_records(&self, driver: &dyn Driver) -> ScrapeResult<Vec<Record>> {
        let html = driver.content().await?;
        let records = self.extractor.extract(&html);
        debug!(parent: &self.span, "表格行: {} 条", records.len());
        Ok(records)
    }

    async fn has_next_page(&self, driver: &dyn Driver) -> ScrapeResult<bool> {
        let html = driver.content().await?;
        Ok(self.next_present(&html))
    }

    async fn advance_to_next_page(&self, driver: &dyn Driver) -> ScrapeResult<()> {
        driver.click(&Locator::css(NEXT_LINK)).await?;
        Ok(())
    }
}
