use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, Span};

use super::extract::{parse_selector, FieldRule, ListingExtractor, ListingSpec};
use super::{DateEntry, FieldMap, LayoutAdapter, LayoutVariant};
use crate::error::{LayoutError, ScrapeResult};
use crate::infrastructure::{Driver, Locator};
use crate::models::{FallbackPolicy, Record};

const LISTING: ListingSpec = ListingSpec {
    item: r#"div[role="article"]"#,
    skip: 0,
    newspaper: FieldRule::Text("strong.text-lg"),
    article_body: FieldRule::Text("p.text-base"),
    publish_date: FieldRule::Text("p.text-sm strong"),
    pdf_link: FieldRule::Attr(r#"a[href*=".pdf"]"#, "href"),
    county: FieldRule::Text("h5.text-red-600"),
};

const NEXT_BUTTON: &str = "fluent-button";
const NEXT_TEXT: &str = "Next";

/// Fluent UI 模板：文章卡片列表 + "Next" 按钮
pub struct LayoutA {
    fields: FieldMap,
    listing: Locator,
    extractor: ListingExtractor,
    next_button: Selector,
    span: Span,
}

impl LayoutA {
    pub fn new(policy: FallbackPolicy, span: Span) -> Result<Self, LayoutError> {
        let fields = FieldMap {
            keywords: Locator::css(r#"input[id="control"][aria-label="Keywords"]"#),
            start_date: Locator::css("fluent-text-field").nth(1),
            end_date: Locator::css("fluent-text-field").nth(2),
            submit: Locator::css(r#"fluent-button[type="submit"]"#).with_text("Search"),
            date_entry: DateEntry::Assign,
        };
        fields.validate(LayoutVariant::A)?;

        Ok(Self {
            fields,
            listing: Locator::css(LISTING.item),
            extractor: ListingExtractor::new(&LISTING, policy)?,
            next_button: parse_selector(NEXT_BUTTON)?,
            span,
        })
    }

    fn next_enabled(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        let button = document
            .select(&self.next_button)
            .find(|el| el.text().collect::<String>().contains(NEXT_TEXT));
        match button {
            Some(el) => !matches!(el.value().attr("disabled"), Some(v) if v != "false"),
            None => false,
        }
    }
}

#[async_trait]
impl LayoutAdapter for LayoutA {
    fn variant(&self) -> LayoutVariant {
        LayoutVariant::A
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
        debug!(parent: &self.span, "文章卡片: {} 条", records.len());
        Ok(records)
    }

    async fn has_next_page(&self, driver: &dyn Driver) -> ScrapeResult<bool> {
        let html = driver.content().await?;
        Ok(self.next_enabled(&html))
    }

    async fn advance_to_next_page(&self, driver: &dyn Driver) -> ScrapeResult<()> {
        let next = Locator::css(NEXT_BUTTON).with_text(NEXT_TEXT);
        driver.click(&next).await?;
        Ok(())
    }
}
