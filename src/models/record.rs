use serde::{Deserialize, Serialize};

/// 缺失字段的默认占位文本
pub const SENTINEL: &str = "N/A";

/// 单个字段的抓取值
///
/// `Missing` 只会在 [`FallbackPolicy::Strict`] 下出现，序列化为 `null`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Missing,
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// 字段缺失时的处理策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// 缺失或为空都替换为占位文本
    Sentinel(String),
    /// 缺失记为 `Missing`，存在但为空则保留空串
    Strict,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Sentinel(SENTINEL.to_string())
    }
}

impl FallbackPolicy {
    /// 将抓取到的原始文本（已 trim）转换为字段值
    pub fn resolve(&self, raw: Option<String>) -> FieldValue {
        match self {
            FallbackPolicy::Sentinel(sentinel) => match raw {
                Some(text) if !text.is_empty() => FieldValue::Text(text),
                _ => FieldValue::Text(sentinel.clone()),
            },
            FallbackPolicy::Strict => match raw {
                Some(text) => FieldValue::Text(text),
                None => FieldValue::Missing,
            },
        }
    }
}

/// 一条公告记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "NewsPaper")]
    pub newspaper: FieldValue,
    #[serde(rename = "ArticleBody")]
    pub article_body: FieldValue,
    #[serde(rename = "PublishDates")]
    pub publish_date: FieldValue,
    #[serde(rename = "PdfLink")]
    pub pdf_link: FieldValue,
    #[serde(rename = "County")]
    pub county: FieldValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_policy_replaces_missing_and_empty() {
        let policy = FallbackPolicy::default();
        assert_eq!(policy.resolve(None), FieldValue::from("N/A"));
        assert_eq!(policy.resolve(Some(String::new())), FieldValue::from("N/A"));
        assert_eq!(
            policy.resolve(Some("Irish Times".to_string())),
            FieldValue::from("Irish Times")
        );
    }

    #[test]
    fn strict_policy_keeps_empty_and_marks_missing() {
        let policy = FallbackPolicy::Strict;
        assert!(policy.resolve(None).is_missing());
        assert_eq!(policy.resolve(Some(String::new())), FieldValue::from(""));
    }

    #[test]
    fn record_serializes_with_output_keys() {
        let record = Record {
            newspaper: "Herald".into(),
            article_body: "Notice".into(),
            publish_date: "01/02/2024".into(),
            pdf_link: FieldValue::Missing,
            county: "Cork".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"NewsPaper":"Herald","ArticleBody":"Notice","PublishDates":"01/02/2024","PdfLink":null,"County":"Cork"}"#
        );
    }
}
