//! 元素定位器
//!
//! 站点需要三种定位方式：纯 CSS、按包含文本过滤、按文档顺序取第 N 个

use std::fmt;

/// 元素定位器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// CSS 选择器
    pub css: String,
    /// 只保留文本内容包含该字符串的元素
    pub has_text: Option<String>,
    /// 取第 N 个匹配（从 0 开始），默认第一个
    pub nth: Option<usize>,
}

impl Locator {
    pub fn css(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            has_text: None,
            nth: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.has_text = Some(text.into());
        self
    }

    pub fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// 是否只是一个普通 CSS 选择器
    pub fn is_plain_css(&self) -> bool {
        self.has_text.is_none() && self.nth.is_none()
    }

    /// 生成在页面中查找该元素的 JS 表达式，找不到时返回 `null`
    pub fn to_js_lookup(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            r#"(() => {{
                let els = Array.from(document.querySelectorAll({css}));
                const text = {text};
                if (text !== null) {{
                    els = els.filter(e => (e.textContent || '').includes(text));
                }}
                return els[{nth}] || null;
            }})()"#,
            css = serde_json::to_string(&self.css)?,
            text = serde_json::to_string(&self.has_text)?,
            nth = self.nth.unwrap_or(0),
        ))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css)?;
        if let Some(text) = &self.has_text {
            write!(f, " >> has-text({:?})", text)?;
        }
        if let Some(n) = self.nth {
            write!(f, " >> nth={}", n)?;
        }
        Ok(())
    }
}
