//! Chromium 驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，通过执行 JS 暴露 [`Driver`] 能力

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::error::DriverError;
use crate::infrastructure::{Driver, Locator};

/// 基于 chromiumoxide 的驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识搜索条件和记录
pub struct ChromiumDriver {
    page: Page,
    poll_interval: Duration,
}

impl ChromiumDriver {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            poll_interval: Duration::from_millis(100),
        }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue, DriverError> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(
        &self,
        js_code: impl Into<String>,
    ) -> Result<T, DriverError> {
        let json_value = self.eval(js_code).await?;
        Ok(serde_json::from_value(json_value)?)
    }

    /// 检查元素当前是否存在且可见
    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        let js_code = format!(
            r#"(() => {{
                const el = {lookup};
                if (!el) return false;
                const rect = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                return rect.width > 0 && rect.height > 0
                    && style.visibility !== 'hidden' && style.display !== 'none';
            }})()"#,
            lookup = locator.to_js_lookup()?,
        );
        self.eval_as(js_code).await
    }

    /// 在元素上执行一段 JS，元素不存在时报错
    async fn with_element(&self, locator: &Locator, body: &str) -> Result<(), DriverError> {
        let js_code = format!(
            r#"(() => {{
                const el = {lookup};
                if (!el) return false;
                {body}
                return true;
            }})()"#,
            lookup = locator.to_js_lookup()?,
        );
        if self.eval_as::<bool>(js_code).await? {
            Ok(())
        } else {
            Err(DriverError::ElementNotFound {
                locator: locator.to_string(),
            })
        }
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        debug!("页面导航成功: {}", url);
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, wait: Duration) -> Result<(), DriverError> {
        poll_until(locator, wait, self.poll_interval, || self.is_visible(locator)).await
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        let body = format!(
            r#"el.focus();
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));"#,
            value = serde_json::to_string(value)?,
        );
        self.with_element(locator, &body).await
    }

    async fn set_value(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        let body = format!("el.value = {};", serde_json::to_string(value)?);
        self.with_element(locator, &body).await
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        if locator.is_plain_css() {
            self.page.find_element(locator.css.as_str()).await?.click().await?;
            Ok(())
        } else {
            self.with_element(locator, "el.click();").await
        }
    }

    async fn content(&self) -> Result<String, DriverError> {
        Ok(self.page.content().await?)
    }

    async fn screenshot(&self, path: &Path) -> Result<(), DriverError> {
        let params = ScreenshotParams::builder().full_page(true).build();
        self.page
            .save_screenshot(params, path)
            .await
            .map_err(|e| DriverError::Screenshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!("截图已保存: {}", path.display());
        Ok(())
    }

    async fn pause(&self, duration: Duration) {
        sleep(duration).await;
    }
}

/// 反复检查直到条件成立或超时
///
/// 页面跳转过程中执行上下文会被销毁，此时的协议错误只代表"还没就绪"，继续轮询；
/// 其他错误直接返回
async fn poll_until<F, Fut>(
    locator: &Locator,
    wait: Duration,
    interval: Duration,
    mut check: F,
) -> Result<(), DriverError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DriverError>>,
{
    let polling = async {
        loop {
            match check().await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(DriverError::Cdp(e)) => debug!("页面尚未就绪，继续等待 {}: {}", locator, e),
                Err(e) => return Err(e),
            }
            sleep(interval).await;
        }
    };
    match timeout(wait, polling).await {
        Ok(result) => result,
        Err(_) => Err(DriverError::timeout(locator, wait)),
    }
}
