//! 浏览器驱动能力
//!
//! 抓取流程只通过这个 trait 操作页面，方便替换为测试用的脚本化实现

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;
use crate::infrastructure::Locator;

/// 渲染/导航驱动
///
/// 所有等待都有超时；超时统一返回 [`DriverError::Timeout`]
#[async_trait]
pub trait Driver: Send + Sync {
    /// 导航到指定地址并等待加载完成
    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    /// 等待元素出现在 DOM 中且可见
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError>;

    /// 像用户输入一样填写字段（会触发 input/change 事件）
    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), DriverError>;

    /// 直接给元素的 `value` 属性赋值，不触发事件
    async fn set_value(&self, locator: &Locator, value: &str) -> Result<(), DriverError>;

    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;

    /// 当前文档的 HTML 快照
    async fn content(&self) -> Result<String, DriverError>;

    async fn screenshot(&self, path: &Path) -> Result<(), DriverError>;

    /// 固定等待
    async fn pause(&self, duration: Duration);
}
