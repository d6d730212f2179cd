use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 驱动层错误
#[derive(Debug, Error)]
pub enum DriverError {
    /// 等待元素超时
    #[error("等待元素 {locator} 超时 ({timeout_ms}ms)")]
    Timeout { locator: String, timeout_ms: u64 },
    /// 元素不存在
    #[error("未找到元素: {locator}")]
    ElementNotFound { locator: String },
    /// 截图失败
    #[error("截图失败 ({}): {reason}", .path.display())]
    Screenshot { path: PathBuf, reason: String },
    /// CDP 协议错误
    #[error("浏览器协议错误: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// 脚本返回值无法解析
    #[error("脚本返回值解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

impl DriverError {
    /// 等待超时，毫秒数超出 u64 时取上限
    pub fn timeout(locator: impl ToString, wait: Duration) -> Self {
        DriverError::Timeout {
            locator: locator.to_string(),
            timeout_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// 是否为等待超时
    pub fn is_timeout(&self) -> bool {
        matches!(self, DriverError::Timeout { .. })
    }
}

/// 页面布局错误
#[derive(Debug, Error)]
pub enum LayoutError {
    /// CSS 选择器无法解析
    #[error("无效的选择器 {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// 字段映射不合法
    #[error("字段映射无效 ({layout}): {reason}")]
    InvalidFieldMap { layout: String, reason: String },
}

/// 结果写入错误
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("写入结果文件失败 ({}): {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("序列化结果失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在或无法读取
    #[error("读取配置文件失败 ({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("解析配置文件失败 ({}): {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("解析配置文件失败 ({}): {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 会话内部错误，由各组件原样抛出
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// 会话失败时所处的阶段，用于诊断截图命名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// 填写并提交搜索条件
    Search,
    /// 翻页抓取
    Pagination,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Search => "search",
            SessionPhase::Pagination => "pagination",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 诊断截图的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticOutcome {
    /// 截图已保存
    Captured(PathBuf),
    /// 截图本身失败（已吞掉）
    Failed(String),
}

/// 会话最外层错误：原始错误 + 上下文 + 诊断结果
#[derive(Debug, Error)]
#[error("遇到意外错误: {source}")]
pub struct SessionError {
    pub phase: SessionPhase,
    pub diagnostic: DiagnosticOutcome,
    #[source]
    pub source: ScrapeError,
}

impl SessionError {
    pub fn new(phase: SessionPhase, source: ScrapeError, diagnostic: DiagnosticOutcome) -> Self {
        Self {
            phase,
            diagnostic,
            source,
        }
    }
}

/// 会话内部结果类型
pub type ScrapeResult<T> = Result<T, ScrapeError>;
