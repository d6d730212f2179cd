use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{FallbackPolicy, SearchQuery};
use crate::services::LayoutVariant;

/// 默认输入文件
pub const DEFAULT_INPUT_FILE: &str = "input.json";

/// 程序配置
///
/// 从 `input.json`（或 `.toml`）读取，再用环境变量覆盖
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// 搜索页地址
    pub start_url: String,
    /// 搜索条件
    #[serde(flatten)]
    pub query: SearchQuery,
    /// 是否无头模式
    #[serde(default)]
    pub headless: bool,
    /// 目标站点的页面布局
    #[serde(default)]
    pub layout: LayoutVariant,
    /// 结果输出文件
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    /// 诊断截图目录
    #[serde(default = "default_diagnostics_dir")]
    pub diagnostics_dir: PathBuf,
    /// 已打开浏览器的调试端口，设置后不再启动新浏览器
    #[serde(default)]
    pub browser_debug_port: Option<u16>,
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
    /// 缺失字段处理方式
    #[serde(default)]
    pub missing_field: MissingFieldMode,
    #[serde(default)]
    pub timeouts: Timeouts,
    /// 是否显示详细日志
    #[serde(default)]
    pub verbose_logging: bool,
}

fn default_output_file() -> PathBuf {
    PathBuf::from("results.json")
}

fn default_diagnostics_dir() -> PathBuf {
    PathBuf::from(".")
}

/// 缺失字段处理方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldMode {
    /// 替换为 "N/A"
    #[default]
    Sentinel,
    /// 输出 null
    Strict,
}

/// 各类等待的超时时间（毫秒）
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timeouts {
    /// 等待输入框、按钮可见
    pub field_wait_ms: u64,
    /// 等待结果列表出现
    pub listing_wait_ms: u64,
    /// 点击搜索后的等待
    pub search_settle_ms: u64,
    /// 点击下一页后的等待
    pub page_settle_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            field_wait_ms: 30_000,
            listing_wait_ms: 10_000,
            search_settle_ms: 3_000,
            page_settle_ms: 2_000,
        }
    }
}

impl Timeouts {
    pub fn field_wait(&self) -> Duration {
        Duration::from_millis(self.field_wait_ms)
    }

    pub fn listing_wait(&self) -> Duration {
        Duration::from_millis(self.listing_wait_ms)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }
}

impl Config {
    /// 从 `INPUT_FILE`（默认 `input.json`）读取配置并应用环境变量
    pub async fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var("INPUT_FILE").unwrap_or_else(|_| DEFAULT_INPUT_FILE.to_string());
        Self::load(Path::new(&path))
            .await?
            .with_overrides(|name| std::env::var(name).ok())
    }

    /// 读取配置文件，不应用环境变量
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        crate::models::loaders::load_config_file(path).await
    }

    /// 用给定的查找函数覆盖配置项
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var::<bool, _>(&lookup, "HEADLESS", "bool")? {
            self.headless = v;
        }
        if let Some(v) = parse_var::<LayoutVariant, _>(&lookup, "LAYOUT", "layout (a|b)")? {
            self.layout = v;
        }
        if let Some(v) = lookup("OUTPUT_FILE") {
            self.output_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("DIAGNOSTICS_DIR") {
            self.diagnostics_dir = PathBuf::from(v);
        }
        if let Some(v) = parse_var::<u16, _>(&lookup, "BROWSER_DEBUG_PORT", "u16")? {
            self.browser_debug_port = Some(v);
        }
        if let Some(v) = parse_var::<bool, _>(&lookup, "VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        Ok(self)
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        match self.missing_field {
            MissingFieldMode::Sentinel => FallbackPolicy::default(),
            MissingFieldMode::Strict => FallbackPolicy::Strict,
        }
    }
}

fn parse_var<T, F>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}
