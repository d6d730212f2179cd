//! 应用生命周期 - 编排层
//!
//! 唯一持有 Browser 的模块：启动/连接浏览器、导航、运行会话、关闭浏览器

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::{ChromiumDriver, Driver};
use crate::orchestrator::Session;
use crate::services::JsonLinesSink;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::PaginationReport;

/// 初始截图文件名
pub const INITIAL_SNAPSHOT: &str = "initial-page.png";

/// 应用主结构
pub struct App {
    config: Config,
    browser: Browser,
    /// 是否由本程序启动（连接到的外部浏览器不关闭）
    owns_browser: bool,
    driver: ChromiumDriver,
}

impl App {
    /// 初始化应用：启动或连接浏览器
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let (browser, page, owns_browser) = match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = browser::connect_to_browser_and_page(port).await?;
                (browser, page, false)
            }
            None => {
                let (browser, page) =
                    browser::launch_browser(config.headless, config.chrome_executable.as_deref())
                        .await?;
                (browser, page, true)
            }
        };

        Ok(Self {
            config,
            browser,
            owns_browser,
            driver: ChromiumDriver::new(page),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<PaginationReport> {
        info!("正在导航到: {}", self.config.start_url);
        self.driver
            .goto(&self.config.start_url)
            .await
            .with_context(|| format!("导航到 {} 失败", self.config.start_url))?;

        let initial = self.config.diagnostics_dir.join(INITIAL_SNAPSHOT);
        self.driver.screenshot(&initial).await?;

        let session = Session::from_config(&self.config)?;
        let mut sink = JsonLinesSink::new(&self.config.output_file);
        let report = session
            .run(&self.driver, &self.config.query, &mut sink)
            .await?;

        print_final_stats(&report, &self.config);
        Ok(report)
    }

    /// 关闭浏览器，失败只记警告
    pub async fn shutdown(mut self) {
        if !self.owns_browser {
            return;
        }
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
    }
}
