use anyhow::Result;
use gazette_search::{logger, App, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env().await?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).await?;
    let result = app.run().await;
    app.shutdown().await;

    if let Err(e) = &result {
        error!("抓取失败: {:#}", e);
    }
    result.map(|_| ())
}
