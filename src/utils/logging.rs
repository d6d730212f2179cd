/// 日志工具模块
///
/// 提供启动和结束时的日志输出
use tracing::info;

use crate::config::Config;
use crate::workflow::PaginationReport;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 搜索页: {}", config.start_url);
    info!("🧩 页面布局: {}", config.layout);
    match config.query.max_results {
        Some(n) if n > 0 => info!("📊 最大结果数: {}", n),
        _ => info!("📊 最大结果数: 不限"),
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &PaginationReport, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 处理页数: {}", report.pages);
    info!("✅ 记录条数: {}", report.records);
    info!("⏹ 停止原因: {:?}", report.stop);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", config.output_file.display());
}
