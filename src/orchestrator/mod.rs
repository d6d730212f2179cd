//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 启动或连接浏览器，持有 Browser 和 ChromiumDriver
//! - 导航到搜索页并截取初始截图
//! - 运行会话，输出统计，关闭浏览器
//!
//! ### `session` - 单次搜索会话
//! - 填写搜索条件（FieldFiller）
//! - 翻页抓取（PaginationEngine）
//! - 唯一的错误转换点：截图 + 附加上下文
//!
//! ## 层次关系
//!
//! ```text
//! app (浏览器资源)
//!     ↓
//! session (错误恢复)
//!     ↓
//! workflow::PaginationEngine (翻页循环)
//!     ↓
//! services (能力层：填表 / 布局适配 / 结果写入)
//!     ↓
//! infrastructure (基础设施：Driver)
//! ```

pub mod app;
pub mod session;

pub use app::App;
pub use session::Session;
