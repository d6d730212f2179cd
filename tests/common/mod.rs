//! 测试用的脚本化驱动
//!
//! 按预先给定的 HTML 页面序列响应，点击"下一页"控件时切换到下一份 HTML

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gazette_search::error::{DriverError, SinkError};
use gazette_search::{Driver, Locator, Record, ResultSink};

pub const LAYOUT_A_NEXT: &str = "fluent-button";
pub const LAYOUT_A_NEXT_CLICK: &str = r#"fluent-button >> has-text("Next")"#;
pub const LAYOUT_B_NEXT: &str = r#"a[rel="next"]"#;
pub const LAYOUT_A_LISTING: &str = r#"div[role="article"]"#;
pub const LAYOUT_B_LISTING: &str = r#"div[role="gridcell"]"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Goto(String),
    Wait(String),
    Fill(String, String),
    SetValue(String, String),
    Click(String),
    Screenshot(PathBuf),
    Pause(Duration),
}

#[derive(Default)]
struct State {
    pages: Vec<String>,
    current: usize,
    next_css: String,
    never_visible: HashSet<String>,
    missing_on_page: HashSet<(usize, String)>,
    failing_clicks: HashSet<String>,
    screenshot_fails: bool,
    events: Vec<Event>,
}

pub struct FakeDriver {
    state: Mutex<State>,
}

impl FakeDriver {
    pub fn new(pages: Vec<String>, next_css: &str) -> Self {
        Self {
            state: Mutex::new(State {
                pages,
                next_css: next_css.to_string(),
                ..Default::default()
            }),
        }
    }

    /// 该选择器的元素永远不会出现
    pub fn never_visible(self, css: &str) -> Self {
        self.state.lock().unwrap().never_visible.insert(css.to_string());
        self
    }

    /// 该选择器的元素只在第 `page` 页（从 0 开始）不出现
    pub fn missing_on_page(self, page: usize, css: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .missing_on_page
            .insert((page, css.to_string()));
        self
    }

    /// 点击该选择器时返回错误
    pub fn failing_click(self, css: &str) -> Self {
        self.state.lock().unwrap().failing_clicks.insert(css.to_string());
        self
    }

    pub fn failing_screenshots(self) -> Self {
        self.state.lock().unwrap().screenshot_fails = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn current_page(&self) -> usize {
        self.state.lock().unwrap().current
    }

    /// 按定位器的显示形式统计点击次数
    pub fn clicks_on(&self, locator: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Click(c) if c == locator))
            .count()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Screenshot(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Driver for FakeDriver {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.state.lock().unwrap().events.push(Event::Goto(url.to_string()));
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Wait(locator.to_string()));
        let missing_here = state
            .missing_on_page
            .contains(&(state.current, locator.css.clone()));
        if missing_here || state.never_visible.contains(&locator.css) {
            return Err(DriverError::timeout(locator, timeout));
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::Fill(locator.to_string(), value.to_string()));
        Ok(())
    }

    async fn set_value(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::SetValue(locator.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Click(locator.to_string()));
        if state.failing_clicks.contains(&locator.css) {
            return Err(DriverError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        if locator.css == state.next_css && state.current + 1 < state.pages.len() {
            state.current += 1;
        }
        Ok(())
    }

    async fn content(&self) -> Result<String, DriverError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .pages
            .get(state.current)
            .cloned()
            .unwrap_or_else(|| "<html></html>".to_string()))
    }

    async fn screenshot(&self, path: &Path) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.events.push(Event::Screenshot(path.to_path_buf()));
        if state.screenshot_fails {
            return Err(DriverError::Screenshot {
                path: path.to_path_buf(),
                reason: "page crashed".to_string(),
            });
        }
        Ok(())
    }

    async fn pause(&self, duration: Duration) {
        self.state.lock().unwrap().events.push(Event::Pause(duration));
    }
}

/// 内存中的结果输出，每页一项
#[derive(Default)]
pub struct VecSink {
    pub pages: Vec<Vec<Record>>,
}

impl VecSink {
    pub fn total(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn page_sizes(&self) -> Vec<usize> {
        self.pages.iter().map(Vec::len).collect()
    }
}

impl ResultSink for VecSink {
    fn write(&mut self, records: &[Record]) -> Result<(), SinkError> {
        self.pages.push(records.to_vec());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Next {
    Enabled,
    Disabled,
    Absent,
}

/// Layout A 的一页：`count` 张文章卡片，编号从 `first_id` 开始
pub fn layout_a_page(first_id: usize, count: usize, next: Next) -> String {
    let mut html = String::from("<html><body><main>");
    for id in first_id..first_id + count {
        html.push_str(&format!(
            r#"<div role="article">
                 <strong class="text-lg">Paper {id}</strong>
                 <h5 class="text-red-600">County {id}</h5>
                 <p class="text-base">Notice {id}</p>
                 <p class="text-sm">Published <strong>{id:02}/01/2024</strong></p>
                 <a href="/pdf/{id}.pdf">PDF</a>
               </div>"#
        ));
    }
    html.push_str("</main><footer>");
    match next {
        Next::Enabled => html.push_str("<fluent-button>Next</fluent-button>"),
        Next::Disabled => html.push_str("<fluent-button disabled>Next</fluent-button>"),
        Next::Absent => {}
    }
    html.push_str("</footer></body></html>");
    html
}

/// Layout A 的多页结果，按每页 10 条切分
pub fn layout_a_pages(total: usize) -> Vec<String> {
    let pages = total.div_ceil(10).max(1);
    (0..pages)
        .map(|p| {
            let count = (total - p * 10).min(10);
            let next = if p + 1 < pages { Next::Enabled } else { Next::Disabled };
            layout_a_page(p * 10 + 1, count, next)
        })
        .collect()
}

/// Layout B 的一页：三个表头格子 + `count` 行
pub fn layout_b_page(first_id: usize, count: usize, has_next: bool) -> String {
    let mut html = String::from(
        r#"<div role="grid"><div role="gridcell">Newspaper</div><div role="gridcell">Notice</div><div role="gridcell">Date</div>"#,
    );
    for id in first_id..first_id + count {
        html.push_str(&format!(
            r#"<div role="gridcell">
                 <span class="newspaper-name">Paper {id}</span>
                 <div class="notice-body">Notice {id}</div>
                 <span class="publish-date">{id:02}/02/2024</span>
                 <span class="county-name">County {id}</span>
               </div>"#
        ));
    }
    html.push_str("</div>");
    if has_next {
        html.push_str(r#"<nav><a rel="next" href="?page=next">Next</a></nav>"#);
    }
    html
}
