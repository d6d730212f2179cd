//! 结果写入服务 - 业务能力层
//!
//! 只负责"追加一页结果"能力，不关心流程

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::SinkError;
use crate::models::Record;

/// 结果输出
///
/// 每页调用一次，写入后立即落盘，会话中途失败时已写入的页仍然保留
pub trait ResultSink: Send {
    fn write(&mut self, records: &[Record]) -> Result<(), SinkError>;
}

/// 按行追加 JSON 数组的文件输出，一行对应一页
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_failed(&self, source: std::io::Error) -> SinkError {
        SinkError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultSink for JsonLinesSink {
    fn write(&mut self, records: &[Record]) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(records)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_failed(e))?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| self.write_failed(e))?;

        debug!("已追加 {} 条记录到 {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn record(name: &str) -> Record {
        Record {
            newspaper: name.into(),
            article_body: "body".into(),
            publish_date: "01/01/2024".into(),
            pdf_link: FieldValue::from("N/A"),
            county: "Kerry".into(),
        }
    }

    #[test]
    fn appends_one_line_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let mut sink = JsonLinesSink::new(&path);

        sink.write(&[record("a"), record("b")]).unwrap();
        sink.write(&[record("c")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Vec<Record> = serde_json::from_str(lines[0]).unwrap();
        let second: Vec<Record> = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first, vec![record("a"), record("b")]);
        assert_eq!(second, vec![record("c")]);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonLinesSink::new(dir.path().join("missing").join("results.json"));
        assert!(matches!(
            sink.write(&[record("a")]),
            Err(SinkError::Write { .. })
        ));
    }
}
