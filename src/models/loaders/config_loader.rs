use std::path::Path;

use tokio::fs;

use crate::config::Config;
use crate::error::ConfigError;

/// 读取配置文件
///
/// 扩展名为 `.toml` 时按 TOML 解析，其余按 JSON 解析
pub async fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let config = if is_toml(path) {
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    tracing::info!("已读取配置: {}", path.display());
    Ok(config)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LayoutVariant;
    use std::io::Write;

    #[tokio::test]
    async fn loads_json_input() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"startUrl":"https://example.org","keywords":"wills","startDate":"01/01/2024","endDate":"02/01/2024","headless":true}}"#
        )
        .unwrap();

        let config = load_config_file(file.path()).await.unwrap();
        assert_eq!(config.start_url, "https://example.org");
        assert_eq!(config.query.keywords, "wills");
        assert!(config.headless);
    }

    #[tokio::test]
    async fn loads_toml_input() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "startUrl = \"https://example.org\"\nkeywords = \"wills\"\nstartDate = \"01/01/2024\"\nendDate = \"02/01/2024\"\nmaxResults = 40\nlayout = \"b\"\n\n[timeouts]\nlistingWaitMs = 500"
        )
        .unwrap();

        let config = load_config_file(file.path()).await.unwrap();
        assert_eq!(config.query.max_results, Some(40));
        assert_eq!(config.layout, LayoutVariant::B);
        assert_eq!(config.timeouts.listing_wait_ms, 500);
        assert_eq!(config.timeouts.page_settle_ms, 2_000);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let err = load_config_file(Path::new("does/not/exist.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_config_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }
}
