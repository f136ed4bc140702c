//! 链路配置
//!
//! 支持从 TOML 加载：
//!
//! ```toml
//! host = "192.168.1.20"
//! port = 5000
//! connect_timeout_ms = 2000  # 可选
//! nodelay = true             # 可选，默认 true
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 链路配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// 机器人主机名或 IP
    pub host: String,

    /// 机器人端口
    pub port: u16,

    /// 连接超时（毫秒），未设置时由系统决定，不能为 0
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// 是否启用 TCP_NODELAY
    #[serde(default = "default_nodelay")]
    pub nodelay: bool,
}

fn default_nodelay() -> bool {
    true
}

impl LinkConfig {
    /// 创建配置（其余字段取默认值）
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout_ms: None,
            nodelay: default_nodelay(),
        }
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 检查字段取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroConnectTimeout);
        }
        Ok(())
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 连接超时
    ///
    /// 直接构造的配置未经 [`validate`](Self::validate)，此时 0 视为未设置。
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal() {
        let config = LinkConfig::from_toml_str("host = \"10.0.0.2\"\nport = 5000\n").unwrap();
        assert_eq!(config, LinkConfig::new("10.0.0.2", 5000));
        assert!(config.nodelay);
        assert_eq!(config.connect_timeout(), None);
    }

    #[test]
    fn test_parse_full() {
        let config = LinkConfig::from_toml_str(
            r#"
host = "hoap.local"
port = 6000
connect_timeout_ms = 1500
nodelay = false
"#,
        )
        .unwrap();
        assert_eq!(config.host, "hoap.local");
        assert_eq!(config.port, 6000);
        assert_eq!(config.connect_timeout(), Some(Duration::from_millis(1500)));
        assert!(!config.nodelay);
    }

    #[test]
    fn test_parse_missing_port() {
        let err = LinkConfig::from_toml_str("host = \"10.0.0.2\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let err = LinkConfig::from_toml_str(
            "host = \"127.0.0.1\"\nport = 5000\nconnect_timeout_ms = 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroConnectTimeout));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"127.0.0.1\"\nport = 5000\nconnect_timeout_ms = 0").unwrap();
        let err = LinkConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroConnectTimeout));
    }

    #[test]
    fn test_zero_connect_timeout_means_unset() {
        let mut config = LinkConfig::new("127.0.0.1", 5000);
        config.connect_timeout_ms = Some(0);
        assert!(config.validate().is_err());
        assert_eq!(config.connect_timeout(), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"127.0.0.1\"").unwrap();
        writeln!(file, "port = 4242").unwrap();

        let config = LinkConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.port, 4242);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinkConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
