//! 驱动层错误类型定义

use hoap_protocol::ProtocolError;
use thiserror::Error;

/// 配置错误（关节映射非法、配置文件无法读取或解析）
///
/// 均为致命错误，构造阶段立即返回，不重试。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 关节模型中不存在该关节 ID
    #[error("Unknown joint id {joint_id}")]
    UnknownJoint { joint_id: u32 },

    /// 外部下标超出 [0, 20]
    #[error("Joint {joint_id} maps to external index {index}, expected at most {max}")]
    IndexOutOfRange {
        joint_id: u32,
        index: usize,
        max: usize,
    },

    /// 两个关节映射到同一个外部下标（不是双射）
    #[error("Joints {first} and {second} both map to external index {index}")]
    DuplicateIndex { index: usize, first: u32, second: u32 },

    /// 连接超时为 0（标准库拒绝 0 时长的超时）
    #[error("connect_timeout_ms must be greater than 0")]
    ZeroConnectTimeout,

    /// 配置文件读取失败
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件解析失败
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// 连接错误
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// 无法建立连接
    #[error("Failed to connect to {peer}: {source}")]
    Connect {
        peer: String,
        #[source]
        source: std::io::Error,
    },

    /// 链路未打开
    #[error("Link is not open")]
    NotOpen,

    /// 链路已失效，必须重新构造
    #[error("Link has failed and must be rebuilt")]
    Failed,
}

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// 连接错误
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// 读写失败（链路进入 Failed）
    #[error("Transport error: {0}")]
    Transport(#[source] std::io::Error),

    /// 帧不完整（链路进入 Failed）
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl DriverError {
    /// 是否为配置错误
    pub fn is_configuration(&self) -> bool {
        matches!(self, DriverError::Configuration(_))
    }

    /// 是否为连接错误
    pub fn is_connection(&self) -> bool {
        matches!(self, DriverError::Connection(_))
    }

    /// 是否为读写错误
    pub fn is_transport(&self) -> bool {
        matches!(self, DriverError::Transport(_))
    }

    /// 是否为协议错误（调用方通常据此决定重连）
    pub fn is_protocol(&self) -> bool {
        matches!(self, DriverError::Protocol(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 DriverError 的 Display 实现
    #[test]
    fn test_driver_error_display() {
        let err = DriverError::Configuration(ConfigError::DuplicateIndex {
            index: 3,
            first: 2,
            second: 7,
        });
        let msg = format!("{}", err);
        assert!(msg.contains("Configuration error"), "message: {}", msg);
        assert!(msg.contains("2") && msg.contains("7"), "message: {}", msg);

        let err = DriverError::Connection(ConnectionError::NotOpen);
        assert_eq!(format!("{}", err), "Connection error: Link is not open");

        let err = DriverError::Protocol(ProtocolError::ConnectionBroken {
            expected: 112,
            actual: 0,
        });
        let msg = format!("{}", err);
        assert!(msg.contains("Connection broken"), "message: {}", msg);

        let err = DriverError::Transport(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(format!("{}", err).starts_with("Transport error"));
    }

    /// 测试 From 转换与分类谓词
    #[test]
    fn test_error_classification() {
        let err: DriverError = ConnectionError::Failed.into();
        assert!(err.is_connection());
        assert!(!err.is_protocol());

        let err: DriverError = ProtocolError::InvalidLength {
            expected: 112,
            actual: 50,
        }
        .into();
        assert!(err.is_protocol());

        let err: DriverError = ConfigError::UnknownJoint { joint_id: 5 }.into();
        assert!(err.is_configuration());

        let err = DriverError::Transport(std::io::Error::from(std::io::ErrorKind::WriteZero));
        assert!(err.is_transport());
    }
}
