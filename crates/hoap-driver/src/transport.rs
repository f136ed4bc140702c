//! 字节流连接抽象
//!
//! [`RobotLink`](crate::RobotLink) 通过 [`Connector`] 建立连接，
//! 因此既可以运行在 TCP 上，也可以运行在测试用的内存流上。

use crate::config::LinkConfig;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// 连接器
pub trait Connector {
    /// 建立连接后得到的字节流
    type Stream: Read + Write;

    /// 建立连接（单次尝试，不重试）
    fn connect(&self) -> io::Result<Self::Stream>;

    /// 对端描述（用于日志和错误信息）
    fn peer(&self) -> String;
}

/// TCP 连接器
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
    connect_timeout: Option<Duration>,
    nodelay: bool,
}

impl TcpConnector {
    /// 创建连接器（无连接超时，启用 TCP_NODELAY）
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: None,
            nodelay: true,
        }
    }

    /// 从链路配置创建
    pub fn from_config(config: &LinkConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            connect_timeout: config.connect_timeout(),
            nodelay: config.nodelay,
        }
    }

    /// 设置连接超时（0 表示不设超时）
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout).filter(|t| !t.is_zero());
        self
    }

    /// 设置是否启用 TCP_NODELAY
    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    fn connect_stream(&self) -> io::Result<TcpStream> {
        let Some(timeout) = self.connect_timeout else {
            return TcpStream::connect((self.host.as_str(), self.port));
        };

        // `connect_timeout` 只接受单个地址，逐个尝试解析结果
        let mut last_err = None;
        for addr in (self.host.as_str(), self.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!("Connect attempt to {} failed: {}", addr, e);
                    last_err = Some(e);
                },
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} did not resolve to any address", self.peer()),
            )
        }))
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self) -> io::Result<TcpStream> {
        let stream = self.connect_stream()?;
        stream.set_nodelay(self.nodelay)?;
        // 接收不设超时，调用方需要时自行在外部限制
        stream.set_read_timeout(None)?;
        Ok(stream)
    }

    fn peer(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
