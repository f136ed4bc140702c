//! 网络链路
//!
//! 持有一条字节流连接，负责控制帧的发送和传感帧的接收。
//!
//! # 状态机
//!
//! ```text
//! Closed --open()--> Open --close()--> Closed
//!                     |
//!                     | 读写失败 / 帧不完整
//!                     v
//!                   Failed（终态，只允许 close()）
//! ```
//!
//! 所有操作都是单次尝试，不重试、不自动重连。
//!
//! # 线程安全
//!
//! 链路独占其连接，同一实例不得被多个线程同时使用（由调用方保证）。

use crate::config::LinkConfig;
use crate::error::{ConnectionError, DriverError};
use crate::interface::RobotInterface;
use crate::mapping::{JointKind, JointMapper, JointVector, NativeVector};
use crate::transport::{Connector, TcpConnector};
use bytes::BytesMut;
use hoap_protocol::{ControlFrame, ProtocolError, SENSOR_FRAME_SIZE, SensorFrame};
use std::io::{self, Read, Write};
use tracing::{debug, info, trace, warn};

/// 链路状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// 未连接（初始状态）
    #[default]
    Closed,
    /// 已连接
    Open,
    /// 已失效，必须重新构造链路
    Failed,
}

/// 网络链路
pub struct RobotLink<C: Connector = TcpConnector> {
    connector: C,
    mapper: JointMapper,
    stream: Option<C::Stream>,
    state: LinkState,
}

impl RobotLink<TcpConnector> {
    /// 根据配置创建 TCP 链路（不会立即连接）
    pub fn from_config(config: &LinkConfig, mapper: JointMapper) -> Self {
        Self::new(TcpConnector::from_config(config), mapper)
    }
}

impl<C: Connector> RobotLink<C> {
    /// 创建链路（不会立即连接）
    pub fn new(connector: C, mapper: JointMapper) -> Self {
        Self {
            connector,
            mapper,
            stream: None,
            state: LinkState::Closed,
        }
    }

    /// 当前状态
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// 是否已连接
    pub fn is_open(&self) -> bool {
        self.state == LinkState::Open
    }

    /// 关节映射器
    pub fn mapper(&self) -> &JointMapper {
        &self.mapper
    }

    /// 建立连接
    ///
    /// 已连接时为空操作；连接失败时状态保持 `Closed`。
    pub fn open(&mut self) -> Result<(), DriverError> {
        match self.state {
            LinkState::Open => return Ok(()),
            LinkState::Failed => return Err(ConnectionError::Failed.into()),
            LinkState::Closed => {},
        }

        let peer = self.connector.peer();
        let stream = self.connector.connect().map_err(|source| {
            warn!("Failed to connect to {}: {}", peer, source);
            ConnectionError::Connect {
                peer: peer.clone(),
                source,
            }
        })?;

        self.stream = Some(stream);
        self.state = LinkState::Open;
        info!("Connected to {}", peer);
        Ok(())
    }

    /// 释放连接（幂等）
    ///
    /// `Open` 进入 `Closed`；`Failed` 只释放连接，状态不变。
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            info!("Disconnected from {}", self.connector.peer());
        }
        if self.state == LinkState::Open {
            self.state = LinkState::Closed;
        }
    }

    /// 发送位置脉冲（原生顺序）
    pub fn send(&mut self, position: &NativeVector) -> Result<(), DriverError> {
        let bytes = ControlFrame::new(*position).to_bytes();

        let stream = self.stream_mut()?;
        if let Err(e) = stream.write_all(&bytes).and_then(|()| stream.flush()) {
            return Err(self.fail(DriverError::Transport(e)));
        }

        trace!("Sent control frame: {:?}", position);
        Ok(())
    }

    /// 阻塞接收一帧传感数据
    ///
    /// 对端在凑满 112 字节前关闭连接时返回协议错误，不会返回部分数据。
    pub fn receive(&mut self) -> Result<SensorFrame, DriverError> {
        let mut buf = BytesMut::zeroed(SENSOR_FRAME_SIZE);

        let stream = self.stream_mut()?;
        let filled = match read_full(stream, &mut buf) {
            Ok(filled) => filled,
            Err(e) => return Err(self.fail(DriverError::Transport(e))),
        };
        if filled < SENSOR_FRAME_SIZE {
            return Err(self.fail(
                ProtocolError::ConnectionBroken {
                    expected: SENSOR_FRAME_SIZE,
                    actual: filled,
                }
                .into(),
            ));
        }

        let frame = SensorFrame::unpack_from_bytes(buf.freeze())?;
        trace!("Received sensor frame: {:?}", frame.position);
        Ok(frame)
    }

    /// 下发关节指令
    ///
    /// 只有位置会上线；速度参数与 [`sensor`](Self::sensor) 对称，不单独发送。
    pub fn control(
        &mut self,
        position: &JointVector,
        _velocity: &JointVector,
    ) -> Result<(), DriverError> {
        let pulses = self.mapper.to_native(position, JointKind::Position);
        self.send(&pulses)
    }

    /// 读取关节状态，返回 `(位置, 速度)`（外部顺序，弧度）
    pub fn sensor(&mut self) -> Result<(JointVector, JointVector), DriverError> {
        let frame = self.receive()?;
        Ok((
            self.mapper.to_external(&frame.position),
            self.mapper.to_external(&frame.velocity),
        ))
    }

    fn stream_mut(&mut self) -> Result<&mut C::Stream, DriverError> {
        match self.state {
            LinkState::Closed => Err(ConnectionError::NotOpen.into()),
            LinkState::Failed => Err(ConnectionError::Failed.into()),
            LinkState::Open => self
                .stream
                .as_mut()
                .ok_or_else(|| ConnectionError::NotOpen.into()),
        }
    }

    fn fail(&mut self, err: DriverError) -> DriverError {
        warn!("Link to {} failed: {}", self.connector.peer(), err);
        self.state = LinkState::Failed;
        err
    }
}

/// 读取直到填满缓冲区或遇到 EOF，返回实际读取的字节数
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                debug!("Stream reached EOF after {} bytes", filled);
                break;
            },
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl<C: Connector> RobotInterface for RobotLink<C> {
    fn open(&mut self) -> Result<(), DriverError> {
        RobotLink::open(self)
    }

    fn close(&mut self) {
        RobotLink::close(self)
    }

    fn control(
        &mut self,
        position: &JointVector,
        velocity: &JointVector,
    ) -> Result<(), DriverError> {
        RobotLink::control(self, position, velocity)
    }

    fn sensor(&mut self) -> Result<(JointVector, JointVector), DriverError> {
        RobotLink::sensor(self)
    }
}

impl<C: Connector> Drop for RobotLink<C> {
    fn drop(&mut self) {
        self.close();
    }
}
