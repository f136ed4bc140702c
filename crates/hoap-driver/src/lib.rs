//! 驱动层模块
//!
//! 本模块提供 HOAP-3 仿人机器人的设备驱动功能，包括：
//! - 关节映射：外部关节顺序与原生顺序之间的置换，弧度与脉冲之间的换算、安全钳位
//! - 网络链路：连接生命周期管理、控制帧发送、传感帧接收
//! - 进程内模拟器：不经过网络的替身实现
//!
//! # 数据流
//!
//! ```text
//! 控制循环 -> JointMapper::to_native -> RobotLink::send ---> 机器人
//! 控制循环 <- JointMapper::to_external <- RobotLink::receive <-'
//! ```

mod config;
mod error;
mod fake;
mod interface;
pub mod link;
pub mod mapping;
pub mod transport;

pub use config::LinkConfig;
pub use error::{ConfigError, ConnectionError, DriverError};
pub use fake::FakeRobot;
pub use interface::RobotInterface;
pub use link::{LinkState, RobotLink};
pub use mapping::{IndexMap, JointKind, JointMapper, JointModel, JointVector, NativeVector};
pub use transport::{Connector, TcpConnector};
