//! HOAP SDK - HOAP-3 仿人机器人 Rust SDK
//!
//! 在运动控制库的关节角表示（弧度，外部顺序）与机器人原生脉冲表示之间做有界的双向换算，
//! 并通过 TCP 字节流收发定长帧。
//!
//! # 架构设计
//!
//! - **协议层** (`protocol`): 换算表、限位、控制帧/传感帧编解码
//! - **驱动层** (`driver`): 关节映射、网络链路、进程内模拟器
//!
//! # 快速开始
//!
//! ```no_run
//! use hoap_sdk::prelude::*;
//!
//! # fn main() -> Result<(), DriverError> {
//! hoap_sdk::init_logger();
//!
//! let mapper = JointMapper::new(IndexMap::from_fn(|id| id as usize - 1)?);
//! let mut robot = RobotLink::from_config(&LinkConfig::new("192.168.1.20", 5000), mapper);
//! robot.open()?;
//!
//! let (q, alpha) = robot.sensor()?;
//! robot.control(&q, &alpha)?;
//! robot.close();
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub use hoap_driver as driver;
pub use hoap_protocol as protocol;

pub use hoap_driver::{
    ConfigError, ConnectionError, DriverError, FakeRobot, IndexMap, JointKind, JointMapper,
    JointModel, JointVector, LinkConfig, LinkState, NativeVector, RobotInterface, RobotLink,
};
pub use hoap_protocol::{ControlFrame, JOINT_COUNT, ProtocolError, SensorFrame};

use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认级别 `info`，可通过 `RUST_LOG` 覆盖。`log` crate 的记录也会转发到 `tracing`。
/// 重复调用是安全的，只有第一次生效。若进程已安装其它 `log` 记录器，
/// 则不再桥接 `log`，仅在 `debug` 级别记录一次。
///
/// 返回本次调用是否安装了订阅器。
pub fn init_logger() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }
    // 其它依赖通过 `log` 输出的日志；已有 `log` 记录器时保留原有的
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("log records not bridged to tracing: {}", e);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice() {
        // 第一次调用的结果取决于是否已有其它测试安装过订阅器
        init_logger();
        assert!(!init_logger());
    }
}
