//! # HOAP Protocol
//!
//! HOAP-3 仿人机器人网络协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `constants`: 关节数量、脉冲换算表、安全限位、初始姿态
//! - `control`: 控制帧（21 个位置脉冲）编码
//! - `feedback`: 传感帧（位置 + 速度 + 辅助通道）解析
//!
//! ## 字节序
//!
//! 帧由连续的有符号 16 位整数组成，小端字节序，无帧头、无长度前缀、无校验。

pub mod constants;
pub mod control;
pub mod feedback;

// 重新导出常用类型
pub use constants::*;
pub use control::ControlFrame;
pub use feedback::SensorFrame;

use thiserror::Error;

/// 协议解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 缓冲区字节数不足一帧
    #[error("Frame too short: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// 对端在凑满一帧前关闭了连接
    #[error("Connection broken: expected {expected} bytes, got {actual}")]
    ConnectionBroken { expected: usize, actual: usize },
}
