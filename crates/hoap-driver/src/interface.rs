//! 机器人统一接口
//!
//! 网络链路 [`RobotLink`](crate::RobotLink) 和进程内模拟器 [`FakeRobot`](crate::FakeRobot)
//! 都实现此接口，控制循环每个周期调用一次 `control` 和一次 `sensor`。

use crate::error::DriverError;
use crate::mapping::JointVector;

/// 机器人统一接口
pub trait RobotInterface {
    /// 打开连接
    fn open(&mut self) -> Result<(), DriverError>;

    /// 关闭连接（幂等）
    fn close(&mut self);

    /// 下发关节指令（外部顺序，弧度）
    fn control(&mut self, position: &JointVector, velocity: &JointVector)
    -> Result<(), DriverError>;

    /// 读取关节状态（外部顺序，弧度），返回 `(位置, 速度)`
    fn sensor(&mut self) -> Result<(JointVector, JointVector), DriverError>;
}
