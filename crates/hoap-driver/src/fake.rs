//! 进程内模拟器
//!
//! 不经过网络，直接在内存中保存最近一次下发的指令，并将其作为传感值返回。
//! 换算规则与 [`RobotLink`](crate::RobotLink) 完全相同（位置钳位，速度不钳位）。

use crate::error::DriverError;
use crate::interface::RobotInterface;
use crate::mapping::{JointKind, JointMapper, JointVector, NativeVector};
use hoap_protocol::{INIT_POSE, JOINT_COUNT};
use tracing::trace;

/// 进程内模拟器
#[derive(Debug, Clone)]
pub struct FakeRobot {
    mapper: JointMapper,
    position: NativeVector,
    velocity: NativeVector,
}

impl FakeRobot {
    /// 创建模拟器，初始位置为 [`INIT_POSE`]，初始速度为 0
    pub fn new(mapper: JointMapper) -> Self {
        Self {
            mapper,
            position: INIT_POSE,
            velocity: [0; JOINT_COUNT],
        }
    }

    /// 当前位置脉冲（原生顺序）
    pub fn position_pulses(&self) -> &NativeVector {
        &self.position
    }

    /// 当前速度脉冲（原生顺序）
    pub fn velocity_pulses(&self) -> &NativeVector {
        &self.velocity
    }
}

impl RobotInterface for FakeRobot {
    fn open(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn close(&mut self) {}

    fn control(
        &mut self,
        position: &JointVector,
        velocity: &JointVector,
    ) -> Result<(), DriverError> {
        self.position = self.mapper.to_native(position, JointKind::Position);
        self.velocity = self.mapper.to_native(velocity, JointKind::Velocity);
        trace!("Fake robot commanded: {:?}", self.position);
        Ok(())
    }

    fn sensor(&mut self) -> Result<(JointVector, JointVector), DriverError> {
        Ok((
            self.mapper.to_external(&self.position),
            self.mapper.to_external(&self.velocity),
        ))
    }
}
