//! 关节映射与单位换算
//!
//! 在外部关节角表示（弧度，外部存储顺序）与机器人原生脉冲表示（i16，原生顺序）
//! 之间双向转换。构造完成后无状态、不可变。
//!
//! # 换算规则
//!
//! - 下发：`弧度 -> 度 -> × THETA_TO_PULSE[i] -> 向零截断`，位置指令再钳位到限位内，
//!   速度指令不钳位（按 16 位回绕）。
//! - 上报：`脉冲 × PULSE_TO_THETA[i] -> 度 -> 弧度`，不钳位。

use crate::error::ConfigError;
use hoap_protocol::constants::{JOINT_COUNT, PULSE_TO_THETA, THETA_TO_PULSE};
use hoap_protocol::clamp_position_pulse;

/// 外部关节向量（弧度，外部存储顺序）
pub type JointVector = [f64; JOINT_COUNT];

/// 原生关节向量（脉冲，原生顺序）
pub type NativeVector = [i16; JOINT_COUNT];

/// 关节量类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointKind {
    /// 位置（下发时钳位）
    Position,
    /// 速度（下发时不钳位）
    Velocity,
}

/// 外部关节模型查询接口
///
/// 只在构造 [`IndexMap`] 时使用一次。
pub trait JointModel {
    /// 关节 ID（1..=21）对应的模型内部下标
    fn joint_index_by_id(&self, joint_id: u32) -> Option<usize>;

    /// 模型内部下标对应的外部存储位置
    fn joint_pos_in_param(&self, index: usize) -> usize;
}

/// 原生下标到外部下标的置换（双射）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMap {
    native_to_external: [usize; JOINT_COUNT],
}

impl IndexMap {
    /// 恒等映射
    pub fn identity() -> Self {
        Self {
            native_to_external: std::array::from_fn(|i| i),
        }
    }

    /// 通过关节模型构造
    ///
    /// 对每个关节 ID 依次调用 `joint_index_by_id` 和 `joint_pos_in_param`。
    pub fn from_model<M: JointModel + ?Sized>(model: &M) -> Result<Self, ConfigError> {
        Self::build(|joint_id| {
            let index = model
                .joint_index_by_id(joint_id)
                .ok_or(ConfigError::UnknownJoint { joint_id })?;
            Ok(model.joint_pos_in_param(index))
        })
    }

    /// 通过 `joint_id -> 外部下标` 查询函数构造
    pub fn from_fn<F>(mut position_for: F) -> Result<Self, ConfigError>
    where
        F: FnMut(u32) -> usize,
    {
        Self::build(|joint_id| Ok(position_for(joint_id)))
    }

    fn build<F>(mut query: F) -> Result<Self, ConfigError>
    where
        F: FnMut(u32) -> Result<usize, ConfigError>,
    {
        let mut native_to_external = [0usize; JOINT_COUNT];
        // 每个外部下标被哪个关节 ID 占用
        let mut owner: [Option<u32>; JOINT_COUNT] = [None; JOINT_COUNT];

        for (native, slot) in native_to_external.iter_mut().enumerate() {
            let joint_id = native as u32 + 1;
            let external = query(joint_id)?;

            if external >= JOINT_COUNT {
                return Err(ConfigError::IndexOutOfRange {
                    joint_id,
                    index: external,
                    max: JOINT_COUNT - 1,
                });
            }
            if let Some(first) = owner[external] {
                return Err(ConfigError::DuplicateIndex {
                    index: external,
                    first,
                    second: joint_id,
                });
            }

            owner[external] = Some(joint_id);
            *slot = external;
        }

        Ok(Self { native_to_external })
    }

    /// 原生下标对应的外部下标
    #[inline]
    pub fn native_to_external(&self, native: usize) -> usize {
        self.native_to_external[native]
    }

    /// 完整映射表
    pub fn as_array(&self) -> &[usize; JOINT_COUNT] {
        &self.native_to_external
    }
}

impl Default for IndexMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<[usize; JOINT_COUNT]> for IndexMap {
    type Error = ConfigError;

    fn try_from(table: [usize; JOINT_COUNT]) -> Result<Self, Self::Error> {
        Self::from_fn(|joint_id| table[joint_id as usize - 1])
    }
}

/// 关节映射器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JointMapper {
    index: IndexMap,
}

impl JointMapper {
    /// 使用已验证的映射创建
    pub fn new(index: IndexMap) -> Self {
        Self { index }
    }

    /// 通过关节模型创建
    pub fn from_model<M: JointModel + ?Sized>(model: &M) -> Result<Self, ConfigError> {
        IndexMap::from_model(model).map(Self::new)
    }

    /// 获取映射表
    pub fn index_map(&self) -> &IndexMap {
        &self.index
    }

    /// 外部弧度 -> 原生脉冲
    pub fn to_native(&self, angles: &JointVector, kind: JointKind) -> NativeVector {
        std::array::from_fn(|i| {
            let angle = angles[self.index.native_to_external(i)];
            // `as i64` 向零截断；NaN 得 0，越界饱和
            let raw = (angle.to_degrees() * THETA_TO_PULSE[i]) as i64;
            match kind {
                JointKind::Position => clamp_position_pulse(i, raw),
                JointKind::Velocity => raw as i16,
            }
        })
    }

    /// 原生脉冲 -> 外部弧度（不钳位）
    pub fn to_external(&self, native: &NativeVector) -> JointVector {
        let mut out = [0.0; JOINT_COUNT];
        for (i, &pulse) in native.iter().enumerate() {
            let degrees = pulse as f64 * PULSE_TO_THETA[i];
            out[self.index.native_to_external(i)] = degrees.to_radians();
        }
        out
    }

    /// 与 [`to_native`](Self::to_native) 对称的接口，上报方向位置和速度规则相同
    pub fn to_external_kind(&self, native: &NativeVector, _kind: JointKind) -> JointVector {
        self.to_external(native)
    }
}
