//! 硬件相关常量定义
//!
//! 集中定义脉冲换算表、关节限位和初始姿态，避免在代码中散落"魔法数"。
//!
//! 所有表格均按机器人原生关节顺序（关节 ID 1..21 对应下标 0..20）排列。

/// 关节数量
pub const JOINT_COUNT: usize = 21;

/// 控制帧大小（21 个 i16）
pub const CONTROL_FRAME_SIZE: usize = JOINT_COUNT * 2;

/// 传感帧辅助通道数量（4 + 4 + 6）
pub const SENSOR_AUX_LEN: usize = 14;

/// 辅助通道在线上的分组长度
pub const SENSOR_AUX_GROUPS: [usize; 3] = [4, 4, 6];

/// 传感帧大小（位置 21 + 速度 21 + 辅助 14，共 56 个 i16）
pub const SENSOR_FRAME_SIZE: usize = (JOINT_COUNT * 2 + SENSOR_AUX_LEN) * 2;

/// 角度（度）到脉冲的比例
///
/// 符号表示关节安装方向。
pub const THETA_TO_PULSE: [f64; JOINT_COUNT] = [
    209.0, 209.0, -209.0, 209.0, 209.0, -209.0, 209.0, 209.0, -209.0, -209.0, 209.0, 209.0,
    209.0, -209.0, -209.0, -209.0, -209.0, 209.0, -209.0, 209.0, 209.0,
];

/// 脉冲到角度（度）的比例，`THETA_TO_PULSE` 的逐元素倒数
pub const PULSE_TO_THETA: [f64; JOINT_COUNT] = reciprocal(THETA_TO_PULSE);

/// 限位安全余量（脉冲）
///
/// 硬件限位向内收缩一个余量后才是允许下发的范围。
pub const BOUND_MARGIN: i16 = 209;

/// 硬件下限（未加余量）
const RAW_LOWER_BOUND: [i16; JOINT_COUNT] = [
    -19019, -6479, -14839, -209, -12749, -5225, -19019, -20064, -19019, -209, -6479, -4389,
    -17138, -27170, -12749, -5225, -31559, -209, -19019, -24035, 209,
];

/// 硬件上限（未加余量）
const RAW_UPPER_BOUND: [i16; JOINT_COUNT] = [
    6479, 4389, 17138, 27170, 12249, 5225, 31559, 209, 19019, 24035, 19019, 6479, 14839, 209,
    12749, 5225, 19019, 20064, 19019, 209, 18810,
];

/// 位置指令下限（脉冲，含余量）
pub const PULSE_LOWER_BOUND: [i16; JOINT_COUNT] = offset(RAW_LOWER_BOUND, BOUND_MARGIN);

/// 位置指令上限（脉冲，含余量）
pub const PULSE_UPPER_BOUND: [i16; JOINT_COUNT] = offset(RAW_UPPER_BOUND, -BOUND_MARGIN);

/// 初始姿态（脉冲）
///
/// 进程内模拟器在收到第一条指令前上报的位置。
pub const INIT_POSE: [i16; JOINT_COUNT] = [
    0, 40, 3697, 9537, -5840, -344, 18810, -2000, 0, 8800, 0, 40, -3727, -9536, 5809, 425,
    -18810, 2000, 0, -8800, 418,
];

const fn reciprocal(table: [f64; JOINT_COUNT]) -> [f64; JOINT_COUNT] {
    let mut out = [0.0; JOINT_COUNT];
    let mut i = 0;
    while i < JOINT_COUNT {
        out[i] = 1.0 / table[i];
        i += 1;
    }
    out
}

const fn offset(table: [i16; JOINT_COUNT], delta: i16) -> [i16; JOINT_COUNT] {
    let mut out = [0; JOINT_COUNT];
    let mut i = 0;
    while i < JOINT_COUNT {
        out[i] = table[i] + delta;
        i += 1;
    }
    out
}

/// 获取关节 `index`（原生顺序）的位置限位 `(lower, upper)`
///
/// # Panics
/// `index >= JOINT_COUNT` 时 panic。
#[inline]
pub fn bounds(index: usize) -> (i16, i16) {
    (PULSE_LOWER_BOUND[index], PULSE_UPPER_BOUND[index])
}

/// 将截断后的脉冲值钳位到关节 `index` 的位置限位内
///
/// 输入使用 `i64`，因此超出 16 位范围的中间值不会先回绕再钳位。
#[inline]
pub fn clamp_position_pulse(index: usize, raw: i64) -> i16 {
    let (lower, upper) = bounds(index);
    raw.clamp(lower as i64, upper as i64) as i16
}
