//! 传感帧解析
//!
//! 线上布局（56 个 i16，共 112 字节）：
//!
//! ```text
//! [21 位置脉冲][21 速度脉冲][4 辅助][4 辅助][6 辅助]
//! ```
//!
//! 辅助通道不做任何解释，原样透传。

use crate::ProtocolError;
use crate::constants::{JOINT_COUNT, SENSOR_AUX_GROUPS, SENSOR_AUX_LEN, SENSOR_FRAME_SIZE};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// 传感帧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFrame {
    /// 关节位置（脉冲，原生顺序）
    pub position: [i16; JOINT_COUNT],
    /// 关节速度（脉冲，原生顺序）
    pub velocity: [i16; JOINT_COUNT],
    /// 辅助通道（4 + 4 + 6，未解释）
    pub auxiliary: [i16; SENSOR_AUX_LEN],
}

impl Default for SensorFrame {
    fn default() -> Self {
        Self {
            position: [0; JOINT_COUNT],
            velocity: [0; JOINT_COUNT],
            auxiliary: [0; SENSOR_AUX_LEN],
        }
    }
}

impl SensorFrame {
    /// 从 `Bytes` 解包
    ///
    /// 长度不足一帧时返回错误，不会返回部分填充的结果。
    pub fn unpack_from_bytes(mut data: Bytes) -> Result<Self, ProtocolError> {
        if data.len() < SENSOR_FRAME_SIZE {
            return Err(ProtocolError::InvalidLength {
                expected: SENSOR_FRAME_SIZE,
                actual: data.len(),
            });
        }

        let mut frame = Self::default();
        for value in frame
            .position
            .iter_mut()
            .chain(frame.velocity.iter_mut())
            .chain(frame.auxiliary.iter_mut())
        {
            *value = data.get_i16_le();
        }
        Ok(frame)
    }

    /// 打包到 `BytesMut`（供模拟机器人端使用）
    pub fn pack_to(&self, buf: &mut BytesMut) {
        buf.reserve(SENSOR_FRAME_SIZE);
        for &value in self.position.iter().chain(&self.velocity).chain(&self.auxiliary) {
            buf.put_i16_le(value);
        }
    }

    /// 第一组辅助通道（4 个）
    pub fn aux_first(&self) -> &[i16] {
        &self.auxiliary[..SENSOR_AUX_GROUPS[0]]
    }

    /// 第二组辅助通道（4 个）
    pub fn aux_second(&self) -> &[i16] {
        let start = SENSOR_AUX_GROUPS[0];
        &self.auxiliary[start..start + SENSOR_AUX_GROUPS[1]]
    }

    /// 第三组辅助通道（6 个）
    pub fn aux_third(&self) -> &[i16] {
        &self.auxiliary[SENSOR_AUX_GROUPS[0] + SENSOR_AUX_GROUPS[1]..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 按 56 个递增值构造一帧原始数据
    fn raw_frame() -> Vec<u8> {
        (0..(SENSOR_FRAME_SIZE / 2) as i16)
            .flat_map(|v| (v * 3 - 80).to_le_bytes())
            .collect()
    }

    #[test]
    fn test_sensor_frame_unpack() {
        let frame = SensorFrame::unpack_from_bytes(Bytes::from(raw_frame())).unwrap();

        assert_eq!(frame.position[0], -80);
        assert_eq!(frame.position[20], 20 * 3 - 80);
        assert_eq!(frame.velocity[0], 21 * 3 - 80);
        assert_eq!(frame.velocity[20], 41 * 3 - 80);
        assert_eq!(frame.auxiliary[0], 42 * 3 - 80);
        assert_eq!(frame.auxiliary[13], 55 * 3 - 80);
    }

    #[test]
    fn test_aux_groups() {
        let frame = SensorFrame::unpack_from_bytes(Bytes::from(raw_frame())).unwrap();

        assert_eq!(frame.aux_first().len(), 4);
        assert_eq!(frame.aux_second().len(), 4);
        assert_eq!(frame.aux_third().len(), 6);
        assert_eq!(frame.aux_second()[0], 46 * 3 - 80);
        assert_eq!(frame.aux_third()[5], frame.auxiliary[13]);
    }

    #[test]
    fn test_sensor_frame_pack_matches_wire() {
        let raw = raw_frame();
        let frame = SensorFrame::unpack_from_bytes(Bytes::from(raw.clone())).unwrap();

        let mut buf = BytesMut::new();
        frame.pack_to(&mut buf);
        assert_eq!(&buf[..], &raw[..]);
    }

    #[test]
    fn test_sensor_frame_unpack_too_short() {
        for len in [0usize, 50, SENSOR_FRAME_SIZE - 1] {
            let result = SensorFrame::unpack_from_bytes(Bytes::from(vec![0u8; len]));
            assert_eq!(
                result,
                Err(ProtocolError::InvalidLength {
                    expected: SENSOR_FRAME_SIZE,
                    actual: len
                })
            );
        }
    }
}
