//! 控制帧编码
//!
//! 控制帧仅包含 21 个位置脉冲（原生关节顺序），共 42 字节。

use crate::ProtocolError;
use crate::constants::{CONTROL_FRAME_SIZE, JOINT_COUNT};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// 控制帧
///
/// 不使用 `#[repr(packed)]`，完全通过 `bytes` 手动打包/解包，
/// 不依赖结构体的内存布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFrame {
    /// 目标位置（脉冲，原生顺序）
    pub position: [i16; JOINT_COUNT],
}

impl ControlFrame {
    /// 由位置脉冲创建控制帧
    pub fn new(position: [i16; JOINT_COUNT]) -> Self {
        Self { position }
    }

    /// 打包到 `BytesMut`
    pub fn pack_to(&self, buf: &mut BytesMut) {
        buf.reserve(CONTROL_FRAME_SIZE);
        for &pulse in &self.position {
            buf.put_i16_le(pulse);
        }
    }

    /// 打包为定长字节数组
    pub fn to_bytes(&self) -> [u8; CONTROL_FRAME_SIZE] {
        let mut out = [0u8; CONTROL_FRAME_SIZE];
        for (chunk, pulse) in out.chunks_exact_mut(2).zip(self.position) {
            chunk.copy_from_slice(&pulse.to_le_bytes());
        }
        out
    }

    /// 从 `Bytes` 解包
    ///
    /// 多余的尾部字节会被忽略。
    pub fn unpack_from_bytes(mut data: Bytes) -> Result<Self, ProtocolError> {
        if data.len() < CONTROL_FRAME_SIZE {
            return Err(ProtocolError::InvalidLength {
                expected: CONTROL_FRAME_SIZE,
                actual: data.len(),
            });
        }

        let mut position = [0i16; JOINT_COUNT];
        for pulse in position.iter_mut() {
            *pulse = data.get_i16_le();
        }
        Ok(Self { position })
    }
}

impl From<[i16; JOINT_COUNT]> for ControlFrame {
    fn from(position: [i16; JOINT_COUNT]) -> Self {
        Self::new(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_position() -> [i16; JOINT_COUNT] {
        let mut position = [0i16; JOINT_COUNT];
        for (i, p) in position.iter_mut().enumerate() {
            *p = (i as i16 - 10) * 1000;
        }
        position
    }

    #[test]
    fn test_control_frame_pack_to() {
        let mut position = [0i16; JOINT_COUNT];
        position[0] = 0x1234;
        position[1] = -1;
        position[20] = 1197;

        let mut buf = BytesMut::new();
        ControlFrame::new(position).pack_to(&mut buf);

        assert_eq!(buf.len(), CONTROL_FRAME_SIZE);
        assert_eq!(buf[0..2], [0x34, 0x12]); // little-endian
        assert_eq!(buf[2..4], [0xFF, 0xFF]);
        assert_eq!(buf[40..42], 1197i16.to_le_bytes());
    }

    #[test]
    fn test_to_bytes_matches_pack_to() {
        let frame = ControlFrame::new(sample_position());
        let mut buf = BytesMut::new();
        frame.pack_to(&mut buf);
        assert_eq!(&buf[..], &frame.to_bytes()[..]);
    }

    #[test]
    fn test_control_frame_roundtrip() {
        let frame = ControlFrame::new(sample_position());
        let decoded = ControlFrame::unpack_from_bytes(Bytes::copy_from_slice(&frame.to_bytes()))
            .unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_control_frame_unpack_too_short() {
        let result = ControlFrame::unpack_from_bytes(Bytes::from(vec![0u8; 41]));
        assert_eq!(
            result,
            Err(ProtocolError::InvalidLength {
                expected: 42,
                actual: 41
            })
        );
    }
}
