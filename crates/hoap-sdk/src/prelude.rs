//! Prelude 模块
//!
//! ```rust
//! use hoap_sdk::prelude::*;
//! ```

pub use hoap_driver::{
    DriverError, FakeRobot, IndexMap, JointKind, JointMapper, JointModel, JointVector,
    LinkConfig, LinkState, NativeVector, RobotInterface, RobotLink,
};
pub use hoap_protocol::JOINT_COUNT;
