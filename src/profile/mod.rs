//! 流量画像模块
//!
//! 此模块包含流量画像定义、参数区间和开/关时长分布。

mod catalog;
mod dist;

pub use catalog::{Profile, ProfileCatalog, ProfileKind};
pub use dist::{DistError, ParamRange, TimingDist};
