//! 网络描述模块
//!
//! 此模块包含节点标识、传输协议和地址规划。

// 子模块声明
mod address;
mod id;
mod transport;

// 重新导出公共接口
pub use address::{AddressPlan, Subnet, WIRED_SUBNET, WIRELESS_SUBNET};
pub use id::NodeId;
pub use transport::Transport;
