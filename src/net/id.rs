//! 标识符类型
//!
//! 定义拓扑节点的唯一标识符。

use serde::{Deserialize, Serialize};

/// 节点标识符
///
/// Assigned in creation order: wireless clients first, then the access point,
/// then the wired servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);
