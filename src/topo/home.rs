//! 家庭网络拓扑构建
//!
//! 拓扑结构：clients (左侧单列) ~ AP (中心) - servers (右侧竖排)

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::net::NodeId;

/// 节点坐标（米）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// 拓扑布局选项
///
/// Servers stack downwards from `server_origin` by `server_spacing`; clients
/// form one column starting at `client_origin`, `client_spacing` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeLayout {
    pub ap: Position,
    pub server_origin: Position,
    pub server_spacing: f64,
    pub client_origin: Position,
    pub client_spacing: f64,
}

impl HomeLayout {
    /// Single-server prototype layout.
    pub fn basic() -> Self {
        Self {
            ap: Position::new(35.0, 35.0),
            server_origin: Position::new(70.0, 35.0),
            server_spacing: 10.0,
            client_origin: Position::new(15.0, 10.0),
            client_spacing: 5.0,
        }
    }

    pub fn multi_server() -> Self {
        Self {
            client_origin: Position::new(20.0, 5.0),
            ..Self::default()
        }
    }
}

impl Default for HomeLayout {
    fn default() -> Self {
        Self {
            ap: Position::new(50.0, 50.0),
            server_origin: Position::new(80.0, 30.0),
            server_spacing: 10.0,
            client_origin: Position::new(20.0, 10.0),
            client_spacing: 5.0,
        }
    }
}

/// 节点角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum NodeRole {
    AccessPoint,
    Server { index: usize },
    Client { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopoNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub role: NodeRole,
    pub name: String,
    /// Human-readable label for the engine's node annotations.
    pub description: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeTopology {
    pub ap: TopoNode,
    pub servers: Vec<TopoNode>,
    pub clients: Vec<TopoNode>,
}

impl HomeTopology {
    pub fn node_count(&self) -> usize {
        1 + self.servers.len() + self.clients.len()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &TopoNode> {
        self.clients
            .iter()
            .chain(std::iter::once(&self.ap))
            .chain(self.servers.iter())
    }
}

/// 构建家庭网络拓扑
///
/// Node ids follow creation order: clients `0..n_clients`, the AP, then the
/// servers. Positions depend only on index and layout.
#[tracing::instrument(skip(layout))]
pub fn build_home_topology(n_clients: usize, n_servers: usize, layout: &HomeLayout) -> HomeTopology {
    let clients = (0..n_clients)
        .map(|i| TopoNode {
            id: NodeId(i),
            role: NodeRole::Client { index: i },
            name: format!("sta{i}"),
            description: format!("Station {i}"),
            position: Position {
                x: layout.client_origin.x,
                y: layout.client_origin.y + i as f64 * layout.client_spacing,
                z: layout.client_origin.z,
            },
        })
        .collect::<Vec<_>>();

    let ap = TopoNode {
        id: NodeId(n_clients),
        role: NodeRole::AccessPoint,
        name: "ap".to_string(),
        description: "Gateway AP".to_string(),
        position: layout.ap,
    };
    debug!(id = ?ap.id, position = ?ap.position, "placed access point");

    let servers = (0..n_servers)
        .map(|k| TopoNode {
            id: NodeId(n_clients + 1 + k),
            role: NodeRole::Server { index: k },
            name: format!("srv{k}"),
            description: format!("Server Type {k}"),
            position: Position {
                x: layout.server_origin.x,
                y: layout.server_origin.y + k as f64 * layout.server_spacing,
                z: layout.server_origin.z,
            },
        })
        .collect::<Vec<_>>();

    info!(
        clients = clients.len(),
        servers = servers.len(),
        "🏠 topology laid out"
    );

    HomeTopology {
        ap,
        servers,
        clients,
    }
}
