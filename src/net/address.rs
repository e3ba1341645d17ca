//! 地址规划
//!
//! The wired segment carries the AP uplink and the servers; the wireless
//! segment carries the AP radio and every client. Both subnets are fixed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

use crate::error::ConfigError;

/// Wired (AP ↔ servers) segment.
pub const WIRED_SUBNET: Subnet = Subnet::new(Ipv4Addr::new(192, 168, 1, 0), 24);
/// Wireless (AP ↔ clients) segment.
pub const WIRELESS_SUBNET: Subnet = Subnet::new(Ipv4Addr::new(10, 1, 1, 0), 24);

/// An IPv4 network in CIDR form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub network: Ipv4Addr,
    pub prefix_len: u8,
}

impl Subnet {
    pub const fn new(network: Ipv4Addr, prefix_len: u8) -> Self {
        Self {
            network,
            prefix_len,
        }
    }

    /// Assignable host addresses (network and broadcast excluded).
    pub fn host_capacity(&self) -> usize {
        let host_bits = 32_u32.saturating_sub(self.prefix_len as u32);
        if host_bits < 2 {
            return 0;
        }
        (1_usize << host_bits) - 2
    }

    /// The `n`-th host address, 1-based (`host(1)` is `x.x.x.1` on a /24).
    pub fn host(&self, n: usize) -> Option<Ipv4Addr> {
        if n == 0 || n > self.host_capacity() {
            return None;
        }
        let base = u32::from(self.network);
        Some(Ipv4Addr::from(base + n as u32))
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Addresses handed out in interface creation order.
///
/// `wired[0]` is the AP uplink and `wired[k + 1]` is server `k`, so a server's
/// slot is always its index plus one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPlan {
    pub wired_subnet: Subnet,
    pub wireless_subnet: Subnet,
    pub wired: Vec<Ipv4Addr>,
    pub ap_wireless: Ipv4Addr,
    pub clients: Vec<Ipv4Addr>,
}

impl AddressPlan {
    pub fn for_topology(n_servers: usize, n_clients: usize) -> Result<Self, ConfigError> {
        let wired = allocate(WIRED_SUBNET, 1 + n_servers, "server")?;
        let mut wireless = allocate(WIRELESS_SUBNET, 1 + n_clients, "client")?;
        let ap_wireless = wireless.remove(0);
        Ok(Self {
            wired_subnet: WIRED_SUBNET,
            wireless_subnet: WIRELESS_SUBNET,
            wired,
            ap_wireless,
            clients: wireless,
        })
    }

    pub fn ap(&self) -> Option<Ipv4Addr> {
        self.wired.first().copied()
    }

    pub fn server(&self, k: usize) -> Option<Ipv4Addr> {
        self.wired.get(k + 1).copied()
    }

    /// Zero for a plan without an AP slot.
    pub fn server_count(&self) -> usize {
        self.wired.len().saturating_sub(1)
    }

    pub fn client(&self, i: usize) -> Option<Ipv4Addr> {
        self.clients.get(i).copied()
    }
}

fn allocate(subnet: Subnet, count: usize, role: &'static str) -> Result<Vec<Ipv4Addr>, ConfigError> {
    let capacity = subnet.host_capacity();
    if count > capacity {
        return Err(ConfigError::AddressSpaceExhausted {
            role,
            // The AP always takes the first address; report the caller-visible count.
            count: count - 1,
            capacity: capacity.saturating_sub(1),
            subnet: subnet.to_string(),
        });
    }
    Ok((1..=count).filter_map(|n| subnet.host(n)).collect())
}
