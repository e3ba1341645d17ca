//! Declarative link/radio/capture settings for the execution engine.
//!
//! Nothing here is interpreted by this crate; the engine instantiates the
//! segments and writes the named trace files.

use serde::{Deserialize, Serialize};

use super::time::SimTime;
use crate::net::{Subnet, WIRED_SUBNET, WIRELESS_SUBNET};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub wired: WiredSegment,
    pub wireless: WirelessSegment,
    #[serde(default)]
    pub capture: Option<CaptureSettings>,
    pub animation_file: String,
}

/// How the AP uplink reaches the servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiredLink {
    /// Dedicated AP ↔ server link; joins exactly two nodes.
    PointToPoint,
    /// Shared Ethernet bus for the AP and every server.
    #[default]
    Csma,
}

/// Wired segment between the AP and the servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WiredSegment {
    #[serde(default)]
    pub link: WiredLink,
    pub subnet: Subnet,
    pub data_rate_bps: u64,
    pub delay: SimTime,
}

impl Default for WiredSegment {
    fn default() -> Self {
        Self {
            link: WiredLink::default(),
            subnet: WIRED_SUBNET,
            data_rate_bps: 1_000_000_000,
            delay: SimTime::from_millis(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationLoss {
    LogDistance,
    Nakagami,
}

/// Infrastructure-mode WLAN served by the AP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirelessSegment {
    pub subnet: Subnet,
    pub standard: String,
    pub ssid: String,
    pub rate_control: String,
    pub active_probing: bool,
    /// Extra loss models stacked on the channel default, in order.
    #[serde(default)]
    pub propagation_loss: Vec<PropagationLoss>,
}

impl Default for WirelessSegment {
    fn default() -> Self {
        Self {
            subnet: WIRELESS_SUBNET,
            standard: "802.11ac".to_string(),
            ssid: "MaMaisonConnectee".to_string(),
            rate_control: "minstrel_ht".to_string(),
            active_probing: false,
            propagation_loss: Vec::new(),
        }
    }
}

/// Packet capture on the AP radio plus a flow-level report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    pub pcap_prefix: String,
    pub radiotap: bool,
    pub flow_monitor_xml: String,
}
