//! Transport protocols carried by traffic and sink directives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport used by a profile or a listening sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Datagram traffic (IoT, Camera, VoIP).
    Udp,
    /// Stream traffic (Web).
    Tcp,
}

impl Transport {
    /// Every server opens one sink per transport, in this order.
    pub const ALL: [Transport; 2] = [Transport::Udp, Transport::Tcp];
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Udp => f.write_str("udp"),
            Transport::Tcp => f.write_str("tcp"),
        }
    }
}
