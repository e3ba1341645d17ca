//! Concrete traffic directives handed to the execution engine.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use tracing::trace;

use super::assign::ClientAssignment;
use super::routing::server_port;
use crate::error::ConfigError;
use crate::net::{AddressPlan, NodeId, Transport};
use crate::profile::{DistError, Profile, TimingDist};
use crate::sim::SimTime;
use crate::topo::home::HomeTopology;

/// A listening endpoint on one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkDirective {
    pub server: usize,
    pub node: NodeId,
    pub address: Ipv4Addr,
    pub transport: Transport,
    pub port: u16,
    pub start: SimTime,
    pub stop: SimTime,
}

/// On/off traffic generation for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDirective {
    #[serde(flatten)]
    pub assignment: ClientAssignment,
    pub transport: Transport,
    pub packet_bytes: u32,
    pub rate_bps: u64,
    pub on_time: TimingDist,
    pub off_time: TimingDist,
    pub stop: SimTime,
    /// Whether size/rate were drawn from the profile ranges.
    pub jittered: bool,
}

/// One sending window of a realized on/off schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burst {
    pub start: SimTime,
    pub end: SimTime,
}

impl ClientDirective {
    pub fn start(&self) -> SimTime {
        self.assignment.start
    }

    /// Long-run bit rate while the application is running.
    pub fn expected_bps(&self) -> f64 {
        let on = self.on_time.mean_secs();
        let cycle = on + self.off_time.mean_secs();
        if cycle > 0.0 {
            self.rate_bps as f64 * on / cycle
        } else {
            0.0
        }
    }

    /// Expected bytes offered over `[start, stop)`.
    pub fn expected_bytes(&self) -> f64 {
        let active = self.stop.as_secs_f64() - self.start().as_secs_f64();
        if active <= 0.0 {
            return 0.0;
        }
        self.expected_bps() * active / 8.0
    }

    /// Realize the on/off schedule between start and stop.
    ///
    /// Every cycle opens with an off period, then an on period; windows are
    /// clipped to `stop`. Draws off-time then on-time per cycle.
    pub fn bursts<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Burst>, DistError> {
        let stop = self.stop.as_secs_f64();
        let mut t = self.start().as_secs_f64();
        let mut out = Vec::new();
        while t < stop {
            let off = self.off_time.sample(rng)?;
            let on = self.on_time.sample(rng)?;
            let on_start = t + off;
            if on > 0.0 && on_start < stop {
                out.push(Burst {
                    start: SimTime::from_secs_f64(on_start),
                    end: SimTime::from_secs_f64((on_start + on).min(stop)),
                });
            }
            let step = off + on;
            // Catalogs reject cycles that are always zero; a zero draw from a
            // continuous distribution ends the schedule rather than spinning.
            if !(step > 0.0) {
                break;
            }
            t += step;
        }
        Ok(out)
    }
}

/// Resolve one assignment into a directive.
///
/// With `variability` set, packet size is drawn first, then rate; a field
/// without a declared range keeps its nominal value and draws nothing.
pub fn emit<R: Rng + ?Sized>(
    assignment: &ClientAssignment,
    profile: &Profile,
    variability: bool,
    stop: SimTime,
    rng: &mut R,
) -> ClientDirective {
    debug_assert_eq!(assignment.profile, profile.kind);

    let (packet_bytes, rate_bps) = if variability {
        let size = match profile.packet_bytes_range {
            Some(range) => range.sample(rng),
            None => profile.packet_bytes,
        };
        let rate = match profile.rate_bps_range {
            Some(range) => range.sample(rng),
            None => profile.rate_bps,
        };
        (size, rate)
    } else {
        (profile.packet_bytes, profile.rate_bps)
    };

    trace!(
        client = assignment.client,
        packet_bytes,
        rate_bps,
        variability,
        "directive emitted"
    );

    ClientDirective {
        assignment: assignment.clone(),
        transport: profile.transport,
        packet_bytes,
        rate_bps,
        on_time: profile.on_time_for(variability),
        off_time: profile.off_time,
        stop,
        jittered: variability,
    }
}

/// One UDP and one TCP sink per server on `port_base + k`, open for `[0, stop]`.
pub fn sink_directives(
    topology: &HomeTopology,
    addresses: &AddressPlan,
    port_base: u16,
    stop: SimTime,
) -> Result<Vec<SinkDirective>, ConfigError> {
    let mut out = Vec::with_capacity(topology.servers.len() * Transport::ALL.len());
    for (k, node) in topology.servers.iter().enumerate() {
        let address = addresses
            .server(k)
            .ok_or_else(|| ConfigError::AddressSpaceExhausted {
                role: "server",
                count: topology.servers.len(),
                capacity: addresses.server_count(),
                subnet: addresses.wired_subnet.to_string(),
            })?;
        let port = server_port(port_base, k)?;
        for transport in Transport::ALL {
            out.push(SinkDirective {
                server: k,
                node: node.id,
                address,
                transport,
                port,
                start: SimTime::ZERO,
                stop,
            });
        }
    }
    Ok(out)
}
