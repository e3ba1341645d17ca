//! Per-client profile, start time and destination selection.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use tracing::trace;

use super::routing::{ProfileRouting, server_port};
use crate::error::ConfigError;
use crate::net::{AddressPlan, NodeId};
use crate::profile::{Profile, ProfileCatalog, ProfileKind};
use crate::sim::SimTime;

/// Default upper bound of the client start window, in seconds.
pub const DEFAULT_START_WINDOW_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientAssignment {
    pub client: usize,
    pub node: NodeId,
    pub source: Ipv4Addr,
    pub profile: ProfileKind,
    /// `profile.index()`, independent of the catalog it was drawn from.
    pub profile_index: usize,
    pub start: SimTime,
    pub server: usize,
    pub destination: Ipv4Addr,
    pub port: u16,
}

/// Draws assignments for the clients of one address plan.
#[derive(Debug)]
pub struct WorkloadAssigner<'a> {
    catalog: &'a ProfileCatalog,
    addresses: &'a AddressPlan,
    routing: &'a ProfileRouting,
    port_base: u16,
    start_window_secs: f64,
}

impl<'a> WorkloadAssigner<'a> {
    /// Fails if any catalog profile routes past the last server, or if a
    /// server's port would overflow.
    pub fn new(
        catalog: &'a ProfileCatalog,
        addresses: &'a AddressPlan,
        routing: &'a ProfileRouting,
        port_base: u16,
        start_window_secs: f64,
    ) -> Result<Self, ConfigError> {
        if !(start_window_secs.is_finite() && start_window_secs >= 0.0) {
            return Err(ConfigError::InvalidStartWindow(start_window_secs));
        }
        routing.validate(catalog.kinds(), addresses.server_count())?;
        for kind in catalog.kinds() {
            if let Some(server) = routing.server_for(kind) {
                server_port(port_base, server)?;
            }
        }
        Ok(Self {
            catalog,
            addresses,
            routing,
            port_base,
            start_window_secs,
        })
    }

    /// Draws a catalog position, then the start time.
    ///
    /// Clients are numbered from zero and their node ids match their index.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        client: usize,
        rng: &mut R,
    ) -> Result<(ClientAssignment, &'a Profile), ConfigError> {
        let source = self
            .addresses
            .client(client)
            .ok_or_else(|| ConfigError::AddressSpaceExhausted {
                role: "client",
                count: client + 1,
                capacity: self.addresses.clients.len(),
                subnet: self.addresses.wireless_subnet.to_string(),
            })?;

        let catalog: &'a ProfileCatalog = self.catalog;
        let catalog_index = rng.gen_range(0..catalog.len());
        let start_secs = rng.gen_range(0.0..=self.start_window_secs);

        let profile = &catalog.profiles()[catalog_index];
        let kind = profile.kind;
        let server = self
            .routing
            .server_for(kind)
            .ok_or(ConfigError::UnroutedProfile(kind))?;
        let n_servers = self.addresses.server_count();
        let destination =
            self.addresses
                .server(server)
                .ok_or(ConfigError::InsufficientServers {
                    profile: kind,
                    server,
                    n_servers,
                })?;
        let port = server_port(self.port_base, server)?;

        trace!(client, profile = %kind, start_secs, server, "client assigned");

        let assignment = ClientAssignment {
            client,
            node: NodeId(client),
            source,
            profile: kind,
            profile_index: kind.index(),
            start: SimTime::from_secs_f64(start_secs),
            server,
            destination,
            port,
        };
        Ok((assignment, profile))
    }
}
