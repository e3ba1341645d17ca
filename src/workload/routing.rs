//! Explicit profile → server routing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::profile::ProfileKind;

/// Which server receives each profile's traffic.
///
/// The canonical routing sends profile `i` to server `i`. Any other mapping
/// must be stated here; server creation order never implies a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRouting {
    routes: BTreeMap<ProfileKind, usize>,
}

impl ProfileRouting {
    pub fn canonical() -> Self {
        Self {
            routes: ProfileKind::ALL.iter().map(|k| (*k, k.index())).collect(),
        }
    }

    pub fn with_route(mut self, kind: ProfileKind, server: usize) -> Self {
        self.routes.insert(kind, server);
        self
    }

    pub fn server_for(&self, kind: ProfileKind) -> Option<usize> {
        self.routes.get(&kind).copied()
    }

    /// Every profile in `kinds` must route to an existing server.
    pub fn validate(
        &self,
        kinds: impl IntoIterator<Item = ProfileKind>,
        n_servers: usize,
    ) -> Result<(), ConfigError> {
        if n_servers == 0 {
            return Err(ConfigError::NoServers);
        }
        for kind in kinds {
            let server = self
                .server_for(kind)
                .ok_or(ConfigError::UnroutedProfile(kind))?;
            if server >= n_servers {
                return Err(ConfigError::InsufficientServers {
                    profile: kind,
                    server,
                    n_servers,
                });
            }
        }
        Ok(())
    }
}

impl Default for ProfileRouting {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Listening port of server `k`.
pub fn server_port(port_base: u16, server: usize) -> Result<u16, ConfigError> {
    u16::try_from(server)
        .ok()
        .and_then(|k| port_base.checked_add(k))
        .ok_or(ConfigError::PortOverflow { port_base, server })
}
