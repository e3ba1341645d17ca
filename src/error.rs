//! Error taxonomy for scenario construction.
//!
//! Every failure here is a configuration defect detected before any directive
//! is emitted; nothing is retried and no partial plan is returned.

use thiserror::Error;

use crate::profile::{DistError, ProfileKind};

/// The scenario parameters cannot produce a consistent plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one server is required, got n_servers=0")]
    NoServers,
    #[error(
        "profile {profile} routes to server {server}, but only {n_servers} server(s) are configured"
    )]
    InsufficientServers {
        profile: ProfileKind,
        server: usize,
        n_servers: usize,
    },
    #[error("profile {0} has no server route")]
    UnroutedProfile(ProfileKind),
    #[error("{role} count {count} exceeds the {capacity} host addresses of {subnet}")]
    AddressSpaceExhausted {
        role: &'static str,
        count: usize,
        capacity: usize,
        subnet: String,
    },
    #[error("port base {port_base} leaves no port for server {server}")]
    PortOverflow { port_base: u16, server: usize },
    #[error("simulation duration must be finite and > 0, got {0}")]
    InvalidDuration(f64),
    #[error("start window must be finite and >= 0, got {0}")]
    InvalidStartWindow(f64),
    #[error("unknown scenario variant {0:?} (expected basic, multi-server, capture or variable)")]
    UnknownVariant(String),
}

/// A profile declares a parameter range or timing distribution that cannot be sampled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("{profile}: {field} range is inverted ({min} > {max})")]
    InvertedRange {
        profile: ProfileKind,
        field: &'static str,
        min: u64,
        max: u64,
    },
    #[error("{profile}: invalid {field} distribution: {source}")]
    InvalidDistribution {
        profile: ProfileKind,
        field: &'static str,
        #[source]
        source: DistError,
    },
    #[error("{0}: on and off times are both always zero")]
    EmptyCycle(ProfileKind),
    #[error("profile {0} appears more than once in the catalog")]
    DuplicateProfile(ProfileKind),
    #[error("profile catalog is empty")]
    EmptyCatalog,
}

/// Any failure of `build_scenario`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("sampling error: {0}")]
    Sampling(#[from] SamplingError),
}
