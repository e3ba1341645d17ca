//! Scenario assembly: topology, addressing, sinks and client directives.

use serde::Serialize;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use tracing::{debug, info};

use super::config::ScenarioConfig;
use crate::error::ScenarioError;
use crate::net::AddressPlan;
use crate::profile::{ProfileCatalog, ProfileKind};
use crate::sim::{EngineError, EngineSettings, SimulationEngine, seeded_rng};
use crate::topo::home::{HomeTopology, build_home_topology};
use crate::workload::{
    ClientDirective, SinkDirective, WorkloadAssigner, emit, sink_directives,
};

/// Class label for traffic addressed to one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetLabel {
    pub address: Ipv4Addr,
    pub server: usize,
    pub profile: ProfileKind,
    pub label: &'static str,
}

/// Everything the execution engine needs; built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioPlan {
    pub config: ScenarioConfig,
    pub topology: HomeTopology,
    pub addresses: AddressPlan,
    pub engine: EngineSettings,
    pub sinks: Vec<SinkDirective>,
    pub clients: Vec<ClientDirective>,
    pub labels: Vec<DatasetLabel>,
}

impl ScenarioPlan {
    /// Clients per profile; profiles nobody drew are reported as zero.
    pub fn profile_histogram(&self) -> BTreeMap<ProfileKind, usize> {
        let mut hist = ProfileKind::ALL
            .iter()
            .map(|k| (*k, 0))
            .collect::<BTreeMap<_, _>>();
        for c in &self.clients {
            *hist.entry(c.assignment.profile).or_insert(0) += 1;
        }
        hist
    }

    /// One `Node i is Type t -> Server s (addr)` line per client, in client order.
    pub fn assignment_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.clients.iter().map(|c| {
            let a = &c.assignment;
            format!(
                "Node {} is Type {} -> Server {} ({})",
                a.client, a.profile_index, a.server, a.destination
            )
        })
    }

    /// Sum of the clients' long-run offered rates.
    pub fn expected_load_bps(&self) -> f64 {
        self.clients.iter().map(ClientDirective::expected_bps).sum()
    }
}

/// Build the plan with the built-in profile catalog.
pub fn build_scenario(cfg: &ScenarioConfig) -> Result<ScenarioPlan, ScenarioError> {
    let catalog = ProfileCatalog::builtin()?;
    build_scenario_with_catalog(cfg, &catalog)
}

/// Validates everything up front; on error no directive has been built.
///
/// Randomness is consumed client by client: profile index, start time, then
/// packet-size and rate jitter.
#[tracing::instrument(skip(cfg, catalog), fields(variant = %cfg.variant, seed = cfg.seed))]
pub fn build_scenario_with_catalog(
    cfg: &ScenarioConfig,
    catalog: &ProfileCatalog,
) -> Result<ScenarioPlan, ScenarioError> {
    cfg.validate()?;
    let addresses = AddressPlan::for_topology(cfg.n_servers, cfg.n_clients)?;
    let assigner = WorkloadAssigner::new(
        catalog,
        &addresses,
        &cfg.routing,
        cfg.port_base,
        cfg.start_window_secs,
    )?;

    let topology = build_home_topology(cfg.n_clients, cfg.n_servers, &cfg.variant.layout());
    let stop = cfg.duration();
    let sinks = sink_directives(&topology, &addresses, cfg.port_base, stop)?;
    debug!(sinks = sinks.len(), "sinks planned");

    let mut rng = seeded_rng(cfg.seed);
    let mut clients = Vec::with_capacity(cfg.n_clients);
    for i in 0..cfg.n_clients {
        let (assignment, profile) = assigner.assign(i, &mut rng)?;
        debug!(
            client = i,
            profile = %assignment.profile,
            server = assignment.server,
            destination = %assignment.destination,
            "client assigned"
        );
        clients.push(emit(&assignment, profile, cfg.variability, stop, &mut rng));
    }

    let labels = catalog
        .kinds()
        .filter_map(|kind| {
            let server = cfg.routing.server_for(kind)?;
            Some(DatasetLabel {
                address: addresses.server(server)?,
                server,
                profile: kind,
                label: kind.dataset_label(),
            })
        })
        .collect();

    let plan = ScenarioPlan {
        config: cfg.clone(),
        topology,
        addresses,
        engine: cfg.variant.engine_settings(cfg.n_servers),
        sinks,
        clients,
        labels,
    };
    info!(
        clients = plan.clients.len(),
        sinks = plan.sinks.len(),
        duration_secs = cfg.duration_secs,
        "✅ scenario planned"
    );
    Ok(plan)
}

/// Hand a plan to an engine: topology, then traffic, then run.
pub fn execute<E: SimulationEngine + ?Sized>(
    plan: &ScenarioPlan,
    engine: &mut E,
) -> Result<(), EngineError> {
    engine.create_topology(&plan.topology, &plan.addresses, &plan.engine)?;
    engine.install_traffic(&plan.sinks, &plan.clients)?;
    engine.run(plan.config.duration())
}
