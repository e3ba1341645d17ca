//! Execution-engine capability used by the scenario driver.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::settings::EngineSettings;
use super::time::SimTime;
use crate::net::AddressPlan;
use crate::topo::home::HomeTopology;
use crate::workload::{ClientDirective, SinkDirective};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine call out of order: {0}")]
    OutOfOrder(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Minimal engine API: build the nodes, install applications, run.
///
/// Calls arrive in exactly that order, once each.
pub trait SimulationEngine {
    fn create_topology(
        &mut self,
        topology: &HomeTopology,
        addresses: &AddressPlan,
        settings: &EngineSettings,
    ) -> Result<(), EngineError>;

    fn install_traffic(
        &mut self,
        sinks: &[SinkDirective],
        clients: &[ClientDirective],
    ) -> Result<(), EngineError>;

    fn run(&mut self, until: SimTime) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineCall {
    CreateTopology,
    InstallTraffic,
    Run,
}

/// Keeps everything it is handed; executes nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub topology: Option<HomeTopology>,
    pub addresses: Option<AddressPlan>,
    pub settings: Option<EngineSettings>,
    pub sinks: Vec<SinkDirective>,
    pub clients: Vec<ClientDirective>,
    pub until: Option<SimTime>,
}

impl SimulationEngine for RecordingEngine {
    fn create_topology(
        &mut self,
        topology: &HomeTopology,
        addresses: &AddressPlan,
        settings: &EngineSettings,
    ) -> Result<(), EngineError> {
        if !self.calls.is_empty() {
            return Err(EngineError::OutOfOrder("create_topology called twice"));
        }
        self.calls.push(EngineCall::CreateTopology);
        self.topology = Some(topology.clone());
        self.addresses = Some(addresses.clone());
        self.settings = Some(settings.clone());
        debug!(nodes = topology.node_count(), "recorded topology");
        Ok(())
    }

    fn install_traffic(
        &mut self,
        sinks: &[SinkDirective],
        clients: &[ClientDirective],
    ) -> Result<(), EngineError> {
        if self.calls != [EngineCall::CreateTopology] {
            return Err(EngineError::OutOfOrder(
                "install_traffic requires create_topology first",
            ));
        }
        self.calls.push(EngineCall::InstallTraffic);
        self.sinks = sinks.to_vec();
        self.clients = clients.to_vec();
        debug!(sinks = sinks.len(), clients = clients.len(), "recorded traffic");
        Ok(())
    }

    fn run(&mut self, until: SimTime) -> Result<(), EngineError> {
        if self.calls != [EngineCall::CreateTopology, EngineCall::InstallTraffic] {
            return Err(EngineError::OutOfOrder("run requires install_traffic first"));
        }
        self.calls.push(EngineCall::Run);
        self.until = Some(until);
        Ok(())
    }
}

/// Hands the plan to an external runner as a JSON document written on `run`.
#[derive(Debug)]
pub struct PlanFileEngine {
    path: PathBuf,
    recorded: RecordingEngine,
}

impl PlanFileEngine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recorded: RecordingEngine::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SimulationEngine for PlanFileEngine {
    fn create_topology(
        &mut self,
        topology: &HomeTopology,
        addresses: &AddressPlan,
        settings: &EngineSettings,
    ) -> Result<(), EngineError> {
        self.recorded.create_topology(topology, addresses, settings)
    }

    fn install_traffic(
        &mut self,
        sinks: &[SinkDirective],
        clients: &[ClientDirective],
    ) -> Result<(), EngineError> {
        self.recorded.install_traffic(sinks, clients)
    }

    fn run(&mut self, until: SimTime) -> Result<(), EngineError> {
        self.recorded.run(until)?;
        let raw = serde_json::to_string_pretty(&self.recorded)?;
        fs::write(&self.path, raw)?;
        info!(path = %self.path.display(), "📝 plan written");
        Ok(())
    }
}
