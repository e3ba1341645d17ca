//! Scenario parameters and the four preset variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::sim::{
    CaptureSettings, EngineSettings, PropagationLoss, SimTime, WiredLink, WiredSegment,
    WirelessSegment,
};
use crate::topo::home::HomeLayout;
use crate::workload::{DEFAULT_START_WINDOW_SECS, ProfileRouting};

pub const DEFAULT_PORT_BASE: u16 = 9000;
pub const DEFAULT_SERVERS: usize = 4;
pub const DEFAULT_SEED: u64 = 1;

/// Scenario preset. Later variants only add parameters to earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Prototype layout, short run.
    Basic,
    /// One server per profile.
    MultiServer,
    /// Adds packet capture and flow statistics.
    Capture,
    /// Adds jittered profile parameters and propagation-loss models.
    #[default]
    Variable,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Basic,
        Variant::MultiServer,
        Variant::Capture,
        Variant::Variable,
    ];

    pub fn number(self) -> u8 {
        match self {
            Variant::Basic => 1,
            Variant::MultiServer => 2,
            Variant::Capture => 3,
            Variant::Variable => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::MultiServer => "multi-server",
            Variant::Capture => "capture",
            Variant::Variable => "variable",
        }
    }

    pub fn default_clients(self) -> usize {
        match self {
            Variant::Basic => 10,
            Variant::MultiServer => 20,
            Variant::Capture => 30,
            Variant::Variable => 25,
        }
    }

    pub fn default_duration_secs(self) -> f64 {
        match self {
            Variant::Basic => 5.0,
            Variant::MultiServer => 20.0,
            Variant::Capture | Variant::Variable => 60.0,
        }
    }

    pub fn default_variability(self) -> bool {
        matches!(self, Variant::Variable)
    }

    pub fn layout(self) -> HomeLayout {
        match self {
            Variant::Basic => HomeLayout::basic(),
            Variant::MultiServer => HomeLayout::multi_server(),
            Variant::Capture | Variant::Variable => HomeLayout::default(),
        }
    }

    /// The basic preset wires a lone server straight to the AP; with more
    /// servers every preset uses the shared bus.
    pub fn engine_settings(self, n_servers: usize) -> EngineSettings {
        let wired = WiredSegment {
            link: if self == Variant::Basic && n_servers == 1 {
                WiredLink::PointToPoint
            } else {
                WiredLink::Csma
            },
            ..WiredSegment::default()
        };
        let mut wireless = WirelessSegment::default();
        if self == Variant::Variable {
            wireless.propagation_loss = vec![PropagationLoss::LogDistance, PropagationLoss::Nakagami];
        }
        let capture = match self {
            Variant::Basic | Variant::MultiServer => None,
            Variant::Capture => Some(CaptureSettings {
                pcap_prefix: "wifi-traces".to_string(),
                radiotap: true,
                flow_monitor_xml: "lab-results.xml".to_string(),
            }),
            Variant::Variable => Some(CaptureSettings {
                pcap_prefix: "wifi-traces".to_string(),
                radiotap: true,
                flow_monitor_xml: "lab-results_final.xml".to_string(),
            }),
        };
        let animation_file = match self {
            Variant::Basic => "maison_animation.xml".to_string(),
            other => format!("maison_animation{}.xml", other.number()),
        };
        EngineSettings {
            wired,
            wireless,
            capture,
            animation_file,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "1" => Ok(Variant::Basic),
            "multi-server" | "multi_server" | "2" => Ok(Variant::MultiServer),
            "capture" | "3" => Ok(Variant::Capture),
            "variable" | "4" => Ok(Variant::Variable),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Flat scenario parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub variant: Variant,
    pub n_clients: usize,
    pub n_servers: usize,
    pub duration_secs: f64,
    pub variability: bool,
    /// Print the per-client assignment lines; never affects the plan.
    pub verbose: bool,
    pub seed: u64,
    pub port_base: u16,
    pub start_window_secs: f64,
    #[serde(default)]
    pub routing: ProfileRouting,
}

impl ScenarioConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            n_clients: variant.default_clients(),
            n_servers: DEFAULT_SERVERS,
            duration_secs: variant.default_duration_secs(),
            variability: variant.default_variability(),
            verbose: false,
            seed: DEFAULT_SEED,
            port_base: DEFAULT_PORT_BASE,
            start_window_secs: DEFAULT_START_WINDOW_SECS,
            routing: ProfileRouting::canonical(),
        }
    }

    pub fn duration(&self) -> SimTime {
        SimTime::from_secs_f64(self.duration_secs)
    }

    /// Scalar checks; routing and addressing are checked against the catalog
    /// and address plan when the scenario is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(ConfigError::InvalidDuration(self.duration_secs));
        }
        if !(self.start_window_secs.is_finite() && self.start_window_secs >= 0.0) {
            return Err(ConfigError::InvalidStartWindow(self.start_window_secs));
        }
        if self.n_servers == 0 {
            return Err(ConfigError::NoServers);
        }
        Ok(())
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}
