//! Built-in traffic profiles and the ordered catalog that serves them.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::dist::{ParamRange, TimingDist};
use crate::error::SamplingError;
use crate::net::Transport;

/// Traffic archetype.
///
/// The discriminant is the profile index: it is the port offset and, under the
/// canonical routing, the server index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Iot = 0,
    Camera = 1,
    Web = 2,
    Voip = 3,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 4] = [
        ProfileKind::Iot,
        ProfileKind::Camera,
        ProfileKind::Web,
        ProfileKind::Voip,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ProfileKind> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ProfileKind::Iot => "IoT",
            ProfileKind::Camera => "Camera",
            ProfileKind::Web => "Web",
            ProfileKind::Voip => "VoIP",
        }
    }

    /// Class label used when captured traffic is turned into a dataset.
    pub fn dataset_label(self) -> &'static str {
        match self {
            ProfileKind::Iot => "IoT_Sensor",
            ProfileKind::Camera => "Camera_IP",
            ProfileKind::Web => "Web_Traffic",
            ProfileKind::Voip => "VoIP_Call",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One traffic profile: nominal parameters plus the ranges used when
/// variability is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub transport: Transport,
    pub packet_bytes: u32,
    pub rate_bps: u64,
    pub on_time: TimingDist,
    pub off_time: TimingDist,
    #[serde(default)]
    pub packet_bytes_range: Option<ParamRange<u32>>,
    #[serde(default)]
    pub rate_bps_range: Option<ParamRange<u64>>,
    /// Replaces `on_time` when variability is enabled.
    #[serde(default)]
    pub variable_on_time: Option<TimingDist>,
}

impl Profile {
    /// Low-rate sensor: a 0.1 s report every 10 s.
    pub fn iot() -> Self {
        Self {
            kind: ProfileKind::Iot,
            transport: Transport::Udp,
            packet_bytes: 50,
            rate_bps: 1_000,
            on_time: TimingDist::Constant { secs: 0.1 },
            off_time: TimingDist::Constant { secs: 10.0 },
            packet_bytes_range: Some(ParamRange::new(40, 80)),
            rate_bps_range: None,
            variable_on_time: None,
        }
    }

    /// IP camera: constant high-rate stream.
    pub fn camera() -> Self {
        Self {
            kind: ProfileKind::Camera,
            transport: Transport::Udp,
            packet_bytes: 1024,
            rate_bps: 2_000_000,
            on_time: TimingDist::Constant { secs: 1.0 },
            off_time: TimingDist::Constant { secs: 0.0 },
            packet_bytes_range: Some(ParamRange::new(1000, 1400)),
            rate_bps_range: Some(ParamRange::new(1_500_000, 2_500_000)),
            variable_on_time: None,
        }
    }

    /// Bursty page loads over TCP.
    pub fn web() -> Self {
        Self {
            kind: ProfileKind::Web,
            transport: Transport::Tcp,
            packet_bytes: 1400,
            rate_bps: 5_000_000,
            on_time: TimingDist::Exponential { mean_secs: 2.0 },
            off_time: TimingDist::Exponential { mean_secs: 5.0 },
            packet_bytes_range: Some(ParamRange::new(500, 1460)),
            rate_bps_range: None,
            variable_on_time: Some(TimingDist::LogNormal {
                mu: 0.0,
                sigma: 1.0,
            }),
        }
    }

    /// G.711-like voice call.
    pub fn voip() -> Self {
        Self {
            kind: ProfileKind::Voip,
            transport: Transport::Udp,
            packet_bytes: 160,
            rate_bps: 64_000,
            on_time: TimingDist::Constant { secs: 1.0 },
            off_time: TimingDist::Constant { secs: 0.0 },
            packet_bytes_range: Some(ParamRange::new(160, 200)),
            rate_bps_range: None,
            variable_on_time: None,
        }
    }

    pub fn builtin(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Iot => Self::iot(),
            ProfileKind::Camera => Self::camera(),
            ProfileKind::Web => Self::web(),
            ProfileKind::Voip => Self::voip(),
        }
    }

    pub fn on_time_for(&self, variability: bool) -> TimingDist {
        match (variability, self.variable_on_time) {
            (true, Some(dist)) => dist,
            _ => self.on_time,
        }
    }

    /// Long-run fraction of time spent in the on state.
    pub fn duty_cycle(&self, variability: bool) -> f64 {
        let on = self.on_time_for(variability).mean_secs();
        let off = self.off_time.mean_secs();
        let cycle = on + off;
        if cycle > 0.0 { on / cycle } else { 0.0 }
    }

    pub fn validate(&self) -> Result<(), SamplingError> {
        let kind = self.kind;
        if let Some(r) = self.packet_bytes_range {
            if r.is_inverted() {
                return Err(SamplingError::InvertedRange {
                    profile: kind,
                    field: "packet_bytes",
                    min: r.min as u64,
                    max: r.max as u64,
                });
            }
        }
        if let Some(r) = self.rate_bps_range {
            if r.is_inverted() {
                return Err(SamplingError::InvertedRange {
                    profile: kind,
                    field: "rate_bps",
                    min: r.min,
                    max: r.max,
                });
            }
        }

        let timings = [
            ("on_time", Some(self.on_time)),
            ("off_time", Some(self.off_time)),
            ("variable_on_time", self.variable_on_time),
        ];
        for (field, dist) in timings {
            if let Some(dist) = dist {
                dist.validate()
                    .map_err(|source| SamplingError::InvalidDistribution {
                        profile: kind,
                        field,
                        source,
                    })?;
            }
        }

        for on in [Some(self.on_time), self.variable_on_time].into_iter().flatten() {
            if on.is_always_zero() && self.off_time.is_always_zero() {
                return Err(SamplingError::EmptyCycle(kind));
            }
        }
        Ok(())
    }
}

/// Ordered, validated set of profiles.
///
/// Catalog order is the order profiles are drawn in: index `i` of a uniform
/// draw selects `profiles()[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    pub fn new(profiles: Vec<Profile>) -> Result<Self, SamplingError> {
        if profiles.is_empty() {
            return Err(SamplingError::EmptyCatalog);
        }
        for (i, p) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|q| q.kind == p.kind) {
                return Err(SamplingError::DuplicateProfile(p.kind));
            }
            p.validate()?;
        }
        debug!(profiles = profiles.len(), "profile catalog validated");
        Ok(Self { profiles })
    }

    /// `[IoT, Camera, Web, VoIP]`.
    pub fn builtin() -> Result<Self, SamplingError> {
        Self::new(ProfileKind::ALL.into_iter().map(Profile::builtin).collect())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn by_kind(&self, kind: ProfileKind) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ProfileKind> + '_ {
        self.profiles.iter().map(|p| p.kind)
    }
}
