//! Which part holds the system back.

use advisor_core::ComponentKind;
use serde::{Deserialize, Serialize};

/// RAM at or above this display tier never counts as a bottleneck.
pub const RAM_GOOD_ENOUGH_TIER: u8 = 4;

/// Display tiers of a complete build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemTiers {
    pub cpu: u8,
    pub gpu: u8,
    pub ram: u8,
}

impl SystemTiers {
    pub fn new(cpu: u8, gpu: u8, ram: u8) -> Self {
        Self { cpu, gpu, ram }
    }

    pub fn get(&self, kind: ComponentKind) -> u8 {
        match kind {
            ComponentKind::Cpu => self.cpu,
            ComponentKind::Gpu => self.gpu,
            ComponentKind::Ram => self.ram,
        }
    }

    pub fn ram_is_sufficient(&self) -> bool {
        self.ram >= RAM_GOOD_ENOUGH_TIER
    }
}

/// The limiting component, or `None` for a balanced build.
///
/// With sufficient RAM only CPU and GPU are compared. Otherwise all three are,
/// and ties at the minimum go to CPU, then GPU, then RAM.
pub fn detect_bottleneck(t: SystemTiers) -> Option<ComponentKind> {
    let SystemTiers { cpu, gpu, ram } = t;
    if t.ram_is_sufficient() {
        let min = cpu.min(gpu);
        if cpu == min && cpu < gpu {
            Some(ComponentKind::Cpu)
        } else if gpu == min && gpu < cpu {
            Some(ComponentKind::Gpu)
        } else {
            None
        }
    } else {
        let min = cpu.min(gpu).min(ram);
        if cpu == min && (cpu < gpu || cpu < ram) {
            Some(ComponentKind::Cpu)
        } else if gpu == min && (gpu < cpu || gpu < ram) {
            Some(ComponentKind::Gpu)
        } else if ram == min && (ram < cpu || ram < gpu) {
            Some(ComponentKind::Ram)
        } else {
            None
        }
    }
}

/// Bottleneck verdict for a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottleneckReport {
    pub tiers: SystemTiers,
    pub bottleneck: Option<ComponentKind>,
}

impl BottleneckReport {
    pub fn from_tiers(tiers: SystemTiers) -> Self {
        Self {
            tiers,
            bottleneck: detect_bottleneck(tiers),
        }
    }

    /// Kind to build an upgrade path for. A balanced build falls back to the
    /// CPU; that choice is a fixed default, not a derived recommendation.
    pub fn upgrade_target(&self) -> ComponentKind {
        self.bottleneck.unwrap_or(ComponentKind::Cpu)
    }

    /// All three tiers equal, RAM included.
    pub fn is_uniform(&self) -> bool {
        let t = self.tiers;
        t.cpu == t.gpu && t.gpu == t.ram
    }

    /// Kinds sitting at the overall minimum tier; empty when uniform.
    pub fn underpowered(&self) -> Vec<ComponentKind> {
        if self.is_uniform() {
            return Vec::new();
        }
        let min = self.tiers.cpu.min(self.tiers.gpu).min(self.tiers.ram);
        ComponentKind::ALL
            .into_iter()
            .filter(|k| self.tiers.get(*k) == min)
            .collect()
    }
}
