//! Memory-generation compatibility and PSU lookups.
//!
//! Everything here is permissive: if a fact is unknown the pairing is treated
//! as compatible and the caller decides whether to warn.

use crate::{Cpu, PowerTable, Ram};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Memory generation of a RAM kit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DdrType {
    #[serde(rename = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    Ddr5,
}

impl DdrType {
    /// Catalog generations up to this value are DDR4 kits.
    pub const LAST_DDR4_GENERATION: u32 = 9;

    pub fn from_generation(generation: u32) -> Self {
        if generation <= Self::LAST_DDR4_GENERATION {
            DdrType::Ddr4
        } else {
            DdrType::Ddr5
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DdrType::Ddr4 => "DDR4",
            DdrType::Ddr5 => "DDR5",
        }
    }
}

impl fmt::Display for DdrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DdrType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DDR4" => Ok(DdrType::Ddr4),
            "DDR5" => Ok(DdrType::Ddr5),
            other => Err(format!("unknown memory type '{other}'")),
        }
    }
}

/// DDR type of a kit: from its generation, else sniffed from the speed string
/// (`"5,6000"` style prefixes), else unknown.
pub fn ram_ddr_type(ram: &Ram) -> Option<DdrType> {
    if let Some(generation) = ram.generation {
        return Some(DdrType::from_generation(generation));
    }
    let speed = ram.speed.as_deref()?;
    if speed.contains("5,") || speed.contains("5.") {
        Some(DdrType::Ddr5)
    } else if speed.contains("4,") || speed.contains("4.") {
        Some(DdrType::Ddr4)
    } else {
        None
    }
}

/// False only when the CPU names its memory type, the kit's type is known, and
/// the CPU's declaration does not mention it. A blank declaration names nothing.
pub fn ram_compatible_with_cpu(ram: &Ram, cpu: &Cpu) -> bool {
    let Some(required) = cpu.ram_type.as_deref().filter(|r| !r.trim().is_empty()) else {
        return true;
    };
    match ram_ddr_type(ram) {
        Some(ddr) => required.contains(ddr.as_str()),
        None => true,
    }
}

/// Recommended PSU wattage for a raw (cpu, gpu) tier pair. Never extrapolated.
pub fn psu_recommendation(power: &PowerTable, cpu_tier: u8, gpu_tier: u8) -> Option<u32> {
    power.lookup(cpu_tier, gpu_tier)
}
