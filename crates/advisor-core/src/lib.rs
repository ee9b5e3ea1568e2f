#![deny(warnings)]

//! Core domain models and invariants for the upgrade advisor.
//!
//! This crate defines the catalog records (CPU, GPU, RAM, power profiles), the
//! user's selection, tier mapping and compatibility rules, with validation
//! helpers guarding the catalog invariants.

pub mod compat;
pub mod lenient;
pub mod tier;

pub use compat::{psu_recommendation, ram_compatible_with_cpu, ram_ddr_type, DdrType};
pub use tier::{TierMap, TierMapping};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest catalog tier.
pub const MIN_TIER: u8 = 1;
/// Highest catalog tier.
pub const MAX_TIER: u8 = 7;

/// The three component kinds the advisor reasons about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
}

impl ComponentKind {
    /// All kinds, in bottleneck tie-break priority order.
    pub const ALL: [ComponentKind; 3] = [ComponentKind::Cpu, ComponentKind::Gpu, ComponentKind::Ram];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Cpu => "CPU",
            ComponentKind::Gpu => "GPU",
            ComponentKind::Ram => "RAM",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(ComponentKind::Cpu),
            "gpu" => Ok(ComponentKind::Gpu),
            "ram" => Ok(ComponentKind::Ram),
            other => Err(format!("unknown component kind '{other}' (expected cpu, gpu or ram)")),
        }
    }
}

/// Capabilities shared by every catalog record.
pub trait Part {
    const KIND: ComponentKind;
    fn name(&self) -> &str;
    /// Raw catalog tier.
    fn tier(&self) -> u8;
    fn generation(&self) -> Option<u32>;
}

/// A desktop processor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(default, deserialize_with = "lenient::name")]
    pub name: String,
    /// Raw tier in [1, 7].
    #[serde(default, deserialize_with = "lenient::tier")]
    pub tier: u8,
    #[serde(default, deserialize_with = "lenient::generation", skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,
    /// Socket name, e.g. "AM5" or "LGA1700".
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub core_count: Option<u32>,
    /// Boost clock in GHz.
    #[serde(
        rename = "boost_clock",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub boost_clock_ghz: Option<f64>,
    /// Thermal design power in Watts.
    #[serde(rename = "tdp", default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub tdp_w: Option<u32>,
    /// Supported memory generation(s), e.g. "DDR5" or "DDR4, DDR5".
    #[serde(rename = "ramType", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub ram_type: Option<String>,
}

/// A graphics card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(default, deserialize_with = "lenient::name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::tier")]
    pub tier: u8,
    #[serde(default, deserialize_with = "lenient::generation", skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,
    /// GPU chip, e.g. "GeForce RTX 4070".
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    /// VRAM in GB.
    #[serde(rename = "memory", default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub memory_gb: Option<f64>,
    /// Boost clock in MHz.
    #[serde(
        rename = "boost_clock",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub boost_clock_mhz: Option<f64>,
    #[serde(rename = "tdp", default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub tdp_w: Option<u32>,
}

/// A memory kit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ram {
    #[serde(default, deserialize_with = "lenient::name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::tier")]
    pub tier: u8,
    /// Catalog generation; <= 9 means DDR4.
    #[serde(default, deserialize_with = "lenient::generation", skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,
    /// "count,capacityPerStick", e.g. "2,16".
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub modules: Option<String>,
    /// "ddr,mhz", e.g. "5,6000".
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub cas_latency: Option<u32>,
}

/// Stick layout of a memory kit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamKit {
    pub count: u32,
    pub capacity_per_stick_gb: u32,
}

impl RamKit {
    pub fn total_gb(&self) -> u32 {
        self.count.saturating_mul(self.capacity_per_stick_gb)
    }

    /// Stick count as shown to users; eight-stick kits are listed as four
    /// since consumer boards only have four slots.
    pub fn display_count(&self) -> u32 {
        if self.count == 8 {
            4
        } else {
            self.count
        }
    }
}

fn leading_u32(s: &str) -> Option<u32> {
    lenient::leading_number(s)
        .filter(|x| *x >= 0.0 && *x <= u32::MAX as f64)
        .map(|x| x as u32)
}

impl Ram {
    /// Parsed `modules` field, if well-formed.
    pub fn kit(&self) -> Option<RamKit> {
        let mut parts = self.modules.as_deref()?.split(',');
        let count = leading_u32(parts.next()?)?;
        let capacity_per_stick_gb = leading_u32(parts.next()?)?;
        Some(RamKit {
            count,
            capacity_per_stick_gb,
        })
    }

    /// Stick count alone; kits with a malformed capacity still report it.
    pub fn kit_count(&self) -> Option<u32> {
        leading_u32(self.modules.as_deref()?.split(',').next()?)
    }

    pub fn total_capacity_gb(&self) -> Option<u32> {
        self.kit().map(|k| k.total_gb())
    }

    /// The MHz figure after the comma in `speed`.
    pub fn speed_mhz(&self) -> Option<u32> {
        leading_u32(self.speed.as_deref()?.split(',').nth(1)?)
    }

    /// First word of the product name.
    pub fn manufacturer(&self) -> &str {
        first_word(&self.name)
    }
}

impl Gpu {
    /// Board partner: first word of the product name.
    pub fn card_manufacturer(&self) -> &str {
        first_word(&self.name)
    }
}

fn first_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or_default()
}

macro_rules! impl_part {
    ($ty:ty, $kind:expr) => {
        impl Part for $ty {
            const KIND: ComponentKind = $kind;
            fn name(&self) -> &str {
                &self.name
            }
            fn tier(&self) -> u8 {
                self.tier
            }
            fn generation(&self) -> Option<u32> {
                self.generation
            }
        }
    };
}

impl_part!(Cpu, ComponentKind::Cpu);
impl_part!(Gpu, ComponentKind::Gpu);
impl_part!(Ram, ComponentKind::Ram);

/// Any catalog record, tagged by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Component {
    #[serde(rename = "CPU")]
    Cpu(Cpu),
    #[serde(rename = "GPU")]
    Gpu(Gpu),
    #[serde(rename = "RAM")]
    Ram(Ram),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Cpu(_) => ComponentKind::Cpu,
            Component::Gpu(_) => ComponentKind::Gpu,
            Component::Ram(_) => ComponentKind::Ram,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Component::Cpu(c) => c.name(),
            Component::Gpu(g) => g.name(),
            Component::Ram(r) => r.name(),
        }
    }

    pub fn tier(&self) -> u8 {
        match self {
            Component::Cpu(c) => c.tier(),
            Component::Gpu(g) => g.tier(),
            Component::Ram(r) => r.tier(),
        }
    }
}

impl From<Cpu> for Component {
    fn from(c: Cpu) -> Self {
        Component::Cpu(c)
    }
}

impl From<Gpu> for Component {
    fn from(g: Gpu) -> Self {
        Component::Gpu(g)
    }
}

impl From<Ram> for Component {
    fn from(r: Ram) -> Self {
        Component::Ram(r)
    }
}

/// One row of the PSU table: recommended wattage for a raw tier pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerProfile {
    pub cpu_tier: u8,
    pub gpu_tier: u8,
    /// Watts; always > 0.
    pub recommended_psu: u32,
}

/// PSU lookup table. Missing pairs are unknown, not zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerTable {
    profiles: Vec<PowerProfile>,
}

impl PowerTable {
    pub fn new(profiles: Vec<PowerProfile>) -> Self {
        Self { profiles }
    }

    /// First matching row wins when the source repeats a pair.
    pub fn lookup(&self, cpu_tier: u8, gpu_tier: u8) -> Option<u32> {
        self.profiles
            .iter()
            .find(|p| p.cpu_tier == cpu_tier && p.gpu_tier == gpu_tier)
            .map(|p| p.recommended_psu)
    }

    pub fn profiles(&self) -> &[PowerProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Errors raised when assembling catalogs.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A component catalog has no usable records.
    #[error("{0} catalog is empty")]
    Empty(ComponentKind),
}

/// The immutable product catalogs for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalogs {
    cpus: Vec<Cpu>,
    gpus: Vec<Gpu>,
    rams: Vec<Ram>,
    power: PowerTable,
}

impl Catalogs {
    /// Fails fast on an empty component catalog; an empty power table is
    /// allowed and simply makes every PSU lookup unknown.
    pub fn new(
        cpus: Vec<Cpu>,
        gpus: Vec<Gpu>,
        rams: Vec<Ram>,
        power: PowerTable,
    ) -> Result<Self, CatalogError> {
        if cpus.is_empty() {
            return Err(CatalogError::Empty(ComponentKind::Cpu));
        }
        if gpus.is_empty() {
            return Err(CatalogError::Empty(ComponentKind::Gpu));
        }
        if rams.is_empty() {
            return Err(CatalogError::Empty(ComponentKind::Ram));
        }
        Ok(Self {
            cpus,
            gpus,
            rams,
            power,
        })
    }

    pub fn cpus(&self) -> &[Cpu] {
        &self.cpus
    }

    pub fn gpus(&self) -> &[Gpu] {
        &self.gpus
    }

    pub fn rams(&self) -> &[Ram] {
        &self.rams
    }

    pub fn power(&self) -> &PowerTable {
        &self.power
    }

    pub fn len(&self, kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::Cpu => self.cpus.len(),
            ComponentKind::Gpu => self.gpus.len(),
            ComponentKind::Ram => self.rams.len(),
        }
    }

    /// Sorted distinct display tiers present for `kind`.
    pub fn display_tiers(&self, kind: ComponentKind, map: &TierMap) -> Vec<u8> {
        match kind {
            ComponentKind::Cpu => distinct_tiers(&self.cpus, map),
            ComponentKind::Gpu => distinct_tiers(&self.gpus, map),
            ComponentKind::Ram => distinct_tiers(&self.rams, map),
        }
    }
}

fn distinct_tiers<P: Part>(parts: &[P], map: &TierMap) -> Vec<u8> {
    parts
        .iter()
        .map(|p| map.display_tier(p))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The user's current parts. Any slot may be empty until analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub cpu: Option<Cpu>,
    pub gpu: Option<Gpu>,
    pub ram: Option<Ram>,
}

/// A selection with every slot filled.
#[derive(Clone, Copy, Debug)]
pub struct SystemBuild<'a> {
    pub cpu: &'a Cpu,
    pub gpu: &'a Gpu,
    pub ram: &'a Ram,
}

/// Precondition failures at the analysis boundary.
#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("Please select all three components (CPU, GPU, RAM) before analyzing. Missing: {}", kind_list(.0))]
    Incomplete(Vec<ComponentKind>),
}

fn kind_list(kinds: &[ComponentKind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Selection {
    pub fn missing(&self) -> Vec<ComponentKind> {
        let mut missing = Vec::new();
        if self.cpu.is_none() {
            missing.push(ComponentKind::Cpu);
        }
        if self.gpu.is_none() {
            missing.push(ComponentKind::Gpu);
        }
        if self.ram.is_none() {
            missing.push(ComponentKind::Ram);
        }
        missing
    }

    /// Borrow the selection as a full build, or report what is missing.
    pub fn complete(&self) -> Result<SystemBuild<'_>, SelectionError> {
        match (&self.cpu, &self.gpu, &self.ram) {
            (Some(cpu), Some(gpu), Some(ram)) => Ok(SystemBuild { cpu, gpu, ram }),
            _ => Err(SelectionError::Incomplete(self.missing())),
        }
    }
}

/// Validation errors for catalog invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Tier outside [1, 7].
    #[error("{kind} '{name}' has tier {tier}, expected 1..=7")]
    TierOutOfRange {
        kind: ComponentKind,
        name: String,
        tier: u8,
    },
    /// Record without a usable name.
    #[error("{0} record has a blank name")]
    BlankName(ComponentKind),
    /// Power profile keyed by a tier outside [1, 7].
    #[error("power profile ({cpu_tier}, {gpu_tier}) references a tier outside 1..=7")]
    PowerTierOutOfRange { cpu_tier: u8, gpu_tier: u8 },
    /// A zero wattage would read as "known"; absent rows mean unknown.
    #[error("power profile ({cpu_tier}, {gpu_tier}) recommends 0 W")]
    ZeroWattage { cpu_tier: u8, gpu_tier: u8 },
}

fn tier_in_range(tier: u8) -> bool {
    (MIN_TIER..=MAX_TIER).contains(&tier)
}

/// Validate a catalog record of any kind.
pub fn validate_part<P: Part>(part: &P) -> Result<(), ValidationError> {
    if part.name().trim().is_empty() {
        return Err(ValidationError::BlankName(P::KIND));
    }
    if !tier_in_range(part.tier()) {
        return Err(ValidationError::TierOutOfRange {
            kind: P::KIND,
            name: part.name().to_string(),
            tier: part.tier(),
        });
    }
    Ok(())
}

/// Validate a PSU table row.
pub fn validate_power_profile(p: &PowerProfile) -> Result<(), ValidationError> {
    if !tier_in_range(p.cpu_tier) || !tier_in_range(p.gpu_tier) {
        return Err(ValidationError::PowerTierOutOfRange {
            cpu_tier: p.cpu_tier,
            gpu_tier: p.gpu_tier,
        });
    }
    if p.recommended_psu == 0 {
        return Err(ValidationError::ZeroWattage {
            cpu_tier: p.cpu_tier,
            gpu_tier: p.gpu_tier,
        });
    }
    Ok(())
}

/// Validate every record of assembled catalogs.
pub fn validate_catalogs(catalogs: &Catalogs) -> Result<(), ValidationError> {
    catalogs.cpus().iter().try_for_each(validate_part)?;
    catalogs.gpus().iter().try_for_each(validate_part)?;
    catalogs.rams().iter().try_for_each(validate_part)?;
    catalogs
        .power()
        .profiles()
        .iter()
        .try_for_each(validate_power_profile)
}
