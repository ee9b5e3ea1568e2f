#![deny(warnings)]

//! Component scoring: fixed-weight blends of min-max normalized spec fields.
//!
//! ```text
//! cpu = 0.60 * boost_clock + 0.30 * core_count + 0.10 * generation
//! gpu = 0.65 * boost_clock + 0.25 * memory     + 0.10 * generation
//! ram = 0.65 * speed       + 0.35 * capacity
//! norm(v) = (v - min) / (max - min)   with a zero span replaced by 1
//! ```
//!
//! Bounds come from the whole catalog of a kind, not from the candidates being
//! compared, so scores are only meaningful within one kind and one catalog.

use advisor_core::{Catalogs, Component, Cpu, Gpu, Part, Ram};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Weights of the CPU blend.
pub const CPU_BOOST_WEIGHT: f64 = 0.60;
pub const CPU_CORES_WEIGHT: f64 = 0.30;
pub const CPU_GENERATION_WEIGHT: f64 = 0.10;

/// Weights of the GPU blend.
pub const GPU_BOOST_WEIGHT: f64 = 0.65;
pub const GPU_MEMORY_WEIGHT: f64 = 0.25;
pub const GPU_GENERATION_WEIGHT: f64 = 0.10;

/// Weights of the RAM blend.
pub const RAM_SPEED_WEIGHT: f64 = 0.65;
pub const RAM_CAPACITY_WEIGHT: f64 = 0.35;

/// Capacity assumed for a kit whose name carries no "<n> GB".
pub const RAM_DEFAULT_CAPACITY_GB: f64 = 16.0;
/// Stand-in for a missing capacity when computing the catalog minimum.
const RAM_CAPACITY_FLOOR_GB: f64 = 8.0;
/// Stand-in for a missing speed when computing the catalog minimum.
const RAM_SPEED_FLOOR: f64 = 2000.0;

static CAPACITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // ASCII digits only; `\d` would also match other Unicode digit classes.
    Regex::new(r"([0-9]+)\s*GB").expect("capacity pattern is a valid regex")
});

/// Observed [min, max] of one field over a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    /// Range over `values`; an empty input yields [0, 0].
    pub fn over<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut it = values.into_iter();
        let Some(first) = it.next() else {
            return Self { min: 0.0, max: 0.0 };
        };
        it.fold(Self { min: first, max: first }, |r, v| Self {
            min: r.min.min(v),
            max: r.max.max(v),
        })
    }

    /// Min-max normalize. With a zero span the divisor is 1, so the value
    /// contributes its raw offset from the minimum.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        let span = if span == 0.0 || span.is_nan() { 1.0 } else { span };
        (value - self.min) / span
    }
}

/// All digits of the speed string, concatenated (`"5,6000"` -> 56000).
pub fn ram_speed_digits(ram: &Ram) -> Option<f64> {
    let digits: String = ram
        .speed
        .as_deref()?
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// First "<digits> GB" in the kit name.
pub fn ram_capacity_from_name(ram: &Ram) -> Option<f64> {
    CAPACITY_PATTERN
        .captures(&ram.name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpuBounds {
    pub boost_clock: FieldRange,
    pub core_count: FieldRange,
    pub generation: FieldRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpuBounds {
    pub boost_clock: FieldRange,
    pub memory: FieldRange,
    pub generation: FieldRange,
}

/// RAM bounds use asymmetric stand-ins for missing fields:
/// speed max 0 / min 2000, capacity max 0 / min 8.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RamBounds {
    pub speed: FieldRange,
    pub capacity: FieldRange,
}

fn generation_of<P: Part>(p: &P) -> f64 {
    p.generation().map(f64::from).unwrap_or(0.0)
}

impl CpuBounds {
    pub fn over(cpus: &[Cpu]) -> Self {
        Self {
            boost_clock: FieldRange::over(cpus.iter().map(|c| c.boost_clock_ghz.unwrap_or(0.0))),
            core_count: FieldRange::over(cpus.iter().map(|c| f64::from(c.core_count.unwrap_or(0)))),
            generation: FieldRange::over(cpus.iter().map(generation_of)),
        }
    }
}

impl GpuBounds {
    pub fn over(gpus: &[Gpu]) -> Self {
        Self {
            boost_clock: FieldRange::over(gpus.iter().map(|g| g.boost_clock_mhz.unwrap_or(0.0))),
            memory: FieldRange::over(gpus.iter().map(|g| g.memory_gb.unwrap_or(0.0))),
            generation: FieldRange::over(gpus.iter().map(generation_of)),
        }
    }
}

impl RamBounds {
    pub fn over(rams: &[Ram]) -> Self {
        if rams.is_empty() {
            return Self {
                speed: FieldRange::over([]),
                capacity: FieldRange::over([]),
            };
        }
        let speed = FieldRange {
            min: rams
                .iter()
                .map(|r| ram_speed_digits(r).unwrap_or(RAM_SPEED_FLOOR))
                .fold(f64::INFINITY, f64::min),
            max: rams
                .iter()
                .map(|r| ram_speed_digits(r).unwrap_or(0.0))
                .fold(f64::NEG_INFINITY, f64::max),
        };
        let capacity = FieldRange {
            min: rams
                .iter()
                .map(|r| ram_capacity_from_name(r).unwrap_or(RAM_CAPACITY_FLOOR_GB))
                .fold(f64::INFINITY, f64::min),
            max: rams
                .iter()
                .map(|r| ram_capacity_from_name(r).unwrap_or(0.0))
                .fold(f64::NEG_INFINITY, f64::max),
        };
        Self { speed, capacity }
    }
}

/// Catalog-wide normalization bounds for every kind, computed once per session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreModel {
    pub cpu: CpuBounds,
    pub gpu: GpuBounds,
    pub ram: RamBounds,
}

impl ScoreModel {
    pub fn new(cpus: &[Cpu], gpus: &[Gpu], rams: &[Ram]) -> Self {
        let model = Self {
            cpu: CpuBounds::over(cpus),
            gpu: GpuBounds::over(gpus),
            ram: RamBounds::over(rams),
        };
        tracing::debug!(?model, "score bounds computed");
        model
    }

    pub fn from_catalogs(catalogs: &Catalogs) -> Self {
        Self::new(catalogs.cpus(), catalogs.gpus(), catalogs.rams())
    }

    pub fn cpu_score(&self, cpu: &Cpu) -> f64 {
        let b = &self.cpu;
        b.boost_clock.normalize(cpu.boost_clock_ghz.unwrap_or(0.0)) * CPU_BOOST_WEIGHT
            + b.core_count.normalize(f64::from(cpu.core_count.unwrap_or(0))) * CPU_CORES_WEIGHT
            + b.generation.normalize(generation_of(cpu)) * CPU_GENERATION_WEIGHT
    }

    pub fn gpu_score(&self, gpu: &Gpu) -> f64 {
        let b = &self.gpu;
        b.boost_clock.normalize(gpu.boost_clock_mhz.unwrap_or(0.0)) * GPU_BOOST_WEIGHT
            + b.memory.normalize(gpu.memory_gb.unwrap_or(0.0)) * GPU_MEMORY_WEIGHT
            + b.generation.normalize(generation_of(gpu)) * GPU_GENERATION_WEIGHT
    }

    pub fn ram_score(&self, ram: &Ram) -> f64 {
        let b = &self.ram;
        let speed = ram_speed_digits(ram).unwrap_or(0.0);
        let capacity = ram_capacity_from_name(ram).unwrap_or(RAM_DEFAULT_CAPACITY_GB);
        b.speed.normalize(speed) * RAM_SPEED_WEIGHT + b.capacity.normalize(capacity) * RAM_CAPACITY_WEIGHT
    }

    pub fn score(&self, component: &Component) -> f64 {
        match component {
            Component::Cpu(c) => self.cpu_score(c),
            Component::Gpu(g) => self.gpu_score(g),
            Component::Ram(r) => self.ram_score(r),
        }
    }
}

/// Kind-specific scoring through a shared interface.
pub trait Scored: Part {
    fn score(&self, model: &ScoreModel) -> f64;
}

impl Scored for Cpu {
    fn score(&self, model: &ScoreModel) -> f64 {
        model.cpu_score(self)
    }
}

impl Scored for Gpu {
    fn score(&self, model: &ScoreModel) -> f64 {
        model.gpu_score(self)
    }
}

impl Scored for Ram {
    fn score(&self, model: &ScoreModel) -> f64 {
        model.ram_score(self)
    }
}
