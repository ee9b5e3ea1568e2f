//! Catalog browsing: filters, facet lists and name lookups.
//!
//! RAM filters cascade in a fixed order (kit, capacity, DDR type, speed,
//! manufacturer). Each facet only honours the filters before it, so picking a
//! capacity never hides other capacities.

use advisor_core::{ram_ddr_type, Cpu, DdrType, Gpu, Part, Ram};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Series names in match order.
pub const CPU_SERIES: [&str; 8] = [
    "Ryzen 5", "Ryzen 7", "Ryzen 9", "Ryzen 3", "Core i3", "Core i5", "Core i7", "Core i9",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuBrand {
    Amd,
    Intel,
}

impl CpuBrand {
    pub fn matches(self, cpu: &Cpu) -> bool {
        let name = cpu.name.as_str();
        match self {
            CpuBrand::Amd => name.contains("AMD") || name.contains("Ryzen"),
            CpuBrand::Intel => name.contains("Intel") || name.contains("Core"),
        }
    }
}

impl FromStr for CpuBrand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amd" => Ok(CpuBrand::Amd),
            "intel" => Ok(CpuBrand::Intel),
            other => Err(format!("unknown CPU brand '{other}'")),
        }
    }
}

/// First series in [`CPU_SERIES`] the name contains.
pub fn cpu_series(cpu: &Cpu) -> Option<&'static str> {
    CPU_SERIES.into_iter().find(|s| cpu.name.contains(s))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuFilter {
    pub brand: Option<CpuBrand>,
    pub series: Option<String>,
}

impl CpuFilter {
    pub fn matches(&self, cpu: &Cpu) -> bool {
        self.brand.map_or(true, |b| b.matches(cpu))
            && self.series.as_deref().map_or(true, |s| cpu.name.contains(s))
    }

    pub fn apply<'a>(&self, cpus: &'a [Cpu]) -> Vec<&'a Cpu> {
        cpus.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Sorted series present among CPUs of `brand` (all brands when `None`).
pub fn cpu_series_facet(cpus: &[Cpu], brand: Option<CpuBrand>) -> Vec<&'static str> {
    cpus.iter()
        .filter(|c| brand.map_or(true, |b| b.matches(c)))
        .filter_map(cpu_series)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Maker of the GPU chip, as opposed to the board partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipsetMaker {
    Nvidia,
    Amd,
}

impl ChipsetMaker {
    pub fn matches(self, gpu: &Gpu) -> bool {
        let chipset = gpu.chipset.as_deref().unwrap_or_default();
        match self {
            ChipsetMaker::Nvidia => ["GeForce", "RTX", "GTX"].iter().any(|k| chipset.contains(k)),
            ChipsetMaker::Amd => ["Radeon", "RX"].iter().any(|k| chipset.contains(k)),
        }
    }
}

impl FromStr for ChipsetMaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nvidia" => Ok(ChipsetMaker::Nvidia),
            "amd" => Ok(ChipsetMaker::Amd),
            other => Err(format!("unknown chipset manufacturer '{other}'")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GpuFilter {
    pub chipset_maker: Option<ChipsetMaker>,
    pub chipset: Option<String>,
    pub card_maker: Option<String>,
}

impl GpuFilter {
    fn chip_matches(&self, gpu: &Gpu) -> bool {
        self.chipset_maker.map_or(true, |m| m.matches(gpu))
            && self
                .chipset
                .as_deref()
                .map_or(true, |c| gpu.chipset.as_deref().unwrap_or_default() == c)
    }

    pub fn matches(&self, gpu: &Gpu) -> bool {
        self.chip_matches(gpu)
            && self
                .card_maker
                .as_deref()
                .map_or(true, |m| gpu.card_manufacturer() == m)
    }

    pub fn apply<'a>(&self, gpus: &'a [Gpu]) -> Vec<&'a Gpu> {
        gpus.iter().filter(|g| self.matches(g)).collect()
    }
}

/// Sorted non-empty chipsets, restricted by chip maker.
pub fn gpu_chipset_facet(gpus: &[Gpu], maker: Option<ChipsetMaker>) -> Vec<String> {
    gpus.iter()
        .filter(|g| maker.map_or(true, |m| m.matches(g)))
        .filter_map(|g| g.chipset.clone())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted board partners among GPUs passing the chip filters of `filter`.
pub fn gpu_card_maker_facet(gpus: &[Gpu], filter: &GpuFilter) -> Vec<String> {
    gpus.iter()
        .filter(|g| filter.chip_matches(g))
        .map(|g| g.card_manufacturer().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// RAM filter fields in cascade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum RamField {
    Kit,
    Capacity,
    Ddr,
    Speed,
    Manufacturer,
    All,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RamFilter {
    /// Sticks per kit.
    pub kit: Option<u32>,
    /// Total kit capacity in GB.
    pub capacity_gb: Option<u32>,
    pub ddr: Option<DdrType>,
    /// Exact catalog speed string, e.g. "5,6000".
    pub speed: Option<String>,
    pub manufacturer: Option<String>,
    /// `ramType` of the selected CPU; kits it does not list are hidden.
    pub cpu_ram_type: Option<String>,
}

impl RamFilter {
    /// Narrow listings to kits the given CPU accepts.
    pub fn for_cpu(mut self, cpu: &Cpu) -> Self {
        self.cpu_ram_type = cpu.ram_type.clone();
        self
    }

    fn cpu_accepts(&self, ram: &Ram) -> bool {
        let required = self.cpu_ram_type.as_deref().unwrap_or_default().to_uppercase();
        if required.is_empty() {
            return true;
        }
        ram_ddr_type(ram).map_or(true, |d| required.contains(d.as_str()))
    }

    /// Checks every filter that comes before `upto` in the cascade.
    fn passes_before(&self, ram: &Ram, upto: RamField) -> bool {
        let Some(kit) = ram.kit() else {
            return false;
        };
        if ram.name.is_empty() {
            return false;
        }
        if upto > RamField::Kit && self.kit.is_some_and(|k| k != kit.count) {
            return false;
        }
        if upto > RamField::Capacity && self.capacity_gb.is_some_and(|c| c != kit.total_gb()) {
            return false;
        }
        if upto > RamField::Kit && !self.cpu_accepts(ram) {
            return false;
        }
        if upto > RamField::Ddr && self.ddr.is_some() && ram_ddr_type(ram) != self.ddr {
            return false;
        }
        if upto > RamField::Speed && self.speed.is_some() && ram.speed != self.speed {
            return false;
        }
        if upto > RamField::Manufacturer && self.manufacturer.as_deref().is_some_and(|m| ram.manufacturer() != m) {
            return false;
        }
        true
    }

    pub fn matches(&self, ram: &Ram) -> bool {
        self.passes_before(ram, RamField::All)
    }

    /// Matching kits with catalog duplicates (same name, modules, speed and
    /// generation) collapsed to the first occurrence.
    pub fn apply<'a>(&self, rams: &'a [Ram]) -> Vec<&'a Ram> {
        let mut seen = HashSet::new();
        rams.iter()
            .filter(|r| self.matches(r))
            .filter(|&r| seen.insert((r.name.as_str(), r.modules.as_deref(), r.speed.as_deref(), r.generation)))
            .collect()
    }
}

/// Options for each RAM filter given the current choices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RamFacets {
    pub kits: Vec<u32>,
    pub capacities_gb: Vec<u32>,
    pub ddr_types: Vec<DdrType>,
    /// Sorted by MHz.
    pub speeds: Vec<String>,
    pub manufacturers: Vec<String>,
}

pub fn ram_facets(rams: &[Ram], filter: &RamFilter) -> RamFacets {
    let stage = |upto: RamField| rams.iter().filter(move |r| filter.passes_before(r, upto));

    let kits = rams
        .iter()
        .filter_map(Ram::kit_count)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let capacities_gb = stage(RamField::Capacity)
        .filter_map(Ram::total_capacity_gb)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let ddr_types = stage(RamField::Ddr)
        .filter_map(ram_ddr_type)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let mut speeds: Vec<String> = stage(RamField::Speed)
        .filter_map(|r| r.speed.clone())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    speeds.sort_by_key(|s| speed_mhz(s));
    let manufacturers = stage(RamField::Manufacturer)
        .map(|r| r.manufacturer().to_string())
        .filter(|m| !m.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    RamFacets {
        kits,
        capacities_gb,
        ddr_types,
        speeds,
        manufacturers,
    }
}

fn speed_mhz(speed: &str) -> u32 {
    Ram {
        speed: Some(speed.to_string()),
        ..Ram::default()
    }
    .speed_mhz()
    .unwrap_or(0)
}

/// Product name exactly, else the first case-insensitive substring match.
pub fn find_by_name<'a, P: Part>(items: &'a [P], query: &str) -> Option<&'a P> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(exact) = items.iter().find(|p| p.name() == query) {
        return Some(exact);
    }
    let needle = query.to_lowercase();
    items.iter().find(|p| p.name().to_lowercase().contains(&needle))
}

/// One-line label for a memory kit: `name - 32GB (2x16GB) DDR5-6000`.
pub struct RamLabel<'a>(pub &'a Ram);

impl fmt::Display for RamLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ram = self.0;
        write!(f, "{}", ram.name)?;
        if let Some(kit) = ram.kit() {
            write!(f, " - {}GB ({}x{}GB)", kit.total_gb(), kit.display_count(), kit.capacity_per_stick_gb)?;
        }
        let ddr = ram_ddr_type(ram).map_or("DDR?", DdrType::as_str);
        match ram.speed_mhz() {
            Some(mhz) => write!(f, " {ddr}-{mhz}"),
            None => write!(f, " {ddr}-N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cpu(name: &str, ram_type: Option<&str>) -> Cpu {
        Cpu {
            name: name.to_string(),
            tier: 3,
            ram_type: ram_type.map(str::to_string),
            ..Cpu::default()
        }
    }

    fn gpu(name: &str, chipset: &str) -> Gpu {
        Gpu {
            name: name.to_string(),
            tier: 3,
            chipset: Some(chipset.to_string()),
            ..Gpu::default()
        }
    }

    fn ram(name: &str, generation: u32, modules: &str, speed: &str) -> Ram {
        Ram {
            name: name.to_string(),
            tier: 3,
            generation: Some(generation),
            modules: Some(modules.to_string()),
            speed: Some(speed.to_string()),
            ..Ram::default()
        }
    }

    fn cpus() -> Vec<Cpu> {
        vec![
            cpu("AMD Ryzen 5 7600X", Some("DDR5")),
            cpu("AMD Ryzen 7 5800X3D", Some("DDR4")),
            cpu("Intel Core i5-13600K", Some("DDR4, DDR5")),
            cpu("Intel Core i9-14900K", Some("DDR4, DDR5")),
            cpu("AMD Athlon 3000G", None),
        ]
    }

    fn rams() -> Vec<Ram> {
        vec![
            ram("Corsair Vengeance LPX 16 GB", 8, "2,8", "4,3200"),
            ram("Corsair Vengeance 32 GB", 12, "2,16", "5,6000"),
            ram("Corsair Vengeance 32 GB", 12, "2,16", "5,6000"),
            ram("G.Skill Trident Z5 64 GB", 12, "2,32", "5,6400"),
            ram("G.Skill Ripjaws V 64 GB", 8, "4,16", "4,3600"),
            ram("Kingston Server 128 GB", 8, "8,16", "4,2666"),
            ram("Nameless", 8, "garbage", "4,3200"),
        ]
    }

    #[test]
    fn cpu_brand_and_series() {
        let cpus = cpus();
        let amd = CpuFilter {
            brand: Some(CpuBrand::Amd),
            series: None,
        };
        assert_eq!(amd.apply(&cpus).len(), 3);
        assert_eq!(cpu_series_facet(&cpus, Some(CpuBrand::Amd)), vec!["Ryzen 5", "Ryzen 7"]);
        assert_eq!(
            cpu_series_facet(&cpus, None),
            vec!["Core i5", "Core i9", "Ryzen 5", "Ryzen 7"]
        );
        let i9 = CpuFilter {
            brand: Some(CpuBrand::Intel),
            series: Some("Core i9".into()),
        };
        let names: Vec<_> = i9.apply(&cpus).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Intel Core i9-14900K"]);
    }

    #[test]
    fn gpu_filters_and_facets() {
        let gpus = vec![
            gpu("ASUS Dual GeForce RTX 4060", "GeForce RTX 4060"),
            gpu("MSI Ventus GeForce RTX 4070", "GeForce RTX 4070"),
            gpu("ASUS TUF Radeon RX 7800 XT", "Radeon RX 7800 XT"),
            gpu("Sapphire Pulse Radeon RX 7800 XT", "Radeon RX 7800 XT"),
        ];
        assert_eq!(
            gpu_chipset_facet(&gpus, Some(ChipsetMaker::Amd)),
            vec!["Radeon RX 7800 XT".to_string()]
        );
        let amd = GpuFilter {
            chipset_maker: Some(ChipsetMaker::Amd),
            ..GpuFilter::default()
        };
        assert_eq!(gpu_card_maker_facet(&gpus, &amd), vec!["ASUS".to_string(), "Sapphire".to_string()]);
        let asus_amd = GpuFilter {
            card_maker: Some("ASUS".into()),
            ..amd
        };
        let names: Vec<_> = asus_amd.apply(&gpus).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["ASUS TUF Radeon RX 7800 XT"]);
    }

    #[test]
    fn ram_listing_deduplicates_and_drops_malformed_kits() {
        let rams = rams();
        let all = RamFilter::default().apply(&rams);
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|r| r.name != "Nameless"));
    }

    #[test]
    fn ram_cpu_compatibility_filter() {
        let rams = rams();
        let ddr5_only = RamFilter::default().for_cpu(&cpu("AMD Ryzen 5 7600X", Some("ddr5")));
        let listed = ddr5_only.apply(&rams);
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| ram_ddr_type(r) == Some(DdrType::Ddr5)));
        let unknown = RamFilter::default().for_cpu(&cpu("AMD Athlon 3000G", None));
        assert_eq!(unknown.apply(&rams).len(), 5);
    }

    #[test]
    fn ram_facets_cascade() {
        let rams = rams();
        let filter = RamFilter {
            kit: Some(2),
            capacity_gb: Some(32),
            ..RamFilter::default()
        };
        let facets = ram_facets(&rams, &filter);
        assert_eq!(facets.kits, vec![2, 4, 8]);
        // capacity options ignore the chosen capacity
        assert_eq!(facets.capacities_gb, vec![16, 32, 64]);
        assert_eq!(facets.ddr_types, vec![DdrType::Ddr5]);
        assert_eq!(facets.speeds, vec!["5,6000".to_string()]);
        assert_eq!(facets.manufacturers, vec!["Corsair".to_string()]);

        let open = ram_facets(&rams, &RamFilter::default());
        assert_eq!(open.speeds, vec!["4,2666", "4,3200", "4,3600", "5,6000", "5,6400"]);
        assert_eq!(open.ddr_types, vec![DdrType::Ddr4, DdrType::Ddr5]);
    }

    #[test]
    fn find_prefers_exact_then_substring() {
        let cpus = cpus();
        assert_eq!(find_by_name(&cpus, "Intel Core i9-14900K").map(|c| c.name.as_str()), Some("Intel Core i9-14900K"));
        assert_eq!(find_by_name(&cpus, "ryzen 7").map(|c| c.name.as_str()), Some("AMD Ryzen 7 5800X3D"));
        assert!(find_by_name(&cpus, "Threadripper").is_none());
        assert!(find_by_name(&cpus, "  ").is_none());
    }

    #[test]
    fn ram_label_shows_layout() {
        let r = ram("Kingston Server 128 GB", 8, "8,16", "4,2666");
        assert_eq!(RamLabel(&r).to_string(), "Kingston Server 128 GB - 128GB (4x16GB) DDR4-2666");
        let bare = Ram {
            name: "Mystery".into(),
            ..Ram::default()
        };
        assert_eq!(RamLabel(&bare).to_string(), "Mystery DDR?-N/A");
    }

    proptest! {
        #[test]
        fn filtered_listing_is_subset_of_unfiltered(kit in proptest::option::of(1u32..=8), cap in proptest::option::of(8u32..=128)) {
            let rams = rams();
            let filter = RamFilter { kit, capacity_gb: cap, ..RamFilter::default() };
            let all = RamFilter::default().apply(&rams);
            for r in filter.apply(&rams) {
                prop_assert!(all.iter().any(|a| std::ptr::eq(*a, r)));
            }
        }
    }
}
