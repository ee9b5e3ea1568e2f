//! `--list` mode: a filtered catalog listing plus the values each filter can
//! still take, so a build can be narrowed down before analysis.

use advisor_catalog::{
    cpu_series_facet, gpu_card_maker_facet, gpu_chipset_facet, ram_facets, CpuFilter, GpuFilter, RamFilter,
    RamLabel,
};
use advisor_core::{Catalogs, ComponentKind, Cpu, Gpu, Part, Ram};
use serde_json::{json, Value};
use std::fmt::{self, Display, Formatter};

/// Filters collected from the command line, one set per kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
    pub cpu: CpuFilter,
    pub gpu: GpuFilter,
    pub ram: RamFilter,
}

pub struct Listing<'a> {
    pub catalogs: &'a Catalogs,
    pub kind: ComponentKind,
    pub filters: &'a Filters,
}

enum Matches<'a> {
    Cpu(Vec<&'a Cpu>),
    Gpu(Vec<&'a Gpu>),
    Ram(Vec<&'a Ram>),
}

impl<'a> Listing<'a> {
    fn matches(&self) -> Matches<'a> {
        let c = self.catalogs;
        match self.kind {
            ComponentKind::Cpu => Matches::Cpu(self.filters.cpu.apply(c.cpus())),
            ComponentKind::Gpu => Matches::Gpu(self.filters.gpu.apply(c.gpus())),
            ComponentKind::Ram => Matches::Ram(self.filters.ram.apply(c.rams())),
        }
    }

    /// Names of the matching products in catalog order.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn names(&self) -> Vec<&'a str> {
        fn names<'p, P: Part>(items: &[&'p P]) -> Vec<&'p str> {
            items.iter().map(|&p| p.name()).collect()
        }
        match self.matches() {
            Matches::Cpu(items) => names(&items),
            Matches::Gpu(items) => names(&items),
            Matches::Ram(items) => names(&items),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        let items = match self.matches() {
            Matches::Cpu(items) => serde_json::to_value(items)?,
            Matches::Gpu(items) => serde_json::to_value(items)?,
            Matches::Ram(items) => serde_json::to_value(items)?,
        };
        Ok(json!({ "kind": self.kind, "items": items }))
    }
}

fn join<T: Display>(values: &[T]) -> String {
    if values.is_empty() {
        return "none".to_string();
    }
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

fn or_dash(v: Option<&str>) -> &str {
    v.unwrap_or("-")
}

impl Display for Listing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = self.catalogs;
        match self.matches() {
            Matches::Cpu(items) => {
                writeln!(f, "CPUs: {} match", items.len())?;
                let series = cpu_series_facet(c.cpus(), self.filters.cpu.brand);
                writeln!(f, "  Series: {}", join(&series))?;
                for cpu in items {
                    writeln!(
                        f,
                        "  [tier {}] {} ({}, {})",
                        cpu.tier,
                        cpu.name,
                        or_dash(cpu.socket.as_deref()),
                        or_dash(cpu.ram_type.as_deref())
                    )?;
                }
            }
            Matches::Gpu(items) => {
                let gpu = &self.filters.gpu;
                writeln!(f, "GPUs: {} match", items.len())?;
                writeln!(f, "  Chipsets: {}", join(&gpu_chipset_facet(c.gpus(), gpu.chipset_maker)))?;
                writeln!(f, "  Card makers: {}", join(&gpu_card_maker_facet(c.gpus(), gpu)))?;
                for g in items {
                    writeln!(f, "  [tier {}] {} ({})", g.tier, g.name, or_dash(g.chipset.as_deref()))?;
                }
            }
            Matches::Ram(items) => {
                let facets = ram_facets(c.rams(), &self.filters.ram);
                writeln!(f, "RAM kits: {} match", items.len())?;
                writeln!(f, "  Kit sizes: {}", join(&facets.kits))?;
                writeln!(f, "  Capacities (GB): {}", join(&facets.capacities_gb))?;
                writeln!(f, "  Memory: {}", join(&facets.ddr_types))?;
                writeln!(f, "  Speeds: {}", join(&facets.speeds))?;
                writeln!(f, "  Manufacturers: {}", join(&facets.manufacturers))?;
                for ram in items {
                    writeln!(f, "  [tier {}] {}", ram.tier, RamLabel(ram))?;
                }
            }
        }
        Ok(())
    }
}
