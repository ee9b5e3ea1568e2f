#![deny(warnings)]

//! Catalog I/O and browsing: JSON loading from a data directory plus the
//! filter, facet and lookup helpers used to pick a build.

pub mod load;
pub mod query;

pub use load::{load_dir, parse_cpus, parse_gpus, parse_power, parse_rams};
pub use query::{
    cpu_series, cpu_series_facet, find_by_name, gpu_card_maker_facet, gpu_chipset_facet, ram_facets,
    ChipsetMaker, CpuBrand, CpuFilter, GpuFilter, RamFacets, RamFilter, RamLabel,
};
