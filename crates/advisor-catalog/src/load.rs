//! Reading catalogs from a data directory.

use advisor_core::{
    validate_part, validate_power_profile, Catalogs, Cpu, Gpu, Part, PowerProfile, PowerTable, Ram,
};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CPU_FILE: &str = "cpuSorted.json";
pub const GPU_FILE: &str = "gpuSorted.json";
pub const RAM_FILE: &str = "ramSorted.json";
pub const POWER_FILE: &str = "powerProfiles.json";

/// Load all catalogs from `dir`. The component files are required; a missing
/// power file leaves every PSU lookup unknown.
pub fn load_dir(dir: &Path) -> Result<Catalogs> {
    let cpus = parse_cpus(&read(dir, CPU_FILE)?).with_context(|| format!("parsing {CPU_FILE}"))?;
    let gpus = parse_gpus(&read(dir, GPU_FILE)?).with_context(|| format!("parsing {GPU_FILE}"))?;
    let rams = parse_rams(&read(dir, RAM_FILE)?).with_context(|| format!("parsing {RAM_FILE}"))?;

    let power_path = dir.join(POWER_FILE);
    let power = if power_path.exists() {
        parse_power(&read(dir, POWER_FILE)?).with_context(|| format!("parsing {POWER_FILE}"))?
    } else {
        warn!(path = %power_path.display(), "power profiles missing; PSU checks will be skipped");
        PowerTable::default()
    };

    info!(
        cpus = cpus.len(),
        gpus = gpus.len(),
        rams = rams.len(),
        power_profiles = power.len(),
        "catalogs loaded"
    );
    let catalogs = Catalogs::new(cpus, gpus, rams, power)
        .with_context(|| format!("loading catalogs from {}", dir.display()))?;
    Ok(catalogs)
}

fn read(dir: &Path, file: &str) -> Result<String> {
    let path = dir.join(file);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn parse_cpus(text: &str) -> Result<Vec<Cpu>> {
    parse_parts(text)
}

pub fn parse_gpus(text: &str) -> Result<Vec<Gpu>> {
    parse_parts(text)
}

pub fn parse_rams(text: &str) -> Result<Vec<Ram>> {
    parse_parts(text)
}

/// Parse a JSON array of power profiles, skipping malformed rows.
pub fn parse_power(text: &str) -> Result<PowerTable> {
    let rows: Vec<Value> = serde_json::from_str(text).context("expected a JSON array")?;
    let total = rows.len();
    let profiles: Vec<PowerProfile> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value::<PowerProfile>(v) {
            Ok(p) => match validate_power_profile(&p) {
                Ok(()) => Some(p),
                Err(e) => {
                    warn!(index = i, error = %e, "skipping power profile");
                    None
                }
            },
            Err(e) => {
                warn!(index = i, error = %e, "skipping malformed power profile");
                None
            }
        })
        .collect();
    if profiles.len() < total {
        warn!(kept = profiles.len(), total, "some power profiles were skipped");
    }
    Ok(PowerTable::new(profiles))
}

/// Records are decoded one by one so a bad row costs only itself.
fn parse_parts<P: Part + DeserializeOwned>(text: &str) -> Result<Vec<P>> {
    let rows: Vec<Value> = serde_json::from_str(text).context("expected a JSON array")?;
    let total = rows.len();
    let parts: Vec<P> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let part = match serde_json::from_value::<P>(v) {
                Ok(p) => p,
                Err(e) => {
                    warn!(kind = %P::KIND, index = i, error = %e, "skipping malformed record");
                    return None;
                }
            };
            match validate_part(&part) {
                Ok(()) => Some(part),
                Err(e) => {
                    warn!(index = i, error = %e, "skipping invalid record");
                    None
                }
            }
        })
        .collect();
    if parts.len() < total {
        warn!(kind = %P::KIND, kept = parts.len(), total, "some records were skipped");
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::ComponentKind;

    const CPUS: &str = r#"[
        {"name": "AMD Ryzen 5 7600", "tier": 4, "generation": 5, "socket": "AM5",
         "core_count": 6, "boost_clock": "5.1 GHz", "tdp": 65, "ramType": "DDR5"},
        {"name": "Broken", "tier": 12},
        {"name": "   ", "tier": 3},
        "not an object",
        {"name": "Intel Core i5-12400", "tier": "3", "boost_clock": 4.4}
    ]"#;

    const GPUS: &str = r#"[{"name": "ASUS GeForce RTX 4070", "tier": 5, "chipset": "GeForce RTX 4070", "memory": 12, "boost_clock": 2475}]"#;

    const RAMS: &str = r#"[{"name": "Corsair Vengeance 32 GB", "tier": 4, "generation": 12, "modules": "2,16", "speed": "5,6000", "cas_latency": 36}]"#;

    const POWER: &str = r#"[
        {"cpuTier": 4, "gpuTier": 5, "recommendedPSU": 750},
        {"cpuTier": 4, "gpuTier": 5, "recommendedPsu": 750},
        {"cpuTier": 9, "gpuTier": 5, "recommendedPsu": 750},
        {"cpuTier": 4, "gpuTier": 6, "recommendedPsu": 0},
        {"cpuTier": 4}
    ]"#;

    #[test]
    fn invalid_records_are_skipped() {
        let cpus = parse_cpus(CPUS).unwrap();
        let names: Vec<_> = cpus.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AMD Ryzen 5 7600", "Intel Core i5-12400"]);
        assert_eq!(cpus[0].boost_clock_ghz, Some(5.1));
        assert_eq!(cpus[1].tier, 3);
    }

    #[test]
    fn top_level_must_be_an_array() {
        assert!(parse_cpus(r#"{"name": "x"}"#).is_err());
        assert!(parse_power("nope").is_err());
    }

    #[test]
    fn power_rows_are_validated() {
        let table = parse_power(POWER).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(4, 5), Some(750));
        assert_eq!(table.lookup(4, 6), None);
    }

    fn write_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        dir
    }

    #[test]
    fn loads_a_data_directory() {
        let dir = write_dir(&[(CPU_FILE, CPUS), (GPU_FILE, GPUS), (RAM_FILE, RAMS), (POWER_FILE, POWER)]);
        let cat = load_dir(dir.path()).unwrap();
        assert_eq!(cat.len(ComponentKind::Cpu), 2);
        assert_eq!(cat.len(ComponentKind::Gpu), 1);
        assert_eq!(cat.len(ComponentKind::Ram), 1);
        assert_eq!(cat.power().len(), 1);
        advisor_core::validate_catalogs(&cat).unwrap();
    }

    #[test]
    fn bundled_sample_data_is_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/data");
        let cat = load_dir(&dir).unwrap();
        advisor_core::validate_catalogs(&cat).unwrap();
        assert_eq!(cat.power().len(), 49);
        for kind in ComponentKind::ALL {
            assert!(cat.len(kind) > 10);
        }
    }

    #[test]
    fn missing_power_file_is_tolerated() {
        let dir = write_dir(&[(CPU_FILE, CPUS), (GPU_FILE, GPUS), (RAM_FILE, RAMS)]);
        let cat = load_dir(dir.path()).unwrap();
        assert!(cat.power().is_empty());
    }

    #[test]
    fn missing_component_file_fails() {
        let dir = write_dir(&[(CPU_FILE, CPUS), (RAM_FILE, RAMS)]);
        let err = load_dir(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(GPU_FILE));
    }

    #[test]
    fn empty_catalog_fails() {
        let dir = write_dir(&[(CPU_FILE, "[]"), (GPU_FILE, GPUS), (RAM_FILE, RAMS)]);
        let err = load_dir(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CPU catalog is empty"));
    }
}
