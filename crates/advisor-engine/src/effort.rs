//! How disruptive an upgrade is: which companion parts it drags along.

use advisor_core::{
    psu_recommendation, ram_compatible_with_cpu, ram_ddr_type, Cpu, Gpu, PowerTable, Ram,
    SystemBuild,
};
use advisor_score::Scored;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target PSU wattage from which a GPU pick is flagged as power hungry.
pub const HIGH_POWER_PSU_WATTS: u32 = 850;

/// Stand-in for the selected kit's memory type when it cannot be derived.
pub const UNKNOWN_DDR: &str = "Unknown DDR";

/// Effort ladder. `Any` is only meaningful as a tolerance: it accepts every
/// level and is never produced as a requirement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    #[default]
    Simple,
    Moderate,
    Complex,
    Any,
}

impl EffortLevel {
    pub const ALL: [EffortLevel; 4] = [
        EffortLevel::Simple,
        EffortLevel::Moderate,
        EffortLevel::Complex,
        EffortLevel::Any,
    ];

    pub fn rank(self) -> u8 {
        match self {
            EffortLevel::Simple => 1,
            EffortLevel::Moderate => 2,
            EffortLevel::Complex => 3,
            EffortLevel::Any => 4,
        }
    }

    /// Whether an upgrade needing `required` fits within this tolerance.
    pub fn allows(self, required: EffortLevel) -> bool {
        self == EffortLevel::Any || required.rank() <= self.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EffortLevel::Simple => "simple",
            EffortLevel::Moderate => "moderate",
            EffortLevel::Complex => "complex",
            EffortLevel::Any => "any",
        }
    }

    /// "Simple effort", ..., "Any effort".
    pub fn label(self) -> &'static str {
        match self {
            EffortLevel::Simple => "Simple effort",
            EffortLevel::Moderate => "Moderate effort",
            EffortLevel::Complex => "Complex effort",
            EffortLevel::Any => "Any effort",
        }
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown effort level '{0}', expected simple, moderate, complex or any")]
pub struct ParseEffortError(pub String);

impl FromStr for EffortLevel {
    type Err = ParseEffortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(EffortLevel::Simple),
            "moderate" => Ok(EffortLevel::Moderate),
            "complex" => Ok(EffortLevel::Complex),
            "any" => Ok(EffortLevel::Any),
            _ => Err(ParseEffortError(s.to_string())),
        }
    }
}

/// A part that has to be replaced alongside the upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredPart {
    Motherboard,
    #[serde(rename = "RAM")]
    Ram,
    #[serde(rename = "CPU/Motherboard")]
    CpuMotherboard,
    #[serde(rename = "PSU")]
    Psu,
}

impl fmt::Display for RequiredPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredPart::Motherboard => "Motherboard",
            RequiredPart::Ram => "RAM",
            RequiredPart::CpuMotherboard => "CPU/Motherboard",
            RequiredPart::Psu => "PSU",
        })
    }
}

/// Display-only cautions attached to a pick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeWarning {
    SocketMismatch { required: String, current: String },
    MemoryMismatch { required: String, selected: String },
    HighPower { watts: u32 },
    RamIncompatible { cpu_ram_type: String },
}

impl fmt::Display for UpgradeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeWarning::SocketMismatch { required, current } => write!(
                f,
                "Socket Mismatch: Requires a {required} motherboard (current CPU is {current})."
            ),
            UpgradeWarning::MemoryMismatch { required, selected } => write!(
                f,
                "Compatibility Issue: This CPU requires {required} RAM, but you selected {selected}"
            ),
            UpgradeWarning::HighPower { watts } => {
                write!(f, "High Power Requirement: Estimated PSU need {watts}W")
            }
            UpgradeWarning::RamIncompatible { cpu_ram_type } => write!(
                f,
                "Compatibility Issue: This RAM is not compatible with your selected CPU ({cpu_ram_type})."
            ),
        }
    }
}

/// Effort verdict for one candidate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeEffort {
    pub level: EffortLevel,
    pub required_parts: Vec<RequiredPart>,
    pub notes: Vec<String>,
    pub warnings: Vec<UpgradeWarning>,
}

/// A catalog kind that can be proposed as a replacement for the part of the
/// same kind in a build.
pub trait Upgrade: Scored {
    /// Collapse repeated product names within a tier.
    const DEDUPE_BY_NAME: bool = false;

    /// The part of this kind currently in `build`.
    fn current<'b>(build: &SystemBuild<'b>) -> &'b Self;

    fn assess(&self, build: &SystemBuild<'_>, power: &PowerTable) -> UpgradeEffort;
}

impl Upgrade for Cpu {
    fn current<'b>(build: &SystemBuild<'b>) -> &'b Self {
        build.cpu
    }

    fn assess(&self, build: &SystemBuild<'_>, _power: &PowerTable) -> UpgradeEffort {
        let mut effort = UpgradeEffort::default();
        if let (Some(new_socket), Some(old_socket)) = (declared(&self.socket), declared(&build.cpu.socket)) {
            if new_socket != old_socket {
                effort.required_parts.push(RequiredPart::Motherboard);
                effort.warnings.push(UpgradeWarning::SocketMismatch {
                    required: new_socket.to_string(),
                    current: old_socket.to_string(),
                });
            }
        }
        if let Some(required) = declared(&self.ram_type) {
            // An unidentifiable kit is flagged for a manual check but never
            // counted as a required replacement.
            match ram_ddr_type(build.ram) {
                None => effort.warnings.push(UpgradeWarning::MemoryMismatch {
                    required: required.to_string(),
                    selected: UNKNOWN_DDR.to_string(),
                }),
                Some(ddr) if !ram_compatible_with_cpu(build.ram, self) => {
                    effort.required_parts.push(RequiredPart::Ram);
                    effort.warnings.push(UpgradeWarning::MemoryMismatch {
                        required: required.to_string(),
                        selected: ddr.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        if !effort.required_parts.is_empty() {
            effort.level = EffortLevel::Complex;
        }
        effort
    }
}

/// Non-blank catalog text.
fn declared(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl Upgrade for Ram {
    const DEDUPE_BY_NAME: bool = true;

    fn current<'b>(build: &SystemBuild<'b>) -> &'b Self {
        build.ram
    }

    fn assess(&self, build: &SystemBuild<'_>, _power: &PowerTable) -> UpgradeEffort {
        let mut effort = UpgradeEffort::default();
        if !ram_compatible_with_cpu(self, build.cpu) {
            effort.level = EffortLevel::Complex;
            effort.required_parts.push(RequiredPart::CpuMotherboard);
            effort.warnings.push(UpgradeWarning::RamIncompatible {
                cpu_ram_type: build.cpu.ram_type.clone().unwrap_or_default(),
            });
        }
        effort
    }
}

impl Upgrade for Gpu {
    fn current<'b>(build: &SystemBuild<'b>) -> &'b Self {
        build.gpu
    }

    /// PSU tables are keyed by raw tiers.
    fn assess(&self, build: &SystemBuild<'_>, power: &PowerTable) -> UpgradeEffort {
        let mut effort = UpgradeEffort::default();
        let current = psu_recommendation(power, build.cpu.tier, build.gpu.tier);
        let target = psu_recommendation(power, build.cpu.tier, self.tier);
        match (current, target) {
            (Some(current), Some(target)) if target > current => {
                effort.level = EffortLevel::Moderate;
                effort.required_parts.push(RequiredPart::Psu);
                effort.notes.push(format!(
                    "Estimated PSU need: {target}W (current estimate: {current}W)"
                ));
            }
            (Some(_), Some(target)) => {
                if target >= HIGH_POWER_PSU_WATTS {
                    effort.warnings.push(UpgradeWarning::HighPower { watts: target });
                }
            }
            (_, target) => {
                effort
                    .notes
                    .push("PSU check required for this upgrade".to_string());
                if let Some(target) = target.filter(|w| *w >= HIGH_POWER_PSU_WATTS) {
                    effort.warnings.push(UpgradeWarning::HighPower { watts: target });
                }
            }
        }
        effort
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::PowerProfile;

    fn cpu(socket: &str, ram_type: Option<&str>) -> Cpu {
        Cpu {
            name: format!("CPU {socket}"),
            tier: 3,
            socket: Some(socket.to_string()),
            ram_type: ram_type.map(str::to_string),
            ..Cpu::default()
        }
    }

    fn gpu(tier: u8) -> Gpu {
        Gpu {
            name: format!("GPU {tier}"),
            tier,
            ..Gpu::default()
        }
    }

    fn ram(generation: u32) -> Ram {
        Ram {
            name: format!("Kit gen {generation}"),
            tier: 2,
            generation: Some(generation),
            ..Ram::default()
        }
    }

    fn power() -> PowerTable {
        PowerTable::new(vec![
            PowerProfile { cpu_tier: 3, gpu_tier: 3, recommended_psu: 550 },
            PowerProfile { cpu_tier: 3, gpu_tier: 4, recommended_psu: 550 },
            PowerProfile { cpu_tier: 3, gpu_tier: 5, recommended_psu: 650 },
            PowerProfile { cpu_tier: 3, gpu_tier: 7, recommended_psu: 1000 },
        ])
    }

    #[test]
    fn tolerance_ladder() {
        assert!(EffortLevel::Simple.allows(EffortLevel::Simple));
        assert!(!EffortLevel::Simple.allows(EffortLevel::Moderate));
        assert!(EffortLevel::Complex.allows(EffortLevel::Moderate));
        assert!(!EffortLevel::Moderate.allows(EffortLevel::Complex));
        for level in EffortLevel::ALL {
            assert!(EffortLevel::Any.allows(level));
        }
    }

    #[test]
    fn parse_effort() {
        assert_eq!("Complex".parse::<EffortLevel>(), Ok(EffortLevel::Complex));
        assert_eq!(" any ".parse::<EffortLevel>(), Ok(EffortLevel::Any));
        assert!("extreme".parse::<EffortLevel>().is_err());
    }

    #[test]
    fn socket_change_needs_motherboard() {
        let (c, g, r) = (cpu("AM4", Some("DDR4")), gpu(3), ram(8));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let effort = cpu("AM5", None).assess(&build, &power());
        assert_eq!(effort.level, EffortLevel::Complex);
        assert_eq!(effort.required_parts, vec![RequiredPart::Motherboard]);
        assert_eq!(
            effort.warnings[0].to_string(),
            "Socket Mismatch: Requires a AM5 motherboard (current CPU is AM4)."
        );
    }

    #[test]
    fn cpu_memory_change_needs_ram() {
        let (c, g, r) = (cpu("AM5", Some("DDR5")), gpu(3), ram(8));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let effort = cpu("AM5", Some("DDR5")).assess(&build, &power());
        assert_eq!(effort.level, EffortLevel::Complex);
        assert_eq!(effort.required_parts, vec![RequiredPart::Ram]);
        assert_eq!(
            effort.warnings,
            vec![UpgradeWarning::MemoryMismatch {
                required: "DDR5".into(),
                selected: "DDR4".into()
            }]
        );

        let same = cpu("AM5", Some("DDR4, DDR5")).assess(&build, &power());
        assert_eq!(same.level, EffortLevel::Simple);
        assert!(same.required_parts.is_empty());
    }

    #[test]
    fn unknown_kit_type_warns_without_escalating() {
        let c = cpu("AM5", Some("DDR5"));
        let g = gpu(3);
        let r = Ram {
            name: "Mystery kit".into(),
            tier: 2,
            speed: Some("3600".into()),
            ..Ram::default()
        };
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let effort = cpu("AM5", Some("DDR5")).assess(&build, &power());
        assert_eq!(effort.level, EffortLevel::Simple);
        assert!(effort.required_parts.is_empty());
        assert_eq!(
            effort.warnings,
            vec![UpgradeWarning::MemoryMismatch {
                required: "DDR5".into(),
                selected: "Unknown DDR".into()
            }]
        );
        assert_eq!(
            effort.warnings[0].to_string(),
            "Compatibility Issue: This CPU requires DDR5 RAM, but you selected Unknown DDR"
        );
    }

    #[test]
    fn blank_catalog_fields_do_not_escalate() {
        let (c, g, r) = (cpu("AM4", Some("DDR4")), gpu(3), ram(8));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let parsed: Cpu =
            serde_json::from_str(r#"{"name":"Blank Chip","tier":4,"socket":"","ramType":""}"#).unwrap();
        let effort = parsed.assess(&build, &power());
        assert_eq!(effort.level, EffortLevel::Simple);
        assert!(effort.required_parts.is_empty());
        assert!(effort.warnings.is_empty());

        let built = Cpu {
            socket: Some(" ".into()),
            ram_type: Some(String::new()),
            ..cpu("AM5", None)
        };
        assert_eq!(built.assess(&build, &power()), UpgradeEffort::default());
    }

    #[test]
    fn missing_socket_is_not_a_mismatch() {
        let (c, g, r) = (cpu("AM4", None), gpu(3), ram(8));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let unknown = Cpu {
            socket: None,
            ..cpu("AM5", None)
        };
        assert_eq!(unknown.assess(&build, &power()).level, EffortLevel::Simple);
    }

    #[test]
    fn ram_against_selected_cpu() {
        let (c, g, r) = (cpu("AM5", Some("DDR5")), gpu(3), ram(12));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let ddr4 = ram(8).assess(&build, &power());
        assert_eq!(ddr4.level, EffortLevel::Complex);
        assert_eq!(ddr4.required_parts, vec![RequiredPart::CpuMotherboard]);
        assert_eq!(
            ddr4.warnings[0].to_string(),
            "Compatibility Issue: This RAM is not compatible with your selected CPU (DDR5)."
        );
        assert_eq!(ram(11).assess(&build, &power()).level, EffortLevel::Simple);
    }

    #[test]
    fn gpu_psu_escalation() {
        let (c, g, r) = (cpu("AM5", None), gpu(3), ram(12));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };

        let bigger = gpu(5).assess(&build, &power());
        assert_eq!(bigger.level, EffortLevel::Moderate);
        assert_eq!(bigger.required_parts, vec![RequiredPart::Psu]);
        assert_eq!(
            bigger.notes,
            vec!["Estimated PSU need: 650W (current estimate: 550W)".to_string()]
        );

        // equal wattage does not escalate
        let tie = gpu(4).assess(&build, &power());
        assert_eq!(tie.level, EffortLevel::Simple);
        assert!(tie.notes.is_empty());

        // unknown pairing: note only
        let unknown = gpu(6).assess(&build, &power());
        assert_eq!(unknown.level, EffortLevel::Simple);
        assert_eq!(unknown.notes, vec!["PSU check required for this upgrade".to_string()]);
    }

    #[test]
    fn high_power_warning_without_escalation() {
        let (c, g, r) = (cpu("AM5", None), gpu(7), ram(12));
        let build = SystemBuild { cpu: &c, gpu: &g, ram: &r };
        let effort = gpu(7).assess(&build, &power());
        assert_eq!(effort.level, EffortLevel::Simple);
        assert_eq!(effort.warnings, vec![UpgradeWarning::HighPower { watts: 1000 }]);
    }
}
