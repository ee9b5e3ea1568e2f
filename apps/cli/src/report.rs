//! Plain-text rendering of analyses and stress runs.

use advisor_catalog::RamLabel;
use advisor_core::{Component, ComponentKind, MAX_TIER};
use advisor_engine::stress::StressReport;
use advisor_engine::{Analysis, BottleneckReport, RecommendedProduct, UpgradeRecommendation};
use std::fmt::{self, Display, Formatter};

pub const NO_PRODUCTS: &str = "No verified upgrades available for the selected effort level. \
Consider a larger upgrade size or higher effort, or check specifications manually.";

pub struct TextReport<'a>(pub &'a Analysis);

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_bottleneck(f, &self.0.bottleneck)?;
        writeln!(f)?;
        write_recommendation(f, &self.0.recommendation)?;
        writeln!(f)?;
        write_next_steps(f, &self.0.recommendation)
    }
}

fn write_bottleneck(f: &mut Formatter<'_>, report: &BottleneckReport) -> fmt::Result {
    let t = report.tiers;
    writeln!(f, "System Analysis")?;
    writeln!(f, "  Tiers: CPU {} | GPU {} | RAM {}", t.cpu, t.gpu, t.ram)?;
    if report.is_uniform() {
        writeln!(f, "  System Perfectly Balanced")?;
        return writeln!(f, "  Your system is balanced.");
    }
    writeln!(f, "  Your system isn't fully balanced.")?;
    match report.bottleneck {
        Some(kind) => {
            writeln!(f, "  Bottleneck: {kind}")?;
            writeln!(
                f,
                "  Your {kind} is limiting performance. Upgrading it will give the most noticeable improvement."
            )
        }
        None => {
            let low: Vec<_> = report.underpowered().iter().map(|k| k.as_str()).collect();
            writeln!(f, "  Lowest tier: {}", low.join(", "))?;
            writeln!(f, "  No single part stands out; starting with the {}.", report.upgrade_target())
        }
    }
}

fn plural(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Cpu => "CPUs",
        ComponentKind::Gpu => "GPUs",
        ComponentKind::Ram => "RAM",
    }
}

fn write_recommendation(f: &mut Formatter<'_>, rec: &UpgradeRecommendation) -> fmt::Result {
    let size = rec.advancement.label();
    writeln!(f, "Recommended Upgrade")?;
    writeln!(f, "  {size} upgrade for {} (tier {} -> {})", rec.kind, rec.current_tier, rec.target_tier)?;
    writeln!(f, "  Effort filter: {}", rec.effort.label())?;
    if let Some(tier) = rec.escalated_tier {
        writeln!(f, "  Nothing qualified in tier {}; showing tier {tier} instead.", rec.target_tier)?;
    }
    writeln!(f)?;
    writeln!(f, "Top {} for a {} upgrade", plural(rec.kind), size.to_lowercase())?;
    if rec.products.is_empty() {
        return writeln!(f, "  {NO_PRODUCTS}");
    }
    rec.products.iter().try_for_each(|p| write_product(f, p))
}

fn write_next_steps(f: &mut Formatter<'_>, rec: &UpgradeRecommendation) -> fmt::Result {
    writeln!(f, "What's Next?")?;
    if rec.final_tier() >= MAX_TIER {
        writeln!(f, "  You're reaching the top end!")?;
        writeln!(
            f,
            "  Your system will be at peak performance. Further upgrades would be for cutting-edge features or specific use cases."
        )
    } else {
        writeln!(
            f,
            "  After upgrading your {}, the next bottleneck will likely be a different component.",
            rec.kind
        )?;
        writeln!(f, "  Consider planning your next upgrade path to maintain system balance.")
    }
}

fn or_na<T: Display>(v: Option<T>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn write_product(f: &mut Formatter<'_>, p: &RecommendedProduct) -> fmt::Result {
    writeln!(f, "  #{} Pick  {}  (tier {}, score {:.3})", p.rank, p.component.name(), p.display_tier, p.score)?;
    let level = p.effort.level.label().trim_end_matches(" effort");
    writeln!(f, "     Effort: {level}")?;
    match &p.component {
        Component::Cpu(c) => writeln!(
            f,
            "     Socket: {} | Cores: {} | Boost Clock: {} | TDP: {}",
            or_na(c.socket.as_deref()),
            or_na(c.core_count),
            or_na(c.boost_clock_ghz.map(|g| format!("{g:.2} GHz"))),
            or_na(c.tdp_w.map(|w| format!("{w}W"))),
        )?,
        Component::Gpu(g) => writeln!(
            f,
            "     Chipset: {} | VRAM: {} | Boost Clock: {} | TDP: {}",
            or_na(g.chipset.as_deref()),
            or_na(g.memory_gb.map(|m| format!("{m}GB"))),
            or_na(g.boost_clock_mhz.map(|m| format!("{m} MHz"))),
            or_na(g.tdp_w.map(|w| format!("{w}W"))),
        )?,
        Component::Ram(r) => writeln!(
            f,
            "     {} | Latency: {}",
            RamLabel(r),
            or_na(r.cas_latency.map(|c| format!("CAS {c}"))),
        )?,
    }
    if !p.effort.required_parts.is_empty() {
        let parts: Vec<_> = p.effort.required_parts.iter().map(|r| r.to_string()).collect();
        writeln!(f, "     Additional parts likely needed: {}", parts.join(", "))?;
    }
    for note in &p.effort.notes {
        writeln!(f, "     Note: {note}")?;
    }
    for warning in &p.effort.warnings {
        writeln!(f, "     Warning: {warning}")?;
    }
    Ok(())
}

pub struct StressText<'a>(pub &'a StressReport);

impl Display for StressText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "Stress run: {} iterations per effort level (seed {})", r.iterations, r.seed)?;
        for (level, s) in &r.levels {
            writeln!(f, "  {}", level.label())?;
            writeln!(f, "    Total cases: {}", s.total)?;
            writeln!(f, "    No products found: {}", s.no_products)?;
            writeln!(f, "    Fallback tier used: {}", s.fallback_tier_used)?;
            writeln!(f, "    Downgrades: {}", s.downgrades)?;
            writeln!(f, "    Effort violations: {}", s.effort_violations)?;
        }
        Ok(())
    }
}
