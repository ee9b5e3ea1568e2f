//! Randomized whole-pipeline check over the loaded catalogs.
//!
//! Each iteration draws a random build and advancement, then runs the
//! analysis once per effort level. Draws are seeded for reproducibility.

use crate::{Advancement, Advisor, EffortLevel, Preferences};
use advisor_core::SystemBuild;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ADVANCEMENTS: [Advancement; 4] = [
    Advancement::Steps(1),
    Advancement::Steps(2),
    Advancement::Steps(3),
    Advancement::Max,
];

/// Tallies for one effort level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub total: u64,
    pub no_products: u64,
    /// Analyses whose picks came from the escalated tier.
    pub fallback_tier_used: u64,
    /// Picks scoring at or below the part they replace. Must stay zero.
    pub downgrades: u64,
    /// Picks needing more effort than the level allows. Must stay zero.
    pub effort_violations: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    pub iterations: u64,
    pub seed: u64,
    pub levels: BTreeMap<EffortLevel, LevelStats>,
}

impl StressReport {
    pub fn total_downgrades(&self) -> u64 {
        self.levels.values().map(|s| s.downgrades).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.levels
            .values()
            .all(|s| s.downgrades == 0 && s.effort_violations == 0)
    }
}

pub fn run(advisor: &Advisor<'_>, iterations: u64, seed: u64) -> StressReport {
    let catalogs = advisor.catalogs();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut levels: BTreeMap<EffortLevel, LevelStats> = EffortLevel::ALL
        .into_iter()
        .map(|l| (l, LevelStats::default()))
        .collect();

    for _ in 0..iterations {
        // catalogs are never empty, so every draw succeeds
        let (Some(cpu), Some(gpu), Some(ram), Some(&advancement)) = (
            catalogs.cpus().choose(&mut rng),
            catalogs.gpus().choose(&mut rng),
            catalogs.rams().choose(&mut rng),
            ADVANCEMENTS.choose(&mut rng),
        ) else {
            break;
        };
        let build = SystemBuild { cpu, gpu, ram };
        let kind = advisor.compute_bottleneck(&build).upgrade_target();
        let current = advisor.current_score(&build, kind);

        for (&effort, stats) in levels.iter_mut() {
            let prefs = Preferences { advancement, effort };
            let rec = advisor.recommend_upgrade(&build, kind, &prefs);
            stats.total += 1;
            if rec.products.is_empty() {
                stats.no_products += 1;
            }
            if rec.escalated_tier.is_some() {
                stats.fallback_tier_used += 1;
            }
            for p in &rec.products {
                if p.score <= current {
                    stats.downgrades += 1;
                    tracing::warn!(%kind, pick = p.component.name(), score = p.score, current, "downgrade recommended");
                }
                if !effort.allows(p.effort.level) {
                    stats.effort_violations += 1;
                }
            }
        }
    }

    let report = StressReport {
        iterations,
        seed,
        levels,
    };
    tracing::info!(iterations, seed, downgrades = report.total_downgrades(), "stress run finished");
    report
}
