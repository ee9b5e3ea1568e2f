#![deny(warnings)]

//! Upgrade advisor engine: bottleneck detection, effort classification and
//! ranked upgrade selection over immutable catalogs.

pub mod bottleneck;
pub mod effort;
pub mod select;
pub mod stress;

#[cfg(test)]
mod fixtures;

pub use bottleneck::{detect_bottleneck, BottleneckReport, SystemTiers, RAM_GOOD_ENOUGH_TIER};
pub use effort::{
    EffortLevel, ParseEffortError, RequiredPart, Upgrade, UpgradeEffort, UpgradeWarning,
    HIGH_POWER_PSU_WATTS, UNKNOWN_DDR,
};
pub use select::{next_available_tier, Advancement, ParseAdvancementError, MAX_PRODUCTS};

use advisor_core::{
    Catalogs, Component, ComponentKind, Cpu, Gpu, Ram, Selection, SelectionError, SystemBuild,
    TierMap,
};
use advisor_score::{ScoreModel, Scored};
use select::{select_upgrades, SelectContext};
use serde::{Deserialize, Serialize};

/// What the user is willing to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub advancement: Advancement,
    pub effort: EffortLevel,
}

/// One ranked pick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    /// 1-based position in the list.
    pub rank: usize,
    pub component: Component,
    pub display_tier: u8,
    pub score: f64,
    pub effort: UpgradeEffort,
}

/// Upgrade path for one component kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecommendation {
    pub kind: ComponentKind,
    pub current_tier: u8,
    /// Tier chosen from the advancement setting.
    pub target_tier: u8,
    /// Set when the target tier came up empty and the next tier had picks.
    pub escalated_tier: Option<u8>,
    /// Every tier searched, in order; at most two.
    pub searched_tiers: Vec<u8>,
    pub advancement: Advancement,
    pub effort: EffortLevel,
    pub products: Vec<RecommendedProduct>,
}

impl UpgradeRecommendation {
    /// Tier the products come from.
    pub fn final_tier(&self) -> u8 {
        self.escalated_tier.unwrap_or(self.target_tier)
    }
}

/// Full result of analyzing a selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub bottleneck: BottleneckReport,
    pub recommendation: UpgradeRecommendation,
}

/// Session context: borrowed catalogs plus everything derived from them once.
#[derive(Clone, Debug)]
pub struct Advisor<'c> {
    catalogs: &'c Catalogs,
    tiers: TierMap,
    model: ScoreModel,
    cpu_tiers: Vec<u8>,
    gpu_tiers: Vec<u8>,
    ram_tiers: Vec<u8>,
}

impl<'c> Advisor<'c> {
    pub fn new(catalogs: &'c Catalogs, tiers: TierMap) -> Self {
        let model = ScoreModel::from_catalogs(catalogs);
        let cpu_tiers = catalogs.display_tiers(ComponentKind::Cpu, &tiers);
        let gpu_tiers = catalogs.display_tiers(ComponentKind::Gpu, &tiers);
        let ram_tiers = catalogs.display_tiers(ComponentKind::Ram, &tiers);
        tracing::debug!(?cpu_tiers, ?gpu_tiers, ?ram_tiers, "advisor ready");
        Self {
            catalogs,
            tiers,
            model,
            cpu_tiers,
            gpu_tiers,
            ram_tiers,
        }
    }

    pub fn catalogs(&self) -> &'c Catalogs {
        self.catalogs
    }

    pub fn tier_map(&self) -> &TierMap {
        &self.tiers
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    /// Sorted distinct display tiers present in the catalog of `kind`.
    pub fn available_tiers(&self, kind: ComponentKind) -> &[u8] {
        match kind {
            ComponentKind::Cpu => &self.cpu_tiers,
            ComponentKind::Gpu => &self.gpu_tiers,
            ComponentKind::Ram => &self.ram_tiers,
        }
    }

    pub fn score(&self, component: &Component) -> f64 {
        self.model.score(component)
    }

    pub fn display_tier(&self, component: &Component) -> u8 {
        match component {
            Component::Cpu(c) => self.tiers.display_tier(c),
            Component::Gpu(g) => self.tiers.display_tier(g),
            Component::Ram(r) => self.tiers.display_tier(r),
        }
    }

    /// Score of the part of `kind` currently in `build`.
    pub fn current_score(&self, build: &SystemBuild<'_>, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::Cpu => build.cpu.score(&self.model),
            ComponentKind::Gpu => build.gpu.score(&self.model),
            ComponentKind::Ram => build.ram.score(&self.model),
        }
    }

    pub fn system_tiers(&self, build: &SystemBuild<'_>) -> SystemTiers {
        SystemTiers::new(
            self.tiers.display_tier(build.cpu),
            self.tiers.display_tier(build.gpu),
            self.tiers.display_tier(build.ram),
        )
    }

    pub fn compute_bottleneck(&self, build: &SystemBuild<'_>) -> BottleneckReport {
        BottleneckReport::from_tiers(self.system_tiers(build))
    }

    pub fn recommend_upgrade(
        &self,
        build: &SystemBuild<'_>,
        kind: ComponentKind,
        prefs: &Preferences,
    ) -> UpgradeRecommendation {
        match kind {
            ComponentKind::Cpu => self.recommend::<Cpu>(self.catalogs.cpus(), build, prefs),
            ComponentKind::Gpu => self.recommend::<Gpu>(self.catalogs.gpus(), build, prefs),
            ComponentKind::Ram => self.recommend::<Ram>(self.catalogs.rams(), build, prefs),
        }
    }

    /// Bottleneck plus an upgrade path for it; a balanced build gets a CPU path.
    pub fn analyze(&self, selection: &Selection, prefs: &Preferences) -> Result<Analysis, SelectionError> {
        let build = selection.complete()?;
        let bottleneck = self.compute_bottleneck(&build);
        let recommendation = self.recommend_upgrade(&build, bottleneck.upgrade_target(), prefs);
        Ok(Analysis {
            bottleneck,
            recommendation,
        })
    }

    fn recommend<T>(&self, catalog: &[T], build: &SystemBuild<'_>, prefs: &Preferences) -> UpgradeRecommendation
    where
        T: Upgrade + Clone + Into<Component>,
    {
        let available = self.available_tiers(T::KIND);
        let current_tier = self.tiers.display_tier(T::current(build));
        let target_tier = next_available_tier(current_tier, available, prefs.advancement);
        let ctx = SelectContext {
            model: &self.model,
            tiers: &self.tiers,
            power: self.catalogs.power(),
            build: *build,
            tolerance: prefs.effort,
        };

        let mut searched_tiers = vec![target_tier];
        let mut escalated_tier = None;
        let mut picks = select_upgrades(catalog, target_tier, &ctx);
        let top = available.last().copied().unwrap_or(target_tier);
        if picks.is_empty() && target_tier < top {
            let next = target_tier + 1;
            searched_tiers.push(next);
            picks = select_upgrades(catalog, next, &ctx);
            if !picks.is_empty() {
                escalated_tier = Some(next);
            }
        }
        tracing::debug!(
            kind = %T::KIND,
            current_tier,
            target_tier,
            ?escalated_tier,
            products = picks.len(),
            "upgrade path computed"
        );

        let products = picks
            .into_iter()
            .enumerate()
            .map(|(i, c)| RecommendedProduct {
                rank: i + 1,
                component: c.part.clone().into(),
                display_tier: c.display_tier,
                score: c.score,
                effort: c.effort,
            })
            .collect();
        UpgradeRecommendation {
            kind: T::KIND,
            current_tier,
            target_tier,
            escalated_tier,
            searched_tiers,
            advancement: prefs.advancement,
            effort: prefs.effort,
            products,
        }
    }
}
