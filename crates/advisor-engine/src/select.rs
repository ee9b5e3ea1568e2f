//! Target-tier selection and candidate filtering.

use crate::effort::{EffortLevel, Upgrade, UpgradeEffort};
use advisor_core::{PowerTable, SystemBuild, TierMap};
use advisor_score::ScoreModel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Picks returned per recommendation.
pub const MAX_PRODUCTS: usize = 5;

/// How far up the tier list to go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AdvancementRepr", into = "AdvancementRepr")]
pub enum Advancement {
    /// Move this many available tiers up.
    Steps(u32),
    /// Jump to the best tier in the catalog.
    Max,
}

impl Default for Advancement {
    fn default() -> Self {
        Advancement::Steps(1)
    }
}

impl Advancement {
    /// Upgrade size wording used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Advancement::Max => "Extreme",
            Advancement::Steps(3) => "Large",
            Advancement::Steps(2) => "Medium",
            Advancement::Steps(_) => "Small",
        }
    }
}

impl fmt::Display for Advancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advancement::Steps(n) => write!(f, "{n}"),
            Advancement::Max => f.write_str("max"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid advancement '{0}', expected a positive step count or 'max'")]
pub struct ParseAdvancementError(pub String);

impl FromStr for Advancement {
    type Err = ParseAdvancementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("max") {
            return Ok(Advancement::Max);
        }
        match t.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Advancement::Steps(n)),
            _ => Err(ParseAdvancementError(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum AdvancementRepr {
    Steps(u32),
    Text(String),
}

impl TryFrom<AdvancementRepr> for Advancement {
    type Error = ParseAdvancementError;

    fn try_from(repr: AdvancementRepr) -> Result<Self, Self::Error> {
        match repr {
            AdvancementRepr::Steps(0) => Err(ParseAdvancementError("0".to_string())),
            AdvancementRepr::Steps(n) => Ok(Advancement::Steps(n)),
            AdvancementRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Advancement> for AdvancementRepr {
    fn from(a: Advancement) -> Self {
        match a {
            Advancement::Steps(n) => AdvancementRepr::Steps(n),
            Advancement::Max => AdvancementRepr::Text("max".to_string()),
        }
    }
}

/// Tier to shop in, given the current display tier and the sorted distinct
/// display tiers of the catalog.
///
/// Steps count positions in `available`, starting from the first tier at or
/// above `current`, and clamp at the top. With no tier at or above `current`
/// the lowest tier is returned. An empty list leaves `current` unchanged.
pub fn next_available_tier(current: u8, available: &[u8], advancement: Advancement) -> u8 {
    let (Some(&lowest), Some(&highest)) = (available.first(), available.last()) else {
        return current;
    };
    let steps = match advancement {
        Advancement::Max => return highest,
        Advancement::Steps(n) => n as usize,
    };
    match available.iter().position(|&t| t >= current) {
        None => lowest,
        Some(index) => available
            .get(index.saturating_add(steps))
            .copied()
            .unwrap_or(highest),
    }
}

/// Shared inputs for filtering one kind's catalog.
#[derive(Clone, Copy, Debug)]
pub struct SelectContext<'a> {
    pub model: &'a ScoreModel,
    pub tiers: &'a TierMap,
    pub power: &'a PowerTable,
    pub build: SystemBuild<'a>,
    pub tolerance: EffortLevel,
}

/// A catalog entry that passed every filter.
#[derive(Clone, Debug)]
pub struct Candidate<'c, T> {
    pub part: &'c T,
    pub display_tier: u8,
    pub score: f64,
    pub effort: UpgradeEffort,
}

/// Strict upgrades of the build's current part found in `target`, filtered by
/// effort tolerance, best first, at most [`MAX_PRODUCTS`].
pub fn select_upgrades<'c, T: Upgrade>(
    catalog: &'c [T],
    target: u8,
    ctx: &SelectContext<'_>,
) -> Vec<Candidate<'c, T>> {
    let current_score = T::current(&ctx.build).score(ctx.model);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut picks: Vec<Candidate<'c, T>> = catalog
        .iter()
        .filter(|p| ctx.tiers.display_tier(*p) == target)
        .filter(|&p| !T::DEDUPE_BY_NAME || seen.insert(p.name()))
        .filter_map(|p| {
            let score = p.score(ctx.model);
            (score > current_score).then_some((p, score))
        })
        .filter_map(|(p, score)| {
            let effort = p.assess(&ctx.build, ctx.power);
            ctx.tolerance.allows(effort.level).then(|| Candidate {
                part: p,
                display_tier: target,
                score,
                effort,
            })
        })
        .collect();
    picks.sort_by(|a, b| b.score.total_cmp(&a.score));
    picks.truncate(MAX_PRODUCTS);
    tracing::trace!(kind = %T::KIND, target, kept = picks.len(), "candidates selected");
    picks
}
