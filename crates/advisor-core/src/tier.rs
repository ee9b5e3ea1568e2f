//! Raw catalog tier to display tier mapping.
//!
//! Display tiers are what get compared across component kinds. The shipped
//! table is the identity, but callers only ever go through [`TierMap`], so a
//! remap (for example pulling GPUs half a bucket down) needs no caller change.

use crate::{ComponentKind, Part};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw tier -> display tier for one component kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierMapping(BTreeMap<u8, u8>);

impl TierMapping {
    /// 1->1 ... 7->7.
    pub fn identity() -> Self {
        Self((1..=7).map(|t| (t, t)).collect())
    }

    pub fn from_pairs<I: IntoIterator<Item = (u8, u8)>>(pairs: I) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Display tier for a raw tier. Unmapped tiers pass through unchanged.
    pub fn display(&self, raw: u8) -> u8 {
        self.0.get(&raw).copied().unwrap_or(raw)
    }

    /// Inverse lookup: exact match first, otherwise the raw tier whose display
    /// value is closest. Ties keep the lowest raw tier.
    pub fn original(&self, display: u8) -> u8 {
        if let Some((&raw, _)) = self.0.iter().find(|(_, &mapped)| mapped == display) {
            return raw;
        }
        let mut closest: Option<(u8, u8)> = None;
        for (&raw, &mapped) in &self.0 {
            let diff = mapped.abs_diff(display);
            match closest {
                Some((_, best)) if diff >= best => {}
                _ => closest = Some((raw, diff)),
            }
        }
        closest.map(|(raw, _)| raw).unwrap_or(display)
    }
}

impl Default for TierMapping {
    fn default() -> Self {
        Self::identity()
    }
}

/// Per-kind tier mappings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierMap {
    #[serde(default)]
    pub cpu: TierMapping,
    #[serde(default)]
    pub gpu: TierMapping,
    #[serde(default)]
    pub ram: TierMapping,
}

impl TierMap {
    pub fn for_kind(&self, kind: ComponentKind) -> &TierMapping {
        match kind {
            ComponentKind::Cpu => &self.cpu,
            ComponentKind::Gpu => &self.gpu,
            ComponentKind::Ram => &self.ram,
        }
    }

    /// Display tier of a catalog record.
    pub fn display_tier<P: Part>(&self, part: &P) -> u8 {
        self.for_kind(P::KIND).display(part.tier())
    }

    pub fn original_tier(&self, display: u8, kind: ComponentKind) -> u8 {
        self.for_kind(kind).original(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gpu;
    use proptest::prelude::*;

    #[test]
    fn unmapped_tier_passes_through() {
        let m = TierMapping::from_pairs([(1, 2), (2, 3)]);
        assert_eq!(m.display(1), 2);
        assert_eq!(m.display(9), 9);
    }

    #[test]
    fn original_prefers_exact_then_closest() {
        let m = TierMapping::from_pairs([(1, 1), (2, 3), (3, 5), (4, 7)]);
        assert_eq!(m.original(5), 3);
        // 4 is equidistant from 3 (raw 2) and 5 (raw 3); the lower raw tier wins.
        assert_eq!(m.original(4), 2);
        assert_eq!(m.original(20), 4);
    }

    #[test]
    fn original_on_duplicate_values_takes_first() {
        let m = TierMapping::from_pairs([(1, 2), (2, 2), (3, 4)]);
        assert_eq!(m.original(2), 1);
    }

    #[test]
    fn empty_mapping_is_fail_open() {
        let m = TierMapping::from_pairs([]);
        assert_eq!(m.display(4), 4);
        assert_eq!(m.original(4), 4);
    }

    #[test]
    fn kind_specific_remap() {
        let map = TierMap {
            gpu: TierMapping::from_pairs([(6, 5)]),
            ..TierMap::default()
        };
        let gpu = Gpu {
            name: "Card".into(),
            tier: 6,
            ..Gpu::default()
        };
        assert_eq!(map.display_tier(&gpu), 5);
        assert_eq!(map.original_tier(5, ComponentKind::Gpu), 6);
        assert_eq!(map.original_tier(6, ComponentKind::Cpu), 6);
    }

    proptest! {
        #[test]
        fn identity_display_is_raw(raw in 1u8..=7) {
            let map = TierMap::default();
            for kind in ComponentKind::ALL {
                prop_assert_eq!(map.for_kind(kind).display(raw), raw);
                prop_assert_eq!(map.original_tier(raw, kind), raw);
            }
        }
    }
}
