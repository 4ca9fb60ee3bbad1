//! Tool tiering: which execution tier(s) a tool is visible in.

/// A single execution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `L1FastTrack`.
    L1,
    /// `L3ReActEngine`.
    L3,
}

/// The set of tiers a tool belongs to (spec: "subset of `{L1,L3}`").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSet {
    l1: bool,
    l3: bool,
}

impl TierSet {
    /// Visible only in `L1`.
    pub const L1_ONLY: Self = Self { l1: true, l3: false };
    /// Visible only in `L3`. All meta-tools use this.
    pub const L3_ONLY: Self = Self { l1: false, l3: true };
    /// Visible in both tiers.
    pub const BOTH: Self = Self { l1: true, l3: true };

    /// Whether this set contains the given tier.
    #[must_use]
    pub fn contains(self, tier: Tier) -> bool {
        match tier {
            Tier::L1 => self.l1,
            Tier::L3 => self.l3,
        }
    }
}

/// How risky invoking a tool is. Informational today — surfaced for an
/// eventual approval layer that is out of scope for this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// Read-only, no side effects.
    Read,
    /// Suggests a change without applying it.
    Suggest,
    /// Writes state.
    Write,
    /// Irreversible or high-impact.
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_contains_each_tier() {
        assert!(TierSet::BOTH.contains(Tier::L1));
        assert!(TierSet::BOTH.contains(Tier::L3));
    }

    #[test]
    fn l3_only_excludes_l1() {
        assert!(!TierSet::L3_ONLY.contains(Tier::L1));
        assert!(TierSet::L3_ONLY.contains(Tier::L3));
    }
}
