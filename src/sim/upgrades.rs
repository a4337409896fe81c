//! Shop economy: score-gated upgrade tracks
//!
//! Every track has a level table and a cost table indexed by level. Buying
//! advances exactly one level and is a silent no-op when the score is short
//! or the track is exhausted.

use crate::config::UpgradeTables;

/// Purchasable upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    /// Maximum length of the player's follower chain
    Capacity,
    /// Score awarded per delivered animal
    ScorePer,
    /// Spawn rate multiplier (tracked, not applied to the spawner)
    SpawnRate,
    /// One-time assistant hire
    Assistant,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Capacity,
        UpgradeKind::ScorePer,
        UpgradeKind::Assistant,
        UpgradeKind::SpawnRate,
    ];
}

/// Result of a purchase attempt; none of these are errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Cost deducted, track now at `level` (1 for the assistant hire)
    Purchased { cost: u64, level: usize },
    Unaffordable { cost: u64 },
    /// Track at its last level, or assistant already hired
    Maxed,
}

/// Current level of each track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upgrades {
    pub capacity_level: usize,
    pub score_per_level: usize,
    pub spawn_rate_level: usize,
    pub assistant_hired: bool,
}

impl Upgrades {
    /// Max player chain length at the current capacity level
    pub fn capacity(&self, tables: &UpgradeTables) -> usize {
        tables.capacity_levels[self.capacity_level]
    }

    /// Score per delivery at the current level
    pub fn score_per_delivery(&self, tables: &UpgradeTables) -> u64 {
        tables.score_per_levels[self.score_per_level]
    }

    pub fn spawn_rate_multiplier(&self, tables: &UpgradeTables) -> f32 {
        tables.spawn_rate_levels[self.spawn_rate_level]
    }

    pub fn level(&self, kind: UpgradeKind) -> usize {
        match kind {
            UpgradeKind::Capacity => self.capacity_level,
            UpgradeKind::ScorePer => self.score_per_level,
            UpgradeKind::SpawnRate => self.spawn_rate_level,
            UpgradeKind::Assistant => usize::from(self.assistant_hired),
        }
    }

    /// Level index the next purchase would reach, `None` when exhausted
    pub fn next_level(&self, kind: UpgradeKind, tables: &UpgradeTables) -> Option<usize> {
        let len = match kind {
            UpgradeKind::Capacity => tables.capacity_levels.len(),
            UpgradeKind::ScorePer => tables.score_per_levels.len(),
            UpgradeKind::SpawnRate => tables.spawn_rate_levels.len(),
            UpgradeKind::Assistant => 2,
        };
        let next = self.level(kind) + 1;
        (next < len).then_some(next)
    }

    /// Price of the next level, `None` when exhausted
    pub fn next_cost(&self, kind: UpgradeKind, tables: &UpgradeTables) -> Option<u64> {
        let next = self.next_level(kind, tables)?;
        Some(match kind {
            UpgradeKind::Capacity => tables.capacity_costs[next],
            UpgradeKind::ScorePer => tables.score_per_costs[next],
            UpgradeKind::SpawnRate => tables.spawn_rate_costs[next],
            UpgradeKind::Assistant => tables.assistant_cost,
        })
    }

    /// Try to buy one level of `kind` with `score`
    pub fn purchase(
        &mut self,
        kind: UpgradeKind,
        score: &mut u64,
        tables: &UpgradeTables,
    ) -> PurchaseOutcome {
        let (Some(level), Some(cost)) = (self.next_level(kind, tables), self.next_cost(kind, tables))
        else {
            return PurchaseOutcome::Maxed;
        };
        if *score < cost {
            return PurchaseOutcome::Unaffordable { cost };
        }

        *score = score.saturating_sub(cost);
        match kind {
            UpgradeKind::Capacity => self.capacity_level = level,
            UpgradeKind::ScorePer => self.score_per_level = level,
            UpgradeKind::SpawnRate => self.spawn_rate_level = level,
            UpgradeKind::Assistant => self.assistant_hired = true,
        }
        PurchaseOutcome::Purchased { cost, level }
    }
}
