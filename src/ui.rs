//! HUD, shop and menu text
//!
//! Pure view data: the host copies these strings into the DOM.

use crate::config::UpgradeTables;
use crate::sim::{GameState, UpgradeKind, Upgrades};

pub const MENU_TITLE: &str = "Herdsman";
pub const MENU_RULES: &str =
    "Move: WASD/Arrows\nLead sheep to the corral\nBuy upgrades in the top-right shop";

pub fn mute_icon(muted: bool) -> &'static str {
    if muted { "🔇" } else { "🔊" }
}

/// Score line plus mute toggle icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub score_text: String,
    pub mute_icon: &'static str,
}

impl HudView {
    pub fn new(score: u64, muted: bool) -> Self {
        Self {
            score_text: format!("Score: {}", score),
            mute_icon: mute_icon(muted),
        }
    }
}

/// Current and next value of a level table; the next index stops at the last entry
fn current_and_next<T: Copy>(levels: &[T], costs: &[u64], level: usize) -> Option<(T, T, u64)> {
    let last = levels.len().checked_sub(1)?;
    let next = (level + 1).min(last);
    Some((*levels.get(level)?, levels[next], *costs.get(next)?))
}

/// Text for every shop button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopLabels {
    pub score: String,
    pub capacity: String,
    pub score_per: String,
    pub assistant: String,
    pub spawn_rate: String,
}

impl ShopLabels {
    pub fn new(upgrades: &Upgrades, tables: &UpgradeTables, score: u64) -> Self {
        let capacity = current_and_next(&tables.capacity_levels, &tables.capacity_costs, upgrades.capacity_level)
            .map(|(cur, next, cost)| format!("Capacity: {} → {}  (cost: {})", cur, next, cost))
            .unwrap_or_default();
        let score_per = current_and_next(&tables.score_per_levels, &tables.score_per_costs, upgrades.score_per_level)
            .map(|(cur, next, cost)| format!("Score per sheep: {} → {}  (cost: {})", cur, next, cost))
            .unwrap_or_default();
        let spawn_rate = current_and_next(&tables.spawn_rate_levels, &tables.spawn_rate_costs, upgrades.spawn_rate_level)
            .map(|(cur, next, cost)| format!("Spawn rate: x{} → x{}  (cost: {})", cur, next, cost))
            .unwrap_or_default();
        let assistant = if upgrades.assistant_hired {
            "Assistant: hired".to_string()
        } else {
            format!("Hire assistant (cost: {})", tables.assistant_cost)
        };

        Self {
            score: format!("Score: {}", score),
            capacity,
            score_per,
            assistant,
            spawn_rate,
        }
    }

    pub fn from_state(state: &GameState) -> Self {
        Self::new(&state.upgrades, &state.config.upgrades, state.score)
    }

    pub fn label(&self, kind: UpgradeKind) -> &str {
        match kind {
            UpgradeKind::Capacity => &self.capacity,
            UpgradeKind::ScorePer => &self.score_per,
            UpgradeKind::SpawnRate => &self.spawn_rate,
            UpgradeKind::Assistant => &self.assistant,
        }
    }
}

/// DOM id of the shop button for each track
pub fn button_id(kind: UpgradeKind) -> &'static str {
    match kind {
        UpgradeKind::Capacity => "buy-capacity",
        UpgradeKind::ScorePer => "buy-score",
        UpgradeKind::Assistant => "hire-assistant",
        UpgradeKind::SpawnRate => "buy-spawn",
    }
}
