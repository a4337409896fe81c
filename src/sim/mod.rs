//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or platform
//! dependencies:
//! - Elapsed time comes in through `tick`
//! - Input arrives as an immutable `TickInput` snapshot
//! - Randomness comes from the session's seeded RNG only

pub mod animal;
pub mod assistant;
pub mod entity;
pub mod motion;
pub mod player;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use animal::{Animal, AnimalState};
pub use assistant::{Assistant, nearest_free};
pub use entity::{Entity, EntityKind, Field, Transform, Yard};
pub use motion::{Step, step_toward};
pub use player::Player;
pub use rect::{Rect, random_point_outside};
pub use spawner::Spawner;
pub use state::{GameEvent, GameState, Leader};
pub use tick::{TickInput, tick};
pub use upgrades::{PurchaseOutcome, UpgradeKind, Upgrades};
