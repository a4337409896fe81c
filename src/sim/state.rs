//! Game state and core simulation types
//!
//! The session world: exclusively owns every entity and both follower chains.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animal::Animal;
use super::assistant::Assistant;
use super::entity::{Entity, Field, Yard};
use super::player::Player;
use super::rect::{Rect, random_point_outside};
use super::spawner::Spawner;
use super::upgrades::{PurchaseOutcome, UpgradeKind, Upgrades};
use crate::config::GameConfig;

/// Who an animal was captured by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    Player,
    Assistant,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    AnimalCaptured { id: u32, by: Leader },
    AnimalDelivered { id: u32, score: u64 },
    AnimalSpawned { id: u32 },
    UpgradePurchased { kind: UpgradeKind, level: usize, cost: u64 },
    AssistantJoined,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub field: Field,
    pub yard: Yard,
    /// Standing in here opens the shop
    pub shop_zone: Rect,
    pub player: Player,
    /// Population, in spawn order
    pub animals: Vec<Animal>,
    /// Player's chain by animal id, in capture order
    pub followers: Vec<u32>,
    pub assistant: Option<Assistant>,
    pub assistant_follower: Option<u32>,
    pub spawner: Spawner,
    pub upgrades: Upgrades,
    pub score: u64,
    pub shop_open: bool,
    /// Keeps the shop open outside the zone (toggled by the shop key)
    pub shop_pinned: bool,
    /// Seconds simulated so far
    pub time_secs: f32,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session with the initial population placed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let size = Vec2::new(config.playfield.width, config.playfield.height);

        let field = Field::new(size.x, size.y);
        let yard = Yard::bottom_right(size, config.yard.width, config.yard.height, config.yard.margin);
        let shop_zone = Rect::new(
            size.x - config.shop.width - config.shop.inset,
            config.shop.inset,
            config.shop.width,
            config.shop.height,
        );
        let player = Player::new(size * 0.5, &config.player);
        let spawner = Spawner::new(&config.spawn, &mut rng);

        let mut state = Self {
            config,
            seed,
            rng,
            field,
            yard,
            shop_zone,
            player,
            animals: Vec::new(),
            followers: Vec::new(),
            assistant: None,
            assistant_follower: None,
            spawner,
            upgrades: Upgrades::default(),
            score: 0,
            shop_open: false,
            shop_pinned: false,
            time_secs: 0.0,
            events: Vec::new(),
            next_id: 1,
        };

        for _ in 0..state.config.spawn.count {
            let pos = state.random_open_point();
            state.spawn_animal(pos);
        }
        log::info!(
            "Session started (seed {}, {} animals)",
            seed,
            state.animals.len()
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random point on the field, clear of the yard by one animal radius
    pub fn random_open_point(&mut self) -> Vec2 {
        let excluded = self.yard.rect().expanded(self.config.animal.radius);
        random_point_outside(&mut self.rng, self.field.size, &excluded)
    }

    /// Add a free animal at `pos`; returns its id
    pub fn spawn_animal(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.animals.push(Animal::new(id, pos, self.config.animal.radius));
        id
    }

    pub fn animal(&self, id: u32) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    /// Current max player chain length
    pub fn capacity(&self) -> usize {
        self.upgrades.capacity(&self.config.upgrades)
    }

    pub fn score_per_delivery(&self) -> u64 {
        self.upgrades.score_per_delivery(&self.config.upgrades)
    }

    /// Buy one level of `kind` with the current score
    pub fn purchase(&mut self, kind: UpgradeKind) -> PurchaseOutcome {
        let outcome = self
            .upgrades
            .purchase(kind, &mut self.score, &self.config.upgrades);
        match outcome {
            PurchaseOutcome::Purchased { cost, level } => {
                log::info!("Bought {:?} level {} for {} (score now {})", kind, level, cost, self.score);
                self.events.push(GameEvent::UpgradePurchased { kind, level, cost });
            }
            PurchaseOutcome::Unaffordable { cost } => {
                log::debug!("{:?} costs {}, score is {}", kind, cost, self.score);
            }
            PurchaseOutcome::Maxed => {
                log::debug!("{:?} already maxed", kind);
            }
        }
        outcome
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// All entities in draw (insertion) order
    pub fn entities(&self) -> Vec<&dyn Entity> {
        let mut out: Vec<&dyn Entity> = Vec::with_capacity(self.animals.len() + 4);
        out.push(&self.field);
        out.push(&self.yard);
        out.extend(self.animals.iter().map(|a| a as &dyn Entity));
        out.push(&self.player);
        if let Some(assistant) = &self.assistant {
            out.push(assistant);
        }
        out
    }
}
