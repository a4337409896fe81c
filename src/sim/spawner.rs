//! Timed, randomized-interval animal spawner

use rand::Rng;

use crate::config::SpawnConfig;

/// Accumulates frame time and fires once per redrawn interval
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Seconds since the last spawn
    pub timer: f32,
    /// Seconds until the next spawn is due
    pub next_spawn_in: f32,
    interval_min: f32,
    interval_max: f32,
    limit: usize,
}

impl Spawner {
    pub fn new<R: Rng>(config: &SpawnConfig, rng: &mut R) -> Self {
        let mut spawner = Self {
            timer: 0.0,
            next_spawn_in: 0.0,
            interval_min: config.interval_min_sec,
            interval_max: config.interval_max_sec,
            limit: config.limit,
        };
        spawner.next_spawn_in = spawner.random_interval(rng);
        spawner
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Uniform in `[min, max]` seconds
    pub fn random_interval<R: Rng>(&self, rng: &mut R) -> f32 {
        self.interval_min + rng.random::<f32>() * (self.interval_max - self.interval_min)
    }

    /// Advance by `dt`; returns true when exactly one animal should spawn now
    ///
    /// While `population` is at the limit the timer keeps running, so the
    /// next spawn fires as soon as a delivery frees a slot. No catch-up: a
    /// long frame still yields at most one spawn.
    pub fn tick<R: Rng>(&mut self, dt: f32, population: usize, rng: &mut R) -> bool {
        self.timer += dt;
        if self.timer >= self.next_spawn_in && population < self.limit {
            self.timer = 0.0;
            self.next_spawn_in = self.random_interval(rng);
            return true;
        }
        false
    }
}
