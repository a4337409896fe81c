//! Per-frame simulation step
//!
//! Order within a frame: shop actions, player movement, shop zone, player
//! captures, chain movement, patrol + delivery, spawner, assistant.

use glam::Vec2;

use super::animal::AnimalState;
use super::assistant::{Assistant, nearest_free};
use super::entity::Entity;
use super::rect::random_point_outside;
use super::state::{GameEvent, GameState, Leader};
use super::upgrades::UpgradeKind;
use crate::platform::HeldKeys;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional keys held at the start of the frame
    pub keys: HeldKeys,
    /// Shop buttons pressed since the last frame, in click order
    pub purchases: Vec<UpgradeKind>,
    /// Shop key pressed since the last frame
    pub toggle_shop_pin: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_secs += dt;

    if input.toggle_shop_pin {
        state.shop_pinned = !state.shop_pinned;
    }
    refresh_shop(state);
    // Buttons only exist while the panel is shown
    if state.shop_open {
        for &kind in &input.purchases {
            state.purchase(kind);
        }
    }

    move_player(state, &input.keys, dt);
    refresh_shop(state);

    capture_for_player(state);
    move_player_chain(state, dt);
    patrol_and_deliver(state, dt);
    run_spawner(state, dt);
    run_assistant(state, dt);
}

fn refresh_shop(state: &mut GameState) {
    state.shop_open = state.shop_pinned || state.shop_zone.contains(state.player.pos());
}

fn move_player(state: &mut GameState, keys: &HeldKeys, dt: f32) {
    if keys.any() {
        state.player.clear_target();
    }
    state.player.apply_intent(keys.intent(), dt, state.field.size);
    state.player.update(dt);
}

/// Free animals within reach join the chain, in population order, up to capacity
fn capture_for_player(state: &mut GameState) {
    let capacity = state.capacity();
    let leader = state.player.pos();
    let radius = state.config.capture.radius;

    for animal in state.animals.iter_mut() {
        if animal.is_following() {
            continue;
        }
        if state.followers.len() >= capacity {
            break;
        }
        if animal.pos().distance(leader) <= radius {
            animal.state = AnimalState::FollowingPlayer {
                index: state.followers.len(),
            };
            state.followers.push(animal.id);
            state.events.push(GameEvent::AnimalCaptured {
                id: animal.id,
                by: Leader::Player,
            });
            log::debug!("Animal {} joined the herd ({}/{})", animal.id, state.followers.len(), capacity);
        }
    }
}

/// Each follower walks toward the one ahead of it (the first toward the player)
fn move_player_chain(state: &mut GameState, dt: f32) {
    let speed = state.config.animal.follow_speed;
    let min_distance = state.config.animal.min_distance;
    let mut leader = state.player.pos();

    for &id in &state.followers {
        if let Some(animal) = state.animals.iter_mut().find(|a| a.id == id) {
            animal.move_towards(leader, dt, speed, min_distance);
            leader = animal.pos();
        }
    }
}

fn patrol_and_deliver(state: &mut GameState, dt: f32) {
    let yard = state.yard.rect();
    let excluded = yard.expanded(state.config.animal.radius);
    let bounds = state.field.size;
    let speed = state.config.animal.patrol_speed;
    let min_distance = state.config.animal.min_distance;

    for i in (0..state.animals.len()).rev() {
        let animal = &mut state.animals[i];
        if let AnimalState::Patrolling { target } = animal.state {
            let goal = match target {
                Some(t) => t,
                None => random_point_outside(&mut state.rng, bounds, &excluded),
            };
            animal.move_towards(goal, dt, speed, min_distance);
            let next = if animal.pos().distance(goal) <= min_distance {
                random_point_outside(&mut state.rng, bounds, &excluded)
            } else {
                goal
            };
            animal.state = AnimalState::Patrolling { target: Some(next) };
        }

        if yard.contains(animal.pos()) {
            deliver(state, i);
            continue;
        }
        state.animals[i].update(dt);
    }
}

/// Remove the animal at `index`, award score and drop it from its chain
fn deliver(state: &mut GameState, index: usize) {
    let animal = state.animals.remove(index);
    let award = state.score_per_delivery();
    state.score += award;

    match animal.state {
        AnimalState::FollowingPlayer { .. } => {
            state.followers.retain(|&id| id != animal.id);
            reindex_chain(state);
        }
        AnimalState::FollowingAssistant => {
            if state.assistant_follower == Some(animal.id) {
                state.assistant_follower = None;
            }
        }
        AnimalState::Patrolling { .. } => {}
    }

    state.events.push(GameEvent::AnimalDelivered {
        id: animal.id,
        score: award,
    });
    log::debug!("Animal {} delivered (+{}, score {})", animal.id, award, state.score);
}

fn reindex_chain(state: &mut GameState) {
    for (index, &id) in state.followers.iter().enumerate() {
        if let Some(animal) = state.animals.iter_mut().find(|a| a.id == id) {
            animal.state = AnimalState::FollowingPlayer { index };
        }
    }
}

fn run_spawner(state: &mut GameState, dt: f32) {
    let population = state.animals.len();
    if state.spawner.tick(dt, population, &mut state.rng) {
        let pos = state.random_open_point();
        let id = state.spawn_animal(pos);
        state.events.push(GameEvent::AnimalSpawned { id });
        log::debug!("Spawned animal {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    }
}

/// Seek the nearest free animal, claim it, walk it to the yard center
fn run_assistant(state: &mut GameState, dt: f32) {
    if !state.upgrades.assistant_hired {
        return;
    }
    if state.assistant.is_none() {
        let (ox, oy) = state.config.assistant.spawn_offset;
        let pos = state.player.pos() + Vec2::new(ox, oy);
        state.assistant = Some(Assistant::new(pos, &state.config.assistant));
        state.events.push(GameEvent::AssistantJoined);
        log::info!("Assistant joined at ({:.0}, {:.0})", pos.x, pos.y);
    }
    let Some(assistant) = state.assistant.as_mut() else {
        return;
    };

    match state.assistant_follower {
        None => {
            if let Some((index, dist)) = nearest_free(&state.animals, assistant.pos()) {
                let animal = &mut state.animals[index];
                assistant.set_target(animal.pos());
                if dist <= state.config.capture.radius {
                    animal.state = AnimalState::FollowingAssistant;
                    state.assistant_follower = Some(animal.id);
                    state.events.push(GameEvent::AnimalCaptured {
                        id: animal.id,
                        by: Leader::Assistant,
                    });
                    log::debug!("Assistant picked up animal {}", animal.id);
                }
            } else {
                assistant.clear_target();
            }
        }
        Some(id) => {
            assistant.set_target(state.yard.center());
            match state.animals.iter_mut().find(|a| a.id == id) {
                Some(animal) => {
                    animal.move_towards(
                        assistant.pos(),
                        dt,
                        state.config.animal.follow_speed,
                        state.config.animal.min_distance,
                    );
                }
                None => {
                    state.assistant_follower = None;
                    assistant.clear_target();
                }
            }
        }
    }

    assistant.update(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    const DT: f32 = 1.0 / 60.0;

    /// A session with no starting animals and a spawner that never fires
    fn empty_state() -> GameState {
        let mut config = GameConfig::default();
        config.spawn.count = 0;
        config.spawn.interval_min_sec = 1.0e6;
        config.spawn.interval_max_sec = 1.0e6;
        GameState::new(config, 12345)
    }

    #[test]
    fn test_free_animal_in_yard_is_delivered() {
        let mut state = empty_state();
        let inside = state.yard.center();
        let id = state.spawn_animal(inside);

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.animal(id).is_none());
        assert_eq!(state.score, 1);
        assert!(state.events.contains(&GameEvent::AnimalDelivered { id, score: 1 }));
    }

    #[test]
    fn test_capture_within_radius() {
        let mut state = empty_state();
        let id = state.spawn_animal(state.player.pos() + Vec2::new(40.0, 0.0));

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.followers, vec![id]);
        assert_eq!(
            state.animal(id).map(|a| a.state),
            Some(AnimalState::FollowingPlayer { index: 0 })
        );
    }

    #[test]
    fn test_no_capture_at_capacity() {
        let mut state = empty_state();
        let first = state.spawn_animal(state.player.pos() + Vec2::new(0.0, 30.0));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.followers, vec![first]);

        let second = state.spawn_animal(state.player.pos() + Vec2::new(40.0, 0.0));
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.followers.len(), 1);
        assert!(!state.animal(second).map(|a| a.is_following()).unwrap_or(true));
    }

    #[test]
    fn test_capacity_caps_same_frame_captures() {
        let mut state = empty_state();
        state.upgrades.capacity_level = 1; // two slots
        let p = state.player.pos();
        let ids: Vec<_> = (0..4)
            .map(|i| state.spawn_animal(p + Vec2::new(10.0 * i as f32, 5.0)))
            .collect();

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.followers, ids[..2].to_vec());
        assert!(!state.animal(ids[2]).unwrap().is_following());
    }

    #[test]
    fn test_chain_follows_leader() {
        let mut state = empty_state();
        state.upgrades.capacity_level = 1;
        let p = state.player.pos();
        let a = state.spawn_animal(p + Vec2::new(50.0, 0.0));
        let b = state.spawn_animal(p + Vec2::new(55.0, 0.0));
        tick(&mut state, &TickInput::default(), DT);

        let keys = HeldKeys {
            left: true,
            ..Default::default()
        };
        let input = TickInput {
            keys,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &input, DT);
        }
        let player_x = state.player.pos().x;
        let ax = state.animal(a).unwrap().pos().x;
        let bx = state.animal(b).unwrap().pos().x;
        assert!(player_x < ax && ax < bx);
    }

    #[test]
    fn test_chain_delivery_reindexes() {
        let mut state = empty_state();
        state.upgrades.capacity_level = 2;
        let p = state.player.pos();
        let ids: Vec<_> = (0..3)
            .map(|i| state.spawn_animal(p + Vec2::new(10.0 * i as f32, 0.0)))
            .collect();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.followers.len(), 3);

        // Teleport the middle follower into the yard
        let yard = state.yard.center();
        if let Some(a) = state.animals.iter_mut().find(|a| a.id == ids[1]) {
            a.transform.pos = yard;
        }
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.followers, vec![ids[0], ids[2]]);
        assert_eq!(state.animal(ids[2]).unwrap().follow_index(), Some(1));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_delivery_awards_score_per_level() {
        let mut state = empty_state();
        state.upgrades.score_per_level = 2;
        state.upgrades.capacity_level = 1;
        let yard = state.yard.center();
        let teleport = |state: &mut GameState, id: u32| {
            if let Some(a) = state.animals.iter_mut().find(|a| a.id == id) {
                a.transform.pos = yard;
            }
        };

        // Free animal
        let free = state.spawn_animal(yard);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 3);
        assert!(state.animal(free).is_none());
        assert!(state.followers.is_empty());
        assert!(state.drain_events().contains(&GameEvent::AnimalDelivered { id: free, score: 3 }));

        // Player chain
        let p = state.player.pos();
        let a = state.spawn_animal(p + Vec2::new(20.0, 0.0));
        let b = state.spawn_animal(p + Vec2::new(30.0, 0.0));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.followers, vec![a, b]);
        teleport(&mut state, b);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 6);
        assert!(state.animal(b).is_none());
        assert_eq!(state.followers, vec![a]);
        assert_eq!(state.animal(a).and_then(|x| x.follow_index()), Some(0));
        assert_eq!(state.assistant_follower, None);
        assert!(state.drain_events().contains(&GameEvent::AnimalDelivered { id: b, score: 3 }));

        // Assistant escort, far from the player
        state.upgrades.assistant_hired = true;
        state.assistant = Some(Assistant::new(Vec2::new(300.0, 600.0), &state.config.assistant));
        let c = state.spawn_animal(Vec2::new(310.0, 600.0));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.assistant_follower, Some(c));
        teleport(&mut state, c);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 9);
        assert!(state.animal(c).is_none());
        assert_eq!(state.assistant_follower, None);
        assert_eq!(state.followers, vec![a]);
        assert!(state.animal(a).is_some_and(|x| x.is_following()));
        assert!(state.drain_events().contains(&GameEvent::AnimalDelivered { id: c, score: 3 }));
    }

    #[test]
    fn test_assistant_idles_without_free_animals() {
        let mut state = empty_state();
        state.upgrades.assistant_hired = true;
        let id = state.spawn_animal(Vec2::new(300.0, 600.0));
        state.assistant = Some(Assistant::new(Vec2::new(300.0, 300.0), &state.config.assistant));
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.assistant.as_ref().is_some_and(|a| a.target().is_some()));

        // Last free animal gone: the assistant stops walking
        state.animals.retain(|a| a.id != id);
        tick(&mut state, &TickInput::default(), DT);
        let assistant = state.assistant.as_ref().unwrap();
        assert_eq!(assistant.target(), None);
        let before = assistant.pos();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.assistant.as_ref().unwrap().pos(), before);
    }

    #[test]
    fn test_keyboard_clears_click_target() {
        let mut state = empty_state();
        state.player.set_target(Vec2::new(0.0, 0.0));
        let input = TickInput {
            keys: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let before = state.player.pos();
        tick(&mut state, &input, 0.5);
        assert!(state.player.target().is_none());
        assert!((state.player.pos().x - (before.x + 110.0)).abs() < 1e-3);
    }

    #[test]
    fn test_purchase_needs_open_shop() {
        let mut state = empty_state();
        state.score = 5;
        let input = TickInput {
            purchases: vec![UpgradeKind::Capacity],
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.upgrades.capacity_level, 0);
        assert_eq!(state.score, 5);

        state.player.transform.pos = state.shop_zone.center();
        tick(&mut state, &input, DT);
        assert!(state.shop_open);
        assert_eq!(state.upgrades.capacity_level, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_shop_pin_toggle() {
        let mut state = empty_state();
        let pin = TickInput {
            toggle_shop_pin: true,
            ..Default::default()
        };
        tick(&mut state, &pin, DT);
        assert!(state.shop_open);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.shop_open);
        tick(&mut state, &pin, DT);
        assert!(!state.shop_open);
    }

    #[test]
    fn test_assistant_targets_nearest() {
        let mut state = empty_state();
        state.upgrades.assistant_hired = true;
        let start = state.player.pos() + Vec2::new(32.0, 32.0);
        // Keep both out of player capture range and assistant capture range
        let far = state.spawn_animal(start + Vec2::new(-300.0, 0.0));
        let near = state.spawn_animal(start + Vec2::new(-100.0, 0.0));

        tick(&mut state, &TickInput::default(), DT);

        let assistant = state.assistant.as_ref().unwrap();
        let near_pos = state.animal(near).unwrap().pos();
        let target = assistant.target().unwrap();
        assert!((target - near_pos).length() < 2.0);
        assert!(state.assistant_follower.is_none());
        assert!(state.animal(far).is_some());
        assert!(state.events.contains(&GameEvent::AssistantJoined));
    }

    #[test]
    fn test_assistant_escorts_to_yard() {
        let mut state = empty_state();
        state.upgrades.assistant_hired = true;
        // Park the player out of the way
        state.player.transform.pos = Vec2::new(100.0, 100.0);
        let id = state.spawn_animal(Vec2::new(700.0, 400.0));
        state.assistant = Some(Assistant::new(Vec2::new(690.0, 400.0), &state.config.assistant));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.assistant_follower, Some(id));
        assert_eq!(
            state.animal(id).map(|a| a.state),
            Some(AnimalState::FollowingAssistant)
        );

        let mut delivered = false;
        for _ in 0..60 * 20 {
            tick(&mut state, &TickInput::default(), DT);
            if state.animal(id).is_none() {
                delivered = true;
                break;
            }
        }
        assert!(delivered);
        assert!(state.assistant_follower.is_none());
        assert_eq!(state.score, 1);
        assert!(state.followers.is_empty());
    }

    #[test]
    fn test_spawner_stops_at_limit() {
        let mut config = GameConfig::default();
        config.spawn.count = 0;
        config.spawn.limit = 3;
        config.spawn.interval_min_sec = 0.1;
        config.spawn.interval_max_sec = 0.1;
        let mut state = GameState::new(config, 5);
        state.config.capture.radius = 0.0;

        let mut spawned = 0;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
            spawned += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::AnimalSpawned { .. }))
                .count();
            assert!(state.animals.len() <= 3);
        }
        assert!(spawned >= 3);
    }

    #[test]
    fn test_patrol_keeps_target_outside_yard() {
        let mut config = GameConfig::default();
        config.spawn.interval_min_sec = 1.0e6;
        config.spawn.interval_max_sec = 1.0e6;
        let mut state = GameState::new(config, 77);
        state.config.capture.radius = 0.0;
        let excluded = state.yard.rect().expanded(state.config.animal.radius);

        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), DT);
            for a in &state.animals {
                if let Some(t) = a.patrol_target() {
                    assert!(!excluded.contains(t));
                }
            }
        }
    }
}
