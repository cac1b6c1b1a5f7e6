//! Bonus items: spawning at level reset and pickup after a safe landing

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{BonusAnchor, BonusItem, BonusKind, GameEvent, GameState};
use crate::consts::*;

/// Roll for at most one item of each kind
pub fn spawn_bonuses(state: &mut GameState) {
    state.bonuses.clear();

    if state.rng.random_bool(state.tuning.goal_bonus_chance.clamp(0.0, 1.0)) {
        spawn_fly(state);
    }
    if state.rng.random_bool(state.tuning.rider_bonus_chance.clamp(0.0, 1.0)) {
        spawn_hitchhiker(state);
    }
}

/// A fly in a random unclaimed goal slot
fn spawn_fly(state: &mut GameState) {
    let open: Vec<usize> = (0..GOAL_SLOTS).filter(|&i| !state.goals[i]).collect();
    let Some(&slot) = open.choose(&mut state.rng) else {
        return;
    };
    state.bonuses.push(BonusItem {
        kind: BonusKind::Fly,
        row: 0,
        col: GOAL_COLUMNS[slot] as f32,
        value: state.tuning.goal_bonus_value,
        anchor: BonusAnchor::GoalSlot(slot),
    });
}

/// A hitchhiker on a random platform that carries no predator
fn spawn_hitchhiker(state: &mut GameState) {
    let hosts: Vec<(u32, i32, f32, f32)> = state
        .platforms
        .iter()
        .filter(|p| !state.hosts_predator(p.id))
        .map(|p| (p.id, p.row, p.col, p.width))
        .collect();
    let Some(&(platform_id, row, col, width)) = hosts.choose(&mut state.rng) else {
        return;
    };
    let cells = width.floor().max(1.0) as u32;
    let offset = state.rng.random_range(0..cells) as f32;
    state.bonuses.push(BonusItem {
        kind: BonusKind::Hitchhiker,
        row,
        col: col + offset,
        value: state.tuning.rider_bonus_value,
        anchor: BonusAnchor::Platform {
            platform_id,
            offset,
        },
    });
}

/// Collect any item at the player's landing spot
pub fn collect_bonuses(state: &mut GameState, row: i32, col: f32) {
    let mut picked = Vec::new();
    state.bonuses.retain(|item| {
        let hit = item.row == row && (item.col - col).abs() <= PICKUP_TOLERANCE;
        if hit {
            picked.push((item.kind, item.value));
        }
        !hit
    });
    for (kind, points) in picked {
        state.score += points;
        state.push_event(GameEvent::BonusCollected { kind, points });
        log::debug!("Collected {:?} for {} points", kind, points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::reset_level;
    use crate::sim::state::{Platform, PlatformKind, Predator};
    use crate::tuning::Tuning;

    fn tuning(goal: f64, rider: f64) -> Tuning {
        Tuning {
            goal_bonus_chance: goal,
            rider_bonus_chance: rider,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_certain_spawn_gives_one_of_each() {
        let mut state = GameState::new(17, tuning(1.0, 1.0));
        reset_level(&mut state);
        let flies = state.bonuses.iter().filter(|b| b.kind == BonusKind::Fly).count();
        let riders = state
            .bonuses
            .iter()
            .filter(|b| b.kind == BonusKind::Hitchhiker)
            .count();
        assert_eq!(flies, 1);
        assert_eq!(riders, 1);
    }

    #[test]
    fn test_zero_chance_spawns_nothing() {
        let mut state = GameState::new(17, tuning(0.0, 0.0));
        reset_level(&mut state);
        assert!(state.bonuses.is_empty());
    }

    #[test]
    fn test_fly_only_in_open_slots() {
        let mut state = GameState::new(2, tuning(1.0, 0.0));
        for seed in 0..20 {
            state.rng = rand::SeedableRng::seed_from_u64(seed);
            state.goals = [true, true, false, true, true];
            spawn_bonuses(&mut state);
            assert_eq!(state.bonuses.len(), 1);
            assert_eq!(state.bonuses[0].anchor, BonusAnchor::GoalSlot(2));
            assert_eq!(state.bonuses[0].col, GOAL_COLUMNS[2] as f32);
        }

        state.goals = [true; GOAL_SLOTS];
        spawn_bonuses(&mut state);
        assert!(state.bonuses.is_empty());
    }

    #[test]
    fn test_hitchhiker_avoids_predator_hosts() {
        let mut state = GameState::new(4, tuning(0.0, 1.0));
        for id in 1..=2 {
            state.platforms.push(Platform {
                id,
                row: 1,
                col: id as f32 * 4.0,
                width: 3.0,
                speed: 1.0,
                kind: PlatformKind::Log,
                submerged: false,
                dive_timer: 0.0,
            });
        }
        state.predators.push(Predator {
            platform_id: 1,
            mouth_open: false,
            mouth_timer: 1.0,
        });
        for seed in 0..20 {
            state.rng = rand::SeedableRng::seed_from_u64(seed);
            spawn_bonuses(&mut state);
            assert_eq!(state.bonuses.len(), 1);
            let BonusAnchor::Platform { platform_id, offset } = state.bonuses[0].anchor else {
                panic!("hitchhiker must ride a platform");
            };
            assert_eq!(platform_id, 2);
            assert!((0.0..3.0).contains(&offset));
        }
    }

    #[test]
    fn test_collect_within_tolerance() {
        let mut state = GameState::new(4, tuning(0.0, 0.0));
        state.bonuses.push(BonusItem {
            kind: BonusKind::Hitchhiker,
            row: 3,
            col: 4.3,
            value: 200,
            anchor: BonusAnchor::Platform {
                platform_id: 1,
                offset: 0.0,
            },
        });

        collect_bonuses(&mut state, 2, 4.3);
        collect_bonuses(&mut state, 3, 5.0);
        assert_eq!(state.bonuses.len(), 1);
        assert_eq!(state.score, 0);

        collect_bonuses(&mut state, 3, 4.0);
        assert!(state.bonuses.is_empty());
        assert_eq!(state.score, 200);
        assert!(state.events.contains(&GameEvent::BonusCollected {
            kind: BonusKind::Hitchhiker,
            points: 200
        }));
    }
}
