//! Per-frame simulation tick
//!
//! One call advances the game by exactly one frame. Order:
//! spawn check, player movement, falling/catch/cull, feedback ageing.

use super::effects::resolve;
use super::input::InputState;
use super::spawner::maybe_spawn;
use super::state::{GameCore, GameEvent};

/// Advance the game by one tick.
///
/// `now_ms` is the driver's monotonic clock, read once per frame. Does
/// nothing once the game is over.
pub fn tick(core: &mut GameCore, input: &InputState, now_ms: f64) {
    if core.state.is_over {
        return;
    }

    core.time_ticks += 1;

    // Spawn at most one character per tick
    let elapsed = core.spawn_timer.elapsed(now_ms);
    if let Some(character) = maybe_spawn(
        elapsed,
        core.tuning.spawn_interval_ms,
        &core.tuning,
        &mut core.rng,
    ) {
        core.spawn_timer.mark(now_ms);
        let kind = character.kind;
        let id = core.insert_character(character);
        log::debug!("Spawned {:?} #{} at tick {}", kind, id, core.time_ticks);
    }

    core.player.step(input, core.tuning.player_max_x());
    core.player.advance_pose();

    for character in &mut core.characters {
        character.fall();
    }

    resolve_catches(core);
    cull_missed(core);

    core.feedback.tick();
}

/// Resolve every character overlapping the player, newest first, and remove
/// them. Stops resolving as soon as a catch ends the game.
fn resolve_catches(core: &mut GameCore) {
    let player_box = core.player.bounds();
    let caught: Vec<usize> = (0..core.characters.len())
        .rev()
        .filter(|&i| core.characters[i].bounds().overlaps(&player_box))
        .collect();

    if caught.is_empty() {
        return;
    }

    let mut consumed = vec![false; core.characters.len()];
    for i in caught {
        if core.state.is_over {
            break;
        }

        let character = &core.characters[i];
        let (delta, feedback) = resolve(
            character,
            &core.state,
            &core.player,
            core.tuning.feedback_ticks,
            &mut core.rng,
        );
        let kind = character.kind;
        consumed[i] = true;

        log::debug!("Caught {:?} ({}): {:?}", kind, kind.name(), delta);
        let ended = core.state.apply(delta);
        core.feedback.enqueue(feedback);
        core.player.react(core.tuning.react_ticks);
        core.events.push(GameEvent::Caught(kind));

        if ended {
            log::info!("Game over! Final score: {}", core.state.score);
            core.events.push(GameEvent::GameOver {
                score: core.state.score,
            });
        }
    }

    let mut index = 0;
    core.characters.retain(|_| {
        let keep = !consumed[index];
        index += 1;
        keep
    });
}

/// Drop characters that fell past the bottom edge. Missing is silent.
fn cull_missed(core: &mut GameCore) {
    let field_height = core.tuning.field_height;
    let events = &mut core.events;
    core.characters.retain(|character| {
        if character.is_below(field_height) {
            events.push(GameEvent::Missed(character.kind));
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::input::Action;
    use crate::sim::state::{CharacterKind, Facing, FallingCharacter, GameState, Pose};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Core whose spawn timer has just fired, so no spawn happens for a while
    fn quiet_core(tuning: Tuning) -> GameCore {
        let mut core = GameCore::new(tuning, 12345);
        core.spawn_timer.mark(0.0);
        core
    }

    /// Place a character of `kind` so it overlaps the player after one fall step
    fn drop_on_player(core: &mut GameCore, kind: CharacterKind) -> u32 {
        let player = core.player().clone();
        core.insert_character(FallingCharacter {
            id: 0,
            pos: Vec2::new(player.pos.x + 10.0, player.pos.y - 20.0),
            size: Vec2::splat(CHARACTER_SIZE),
            fall_speed: 3.0,
            kind,
        })
    }

    #[test]
    fn test_move_right_scenario() {
        let mut core = quiet_core(Tuning::with_field(600.0, 600.0));
        core.player.pos.x = 0.0;
        core.player.facing = Facing::Left;

        tick(&mut core, &InputState::holding(&[Action::MoveRight]), 16.0);
        assert_eq!(core.player().pos.x, 8.0);
        assert_eq!(core.player().facing, Facing::Right);
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut core = GameCore::new(Tuning::default(), 1);
        tick(&mut core, &InputState::default(), 0.0);
        assert_eq!(core.characters().len(), 1);
        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.characters().len(), 1);
    }

    #[test]
    fn test_spawn_interval() {
        let mut core = quiet_core(Tuning::default());
        tick(&mut core, &InputState::default(), 1499.0);
        assert!(core.characters().is_empty());
        tick(&mut core, &InputState::default(), 1501.0);
        assert_eq!(core.characters().len(), 1);
        // Timer restarts from the spawn
        tick(&mut core, &InputState::default(), 2000.0);
        assert_eq!(core.characters().len(), 1);
    }

    #[test]
    fn test_points_catch() {
        let mut core = quiet_core(Tuning::default());
        drop_on_player(&mut core, CharacterKind::Points);

        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.score(), 100);
        assert_eq!(core.lives(), MAX_LIVES);
        assert!(core.characters().is_empty());
        assert_eq!(core.feedback().len(), 1);
        let event = core.feedback().iter().next().unwrap();
        // Enqueued with 60 ticks, then aged once at the end of the same tick
        assert_eq!(event.total_ticks, 60);
        assert_eq!(event.remaining_ticks, 59);
        assert!(core.player().is_reacting());
        assert_eq!(core.drain_events(), vec![GameEvent::Caught(CharacterKind::Points)]);
    }

    #[test]
    fn test_points_catch_enqueues_full_lifetime() {
        let mut core = quiet_core(Tuning::default());
        let character = FallingCharacter {
            id: 7,
            pos: core.player.pos,
            size: Vec2::splat(CHARACTER_SIZE),
            fall_speed: 0.0,
            kind: CharacterKind::Points,
        };
        let (delta, feedback) = resolve(
            &character,
            &core.state,
            &core.player,
            core.tuning.feedback_ticks,
            &mut core.rng,
        );
        assert_eq!(delta.score, 100);
        assert_eq!(feedback.remaining_ticks, 60);
    }

    #[test]
    fn test_healing_at_full_lives() {
        let mut core = quiet_core(Tuning::default());
        drop_on_player(&mut core, CharacterKind::Healing);

        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.lives(), 3);
        assert_eq!(core.score(), 50);
    }

    #[test]
    fn test_poison_ends_game_and_freezes() {
        let mut core = quiet_core(Tuning::default());
        core.state.lives = 1;
        core.state.score = 250;
        drop_on_player(&mut core, CharacterKind::Poison);

        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.lives(), 0);
        assert!(core.is_over());

        let ticks = core.time_ticks();
        drop_on_player(&mut core, CharacterKind::Points);
        for i in 0..100 {
            tick(&mut core, &InputState::holding(&[Action::MoveLeft]), 5000.0 + i as f64 * 16.0);
        }
        assert_eq!(core.lives(), 0);
        assert_eq!(core.score(), 250);
        assert_eq!(core.time_ticks(), ticks);
        assert_eq!(
            core.drain_events(),
            vec![
                GameEvent::Caught(CharacterKind::Poison),
                GameEvent::GameOver { score: 250 }
            ]
        );
    }

    #[test]
    fn test_catches_after_game_over_in_same_tick_are_ignored() {
        let mut core = quiet_core(Tuning::default());
        core.state.lives = 1;
        // Older Points character, newer Poison: the poison resolves first
        drop_on_player(&mut core, CharacterKind::Points);
        drop_on_player(&mut core, CharacterKind::Poison);

        tick(&mut core, &InputState::default(), 16.0);
        assert!(core.is_over());
        assert_eq!(core.score(), 0);
        assert_eq!(core.characters().len(), 1);
        assert_eq!(core.characters()[0].kind, CharacterKind::Points);
    }

    #[test]
    fn test_multiple_catches_in_one_tick() {
        let mut core = quiet_core(Tuning::default());
        drop_on_player(&mut core, CharacterKind::Points);
        drop_on_player(&mut core, CharacterKind::Points);
        drop_on_player(&mut core, CharacterKind::Healing);

        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.score(), 250);
        assert!(core.characters().is_empty());
        assert_eq!(core.feedback().len(), 3);
        // Newest first
        assert_eq!(
            core.drain_events(),
            vec![
                GameEvent::Caught(CharacterKind::Healing),
                GameEvent::Caught(CharacterKind::Points),
                GameEvent::Caught(CharacterKind::Points),
            ]
        );
    }

    #[test]
    fn test_silent_miss() {
        let mut core = quiet_core(Tuning::default());
        core.player.pos.x = 0.0;
        core.insert_character(FallingCharacter {
            id: 0,
            pos: Vec2::new(700.0, 598.0),
            size: Vec2::splat(CHARACTER_SIZE),
            fall_speed: 3.0,
            kind: CharacterKind::Poison,
        });
        let before = *core.state();

        tick(&mut core, &InputState::default(), 16.0);
        assert!(core.characters().is_empty());
        assert_eq!(*core.state(), before);
        assert!(core.feedback().is_empty());
        assert_eq!(core.drain_events(), vec![GameEvent::Missed(CharacterKind::Poison)]);
    }

    #[test]
    fn test_catch_takes_precedence_over_cull() {
        let mut core = quiet_core(Tuning::default());
        // Tuning keeps the player inside the field, so push it past the edge
        // by hand: it spans y 570..630 and a character at y > 600 still overlaps
        core.player.pos.y = 570.0;
        let player_x = core.player.pos.x;
        core.insert_character(FallingCharacter {
            id: 0,
            pos: Vec2::new(player_x, 598.0),
            size: Vec2::splat(CHARACTER_SIZE),
            fall_speed: 5.0,
            kind: CharacterKind::Points,
        });

        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.score(), 100);
        assert!(core.characters().is_empty());
    }

    #[test]
    fn test_pose_wears_off() {
        let mut core = quiet_core(Tuning::default());
        drop_on_player(&mut core, CharacterKind::Points);
        tick(&mut core, &InputState::default(), 16.0);
        assert_eq!(core.player().pose, Pose::Reacting { ticks_left: REACT_TICKS });

        for i in 0..REACT_TICKS {
            tick(&mut core, &InputState::default(), 32.0 + i as f64);
        }
        assert_eq!(core.player().pose, Pose::Idle);
    }

    #[test]
    fn test_reset_after_play() {
        let mut core = GameCore::new(Tuning::default(), 77);
        let default_player = core.player().clone();
        for i in 0..500 {
            let input = if i % 50 < 25 {
                InputState::holding(&[Action::MoveLeft])
            } else {
                InputState::holding(&[Action::MoveRight])
            };
            tick(&mut core, &input, i as f64 * FRAME_MS * 6.0);
        }
        drop_on_player(&mut core, CharacterKind::Points);
        tick(&mut core, &InputState::holding(&[Action::MoveLeft]), 1.0e9);

        core.reset();
        assert_eq!(*core.state(), GameState::default());
        assert_eq!(
            *core.state(),
            GameState {
                lives: 3,
                score: 0,
                is_over: false
            }
        );
        assert!(core.characters().is_empty());
        assert!(core.feedback().is_empty());
        assert_eq!(*core.player(), default_player);
        assert!(core.drain_events().is_empty());
    }

    #[test]
    fn test_reset_revives_finished_game() {
        let mut core = quiet_core(Tuning::default());
        core.state.lives = 1;
        drop_on_player(&mut core, CharacterKind::Poison);
        tick(&mut core, &InputState::default(), 16.0);
        assert!(core.is_over());

        core.restart();
        assert!(!core.is_over());
        // First tick after a reset spawns immediately
        tick(&mut core, &InputState::default(), 32.0);
        assert_eq!(core.characters().len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut core1 = GameCore::new(Tuning::default(), 99999);
        let mut core2 = GameCore::new(Tuning::default(), 99999);

        for i in 0..2000 {
            let input = match i % 90 {
                0..30 => InputState::holding(&[Action::MoveLeft]),
                30..60 => InputState::default(),
                _ => InputState::holding(&[Action::MoveRight]),
            };
            let now = i as f64 * FRAME_MS;
            tick(&mut core1, &input, now);
            tick(&mut core2, &input, now);
        }

        assert_eq!(core1.state(), core2.state());
        assert_eq!(core1.characters(), core2.characters());
        assert_eq!(core1.player(), core2.player());
    }

    #[test]
    fn test_reseed_replays_fresh_game() {
        let mut reseeded = GameCore::new(Tuning::default(), 1);
        for i in 0..300 {
            tick(&mut reseeded, &InputState::default(), i as f64 * FRAME_MS);
        }
        reseeded.reseed(4242);
        assert_eq!(reseeded.seed(), 4242);
        assert_eq!(reseeded.time_ticks(), 0);

        let mut fresh = GameCore::new(Tuning::default(), 4242);
        for i in 0..600 {
            let now = i as f64 * FRAME_MS;
            tick(&mut reseeded, &InputState::default(), now);
            tick(&mut fresh, &InputState::default(), now);
        }

        // Entity ids keep counting across a reseed, everything else matches
        let layout = |core: &GameCore| {
            core.characters()
                .iter()
                .map(|c| (c.kind, c.pos, c.fall_speed))
                .collect::<Vec<_>>()
        };
        assert_eq!(reseeded.state(), fresh.state());
        assert_eq!(reseeded.player(), fresh.player());
        assert_eq!(layout(&reseeded), layout(&fresh));
    }

    proptest! {
        #[test]
        fn prop_lives_and_score_stay_in_range(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..4, 1..400),
        ) {
            let mut core = GameCore::new(Tuning::default(), seed);
            let mut last_score = 0;
            for (i, m) in moves.iter().enumerate() {
                let input = match m {
                    0 => InputState::default(),
                    1 => InputState::holding(&[Action::MoveLeft]),
                    2 => InputState::holding(&[Action::MoveRight]),
                    _ => InputState::holding(&[Action::MoveLeft, Action::MoveRight]),
                };
                // Fast clock so characters spawn frequently
                tick(&mut core, &input, i as f64 * 400.0);

                prop_assert!(core.lives() <= MAX_LIVES);
                prop_assert!(core.score() >= last_score);
                prop_assert_eq!(core.is_over(), core.lives() == 0);
                let x = core.player().pos.x;
                prop_assert!(x >= 0.0 && x <= core.tuning().player_max_x());
                last_score = core.score();
            }
        }
    }
}
