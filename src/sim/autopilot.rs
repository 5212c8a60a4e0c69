//! Idle/demo mode - the game plays itself
//!
//! Produces the same [`InputState`] a keyboard would, so the simulation
//! cannot tell the difference.

use super::input::{Action, InputState};
use super::state::{CharacterKind, FallingCharacter, GameCore};

/// Characters below this many pixels above the player's head count as
/// dangerous when they are poison
const DANGER_ZONE: f32 = 140.0;

/// Choose what to hold this tick
pub fn steer(core: &GameCore) -> InputState {
    let player = core.player();
    let player_left = player.pos.x;
    let player_right = player.pos.x + player.size.x;
    let center = player.center_x();

    // Dodge poison about to land on us
    let threat = core
        .characters()
        .iter()
        .filter(|c| c.kind == CharacterKind::Poison)
        .filter(|c| c.pos.y + c.size.y > player.pos.y - DANGER_ZONE)
        .filter(|c| c.pos.x < player_right && c.pos.x + c.size.x > player_left)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(poison) = threat {
        let poison_center = poison.bounds().center().x;
        let max_x = core.tuning().player_max_x();
        // Flee toward the side with more room
        let go_left = if poison_center >= center {
            player_left > 0.0
        } else {
            player.pos.x >= max_x
        };
        return InputState::holding(&[if go_left { Action::MoveLeft } else { Action::MoveRight }]);
    }

    // Otherwise chase the lowest character worth catching
    let wanted = |c: &&FallingCharacter| match c.kind {
        CharacterKind::Points | CharacterKind::Healing => true,
        // Only gamble with a life to spare
        CharacterKind::Random => core.lives() > 1,
        CharacterKind::Poison => false,
    };
    let target = core
        .characters()
        .iter()
        .filter(|c| c.pos.y < player.pos.y + player.size.y)
        .filter(wanted)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let Some(target) = target else {
        return InputState::default();
    };

    let dx = target.bounds().center().x - center;
    if dx.abs() <= player.speed / 2.0 {
        InputState::default()
    } else if dx < 0.0 {
        InputState::holding(&[Action::MoveLeft])
    } else {
        InputState::holding(&[Action::MoveRight])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn add(core: &mut GameCore, kind: CharacterKind, x: f32, y: f32) {
        core.insert_character(FallingCharacter {
            id: 0,
            pos: Vec2::new(x, y),
            size: Vec2::splat(40.0),
            fall_speed: 3.0,
            kind,
        });
    }

    #[test]
    fn test_idle_when_field_empty() {
        let core = GameCore::new(Tuning::default(), 1);
        assert_eq!(steer(&core), InputState::default());
    }

    #[test]
    fn test_chases_lowest_wanted() {
        let mut core = GameCore::new(Tuning::default(), 1);
        // Player spans 370..430
        add(&mut core, CharacterKind::Points, 700.0, 300.0);
        add(&mut core, CharacterKind::Healing, 50.0, 100.0);
        let input = steer(&core);
        assert!(input.is_active(Action::MoveRight));
        assert!(!input.is_active(Action::MoveLeft));
    }

    #[test]
    fn test_ignores_poison_target() {
        let mut core = GameCore::new(Tuning::default(), 1);
        add(&mut core, CharacterKind::Poison, 700.0, 100.0);
        add(&mut core, CharacterKind::Points, 50.0, 50.0);
        assert!(steer(&core).is_active(Action::MoveLeft));
    }

    #[test]
    fn test_dodges_poison_overhead() {
        let mut core = GameCore::new(Tuning::default(), 1);
        // Poison slightly right of centre, close above the player's head
        add(&mut core, CharacterKind::Poison, 400.0, 440.0);
        let input = steer(&core);
        assert!(input.is_active(Action::MoveLeft));
    }

    #[test]
    fn test_skips_random_on_last_life() {
        let mut core = GameCore::new(Tuning::default(), 1);
        core.state.lives = 1;
        add(&mut core, CharacterKind::Random, 700.0, 300.0);
        assert_eq!(steer(&core), InputState::default());
    }

    #[test]
    fn test_autopilot_scores() {
        let mut core = GameCore::new(Tuning::default(), 2024);
        for i in 0..3000 {
            let input = steer(&core);
            tick(&mut core, &input, i as f64 * crate::consts::FRAME_MS);
        }
        assert!(core.score() > 0);
    }
}
