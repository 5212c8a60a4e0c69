//! Effect resolution for caught characters
//!
//! Maps a [`CharacterKind`] to a score/lives change plus the notification
//! shown for it. Resolution is pure apart from the coin flip for
//! [`CharacterKind::Random`]; the caller applies the delta.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::feedback::{ColorTag, FeedbackEvent};
use super::state::{CharacterKind, FallingCharacter, GameState, Player};
use crate::consts::*;

/// Change to apply to [`GameState`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDelta {
    pub lives: i8,
    pub score: u64,
}

/// Where notifications appear: centred just above the player's head
pub fn feedback_anchor(player: &Player) -> Vec2 {
    Vec2::new(player.center_x(), player.pos.y - FEEDBACK_OFFSET_Y)
}

/// Resolve a caught character against the current state
pub fn resolve<R: Rng>(
    character: &FallingCharacter,
    state: &GameState,
    player: &Player,
    feedback_ticks: u32,
    rng: &mut R,
) -> (StateDelta, FeedbackEvent) {
    let can_heal = state.lives < MAX_LIVES;

    let (delta, text, color) = match character.kind {
        CharacterKind::Healing => {
            if can_heal {
                (
                    StateDelta { lives: 1, score: HEAL_SCORE },
                    "❤️ +1 Life!",
                    ColorTag::Heal,
                )
            } else {
                (
                    StateDelta { lives: 0, score: HEAL_SCORE },
                    "❤️ Full Health! +50",
                    ColorTag::Heal,
                )
            }
        }
        CharacterKind::Poison => (
            StateDelta { lives: -1, score: 0 },
            "💀 -1 Life!",
            ColorTag::Damage,
        ),
        CharacterKind::Points => (
            StateDelta { lives: 0, score: POINTS_SCORE },
            "⭐ +100 Points!",
            ColorTag::Points,
        ),
        CharacterKind::Random => {
            if rng.random_bool(0.5) {
                // Lucky score is granted whether or not the life fits under the cap
                if can_heal {
                    (
                        StateDelta { lives: 1, score: LUCKY_SCORE },
                        "🎲 Lucky! +1 Life!",
                        ColorTag::Chance,
                    )
                } else {
                    (
                        StateDelta { lives: 0, score: LUCKY_SCORE },
                        "🎲 Lucky! +25 Points!",
                        ColorTag::Chance,
                    )
                }
            } else {
                (
                    StateDelta { lives: -1, score: 0 },
                    "🎲 Unlucky! -1 Life!",
                    ColorTag::Chance,
                )
            }
        }
    };

    let feedback = FeedbackEvent::new(text, color, feedback_anchor(player), feedback_ticks);
    (delta, feedback)
}
