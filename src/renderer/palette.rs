//! Colours for sprites and notifications

use crate::sim::{CharacterKind, ColorTag};

pub const PLAYER_COLOR: &str = "#3498db";
pub const INK: &str = "#333";
pub const EYE_WHITE: &str = "#fff";
pub const CLOUD: &str = "rgba(255, 255, 255, 0.8)";

/// Body colour of a falling character
pub fn character_color(kind: CharacterKind) -> &'static str {
    match kind {
        CharacterKind::Healing => "#27ae60",
        CharacterKind::Poison => "#e74c3c",
        CharacterKind::Points => "#f39c12",
        CharacterKind::Random => "#9b59b6",
    }
}

/// Text colour of a notification
pub fn feedback_color(tag: ColorTag) -> &'static str {
    match tag {
        ColorTag::Heal => character_color(CharacterKind::Healing),
        ColorTag::Damage => character_color(CharacterKind::Poison),
        ColorTag::Points => character_color(CharacterKind::Points),
        ColorTag::Chance => character_color(CharacterKind::Random),
    }
}
