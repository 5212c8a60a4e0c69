//! Game state and core simulation types
//!
//! [`GameCore`] owns every piece of mutable gameplay state. Nothing here is
//! global; drivers hold a `GameCore` and pass it to [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::StateDelta;
use super::feedback::FeedbackQueue;
use super::input::{Action, InputState};
use super::spawner::SpawnTimer;
use crate::consts::MAX_LIVES;
use crate::tuning::Tuning;

/// Direction the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Cosmetic player pose, consumed by the renderer only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Idle,
    /// Shown briefly after a catch
    Reacting { ticks_left: u32 },
}

/// The player character (Sir Klent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; y never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub facing: Facing,
    pub pose: Pose,
}

impl Player {
    /// Player at its default spot: horizontally centred near the bottom
    pub fn spawn(tuning: &Tuning) -> Self {
        let x = (tuning.field_width / 2.0 - tuning.player_width / 2.0)
            .clamp(0.0, tuning.player_max_x());
        Self {
            pos: Vec2::new(x, tuning.player_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            facing: Facing::default(),
            pose: Pose::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.bounds().center().x
    }

    /// Apply held movement. Left and right are checked independently: with
    /// both held the player steps left then right and ends up facing right.
    pub fn step(&mut self, input: &InputState, max_x: f32) {
        if input.is_active(Action::MoveLeft) {
            self.pos.x = (self.pos.x - self.speed).max(0.0);
            self.facing = Facing::Left;
        }
        if input.is_active(Action::MoveRight) {
            self.pos.x = (self.pos.x + self.speed).min(max_x);
            self.facing = Facing::Right;
        }
    }

    /// Enter the reaction pose for `ticks` ticks
    pub fn react(&mut self, ticks: u32) {
        self.pose = if ticks > 0 {
            Pose::Reacting { ticks_left: ticks }
        } else {
            Pose::Idle
        };
    }

    /// Count the reaction pose down by one tick
    pub fn advance_pose(&mut self) {
        if let Pose::Reacting { ticks_left } = self.pose {
            self.pose = if ticks_left > 1 {
                Pose::Reacting {
                    ticks_left: ticks_left - 1,
                }
            } else {
                Pose::Idle
            };
        }
    }

    pub fn is_reacting(&self) -> bool {
        matches!(self.pose, Pose::Reacting { .. })
    }
}

/// Falling character types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Restores a life
    Healing,
    /// Takes a life
    Poison,
    /// Bonus score
    Points,
    /// Coin flip between a lucky heal and an unlucky hit
    Random,
}

impl CharacterKind {
    /// Every kind, in spawn-table order
    pub const ALL: [CharacterKind; 4] = [
        CharacterKind::Healing,
        CharacterKind::Poison,
        CharacterKind::Points,
        CharacterKind::Random,
    ];

    /// Name shown above the sprite
    pub fn name(&self) -> &'static str {
        match self {
            CharacterKind::Healing => "Alteyah",
            CharacterKind::Poison => "Thea",
            CharacterKind::Points => "Meljah",
            CharacterKind::Random => "Lloyd",
        }
    }
}

/// A character falling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingCharacter {
    /// Spawn order; higher is more recent
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub fall_speed: f32,
    pub kind: CharacterKind,
}

impl FallingCharacter {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn fall(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// True once the top edge has passed the bottom of the field
    pub fn is_below(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }
}

/// Lives, score and the game-over flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub lives: u8,
    pub score: u64,
    pub is_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            lives: MAX_LIVES,
            score: 0,
            is_over: false,
        }
    }
}

impl GameState {
    /// Apply a delta, clamping lives to `0..=MAX_LIVES`.
    ///
    /// Ignored once the game is over. Returns true if this delta ended the
    /// game.
    pub fn apply(&mut self, delta: StateDelta) -> bool {
        if self.is_over {
            return false;
        }

        let lives = (i16::from(self.lives) + i16::from(delta.lives)).clamp(0, i16::from(MAX_LIVES));
        self.lives = lives as u8;
        self.score = self.score.saturating_add(delta.score);

        if self.lives == 0 {
            self.is_over = true;
        }
        self.is_over
    }
}

/// Notable things that happened during a tick, for the driver (HUD, logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A character was caught and its effect applied
    Caught(CharacterKind),
    /// A character fell out of the field untouched
    Missed(CharacterKind),
    /// Lives reached zero
    GameOver { score: u64 },
}

/// Complete game aggregate (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameCore {
    pub(crate) tuning: Tuning,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) state: GameState,
    pub(crate) player: Player,
    /// Live characters, in spawn order (oldest first)
    pub(crate) characters: Vec<FallingCharacter>,
    pub(crate) feedback: FeedbackQueue,
    pub(crate) spawn_timer: SpawnTimer,
    /// Simulated ticks since the last reset
    pub(crate) time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameCore {
    /// Create a new game with the given tuning and RNG seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            player: Player::spawn(&tuning),
            feedback: FeedbackQueue::new(tuning.feedback_rise),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::default(),
            characters: Vec::new(),
            spawn_timer: SpawnTimer::default(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Restore the initial state: full lives, zero score, empty field and
    /// the player back at its default spot. Safe to call at any time.
    ///
    /// The RNG stream carries on, so consecutive runs differ.
    pub fn reset(&mut self) {
        self.state = GameState::default();
        self.player = Player::spawn(&self.tuning);
        self.characters.clear();
        self.feedback.clear();
        self.spawn_timer = SpawnTimer::default();
        self.time_ticks = 0;
        self.events.clear();
    }

    /// UI entry point for the restart button
    pub fn restart(&mut self) {
        let final_score = self.state.score;
        self.reset();
        log::info!("Game restarted (previous score {})", final_score);
    }

    /// Reset and start a fresh RNG stream
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset();
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a character to the field, assigning it a fresh id
    pub(crate) fn insert_character(&mut self, mut character: FallingCharacter) -> u32 {
        let id = self.next_entity_id();
        character.id = id;
        self.characters.push(character);
        id
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn characters(&self) -> &[FallingCharacter] {
        &self.characters
    }

    pub fn feedback(&self) -> &FeedbackQueue {
        &self.feedback
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
