//! Floating text notifications
//!
//! Each catch pops a short message above the player that rises and fades
//! out over a fixed number of ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Colour family of a notification; the renderer maps it to a concrete colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Heal,
    Damage,
    Points,
    Chance,
}

/// A single floating notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub text: String,
    pub color: ColorTag,
    /// Anchor point (text is drawn centred on x)
    pub pos: Vec2,
    pub remaining_ticks: u32,
    pub total_ticks: u32,
}

impl FeedbackEvent {
    pub fn new(text: impl Into<String>, color: ColorTag, pos: Vec2, ticks: u32) -> Self {
        Self {
            text: text.into(),
            color,
            pos,
            remaining_ticks: ticks,
            total_ticks: ticks,
        }
    }

    /// Linear fade, 1.0 when fresh down toward 0.0
    pub fn opacity(&self) -> f32 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        self.remaining_ticks as f32 / self.total_ticks as f32
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ticks == 0
    }
}

/// Live notifications, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackQueue {
    events: Vec<FeedbackEvent>,
    /// Upward drift in pixels per tick
    rise_per_tick: f32,
}

impl FeedbackQueue {
    pub fn new(rise_per_tick: f32) -> Self {
        Self {
            events: Vec::new(),
            rise_per_tick,
        }
    }

    pub fn enqueue(&mut self, event: FeedbackEvent) {
        self.events.push(event);
    }

    /// Age every event by one tick and drop the expired ones
    pub fn tick(&mut self) {
        let rise = self.rise_per_tick;
        for event in &mut self.events {
            event.pos.y -= rise;
            event.remaining_ticks = event.remaining_ticks.saturating_sub(1);
        }
        self.events.retain(|e| !e.is_expired());
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
