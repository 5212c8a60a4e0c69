//! Canvas 2D renderer (shape drawing, no image assets)

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::palette::*;
use crate::sim::{CharacterKind, Facing, FallingCharacter, FeedbackEvent, GameCore, Player, Pose};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one frame
    pub fn render(&self, core: &GameCore) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.draw_background()?;
        self.draw_player(core.player())?;
        for character in core.characters() {
            self.draw_character(character)?;
        }
        for event in core.feedback().iter() {
            self.draw_feedback(event)?;
        }
        Ok(())
    }

    fn draw_background(&self) -> Result<(), JsValue> {
        // Sky gradient comes from CSS; just a few clouds on top
        self.ctx.set_fill_style_str(CLOUD);
        for i in 0..3 {
            let x = i as f64 * 250.0 + 50.0;
            let y = 50.0 + i as f64 * 30.0;
            self.ctx.begin_path();
            self.ctx.arc(x, y, 20.0, 0.0, PI * 2.0)?;
            self.ctx.arc(x + 25.0, y, 25.0, 0.0, PI * 2.0)?;
            self.ctx.arc(x + 50.0, y, 20.0, 0.0, PI * 2.0)?;
            self.ctx.fill();
        }
        Ok(())
    }

    fn draw_player(&self, player: &Player) -> Result<(), JsValue> {
        let x = player.pos.x as f64;
        let y = player.pos.y as f64;
        let w = player.size.x as f64;
        let h = player.size.y as f64;

        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.ctx.fill_rect(x, y, w, h);

        // Eyes, pupils looking the way we face
        let look = match player.facing {
            Facing::Left => -2.0,
            Facing::Right => 2.0,
        };
        self.ctx.set_fill_style_str(EYE_WHITE);
        self.ctx.fill_rect(x + 15.0, y + 15.0, 8.0, 8.0);
        self.ctx.fill_rect(x + 37.0, y + 15.0, 8.0, 8.0);
        self.ctx.set_fill_style_str(INK);
        self.ctx.fill_rect(x + 17.0 + look, y + 17.0, 4.0, 4.0);
        self.ctx.fill_rect(x + 39.0 + look, y + 17.0, 4.0, 4.0);

        self.ctx.set_stroke_style_str(INK);
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        match player.pose {
            // Surprised "o" mouth right after a catch
            Pose::Reacting { .. } => self.ctx.arc(x + w / 2.0, y + 38.0, 6.0, 0.0, PI * 2.0)?,
            Pose::Idle => self.ctx.arc(x + w / 2.0, y + 35.0, 10.0, 0.0, PI)?,
        }
        self.ctx.stroke();

        self.draw_label("Sir Klent", "12px Arial", x + w / 2.0, y - 5.0)
    }

    fn draw_character(&self, character: &FallingCharacter) -> Result<(), JsValue> {
        let x = character.pos.x as f64;
        let y = character.pos.y as f64;
        let w = character.size.x as f64;

        self.ctx.set_fill_style_str(character_color(character.kind));
        self.ctx.fill_rect(x, y, w, character.size.y as f64);

        self.ctx.set_fill_style_str(EYE_WHITE);
        self.ctx.fill_rect(x + 8.0, y + 8.0, 6.0, 6.0);
        self.ctx.fill_rect(x + 26.0, y + 8.0, 6.0, 6.0);
        self.ctx.set_fill_style_str(INK);
        self.ctx.fill_rect(x + 10.0, y + 10.0, 2.0, 2.0);
        self.ctx.fill_rect(x + 28.0, y + 10.0, 2.0, 2.0);

        self.ctx.set_stroke_style_str(INK);
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        if character.kind == CharacterKind::Poison {
            // Frown
            self.ctx.arc(x + w / 2.0, y + 28.0, 6.0, PI, 0.0)?;
        } else {
            self.ctx.arc(x + w / 2.0, y + 25.0, 6.0, 0.0, PI)?;
        }
        self.ctx.stroke();

        self.draw_label(character.kind.name(), "10px Arial", x + w / 2.0, y - 3.0)
    }

    fn draw_feedback(&self, event: &FeedbackEvent) -> Result<(), JsValue> {
        self.ctx.set_global_alpha(event.opacity() as f64);
        self.ctx.set_fill_style_str(feedback_color(event.color));
        self.ctx.set_font("16px Arial");
        self.ctx.set_text_align("center");
        let drawn = self.ctx.fill_text(&event.text, event.pos.x as f64, event.pos.y as f64);
        self.ctx.set_global_alpha(1.0);
        drawn
    }

    fn draw_label(&self, text: &str, font: &str, cx: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(INK);
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.fill_text(text, cx, y)
    }
}
