//! Draw-call boundary between the simulation and a render surface
//!
//! [`draw_frame`] decides *what* is on screen each tick; a [`RenderSurface`]
//! decides how to put it there.

use super::vertex::colors;
use crate::consts::GROUND_LINE_THICKNESS;
use crate::sim::{GameState, Rect};
use crate::sprite::SpriteSheet;

pub type Color = [f32; 4];

/// Font sizes used by the HUD
pub const HUD_FONT_SIZE: f32 = 18.0;
pub const TITLE_FONT_SIZE: f32 = 28.0;

/// Anything that can draw rectangles, sprite crops and text
pub trait RenderSurface {
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Draw the `src` region of the sprite sheet scaled into `dest`
    fn draw_sprite_region(&mut self, src: Rect, dest: Rect);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32);
}

/// Issue one frame's draw calls: ground, player, obstacles, HUD, overlay
pub fn draw_frame<S: RenderSurface + ?Sized>(state: &GameState, sheet: &SpriteSheet, surface: &mut S) {
    let world = state.world;

    surface.draw_rect(
        Rect::new(0.0, world.ground_y(), world.width, GROUND_LINE_THICKNESS),
        colors::INK,
    );

    let player = state.player.rect();
    match sheet.source_rect(state.pose().frame_index()) {
        Some(src) => surface.draw_sprite_region(src, player),
        None => surface.draw_rect(player, colors::INK),
    }

    for o in &state.field.obstacles {
        surface.draw_rect(o.rect(), colors::INK);
    }

    surface.draw_text(&format!("Score: {}", state.score), 20.0, 30.0, HUD_FONT_SIZE);
    surface.draw_text(&format!("Best: {}", state.best), 20.0, 55.0, HUD_FONT_SIZE);

    if !state.is_running() {
        let (cx, cy) = (world.width / 2.0, world.height / 2.0);
        surface.draw_text("Game Over", cx - 75.0, cy - 10.0, TITLE_FONT_SIZE);
        surface.draw_text(
            "Press R or Click to restart",
            cx - 115.0,
            cy + 25.0,
            HUD_FONT_SIZE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, tick};

    #[derive(Debug, PartialEq)]
    enum Call {
        Rect(Rect),
        Sprite(Rect, Rect),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl RenderSurface for Recorder {
        fn draw_rect(&mut self, rect: Rect, _color: Color) {
            self.0.push(Call::Rect(rect));
        }
        fn draw_sprite_region(&mut self, src: Rect, dest: Rect) {
            self.0.push(Call::Sprite(src, dest));
        }
        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32) {
            self.0.push(Call::Text(text.to_string()));
        }
    }

    #[test]
    fn test_fallback_rect_when_sheet_missing() {
        let state = GameState::new(1);
        let mut rec = Recorder::default();
        draw_frame(&state, &SpriteSheet::new(), &mut rec);

        assert_eq!(rec.0[0], Call::Rect(Rect::new(0.0, 240.0, 800.0, 3.0)));
        assert_eq!(rec.0[1], Call::Rect(state.player.rect()));
        assert_eq!(rec.0[2], Call::Text("Score: 0".into()));
        assert_eq!(rec.0[3], Call::Text("Best: 0".into()));
        assert_eq!(rec.0.len(), 4);
    }

    #[test]
    fn test_sprite_frame_follows_pose() {
        let mut state = GameState::new(1);
        let mut sheet = SpriteSheet::new();
        sheet.mark_ready(100, 150).unwrap();

        state.jump();
        tick(&mut state);

        let mut rec = Recorder::default();
        draw_frame(&state, &sheet, &mut rec);
        // Jump is frame 4: column 0, row 2
        assert_eq!(
            rec.0[1],
            Call::Sprite(Rect::new(0.0, 100.0, 50.0, 50.0), state.player.rect())
        );
    }

    #[test]
    fn test_obstacles_and_overlay() {
        let mut state = GameState::new(1);
        state.field.obstacles.push(Obstacle {
            x: 300.0,
            y: 200.0,
            w: 25.0,
            h: 40.0,
        });
        state.end_run();

        let mut rec = Recorder::default();
        draw_frame(&state, &SpriteSheet::new(), &mut rec);
        assert_eq!(rec.0[2], Call::Rect(Rect::new(300.0, 200.0, 25.0, 40.0)));
        assert_eq!(
            rec.0.last(),
            Some(&Call::Text("Press R or Click to restart".into()))
        );
        assert!(rec.0.contains(&Call::Text("Game Over".into())));
    }
}
