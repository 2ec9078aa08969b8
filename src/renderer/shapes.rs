//! Quad generation for a frame's draw calls
//!
//! [`FrameBatch`] is the GPU-side [`RenderSurface`]: rectangles become solid
//! quads, sprite crops become textured quads, text is collected for the HUD.

use glam::Vec2;

use super::scene::{Color, RenderSurface};
use super::vertex::{Vertex, colors};
use crate::sim::Rect;
use crate::sprite::SheetInfo;

/// A line of HUD text in field coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Two triangles covering `[min, max]`, with UVs spanning `[uv_min, uv_max]`
pub fn quad(min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2, color: Color) -> [Vertex; 6] {
    let tl = Vertex::new(min.x, min.y, uv_min.x, uv_min.y, color);
    let tr = Vertex::new(max.x, min.y, uv_max.x, uv_min.y, color);
    let bl = Vertex::new(min.x, max.y, uv_min.x, uv_max.y, color);
    let br = Vertex::new(max.x, max.y, uv_max.x, uv_max.y, color);
    [tl, bl, tr, tr, bl, br]
}

fn corners(rect: &Rect) -> (Vec2, Vec2) {
    (
        Vec2::new(rect.x, rect.y),
        Vec2::new(rect.right(), rect.bottom()),
    )
}

/// Vertices and text for one frame
#[derive(Debug, Default)]
pub struct FrameBatch {
    /// Quads drawn with the white texture
    pub solid: Vec<Vertex>,
    /// Quads drawn with the sprite sheet
    pub sprites: Vec<Vertex>,
    pub texts: Vec<TextItem>,
    sheet: Option<SheetInfo>,
}

impl FrameBatch {
    pub fn new(sheet: Option<SheetInfo>) -> Self {
        Self {
            sheet,
            ..Default::default()
        }
    }
}

impl RenderSurface for FrameBatch {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let (min, max) = corners(&rect);
        self.solid
            .extend_from_slice(&quad(min, max, Vec2::ZERO, Vec2::ZERO, color));
    }

    fn draw_sprite_region(&mut self, src: Rect, dest: Rect) {
        let Some(sheet) = self.sheet else {
            log::warn!("Sprite requested without a loaded sheet, drawing block");
            self.draw_rect(dest, colors::INK);
            return;
        };
        let size = Vec2::new(sheet.width as f32, sheet.height as f32);
        let (src_min, src_max) = corners(&src);
        let (min, max) = corners(&dest);
        self.sprites.extend_from_slice(&quad(
            min,
            max,
            src_min / size,
            src_max / size,
            colors::WHITE,
        ));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32) {
        self.texts.push(TextItem {
            text: text.to_string(),
            x,
            y,
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_becomes_six_vertices() {
        let mut batch = FrameBatch::new(None);
        batch.draw_rect(Rect::new(10.0, 20.0, 30.0, 40.0), colors::INK);
        assert_eq!(batch.solid.len(), 6);
        let xs: Vec<f32> = batch.solid.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = batch.solid.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|x| *x == 10.0 || *x == 40.0));
        assert!(ys.iter().all(|y| *y == 20.0 || *y == 60.0));
    }

    #[test]
    fn test_sprite_uvs_normalized_to_sheet() {
        let sheet = SheetInfo {
            width: 128,
            height: 192,
            frame_width: 64,
            frame_height: 64,
        };
        let mut batch = FrameBatch::new(Some(sheet));
        batch.draw_sprite_region(
            Rect::new(64.0, 128.0, 64.0, 64.0),
            Rect::new(80.0, 192.0, 48.0, 48.0),
        );
        assert!(batch.solid.is_empty());
        assert_eq!(batch.sprites.len(), 6);
        let tl = batch.sprites[0];
        assert_eq!(tl.position, [80.0, 192.0]);
        assert_eq!(tl.uv, [0.5, 128.0 / 192.0]);
        let br = batch.sprites[5];
        assert_eq!(br.uv, [1.0, 1.0]);
    }

    #[test]
    fn test_sprite_without_sheet_falls_back() {
        let mut batch = FrameBatch::new(None);
        batch.draw_sprite_region(Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 5.0, 5.0));
        assert!(batch.sprites.is_empty());
        assert_eq!(batch.solid.len(), 6);
    }

    #[test]
    fn test_text_collected() {
        let mut batch = FrameBatch::new(None);
        batch.draw_text("Score: 3", 20.0, 30.0, 18.0);
        assert_eq!(batch.texts[0].text, "Score: 3");
    }
}
