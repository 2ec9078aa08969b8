//! Axis-aligned collision detection
//!
//! Overlap uses strict inequalities on all four sides, so rectangles that
//! merely share an edge do not collide.

use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned rectangle, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict AABB overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Index of the first obstacle (in list order) overlapping `player`
pub fn first_hit(player: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| player.overlaps(&o.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle { x, y, w, h }
    }

    #[test]
    fn test_overlap_detected() {
        let player = Rect::new(80.0, 192.0, 48.0, 48.0);
        let o = obstacle(80.0, 210.0, 20.0, 30.0);
        assert!(player.overlaps(&o.rect()));
        assert!(o.rect().overlaps(&player));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Right edge touches
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Bottom edge touches
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Left/top touches
        assert!(!a.overlaps(&Rect::new(-10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -10.0, 10.0, 10.0)));
        // Just past the edge
        assert!(a.overlaps(&Rect::new(9.9, 9.9, 10.0, 10.0)));
    }

    #[test]
    fn test_first_hit_uses_list_order() {
        let player = Rect::new(80.0, 192.0, 48.0, 48.0);
        let obstacles = [
            obstacle(400.0, 200.0, 30.0, 40.0),
            obstacle(100.0, 200.0, 30.0, 40.0),
            obstacle(90.0, 200.0, 30.0, 40.0),
        ];
        assert_eq!(first_hit(&player, &obstacles), Some(1));
    }

    #[test]
    fn test_jumping_over_misses() {
        // Player bottom above obstacle top
        let player = Rect::new(80.0, 100.0, 48.0, 48.0);
        let obstacles = [obstacle(90.0, 180.0, 30.0, 60.0)];
        assert_eq!(first_hit(&player, &obstacles), None);
    }
}
