//! Sprite sheet readiness and frame cropping
//!
//! The player sheet is a 2 column x 3 row grid:
//! frame 0 idle, 1-3 run cycle, 4 jump, 5 fall.

use thiserror::Error;

use crate::consts::{SHEET_COLS, SHEET_ROWS};
use crate::sim::Rect;

/// Number of frames on the sheet
pub const FRAME_COUNT: u32 = SHEET_COLS * SHEET_ROWS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpriteError {
    #[error("sprite sheet {width}x{height} is too small for a {cols}x{rows} grid")]
    TooSmall {
        width: u32,
        height: u32,
        cols: u32,
        rows: u32,
    },
    #[error("pixel buffer has {actual} bytes, expected {expected} for RGBA8")]
    PixelSize { expected: usize, actual: usize },
}

/// Loaded sheet geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo {
    pub width: u32,
    pub height: u32,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// Player sprite sheet. Not ready until the image finishes loading.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    info: Option<SheetInfo>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the loaded image size. Frames are `floor(size / grid)`.
    pub fn mark_ready(&mut self, width: u32, height: u32) -> Result<SheetInfo, SpriteError> {
        let frame_width = width / SHEET_COLS;
        let frame_height = height / SHEET_ROWS;
        if frame_width == 0 || frame_height == 0 {
            return Err(SpriteError::TooSmall {
                width,
                height,
                cols: SHEET_COLS,
                rows: SHEET_ROWS,
            });
        }

        let info = SheetInfo {
            width,
            height,
            frame_width,
            frame_height,
        };
        self.info = Some(info);
        log::info!(
            "Sprite sheet ready: {}x{} ({}x{} per frame)",
            width,
            height,
            frame_width,
            frame_height
        );
        Ok(info)
    }

    /// Check an RGBA8 pixel buffer against the sheet size before upload
    pub fn validate_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<(), SpriteError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(SpriteError::PixelSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.info.is_some()
    }

    pub fn info(&self) -> Option<SheetInfo> {
        self.info
    }

    /// Pixel rectangle of `frame` on the sheet, if loaded
    pub fn source_rect(&self, frame: u32) -> Option<Rect> {
        let info = self.info?;
        if frame >= FRAME_COUNT {
            return None;
        }
        let col = frame % SHEET_COLS;
        let row = frame / SHEET_COLS;
        Some(Rect::new(
            (col * info.frame_width) as f32,
            (row * info.frame_height) as f32,
            info.frame_width as f32,
            info.frame_height as f32,
        ))
    }
}
