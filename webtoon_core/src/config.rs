//! Engine limits, passed explicitly into the [`Viewer`](crate::Viewer).

/// Largest bitmap height the renderer accepts (2^15 - 2).
pub const MAX_TEXTURE_HEIGHT: u32 = (1 << 15) - 2;
/// Scaled height of one tile produced by the splitter.
pub const SPLIT_TILE_HEIGHT: u32 = 1 << 11;
/// Pixels advanced per tick while auto-playing.
pub const AUTO_SCROLL_STEP: i32 = 5;
/// Pixels scrolled per wheel notch.
pub const WHEEL_MULTIPLIER: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub max_texture_height: u32,
    pub split_tile_height: u32,
    pub auto_scroll_step: i32,
    pub wheel_multiplier: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_texture_height: MAX_TEXTURE_HEIGHT,
            split_tile_height: SPLIT_TILE_HEIGHT,
            auto_scroll_step: AUTO_SCROLL_STEP,
            wheel_multiplier: WHEEL_MULTIPLIER,
        }
    }
}

impl ViewerConfig {
    /// Caps the texture height at what the GPU reports.
    pub fn with_texture_limit(mut self, max_texture_side: usize) -> Self {
        let side = u32::try_from(max_texture_side).unwrap_or(u32::MAX);
        self.max_texture_height = self.max_texture_height.min(side);
        self
    }
}
