use gbk_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Pixel sink driven by the PPU.
///
/// `render` is called for every visible pixel, left to right within a
/// scanline and top to bottom across a frame. `refresh` is called once per
/// frame when the PPU wraps back to scanline 0. Both run synchronously on
/// the emulation thread.
pub trait Renderer {
    fn render(&mut self, x: u8, y: u8, color: Color);
    fn refresh(&mut self);
}

/// Discards all output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _x: u8, _y: u8, _color: Color) {}
    fn refresh(&mut self) {}
}

/// RGB24 frame buffer.
///
/// Pixels land in a back buffer; `refresh` publishes it as the current
/// frame.
pub struct FrameBuffer {
    back: Vec<u8>,
    front: Vec<u8>,
    frames: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const BYTES_PER_PIXEL: usize = 3;

    pub fn new() -> Self {
        let len = SCREEN_WIDTH * SCREEN_HEIGHT * Self::BYTES_PER_PIXEL;
        Self {
            back: vec![0xFF; len],
            front: vec![0xFF; len],
            frames: 0,
        }
    }

    /// Last completed frame, row-major RGB24.
    pub fn frame(&self) -> &[u8] {
        &self.front
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pixel as most recently drawn, which may belong to a frame still in
    /// progress. `None` off screen.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let i = (y * SCREEN_WIDTH + x) * Self::BYTES_PER_PIXEL;
        Some(Color::new_rgb(self.back[i], self.back[i + 1], self.back[i + 2]))
    }
}

impl Renderer for FrameBuffer {
    fn render(&mut self, x: u8, y: u8, color: Color) {
        let (x, y) = (x as usize, y as usize);
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }
        let i = (y * SCREEN_WIDTH + x) * Self::BYTES_PER_PIXEL;
        let (r, g, b) = color.rgb();
        self.back[i..i + 3].copy_from_slice(&[r, g, b]);
    }

    fn refresh(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.frames += 1;
    }
}
