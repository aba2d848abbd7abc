pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;
pub mod renderer;

pub use config::{BootRom, GameBoyConfig};
pub use error::{Error, Result};
pub use machine::GameBoy;
pub use renderer::{FrameBuffer, NullRenderer, Renderer};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;

/// T-cycles in one full LCD frame (154 lines of 456 cycles).
pub const CYCLES_PER_FRAME: u32 = 70_224;
