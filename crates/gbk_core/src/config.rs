use gbk_common::{Color, DMG_PALETTE};
use typed_builder::TypedBuilder;

/// What runs at 0x0000 on power-up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BootRom {
    /// The small boot image bundled with the core.
    #[default]
    Builtin,
    /// A user-supplied 256-byte DMG boot image.
    Custom(Box<[u8; 256]>),
    /// No boot image: CPU and IO start in the post-boot state at 0x0100.
    Skip,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    #[builder(default)]
    pub boot_rom: BootRom,
    /// Host colours for shades 0-3.
    #[builder(default = DMG_PALETTE)]
    pub palette: [Color; 4],
    /// Drop VRAM/OAM writes the PPU would lock out instead of letting them land.
    #[builder(default = false)]
    pub strict_vram_writes: bool,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
