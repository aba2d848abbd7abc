use bitflags::bitflags;

bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        const BG_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        /// 8x16 sprites.
        const OBJ_TALL = 1 << 2;
        /// Background map at 0x9C00 instead of 0x9800.
        const BG_MAP_HIGH = 1 << 3;
        /// Tile data at 0x8000 with unsigned indices instead of 0x8800 signed.
        const TILE_DATA_UNSIGNED = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        const WINDOW_MAP_HIGH = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// STAT (FF41) bits 2-6. The mode bits are kept separately.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LcdStatus: u8 {
        const COINCIDENCE = 1 << 2;
        const HBLANK_SELECT = 1 << 3;
        const VBLANK_SELECT = 1 << 4;
        const OAM_SELECT = 1 << 5;
        const LYC_SELECT = 1 << 6;
    }
}

impl LcdStatus {
    /// Bits software can write.
    pub const WRITABLE: u8 = 0x78;
}

/// PPU mode, numbered as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    LcdTransfer = 3,
}

impl Mode {
    /// T-cycles spent in this mode per scanline.
    pub const fn cycles(self) -> u32 {
        match self {
            Mode::OamSearch => 80,
            Mode::LcdTransfer => 172,
            Mode::HBlank => 204,
            Mode::VBlank => 456,
        }
    }

    /// STAT select bit that raises the LCD interrupt when this mode begins.
    pub const fn stat_select(self) -> Option<LcdStatus> {
        match self {
            Mode::HBlank => Some(LcdStatus::HBLANK_SELECT),
            Mode::VBlank => Some(LcdStatus::VBLANK_SELECT),
            Mode::OamSearch => Some(LcdStatus::OAM_SELECT),
            Mode::LcdTransfer => None,
        }
    }
}
