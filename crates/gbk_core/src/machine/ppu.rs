mod regs;
mod render;

pub use regs::{LcdControl, LcdStatus, Mode};

use gbk_common::Color;

use crate::cpu::Interrupt;
use crate::renderer::Renderer;

use super::InterruptController;

pub const VRAM_SIZE: usize = 0x2000;
pub const OAM_SIZE: usize = 0xA0;

/// First line of vertical blank.
pub const VBLANK_LINE: u8 = 144;
/// Last line of vertical blank; the next line is 0.
pub const LAST_LINE: u8 = 153;

/// What a CPU read of locked VRAM/OAM returns.
pub const LOCKED_READ: u8 = 0xFF;

/// Pixel-processing unit: LCD mode machine, VRAM/OAM and the LCD registers.
///
/// Time only moves through [`Ppu::tick`]. Each mode lasts a fixed number of
/// T-cycles; a scanline is composited and pushed to the renderer as the
/// PPU enters `LcdTransfer`.
pub struct Ppu {
    mode: Mode,
    mode_clock: u32,
    ly: u8,
    lyc: u8,
    lcdc: LcdControl,
    stat: LcdStatus,
    scy: u8,
    scx: u8,
    wy: u8,
    wx: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    vram: [u8; VRAM_SIZE],
    oam: [u8; OAM_SIZE],
    /// Window row to draw next; only advances on lines that showed the window.
    window_line: u8,
    palette: [Color; 4],
    strict_writes: bool,
}

impl Ppu {
    pub fn new(palette: [Color; 4], strict_writes: bool) -> Self {
        let mut ppu = Self {
            mode: Mode::OamSearch,
            mode_clock: 0,
            ly: 0,
            lyc: 0,
            lcdc: LcdControl::from_bits_retain(0x91),
            stat: LcdStatus::empty(),
            scy: 0,
            scx: 0,
            wy: 0,
            wx: 0,
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF,
            vram: [0; VRAM_SIZE],
            oam: [0; OAM_SIZE],
            window_line: 0,
            palette,
            strict_writes,
        };
        ppu.update_coincidence();
        ppu
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn ly(&self) -> u8 {
        self.ly
    }

    #[inline]
    pub fn lcdc(&self) -> LcdControl {
        self.lcdc
    }

    #[inline]
    fn lcd_on(&self) -> bool {
        self.lcdc.contains(LcdControl::LCD_ENABLE)
    }

    pub fn tick(
        &mut self,
        cycles: u32,
        interrupts: &mut InterruptController,
        renderer: &mut dyn Renderer,
    ) {
        if !self.lcd_on() {
            return;
        }

        self.mode_clock += cycles;
        while self.mode_clock >= self.mode.cycles() {
            self.mode_clock -= self.mode.cycles();
            self.advance(interrupts, renderer);
        }
    }

    fn advance(&mut self, interrupts: &mut InterruptController, renderer: &mut dyn Renderer) {
        match self.mode {
            Mode::OamSearch => {
                self.enter(Mode::LcdTransfer, interrupts);
                self.render_scanline(renderer);
            }
            Mode::LcdTransfer => self.enter(Mode::HBlank, interrupts),
            Mode::HBlank => {
                self.set_ly(self.ly + 1, interrupts);
                if self.ly == VBLANK_LINE {
                    interrupts.request(Interrupt::VBlank);
                    self.enter(Mode::VBlank, interrupts);
                } else {
                    self.enter(Mode::OamSearch, interrupts);
                }
            }
            Mode::VBlank => {
                if self.ly == LAST_LINE {
                    self.set_ly(0, interrupts);
                    self.window_line = 0;
                    renderer.refresh();
                    self.enter(Mode::OamSearch, interrupts);
                } else {
                    self.set_ly(self.ly + 1, interrupts);
                }
            }
        }
    }

    fn enter(&mut self, mode: Mode, interrupts: &mut InterruptController) {
        log::trace!("GB PPU: {:?} -> {:?} at LY={}", self.mode, mode, self.ly);
        self.mode = mode;
        if let Some(select) = mode.stat_select() {
            if self.stat.contains(select) {
                interrupts.request(Interrupt::Lcd);
            }
        }
    }

    fn set_ly(&mut self, ly: u8, interrupts: &mut InterruptController) {
        debug_assert!(ly <= LAST_LINE);
        self.ly = ly;
        if self.update_coincidence() && self.stat.contains(LcdStatus::LYC_SELECT) {
            interrupts.request(Interrupt::Lcd);
        }
    }

    /// Refresh the LY==LYC status bit; returns whether they match.
    fn update_coincidence(&mut self) -> bool {
        let hit = self.ly == self.lyc;
        self.stat.set(LcdStatus::COINCIDENCE, hit);
        hit
    }

    /// VRAM is locked while a line is being pushed to the LCD.
    pub fn vram_accessible(&self) -> bool {
        !self.lcd_on() || self.mode != Mode::LcdTransfer
    }

    /// OAM is only open to the CPU during vertical blank.
    pub fn oam_accessible(&self) -> bool {
        !self.lcd_on() || self.mode == Mode::VBlank
    }

    pub fn read_vram(&self, addr: u16) -> u8 {
        if !self.vram_accessible() {
            return LOCKED_READ;
        }
        self.vram[(addr & 0x1FFF) as usize]
    }

    /// Bus writes land regardless of mode unless strict writes are enabled.
    pub fn write_vram(&mut self, addr: u16, value: u8) {
        if self.strict_writes && !self.vram_accessible() {
            log::trace!("GB PPU: dropped VRAM write 0x{:04X}=0x{:02X}", addr, value);
            return;
        }
        self.vram[(addr & 0x1FFF) as usize] = value;
    }

    pub fn read_oam(&self, addr: u16) -> u8 {
        if !self.oam_accessible() {
            return LOCKED_READ;
        }
        self.oam
            .get(addr.wrapping_sub(0xFE00) as usize)
            .copied()
            .unwrap_or(LOCKED_READ)
    }

    pub fn write_oam(&mut self, addr: u16, value: u8) {
        if self.strict_writes && !self.oam_accessible() {
            log::trace!("GB PPU: dropped OAM write 0x{:04X}=0x{:02X}", addr, value);
            return;
        }
        self.write_oam_index(addr.wrapping_sub(0xFE00) as usize, value);
    }

    /// DMA destination path; bypasses the CPU lockout.
    pub(super) fn write_oam_index(&mut self, index: usize, value: u8) {
        if let Some(slot) = self.oam.get_mut(index) {
            *slot = value;
        }
    }

    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => 0x80 | self.stat.bits() | self.mode as u8,
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF40 => self.write_lcdc(value),
            0xFF41 => {
                let keep = self.stat.bits() & LcdStatus::COINCIDENCE.bits();
                self.stat = LcdStatus::from_bits_truncate(keep | (value & LcdStatus::WRITABLE));
            }
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only; writing restarts the frame at line 0.
            0xFF44 => {
                self.ly = 0;
                self.window_line = 0;
                if self.lcd_on() {
                    self.mode = Mode::OamSearch;
                    self.mode_clock = 0;
                }
                self.update_coincidence();
            }
            0xFF45 => {
                self.lyc = value;
                self.update_coincidence();
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8) {
        let was_on = self.lcd_on();
        self.lcdc = LcdControl::from_bits_retain(value);
        match (was_on, self.lcd_on()) {
            (true, false) => {
                log::debug!("GB PPU: LCD off");
                self.mode = Mode::HBlank;
                self.mode_clock = 0;
                self.ly = 0;
                self.update_coincidence();
            }
            (false, true) => {
                log::debug!("GB PPU: LCD on");
                self.mode = Mode::OamSearch;
                self.mode_clock = 0;
                self.ly = 0;
                self.window_line = 0;
                self.update_coincidence();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests;
