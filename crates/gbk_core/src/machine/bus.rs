mod io;

use crate::config::{BootRom, GameBoyConfig};
use crate::cpu::Bus;
use crate::renderer::Renderer;

use super::boot::{BOOT_ROM_SIZE, BUILTIN_BOOT_ROM, POST_BOOT_DIV, POST_BOOT_IO};
use super::cartridge::Cartridge;
use super::dma::{Dma, DMA_LENGTH};
use super::interrupts::InterruptController;
use super::joypad::Joypad;
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;

pub const WRAM_SIZE: usize = 0x2000;
pub const HRAM_SIZE: usize = 0x7F;

const HRAM_START: u16 = 0xFF80;
/// Offset from echo RAM back to WRAM.
const ECHO_OFFSET: u16 = 0x2000;

/// Address router between the CPU and everything it can see.
///
/// Owns work RAM, HRAM, the boot ROM overlay, the cartridge and every
/// peripheral. Time is pushed in from outside through [`MemoryBus::tick`].
pub struct MemoryBus {
    wram: [u8; WRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    /// Present while the boot ROM is mapped over 0x0000-0x00FF.
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    cartridge: Box<dyn Cartridge>,
    pub(super) ppu: Ppu,
    pub(super) timer: Timer,
    pub(super) interrupts: InterruptController,
    pub(super) dma: Dma,
    pub(super) joypad: Joypad,
    pub(super) serial: Serial,
}

impl MemoryBus {
    pub fn new(cartridge: Box<dyn Cartridge>, config: &GameBoyConfig) -> Self {
        let boot_rom = match &config.boot_rom {
            BootRom::Builtin => Some(Box::new(BUILTIN_BOOT_ROM)),
            BootRom::Custom(image) => Some(image.clone()),
            BootRom::Skip => None,
        };

        let mut bus = Self {
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            boot_rom,
            cartridge,
            ppu: Ppu::new(config.palette, config.strict_vram_writes),
            timer: Timer::new(),
            interrupts: InterruptController::new(),
            dma: Dma::new(),
            joypad: Joypad::new(),
            serial: Serial::new(),
        };

        if bus.boot_rom.is_some() {
            // Power-on: the boot ROM is responsible for turning the LCD on.
            bus.ppu.write_register(0xFF40, 0x00);
        } else {
            bus.apply_post_boot_io();
        }
        bus
    }

    fn apply_post_boot_io(&mut self) {
        for (addr, value) in POST_BOOT_IO {
            self.write_mapped(addr, value);
        }
        self.timer.div = POST_BOOT_DIV;
    }

    #[inline]
    pub fn boot_rom_enabled(&self) -> bool {
        self.boot_rom.is_some()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn dma(&self) -> &Dma {
        &self.dma
    }

    pub fn joypad(&self) -> &Joypad {
        &self.joypad
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    pub fn cartridge(&self) -> &dyn Cartridge {
        self.cartridge.as_ref()
    }

    /// Advance timer, PPU and DMA by `cycles` T-cycles, in that order.
    pub fn tick(&mut self, cycles: u32, renderer: &mut dyn Renderer) {
        self.timer.tick(cycles, &mut self.interrupts);
        self.ppu.tick(cycles, &mut self.interrupts, renderer);
        if let Some(source) = self.dma.tick(cycles) {
            self.copy_to_oam(source);
        }
    }

    /// Source reads see the PPU locks, so locked VRAM/OAM copies as 0xFF.
    fn copy_to_oam(&mut self, source: u16) {
        for i in 0..DMA_LENGTH {
            let value = self.read_mapped(source.wrapping_add(i));
            self.ppu.write_oam_index(i as usize, value);
        }
    }

    /// Memory map without the DMA lockout.
    fn read_mapped(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF => match &self.boot_rom {
                Some(rom) => rom[addr as usize],
                None => self.cartridge.read(addr),
            },
            0x0100..=0x7FFF | 0xA000..=0xBFFF => self.cartridge.read(addr),
            0x8000..=0x9FFF => self.ppu.read_vram(addr),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            0xE000..=0xFDFF => self.read_mapped(addr - ECHO_OFFSET),
            0xFE00..=0xFE9F => self.ppu.read_oam(addr),
            // Unusable.
            0xFEA0..=0xFEFF => 0x00,
            0xFF00..=0xFF7F => self.read_io(addr),
            0xFF80..=0xFFFE => self.hram[(addr - HRAM_START) as usize],
            0xFFFF => self.interrupts.read_ie(),
        }
    }

    fn write_mapped(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => self.cartridge.write(addr, value),
            0x8000..=0x9FFF => self.ppu.write_vram(addr, value),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.write_mapped(addr - ECHO_OFFSET, value),
            0xFE00..=0xFE9F => self.ppu.write_oam(addr, value),
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.write_io(addr, value),
            0xFF80..=0xFFFE => self.hram[(addr - HRAM_START) as usize] = value,
            0xFFFF => self.interrupts.write_ie(value),
        }
    }
}

impl Bus for MemoryBus {
    /// While OAM DMA runs only HRAM and IE are reachable.
    fn read8(&mut self, addr: u16) -> u8 {
        if self.dma.is_active() && addr < HRAM_START {
            return 0xFF;
        }
        self.read_mapped(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if self.dma.is_active() && addr < HRAM_START {
            return;
        }
        self.write_mapped(addr, value);
    }
}
