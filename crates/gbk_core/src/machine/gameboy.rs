use gbk_common::Key;

use crate::config::{BootRom, GameBoyConfig};
use crate::cpu::Cpu;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::CYCLES_PER_FRAME;

use super::cartridge::{self, Cartridge};
use super::MemoryBus;

/// A DMG Game Boy.
///
/// Owns the CPU, the bus (and through it every peripheral) and the
/// renderer the PPU draws into. Each [`GameBoy::step`] services at most one
/// interrupt, executes one instruction and then advances the peripherals by
/// exactly the cycles that took.
pub struct GameBoy<R: Renderer> {
    cpu: Cpu,
    bus: MemoryBus,
    renderer: R,
    cycles: u64,
}

impl<R: Renderer> GameBoy<R> {
    pub fn new(cartridge: Box<dyn Cartridge>, renderer: R, config: GameBoyConfig) -> Self {
        let mut cpu = Cpu::new();
        if config.boot_rom == BootRom::Skip {
            cpu.apply_post_boot_state();
        }

        Self {
            cpu,
            bus: MemoryBus::new(cartridge, &config),
            renderer,
            cycles: 0,
        }
    }

    /// Build a machine around a raw ROM image, picking the mapper from its
    /// header.
    pub fn from_rom(rom: Vec<u8>, renderer: R, config: GameBoyConfig) -> Result<Self> {
        let cartridge = cartridge::load(rom)?;
        Ok(Self::new(cartridge, renderer, config))
    }

    /// Run one instruction (plus interrupt entry, if one is due) and return
    /// the T-cycles consumed.
    pub fn step(&mut self) -> Result<u32> {
        // HALT ends on any pending enabled line, even with IME off.
        if self.cpu.halted && self.bus.interrupts.pending() != 0 {
            self.cpu.halted = false;
        }

        let mut cycles = 0;
        if let Some(interrupt) = self.bus.interrupts.take_pending(self.cpu.ime) {
            cycles += self.cpu.enter_interrupt(&mut self.bus, interrupt);
        }
        cycles += self.cpu.step(&mut self.bus)?;

        self.bus.tick(cycles, &mut self.renderer);
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Step until at least `cycles` T-cycles have elapsed; returns the exact
    /// count, which may overshoot by part of an instruction.
    pub fn run_cycles(&mut self, cycles: u64) -> Result<u64> {
        let mut elapsed = 0;
        while elapsed < cycles {
            elapsed += self.step()? as u64;
        }
        Ok(elapsed)
    }

    /// One LCD frame's worth of cycles.
    pub fn step_frame(&mut self) -> Result<()> {
        self.run_cycles(CYCLES_PER_FRAME as u64).map(|_| ())
    }

    pub fn press(&mut self, key: Key) {
        self.bus.joypad.press(key, &mut self.bus.interrupts);
    }

    pub fn release(&mut self, key: Key) {
        self.bus.joypad.release(key);
    }

    /// Bytes written out over the serial port and not yet taken.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial.output()
    }

    /// Drain the serial output buffer.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.serial.take_output()
    }

    /// Total T-cycles since power-on.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
