use super::MemoryBus;

impl MemoryBus {
    pub(super) fn read_io(&mut self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01 => self.serial.read_sb(),
            0xFF02 => self.serial.read_sc(),
            0xFF04 => self.timer.read_div(),
            0xFF05 => self.timer.tima,
            0xFF06 => self.timer.tma,
            0xFF07 => self.timer.read_tac(),
            0xFF0F => self.interrupts.read_if(),
            0xFF40..=0xFF45 | 0xFF47..=0xFF4B => self.ppu.read_register(addr),
            0xFF46 => self.dma.page(),
            // Sound, FF50 and the CGB registers.
            _ => 0xFF,
        }
    }

    pub(super) fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.joypad.write(value),
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value, &mut self.interrupts),
            0xFF04 => self.timer.write_div(),
            0xFF05 => self.timer.write_tima(value),
            0xFF06 => self.timer.write_tma(value),
            0xFF07 => self.timer.write_tac(value),
            0xFF0F => self.interrupts.write_if(value),
            0xFF40..=0xFF45 | 0xFF47..=0xFF4B => self.ppu.write_register(addr, value),
            0xFF46 => self.dma.trigger(value),
            0xFF50 => {
                // One-way latch; any value unmaps.
                if self.boot_rom.take().is_some() {
                    log::debug!("GB boot ROM disabled");
                }
            }
            _ => {}
        }
    }
}
