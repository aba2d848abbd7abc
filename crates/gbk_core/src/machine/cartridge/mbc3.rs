use super::{
    header_ram_banks, header_title, rom_banks, rom_byte, Cartridge, RAM_BANK_SIZE,
};

/// MBC3 (types 0x0F-0x13) without the real-time clock.
///
/// RTC register selects (0x08-0x0C) read back 0xFF and swallow writes.
pub struct Mbc3 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_banks: usize,
    ram_banks: usize,
    rom_bank: u8,
    ram_select: u8,
    ram_enabled: bool,
}

impl Mbc3 {
    pub fn new(rom: Vec<u8>) -> Self {
        let ram_banks = header_ram_banks(&rom).min(4);
        Self {
            rom_banks: rom_banks(&rom),
            ram: vec![0; ram_banks * RAM_BANK_SIZE],
            rom,
            ram_banks,
            rom_bank: 1,
            ram_select: 0,
            ram_enabled: false,
        }
    }

    fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram_select > 0x03 || self.ram_banks == 0 {
            return None;
        }
        let bank = self.ram_select as usize % self.ram_banks;
        Some(bank * RAM_BANK_SIZE + (addr - 0xA000) as usize)
    }
}

impl Cartridge for Mbc3 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => rom_byte(&self.rom, 0, addr),
            0x4000..=0x7FFF => {
                rom_byte(&self.rom, self.rom_bank as usize % self.rom_banks, addr)
            }
            0xA000..=0xBFFF => self
                .ram_offset(addr)
                .and_then(|i| self.ram.get(i).copied())
                .unwrap_or(0xFF),
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => self.rom_bank = (value & 0x7F).max(1),
            0x4000..=0x5FFF => self.ram_select = value,
            // Clock latch; no clock to latch.
            0x6000..=0x7FFF => {}
            0xA000..=0xBFFF => {
                if let Some(i) = self.ram_offset(addr) {
                    if let Some(slot) = self.ram.get_mut(i) {
                        *slot = value;
                    }
                }
            }
            _ => {}
        }
    }

    fn title(&self) -> String {
        header_title(&self.rom)
    }
}
