use super::{header_ram_banks, header_title, rom_byte, Cartridge, RAM_BANK_SIZE};

/// 32 KiB ROM with optional unbanked RAM (types 0x00, 0x08, 0x09).
pub struct RomOnly {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnly {
    pub fn new(rom: Vec<u8>) -> Self {
        let ram = vec![0; header_ram_banks(&rom).min(1) * RAM_BANK_SIZE];
        Self { rom, ram }
    }
}

impl Cartridge for RomOnly {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => rom_byte(&self.rom, 0, addr),
            0x4000..=0x7FFF => rom_byte(&self.rom, 1, addr),
            0xA000..=0xBFFF => self
                .ram
                .get((addr - 0xA000) as usize)
                .copied()
                .unwrap_or(0xFF),
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let 0xA000..=0xBFFF = addr {
            if let Some(slot) = self.ram.get_mut((addr - 0xA000) as usize) {
                *slot = value;
            }
        }
    }

    fn title(&self) -> String {
        header_title(&self.rom)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::image;
    use super::*;

    #[test]
    fn rom_writes_are_ignored() {
        let mut cart = RomOnly::new(image(0x00, 2, 0));
        cart.write(0x2000, 0x05);
        assert_eq!(cart.read(0x0000), 0);
        assert_eq!(cart.read(0x7FFF), 1);
        assert_eq!(cart.read(0xA000), 0xFF);
    }

    #[test]
    fn plain_ram_when_declared() {
        let mut cart = RomOnly::new(image(0x08, 2, 0x02));
        cart.write(0xBFFF, 0x5A);
        assert_eq!(cart.read(0xBFFF), 0x5A);
    }
}
