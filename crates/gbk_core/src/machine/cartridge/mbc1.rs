use super::{
    header_ram_banks, header_title, rom_banks, rom_byte, Cartridge, RAM_BANK_SIZE,
};

/// MBC1 (types 0x01-0x03).
///
/// A 5-bit ROM bank register plus a 2-bit register that extends the ROM
/// bank in mode 0 and, in mode 1, also selects the RAM bank and the bank
/// mapped at 0x0000.
pub struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_banks: usize,
    ram_banks: usize,
    bank_low: u8,
    bank_high: u8,
    ram_enabled: bool,
    advanced_mode: bool,
}

impl Mbc1 {
    pub fn new(rom: Vec<u8>) -> Self {
        let ram_banks = header_ram_banks(&rom);
        Self {
            rom_banks: rom_banks(&rom),
            ram: vec![0; ram_banks * RAM_BANK_SIZE],
            rom,
            ram_banks,
            bank_low: 1,
            bank_high: 0,
            ram_enabled: false,
            advanced_mode: false,
        }
    }

    fn low_bank(&self) -> usize {
        let bank = if self.advanced_mode {
            (self.bank_high as usize) << 5
        } else {
            0
        };
        bank % self.rom_banks
    }

    fn high_bank(&self) -> usize {
        let bank = ((self.bank_high as usize) << 5) | self.bank_low as usize;
        bank % self.rom_banks
    }

    fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram_banks == 0 {
            return None;
        }
        let bank = if self.advanced_mode {
            self.bank_high as usize % self.ram_banks
        } else {
            0
        };
        Some(bank * RAM_BANK_SIZE + (addr - 0xA000) as usize)
    }
}

impl Cartridge for Mbc1 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => rom_byte(&self.rom, self.low_bank(), addr),
            0x4000..=0x7FFF => rom_byte(&self.rom, self.high_bank(), addr),
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
            // Bank 0 in the low register selects bank 1.
            0x2000..=0x3FFF => self.bank_low = (value & 0x1F).max(1),
            0x4000..=0x5FFF => self.bank_high = value & 0x03,
            0x6000..=0x7FFF => self.advanced_mode = value & 0x01 != 0,
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

#[cfg(test)]
mod tests {
    use super::super::tests::image;
    use super::*;

    #[test]
    fn switchable_bank_follows_low_register() {
        let mut cart = Mbc1::new(image(0x01, 8, 0));
        assert_eq!(cart.read(0x4000), 1);
        cart.write(0x2000, 0x05);
        assert_eq!(cart.read(0x4000), 5);
        assert_eq!(cart.read(0x7FFF), 5);
        cart.write(0x2000, 0x00);
        assert_eq!(cart.read(0x4000), 1, "bank 0 maps to 1");
        assert_eq!(cart.read(0x0000), 0);
    }

    #[test]
    fn bank_number_wraps_to_rom_size() {
        let mut cart = Mbc1::new(image(0x01, 4, 0));
        cart.write(0x2000, 0x06);
        assert_eq!(cart.read(0x4000), 2);
    }

    #[test]
    fn high_bits_extend_rom_bank() {
        let mut cart = Mbc1::new(image(0x01, 64, 0));
        cart.write(0x2000, 0x02);
        cart.write(0x4000, 0x01);
        assert_eq!(cart.read(0x4000), 34);
        assert_eq!(cart.read(0x0000), 0, "mode 0 pins bank 0");

        cart.write(0x6000, 0x01);
        assert_eq!(cart.read(0x0000), 32);
    }

    #[test]
    fn ram_needs_enable_and_banks_in_mode_1() {
        let mut cart = Mbc1::new(image(0x03, 4, 0x03));
        cart.write(0xA000, 0x11);
        assert_eq!(cart.read(0xA000), 0xFF, "disabled");

        cart.write(0x0000, 0x0A);
        cart.write(0xA000, 0x11);
        assert_eq!(cart.read(0xA000), 0x11);

        cart.write(0x6000, 0x01);
        cart.write(0x4000, 0x02);
        assert_eq!(cart.read(0xA000), 0x00);
        cart.write(0xA000, 0x22);

        cart.write(0x4000, 0x00);
        assert_eq!(cart.read(0xA000), 0x11);
        cart.write(0x4000, 0x02);
        assert_eq!(cart.read(0xA000), 0x22);

        cart.write(0x0000, 0x00);
        assert_eq!(cart.read(0xA000), 0xFF);
    }
}
