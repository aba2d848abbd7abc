mod mbc1;
mod mbc3;
mod rom_only;

pub use mbc1::Mbc1;
pub use mbc3::Mbc3;
pub use rom_only::RomOnly;

use crate::error::{Error, Result};

/// Size of one switchable ROM bank.
pub const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one external RAM bank.
pub const RAM_BANK_SIZE: usize = 0x2000;

/// Header ends at 0x014F.
pub const HEADER_END: usize = 0x150;

const TITLE: std::ops::Range<usize> = 0x134..0x144;
const CARTRIDGE_TYPE: usize = 0x147;
const RAM_SIZE: usize = 0x149;

/// A cartridge as seen from the bus: 0x0000-0x7FFF and 0xA000-0xBFFF.
///
/// Writes to the ROM range program the mapper; RAM writes land in the
/// selected external RAM bank when it is enabled.
pub trait Cartridge {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    /// Title from the header, for logs and front ends.
    fn title(&self) -> String {
        String::new()
    }
}

/// Header title: up to 16 ASCII bytes, NUL padded.
pub fn header_title(rom: &[u8]) -> String {
    rom.get(TITLE)
        .unwrap_or(&[])
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// External RAM banks declared by the header RAM size byte. Small sizes
/// are rounded up to one 8 KiB bank.
pub fn header_ram_banks(rom: &[u8]) -> usize {
    match rom.get(RAM_SIZE).copied().unwrap_or(0) {
        0x01 | 0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}

/// Build the mapper named by the header type byte.
pub fn load(rom: Vec<u8>) -> Result<Box<dyn Cartridge>> {
    if rom.len() < HEADER_END {
        return Err(Error::RomTooSmall { len: rom.len() });
    }

    let kind = rom[CARTRIDGE_TYPE];
    let title = header_title(&rom);
    let cartridge: Box<dyn Cartridge> = match kind {
        0x00 | 0x08 | 0x09 => Box::new(RomOnly::new(rom)),
        0x01..=0x03 => Box::new(Mbc1::new(rom)),
        0x0F..=0x13 => Box::new(Mbc3::new(rom)),
        _ => {
            log::error!("GB cartridge: unsupported type 0x{:02X} ({:?})", kind, title);
            return Err(Error::UnsupportedCartridge { kind });
        }
    };

    log::info!("GB cartridge: {:?} type=0x{:02X}", title, kind);
    Ok(cartridge)
}

/// Byte `offset` of ROM bank `bank`, or 0xFF past the end of the image.
#[inline]
fn rom_byte(rom: &[u8], bank: usize, offset: u16) -> u8 {
    rom.get(bank * ROM_BANK_SIZE + (offset as usize & (ROM_BANK_SIZE - 1)))
        .copied()
        .unwrap_or(0xFF)
}

/// Number of 16 KiB banks in `rom`, at least one.
#[inline]
fn rom_banks(rom: &[u8]) -> usize {
    (rom.len() / ROM_BANK_SIZE).max(1)
}
