use thiserror::Error;

/// Fatal emulation conditions.
///
/// None of these are retryable: the machine is deterministic, so the driving
/// loop stops and reports the failing address or opcode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid opcode {opcode:#04X} (CB-prefixed: {prefixed}) at {pc:#06X}")]
    InvalidOpcode { opcode: u8, prefixed: bool, pc: u16 },

    #[error("program counter ran past the address space ({length}-byte instruction at {pc:#06X})")]
    PcOutOfRange { pc: u16, length: u8 },

    #[error("unsupported cartridge type {kind:#04X}")]
    UnsupportedCartridge { kind: u8 },

    #[error("ROM image is {len} bytes, too small to hold a cartridge header")]
    RomTooSmall { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
