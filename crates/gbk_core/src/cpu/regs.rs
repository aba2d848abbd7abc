/// 8-bit register slots, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg8 {
    A = 0,
    F = 1,
    B = 2,
    C = 3,
    D = 4,
    E = 5,
    H = 6,
    L = 7,
}

/// 16-bit views formed from two 8-bit slots (high, low).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
}

impl Reg16 {
    #[inline]
    pub const fn halves(self) -> (Reg8, Reg8) {
        match self {
            Reg16::AF => (Reg8::A, Reg8::F),
            Reg16::BC => (Reg8::B, Reg8::C),
            Reg16::DE => (Reg8::D, Reg8::E),
            Reg16::HL => (Reg8::H, Reg8::L),
        }
    }
}

/// Register file for the LR35902.
///
/// The eight 8-bit registers live in a flat array indexed by [`Reg8`];
/// pairs are composed on access rather than aliased in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    slots: [u8; 8],
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn get(&self, reg: Reg8) -> u8 {
        self.slots[reg as usize]
    }

    #[inline]
    pub fn set(&mut self, reg: Reg8, value: u8) {
        // Lower 4 bits of F are always zero.
        self.slots[reg as usize] = if reg == Reg8::F { value & 0xF0 } else { value };
    }

    #[inline]
    pub fn pair(&self, pair: Reg16) -> u16 {
        let (hi, lo) = pair.halves();
        u16::from_be_bytes([self.get(hi), self.get(lo)])
    }

    #[inline]
    pub fn set_pair(&mut self, pair: Reg16, value: u16) {
        let (hi, lo) = pair.halves();
        let [h, l] = value.to_be_bytes();
        self.set(hi, h);
        self.set(lo, l);
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.get(Reg8::A)
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.set(Reg8::A, value);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.get(Reg8::F)
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.pair(Reg16::AF)
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.pair(Reg16::BC)
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.pair(Reg16::DE)
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.pair(Reg16::HL)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.set_pair(Reg16::HL, value);
    }
}
