use gbk_common::Key;

use crate::cpu::Interrupt;

use super::InterruptController;

const SELECT_DIRECTIONS: u8 = 0x10;
const SELECT_BUTTONS: u8 = 0x20;

/// P1 (FF00) key matrix.
///
/// Software picks a group by clearing bit 4 (directions) or bit 5
/// (buttons); the low nibble then reports that group active-low.
#[derive(Clone, Debug)]
pub struct Joypad {
    select: u8,
    /// Pressed action buttons, one bit per line, 1 = pressed.
    buttons: u8,
    /// Pressed directions, one bit per line, 1 = pressed.
    directions: u8,
}

impl Default for Joypad {
    fn default() -> Self {
        Self {
            select: SELECT_DIRECTIONS | SELECT_BUTTONS,
            buttons: 0,
            directions: 0,
        }
    }
}

impl Joypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & SELECT_DIRECTIONS == 0 {
            low &= !self.directions;
        }
        if self.select & SELECT_BUTTONS == 0 {
            low &= !self.buttons;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    /// Only the two select bits are writable.
    pub fn write(&mut self, value: u8) {
        self.select = value & (SELECT_DIRECTIONS | SELECT_BUTTONS);
    }

    fn group_mut(&mut self, key: Key) -> &mut u8 {
        if key.is_direction() {
            &mut self.directions
        } else {
            &mut self.buttons
        }
    }

    /// Press `key`; a key going from released to pressed requests the
    /// Joypad interrupt.
    pub fn press(&mut self, key: Key, interrupts: &mut InterruptController) {
        let mask = 1 << key.line();
        let group = self.group_mut(key);
        if *group & mask == 0 {
            *group |= mask;
            interrupts.request(Interrupt::Joypad);
        }
    }

    pub fn release(&mut self, key: Key) {
        let mask = 1 << key.line();
        *self.group_mut(key) &= !mask;
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        let group = if key.is_direction() {
            self.directions
        } else {
            self.buttons
        };
        group & (1 << key.line()) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_selected_reads_all_released() {
        let mut pad = Joypad::new();
        let mut ic = InterruptController::new();
        pad.press(Key::A, &mut ic);
        assert_eq!(pad.read(), 0xFF);
    }

    #[test]
    fn groups_report_active_low() {
        let mut pad = Joypad::new();
        let mut ic = InterruptController::new();
        pad.press(Key::Down, &mut ic);
        pad.press(Key::Start, &mut ic);
        pad.press(Key::B, &mut ic);

        pad.write(0x20); // directions
        assert_eq!(pad.read(), 0xE0 | 0x07);
        pad.write(0x10); // buttons
        assert_eq!(pad.read(), 0xD0 | 0x05);
        pad.write(0x00);
        assert_eq!(pad.read(), 0xC0 | 0x05);
    }

    #[test]
    fn every_key_lands_on_its_own_line() {
        for key in Key::ALL {
            let mut pad = Joypad::new();
            let mut ic = InterruptController::new();
            pad.press(key, &mut ic);

            let (selected, other) = if key.is_direction() {
                (0x20, 0x10)
            } else {
                (0x10, 0x20)
            };
            pad.write(selected);
            assert_eq!(pad.read() & 0x0F, 0x0F & !(1 << key.line()), "{key:?}");
            pad.write(other);
            assert_eq!(pad.read() & 0x0F, 0x0F, "{key:?}");
        }
    }

    #[test]
    fn low_nibble_is_read_only() {
        let mut pad = Joypad::new();
        pad.write(0x0F);
        assert_eq!(pad.read(), 0xCF);
    }

    #[test]
    fn new_press_requests_interrupt_once() {
        let mut pad = Joypad::new();
        let mut ic = InterruptController::new();
        ic.write_ie(Interrupt::Joypad.bit());

        pad.press(Key::Select, &mut ic);
        assert!(pad.is_pressed(Key::Select));
        assert_eq!(ic.take_pending(true), Some(Interrupt::Joypad));
        pad.press(Key::Select, &mut ic);
        assert_eq!(ic.take_pending(true), None, "already held");

        pad.release(Key::Select);
        assert!(!pad.is_pressed(Key::Select));
        pad.press(Key::Select, &mut ic);
        assert_eq!(ic.take_pending(true), Some(Interrupt::Joypad));
    }
}
