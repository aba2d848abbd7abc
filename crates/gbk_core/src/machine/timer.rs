use crate::cpu::Interrupt;

use super::InterruptController;

/// T-cycles per DIV increment (16384 Hz).
const DIV_PERIOD: u32 = 256;

/// DIV/TIMA/TMA/TAC timer.
///
/// DIV free-runs off its own sub-counter. TIMA advances only while TAC
/// bit 2 is set, at one of four rates selected by TAC bits 0-1; on overflow
/// it reloads from TMA and requests the Timer interrupt.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    /// Visible divider register (FF04).
    pub(super) div: u8,
    div_clock: u32,
    /// Timer counter (FF05).
    pub(super) tima: u8,
    /// Timer modulo (FF06).
    pub(super) tma: u8,
    /// Timer control (FF07), lower 3 bits.
    pub(super) tac: u8,
    pub(super) enabled: bool,
    tima_clock: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// T-cycles per TIMA increment for the current rate select.
    pub fn tima_period(&self) -> u32 {
        match self.tac & 0x03 {
            0 => 1024, // 4096 Hz
            1 => 16,   // 262144 Hz
            2 => 64,   // 65536 Hz
            _ => 256,  // 16384 Hz
        }
    }

    pub fn tick(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        self.div_clock += cycles;
        while self.div_clock >= DIV_PERIOD {
            self.div_clock -= DIV_PERIOD;
            self.div = self.div.wrapping_add(1);
        }

        if !self.enabled {
            return;
        }

        let period = self.tima_period();
        self.tima_clock += cycles;
        while self.tima_clock >= period {
            self.tima_clock -= period;
            let (tima, overflow) = self.tima.overflowing_add(1);
            if overflow {
                self.tima = self.tma;
                interrupts.request(Interrupt::Timer);
            } else {
                self.tima = tima;
            }
        }
    }

    pub(super) fn read_div(&self) -> u8 {
        self.div
    }

    /// Any write clears the divider.
    pub(super) fn write_div(&mut self) {
        self.div = 0;
        self.div_clock = 0;
    }

    pub(super) fn write_tima(&mut self, value: u8) {
        self.tima = value;
    }

    pub(super) fn write_tma(&mut self, value: u8) {
        self.tma = value;
    }

    pub(super) fn read_tac(&self) -> u8 {
        0xF8 | self.tac
    }

    /// Rate and enable change together.
    pub(super) fn write_tac(&mut self, value: u8) {
        let tac = value & 0x07;
        if tac & 0x03 != self.tac & 0x03 {
            self.tima_clock = 0;
        }
        self.tac = tac;
        self.enabled = tac & 0x04 != 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_increments_every_256_cycles() {
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        timer.tick(255, &mut ic);
        assert_eq!(timer.read_div(), 0);
        timer.tick(1, &mut ic);
        assert_eq!(timer.read_div(), 1);
        timer.tick(256 * 255, &mut ic);
        assert_eq!(timer.read_div(), 0, "DIV wraps at 8 bits");
    }

    #[test]
    fn divider_runs_while_timer_disabled() {
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        timer.write_tac(0x00);
        timer.tick(1024, &mut ic);
        assert_eq!(timer.read_div(), 4);
        assert_eq!(timer.tima, 0);
    }

    #[test]
    fn div_write_resets() {
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        timer.tick(1000, &mut ic);
        timer.write_div();
        assert_eq!(timer.read_div(), 0);
        timer.tick(255, &mut ic);
        assert_eq!(timer.read_div(), 0);
    }

    #[test]
    fn slowest_rate_counts_once_per_1024_cycles() {
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        timer.write_tac(0x04);

        timer.tick(1023, &mut ic);
        assert_eq!(timer.tima, 0);
        timer.tick(1, &mut ic);
        assert_eq!(timer.tima, 1);
    }

    #[test]
    fn overflow_reloads_modulo_and_requests_once() {
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        timer.write_tac(0x05); // 16 cycles per tick
        timer.write_tma(0xAB);
        timer.write_tima(0xFF);

        timer.tick(16, &mut ic);
        assert_eq!(timer.tima, 0xAB);
        assert_eq!(ic.take_pending(true), Some(Interrupt::Timer));
        assert_eq!(ic.take_pending(true), None);
    }

    #[test]
    fn ten_overflows_request_ten_interrupts() {
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        timer.write_tac(0x04);

        let mut count = 0;
        for _ in 0..(256 * 10) {
            timer.tick(1024, &mut ic);
            if ic.take_pending(true).is_some() {
                count += 1;
            }
        }
        assert_eq!(count, 10);
    }

    #[test]
    fn tac_reads_back_with_high_bits_set() {
        let mut timer = Timer::new();
        timer.write_tac(0xFD);
        assert_eq!(timer.read_tac(), 0xFD);
        assert!(timer.enabled);
        assert_eq!(timer.tima_period(), 16);
        timer.write_tac(0x02);
        assert!(!timer.enabled);
        assert_eq!(timer.read_tac(), 0xFA);
    }
}
