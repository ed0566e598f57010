// ============================================================================
// CLOCK - Fuente de tiempo inyectable
// ============================================================================
// El throttle de puntos depende de "ahora"; en el navegador viene de chrono
// (wasmbind → Date.now), en tests de un reloj manual.
// ============================================================================

/// Fuente de tiempo en milisegundos epoch
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Reloj real del sistema
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use std::cell::Cell;

    /// Reloj controlado a mano para tests
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now: Cell<i64>,
    }

    impl ManualClock {
        pub fn new(start_ms: i64) -> Self {
            Self { now: Cell::new(start_ms) }
        }

        pub fn advance(&self, ms: i64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_epoch_millis() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(1_000);
        clock.advance(7_999);
        assert_eq!(clock.now_ms(), 8_999);
    }
}
