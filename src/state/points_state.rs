// ============================================================================
// POINTS STATE - Saldo/total + compuerta de refresco
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::PointsState;

/// Motivo por el que la compuerta rechazó un refresco
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateRejection {
    /// Ya hay una petición en vuelo
    InFlight,
    /// Aún no pasó la ventana desde el último inicio
    Throttled { remaining_ms: i64 },
}

/// Compuerta de refresco de puntos.
/// Solo la muta el propio refresco: `try_begin` antes de la red, `finish` al terminar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncGate {
    pub is_fetching: bool,
    /// Epoch ms del último refresco *iniciado*
    pub last_fetch_at: i64,
}

impl SyncGate {
    /// Evalúa en orden (en vuelo, ventana) y, si pasa, marca el inicio en `now`
    pub fn try_begin(&mut self, now: i64, window_ms: i64) -> Result<(), GateRejection> {
        if self.is_fetching {
            return Err(GateRejection::InFlight);
        }
        let elapsed = now - self.last_fetch_at;
        // Reloj hacia atrás (elapsed < 0) → ventana vencida
        if (0..window_ms).contains(&elapsed) {
            return Err(GateRejection::Throttled { remaining_ms: window_ms - elapsed });
        }
        self.is_fetching = true;
        self.last_fetch_at = now;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.is_fetching = false;
    }
}

/// Estado de puntos compartido (Rc<RefCell>)
#[derive(Clone, Default)]
pub struct PointsStore {
    points: Rc<RefCell<PointsState>>,
    gate: Rc<RefCell<SyncGate>>,
}

impl PointsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia del estado actual
    pub fn get(&self) -> PointsState {
        *self.points.borrow()
    }

    /// Sobrescribir saldo y total en una sola asignación
    pub fn replace(&self, state: PointsState) {
        *self.points.borrow_mut() = state;
    }

    pub fn try_begin_fetch(&self, now: i64, window_ms: i64) -> Result<(), GateRejection> {
        self.gate.borrow_mut().try_begin(now, window_ms)
    }

    pub fn finish_fetch(&self) {
        self.gate.borrow_mut().finish();
    }

    pub fn gate(&self) -> SyncGate {
        *self.gate.borrow()
    }

    /// Volver al estado de arranque (cambio de sesión)
    pub fn reset(&self) {
        *self.points.borrow_mut() = PointsState::default();
        *self.gate.borrow_mut() = SyncGate::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: i64 = 8_000;

    #[test]
    fn test_gate_starts_open() {
        let mut gate = SyncGate::default();
        assert_eq!(gate.try_begin(10_000, WINDOW), Ok(()));
        assert!(gate.is_fetching);
        assert_eq!(gate.last_fetch_at, 10_000);
    }

    #[test]
    fn test_gate_in_flight_wins_over_window() {
        let mut gate = SyncGate::default();
        gate.try_begin(10_000, WINDOW).unwrap();
        // Aunque la ventana ya pasó, sigue en vuelo
        assert_eq!(gate.try_begin(50_000, WINDOW), Err(GateRejection::InFlight));
    }

    #[test]
    fn test_gate_window_after_finish() {
        let mut gate = SyncGate::default();
        gate.try_begin(10_000, WINDOW).unwrap();
        gate.finish();
        assert_eq!(
            gate.try_begin(17_999, WINDOW),
            Err(GateRejection::Throttled { remaining_ms: 1 })
        );
        assert_eq!(gate.try_begin(18_000, WINDOW), Ok(()));
    }

    #[test]
    fn test_rejected_attempt_does_not_move_window() {
        let mut gate = SyncGate::default();
        gate.try_begin(10_000, WINDOW).unwrap();
        gate.finish();
        let _ = gate.try_begin(12_000, WINDOW);
        assert_eq!(gate.last_fetch_at, 10_000);
    }

    #[test]
    fn test_gate_clock_going_backwards_reopens() {
        let mut gate = SyncGate::default();
        gate.try_begin(10_000, WINDOW).unwrap();
        gate.finish();
        assert_eq!(gate.try_begin(5_000, WINDOW), Ok(()));
        assert_eq!(gate.last_fetch_at, 5_000);
    }

    #[test]
    fn test_store_reset_restores_startup_state() {
        let store = PointsStore::new();
        store.replace(PointsState { balance: 500, cumulative_total: 900 });
        store.try_begin_fetch(10_000, WINDOW).unwrap();
        store.reset();
        assert_eq!(store.get(), PointsState::default());
        assert_eq!(store.gate(), SyncGate::default());
        assert_eq!(store.try_begin_fetch(10_001, WINDOW), Ok(()));
    }

    #[test]
    fn test_store_replace_is_whole() {
        let store = PointsStore::new();
        store.replace(PointsState { balance: 40, cumulative_total: 90 });
        assert_eq!(store.get(), PointsState { balance: 40, cumulative_total: 90 });
    }
}
