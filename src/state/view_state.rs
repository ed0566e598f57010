// ============================================================================
// VIEW STATE - Vista activa de la app (reemplaza el "view manager" global)
// ============================================================================

use crate::state::reactivity::ReactiveState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveView {
    Scan,
    Rewards,
    History,
    Login,
    Register,
}

impl ActiveView {
    /// Vistas que requieren sesión
    pub fn requires_session(&self) -> bool {
        matches!(self, ActiveView::Scan | ActiveView::Rewards | ActiveView::History)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::Scan => "Escanear",
            ActiveView::Rewards => "Premios",
            ActiveView::History => "Historial",
            ActiveView::Login => "Iniciar sesión",
            ActiveView::Register => "Crear cuenta",
        }
    }
}

/// Vista activa compartida
#[derive(Clone)]
pub struct ViewState {
    active: ReactiveState<ActiveView>,
}

impl ViewState {
    pub fn new(initial: ActiveView) -> Self {
        Self {
            active: ReactiveState::new(initial),
        }
    }

    pub fn current(&self) -> ActiveView {
        self.active.get()
    }

    pub fn is(&self, view: ActiveView) -> bool {
        self.current() == view
    }

    /// Cambiar de vista (no notifica si no cambia)
    pub fn switch_to(&self, view: ActiveView) {
        if self.current() != view {
            log::info!("🧭 [VIEW] {:?} → {:?}", self.current(), view);
            self.active.set(view);
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&ActiveView) + 'static,
    {
        self.active.subscribe(callback);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ActiveView::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_switch_only_notifies_on_change() {
        let view = ViewState::new(ActiveView::Scan);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        view.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        view.switch_to(ActiveView::Scan);
        assert_eq!(count.get(), 0);
        view.switch_to(ActiveView::Rewards);
        assert_eq!(count.get(), 1);
        assert!(view.is(ActiveView::Rewards));
    }

    #[test]
    fn test_session_views() {
        assert!(ActiveView::History.requires_session());
        assert!(!ActiveView::Register.requires_session());
    }
}
