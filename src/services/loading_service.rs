// ============================================================================
// LOADING SERVICE - Spinner global por contador de operaciones
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type LoadingSubscriber = Rc<dyn Fn(bool)>;

#[derive(Clone, Default)]
pub struct LoadingService {
    pending: Rc<Cell<usize>>,
    subscribers: Rc<RefCell<Vec<LoadingSubscriber>>>,
}

/// Mientras viva, la app se considera "cargando"
pub struct LoadingGuard {
    service: LoadingService,
}

impl LoadingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadingGuard {
        let before = self.pending.get();
        self.pending.set(before + 1);
        if before == 0 {
            self.notify(true);
        }
        LoadingGuard { service: self.clone() }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.get() > 0
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(bool) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn end(&self) {
        let before = self.pending.get();
        self.pending.set(before.saturating_sub(1));
        if before == 1 {
            self.notify(false);
        }
    }

    fn notify(&self, loading: bool) {
        let subscribers: Vec<LoadingSubscriber> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(loading);
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.service.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_guards() {
        let loading = LoadingService::new();
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let transitions_clone = transitions.clone();
        loading.subscribe(move |v| transitions_clone.borrow_mut().push(v));

        let outer = loading.begin();
        let inner = loading.begin();
        assert!(loading.is_loading());
        drop(inner);
        assert!(loading.is_loading());
        drop(outer);
        assert!(!loading.is_loading());

        assert_eq!(*transitions.borrow(), vec![true, false]);
    }
}
