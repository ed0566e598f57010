// ============================================================================
// NOTIFICATION SERVICE - Toasts transitorios
// ============================================================================
// Servicio construido en el arranque y pasado por referencia (Rc interno);
// la vista se suscribe y programa el auto-cierre.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
            ToastKind::Warning => "toast toast-warning",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Info => "ℹ️",
            ToastKind::Warning => "⚠️",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

type ToastSubscriber = Rc<dyn Fn(&[Toast])>;

#[derive(Clone)]
pub struct NotificationService {
    toasts: Rc<RefCell<VecDeque<Toast>>>,
    next_id: Rc<Cell<u32>>,
    max_visible: usize,
    subscribers: Rc<RefCell<Vec<ToastSubscriber>>>,
}

impl NotificationService {
    pub fn new(max_visible: usize) -> Self {
        Self {
            toasts: Rc::new(RefCell::new(VecDeque::new())),
            next_id: Rc::new(Cell::new(1)),
            max_visible: max_visible.max(1),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Mostrar un toast; devuelve su id para cerrarlo después
    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        {
            let mut toasts = self.toasts.borrow_mut();
            toasts.push_back(Toast { id, kind, message: message.into() });
            while toasts.len() > self.max_visible {
                toasts.pop_front();
            }
        }
        self.notify();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Info, message)
    }

    /// Cerrar toast; ids ya expulsados se ignoran
    pub fn dismiss(&self, id: u32) {
        let removed = {
            let mut toasts = self.toasts.borrow_mut();
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            before != toasts.len()
        };
        if removed {
            self.notify();
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().iter().cloned().collect()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&[Toast]) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self) {
        let snapshot = self.toasts();
        let subscribers: Vec<ToastSubscriber> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let service = NotificationService::new(3);
        let id = service.success("Canje realizado");
        assert_eq!(service.toasts().len(), 1);
        assert_eq!(service.toasts()[0].kind, ToastKind::Success);

        service.dismiss(id);
        assert!(service.toasts().is_empty());
    }

    #[test]
    fn test_oldest_evicted_over_capacity() {
        let service = NotificationService::new(2);
        service.info("uno");
        service.info("dos");
        service.error("tres");
        let messages: Vec<String> = service.toasts().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["dos".to_string(), "tres".to_string()]);
    }

    #[test]
    fn test_subscribers_see_snapshots() {
        let service = NotificationService::new(3);
        let seen = Rc::new(Cell::new(0usize));
        let seen_clone = seen.clone();
        service.subscribe(move |toasts| seen_clone.set(toasts.len()));

        let id = service.info("hola");
        assert_eq!(seen.get(), 1);
        service.dismiss(id);
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_dismiss_unknown_is_silent() {
        let service = NotificationService::new(3);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        service.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        service.dismiss(42);
        assert_eq!(calls.get(), 0);
    }
}
