// ============================================================================
// REACTIVITY - Valor compartido con subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Estado reactivo: los clones comparten valor y subscribers
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    // Sin borrows vivos mientras corren los callbacks: pueden volver a leer/escribir
    fn notify(&self) {
        let value = self.get();
        let subscribers: Vec<Subscriber<T>> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(&value);
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_set_notifies_clones() {
        let state = ReactiveState::new(1);
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();
        state.clone().subscribe(move |v| seen_clone.set(*v));

        state.set(7);
        assert_eq!(seen.get(), 7);

        state.update(|v| *v += 1);
        assert_eq!(seen.get(), 8);
    }

    #[test]
    fn test_subscriber_can_read_back() {
        let state = ReactiveState::new(String::from("a"));
        let reader = state.clone();
        let out = Rc::new(RefCell::new(String::new()));
        let out_clone = out.clone();
        state.subscribe(move |_| *out_clone.borrow_mut() = reader.get());
        state.set("b".to_string());
        assert_eq!(out.borrow().as_str(), "b");
    }
}
