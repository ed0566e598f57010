// ============================================================================
// TOASTS VIEW - Pila de notificaciones con auto-cierre
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{clear_children, get_element_by_id, ElementBuilder};
use crate::services::{Toast, ToastKind};
use crate::state::AppState;

const TOAST_STACK_ID: &str = "toast-stack";

pub fn render_toast_stack(toasts: &[Toast]) -> Result<Element, JsValue> {
    let stack = ElementBuilder::new("div")?
        .class("toast-stack")
        .id(TOAST_STACK_ID)?
        .attr("aria-live", "polite")?
        .build();
    fill_stack(&stack, toasts)?;
    Ok(stack)
}

pub fn update_toast_stack(toasts: &[Toast]) -> Result<(), JsValue> {
    match get_element_by_id(TOAST_STACK_ID) {
        Some(stack) => fill_stack(&stack, toasts),
        None => Ok(()),
    }
}

fn fill_stack(stack: &Element, toasts: &[Toast]) -> Result<(), JsValue> {
    clear_children(stack);
    for toast in toasts {
        let item = ElementBuilder::new("div")?
            .class(toast.kind.css_class())
            .text(&format!("{} {}", toast.kind.icon(), toast.message))
            .build();
        stack.append_child(&item)?;
    }
    Ok(())
}

/// Mostrar toast y programar su cierre tras `toast_duration_ms`
pub fn show_toast(state: &AppState, kind: ToastKind, message: impl Into<String>) {
    let id = state.notifications.push(kind, message);
    let notifications = state.notifications.clone();
    Timeout::new(state.toast_duration_ms, move || notifications.dismiss(id)).forget();
}
