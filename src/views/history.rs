// ============================================================================
// HISTORY VIEW - Movimientos con badge de puntos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{clear_children, get_element_by_id, ElementBuilder};
use crate::models::HistoryEntry;
use crate::state::AppState;

const HISTORY_LIST_ID: &str = "history-list";

pub fn render_history_view(state: &AppState) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("ul")?
        .class("history-list")
        .id(HISTORY_LIST_ID)?
        .build();
    fill_history_list(&list, &state.points.display_history())?;

    Ok(ElementBuilder::new("section")?
        .class("view view-history")
        .child(ElementBuilder::new("h2")?.text("Historial").build())?
        .child(list)?
        .build())
}

/// Re-render incremental de la lista (si la vista está montada)
pub fn update_history_list(entries: &[HistoryEntry]) -> Result<(), JsValue> {
    match get_element_by_id(HISTORY_LIST_ID) {
        Some(list) => fill_history_list(&list, entries),
        None => Ok(()),
    }
}

fn fill_history_list(list: &Element, entries: &[HistoryEntry]) -> Result<(), JsValue> {
    clear_children(list);

    if entries.is_empty() {
        let empty = ElementBuilder::new("li")?
            .class("history-empty")
            .text("Aún no hay movimientos")
            .build();
        list.append_child(&empty)?;
        return Ok(());
    }

    for entry in entries {
        let item = render_history_item(entry)?;
        list.append_child(&item)?;
    }
    Ok(())
}

fn render_history_item(entry: &HistoryEntry) -> Result<Element, JsValue> {
    let body = ElementBuilder::new("div")?
        .class("history-body")
        .child(ElementBuilder::new("p")?.class("history-detail").text(&entry.raw_detail).build())?
        .child(ElementBuilder::new("time")?.class("history-date").text(&entry.occurred_at.label()).build())?
        .build();

    let badge = ElementBuilder::new("span")?
        .class(&format!("badge {}", entry.kind.css_class()))
        .text(&entry.display_badge)
        .build();

    Ok(ElementBuilder::new("li")?
        .class("history-item")
        .child(body)?
        .child(badge)?
        .build())
}
