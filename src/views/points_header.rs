// ============================================================================
// POINTS HEADER - Saldo y total acumulado
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{get_element_by_id, ElementBuilder};
use crate::models::PointsState;

const BALANCE_ID: &str = "points-balance";
const TOTAL_ID: &str = "points-total";

pub fn render_points_header(points: &PointsState) -> Result<Element, JsValue> {
    let balance = ElementBuilder::new("div")?
        .class("points-card points-card--balance")
        .child(ElementBuilder::new("span")?.class("points-label").text("Saldo").build())?
        .child(
            ElementBuilder::new("strong")?
                .class("points-value")
                .id(BALANCE_ID)?
                .text(&points.balance.to_string())
                .build(),
        )?
        .build();

    let total = ElementBuilder::new("div")?
        .class("points-card points-card--total")
        .child(ElementBuilder::new("span")?.class("points-label").text("Acumulado").build())?
        .child(
            ElementBuilder::new("strong")?
                .class("points-value")
                .id(TOTAL_ID)?
                .text(&points.cumulative_total.to_string())
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("section")?
        .class("points-header")
        .child(balance)?
        .child(total)?
        .build())
}

/// Actualización incremental: solo los dos números
pub fn update_points_header(points: &PointsState) {
    if let Some(el) = get_element_by_id(BALANCE_ID) {
        el.set_text_content(Some(&points.balance.to_string()));
    }
    if let Some(el) = get_element_by_id(TOTAL_ID) {
        el.set_text_content(Some(&points.cumulative_total.to_string()));
    }
}
