// ============================================================================
// SCAN VIEW - Foto del residuo → clasificación → puntos
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{get_element_by_id, selected_file, set_disabled, ElementBuilder};
use crate::services::ToastKind;
use crate::state::AppState;
use crate::views::toasts::show_toast;

const FILE_INPUT_ID: &str = "scan-file";
const SUBMIT_ID: &str = "scan-submit";
const RESULT_ID: &str = "scan-result";

pub fn render_scan_view(state: &AppState) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .class("scan-input")
        .id(FILE_INPUT_ID)?
        .attr("type", "file")?
        .attr("accept", "image/*")?
        .attr("capture", "environment")?
        .build();

    let label = ElementBuilder::new("label")?
        .class("scan-picker")
        .attr("for", FILE_INPUT_ID)?
        .text("📷 Toma o elige una foto del residuo")
        .build();

    let submit_state = state.clone();
    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .id(SUBMIT_ID)?
        .attr("type", "button")?
        .text("Reciclar")
        .on_click(move |_| classify_and_register(&submit_state))?
        .build();

    let result = ElementBuilder::new("p")?
        .class("scan-result")
        .id(RESULT_ID)?
        .build();

    Ok(ElementBuilder::new("section")?
        .class("view view-scan")
        .child(ElementBuilder::new("h2")?.text("Escanear residuo").build())?
        .child(label)?
        .child(input)?
        .child(submit)?
        .child(result)?
        .build())
}

fn set_result(text: &str) {
    if let Some(el) = get_element_by_id(RESULT_ID) {
        el.set_text_content(Some(text));
    }
}

fn set_busy(busy: bool) {
    if let Some(button) = get_element_by_id(SUBMIT_ID) {
        let _ = set_disabled(&button, busy);
    }
}

fn classify_and_register(state: &AppState) {
    let Some(file) = selected_file(FILE_INPUT_ID) else {
        show_toast(state, ToastKind::Warning, "Selecciona una foto primero");
        return;
    };

    let state = state.clone();
    spawn_local(async move {
        let _loading = state.loading.begin();
        set_busy(true);
        set_result("Analizando imagen…");

        match state.api.classify(&file).await {
            Ok(clasificacion) => {
                set_result(&format!("Detectado: {} (+{} puntos)", clasificacion.clase, clasificacion.puntos));
                match state.points.register_scan(&clasificacion.clase, clasificacion.puntos).await {
                    Ok(()) => show_toast(
                        &state,
                        ToastKind::Success,
                        format!("+{} puntos por {}", clasificacion.puntos, clasificacion.clase),
                    ),
                    Err(e) => show_toast(&state, ToastKind::Error, e.user_message()),
                }
            }
            Err(e) => {
                log::error!("❌ [SCAN] Clasificación fallida: {}", e);
                set_result("");
                show_toast(&state, ToastKind::Error, e.user_message());
            }
        }

        set_busy(false);
    });
}
