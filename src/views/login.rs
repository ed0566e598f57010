// ============================================================================
// LOGIN / REGISTER VIEWS - Formularios de acceso
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{get_element_by_id, input_value, on_submit, toggle_class, ElementBuilder};
use crate::services::ToastKind;
use crate::state::{ActiveView, AppState};
use crate::viewmodels::{AuthFailure, Field, FieldError};
use crate::views::toasts::show_toast;

const LOGIN_PREFIX: &str = "login";
const REGISTER_PREFIX: &str = "register";

fn field_id(prefix: &str, field: Field) -> String {
    format!("{}-{}", prefix, field.input_id())
}

fn error_id(prefix: &str) -> String {
    format!("{}-error", prefix)
}

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .attr("novalidate", "true")?
        .child(create_form_group(LOGIN_PREFIX, Field::Correo, "Correo", "email")?)?
        .child(create_password_group(LOGIN_PREFIX, Field::Password, "Contraseña")?)?
        .child(create_error_line(LOGIN_PREFIX)?)?
        .child(submit_button("Entrar")?)?
        .build();

    let submit_state = state.clone();
    on_submit(&form, move || {
        let correo = input_value(&field_id(LOGIN_PREFIX, Field::Correo));
        let password = input_value(&field_id(LOGIN_PREFIX, Field::Password));
        let state = submit_state.clone();
        spawn_local(async move {
            let _loading = state.loading.begin();
            let result = state.auth_vm.login(&correo, &password).await;
            finish_auth(&state, LOGIN_PREFIX, result);
        });
    })?;

    render_auth_screen(state, "Inicia sesión", form, "¿No tienes cuenta? Regístrate", ActiveView::Register)
}

/// Renderizar vista de registro
pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .attr("novalidate", "true")?
        .child(create_form_group(REGISTER_PREFIX, Field::Nombre, "Nombre", "text")?)?
        .child(create_form_group(REGISTER_PREFIX, Field::Correo, "Correo", "email")?)?
        .child(create_password_group(REGISTER_PREFIX, Field::Password, "Contraseña")?)?
        .child(create_password_group(REGISTER_PREFIX, Field::Confirmacion, "Repite la contraseña")?)?
        .child(create_error_line(REGISTER_PREFIX)?)?
        .child(submit_button("Crear cuenta")?)?
        .build();

    let submit_state = state.clone();
    on_submit(&form, move || {
        let nombre = input_value(&field_id(REGISTER_PREFIX, Field::Nombre));
        let correo = input_value(&field_id(REGISTER_PREFIX, Field::Correo));
        let password = input_value(&field_id(REGISTER_PREFIX, Field::Password));
        let confirmacion = input_value(&field_id(REGISTER_PREFIX, Field::Confirmacion));
        let state = submit_state.clone();
        spawn_local(async move {
            let _loading = state.loading.begin();
            let result = state
                .auth_vm
                .register(&nombre, &correo, &password, &confirmacion)
                .await;
            finish_auth(&state, REGISTER_PREFIX, result);
        });
    })?;

    render_auth_screen(state, "Crea tu cuenta", form, "¿Ya tienes cuenta? Inicia sesión", ActiveView::Login)
}

fn render_auth_screen(
    state: &AppState,
    title: &str,
    form: Element,
    switch_text: &str,
    switch_to: ActiveView,
) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("auth-header")
        .child(ElementBuilder::new("div")?.class("logo-icon").text("♻️").build())?
        .child(ElementBuilder::new("h1")?.text("EcoPuntos").build())?
        .child(ElementBuilder::new("p")?.text(title).build())?
        .build();

    let view = state.view.clone();
    let switch_link = ElementBuilder::new("button")?
        .class("btn-link")
        .attr("type", "button")?
        .text(switch_text)
        .on_click(move |_| view.switch_to(switch_to))?
        .build();

    Ok(ElementBuilder::new("section")?
        .class("auth-screen")
        .child(header)?
        .child(form)?
        .child(switch_link)?
        .build())
}

fn finish_auth(state: &AppState, prefix: &str, result: Result<String, AuthFailure>) {
    clear_field_errors(prefix);
    match result {
        Ok(mensaje) => {
            show_toast(state, ToastKind::Success, mensaje);
            state.points.reset();
            state.view.switch_to(ActiveView::Scan);
            let state = state.clone();
            spawn_local(async move {
                state.points.refresh_points().await;
                state.points.refresh_history().await;
            });
        }
        Err(AuthFailure::Invalid(errors)) => mark_field_errors(prefix, &errors),
        Err(failure) => {
            log::warn!("⚠️ [AUTH] {}", failure);
            show_toast(state, ToastKind::Error, failure.user_message());
        }
    }
}

fn mark_field_errors(prefix: &str, errors: &[FieldError]) {
    for error in errors {
        if let Some(input) = get_element_by_id(&field_id(prefix, error.field)) {
            let _ = toggle_class(&input, "form-input--error", true);
        }
    }
    if let (Some(line), Some(first)) = (get_element_by_id(&error_id(prefix)), errors.first()) {
        line.set_text_content(Some(&first.message));
    }
}

fn clear_field_errors(prefix: &str) {
    for field in [Field::Nombre, Field::Correo, Field::Password, Field::Confirmacion] {
        if let Some(input) = get_element_by_id(&field_id(prefix, field)) {
            let _ = toggle_class(&input, "form-input--error", false);
        }
    }
    if let Some(line) = get_element_by_id(&error_id(prefix)) {
        line.set_text_content(None);
    }
}

fn create_form_group(prefix: &str, field: Field, label_text: &str, input_type: &str) -> Result<Element, JsValue> {
    let id = field_id(prefix, field);

    let label = ElementBuilder::new("label")?
        .attr("for", &id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .id(&id)?
        .attr("type", input_type)?
        .attr("name", field.input_id())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(label)?
        .child(input)?
        .build())
}

/// Campo de contraseña con botón mostrar/ocultar
fn create_password_group(prefix: &str, field: Field, label_text: &str) -> Result<Element, JsValue> {
    let group = create_form_group(prefix, field, label_text, "password")?;
    let input_id = field_id(prefix, field);

    let toggle = ElementBuilder::new("button")?
        .class("btn-toggle-password")
        .attr("type", "button")?
        .attr("aria-label", "Mostrar contraseña")?
        .text("👁️")
        .on_click(move |_| {
            if let Some(input) = get_element_by_id(&input_id) {
                let visible = input.get_attribute("type").as_deref() == Some("text");
                let next = if visible { "password" } else { "text" };
                let _ = input.set_attribute("type", next);
            }
        })?
        .build();

    group.append_child(&toggle)?;
    Ok(group)
}

fn create_error_line(prefix: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?
        .class("form-error")
        .id(&error_id(prefix))?
        .attr("role", "alert")?
        .build())
}

fn submit_button(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .text(text)
        .build())
}
