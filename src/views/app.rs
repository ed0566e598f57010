// ============================================================================
// APP VIEW - Shell principal (cabecera, pestañas, vista activa, toasts)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::state::{ActiveView, AppState};
use crate::views::{history, login, points_header, rewards, scan, toasts};

const VIEW_ROOT_ID: &str = "view-root";

const TABS: [(ActiveView, &str); 3] = [
    (ActiveView::Scan, "♻️"),
    (ActiveView::Rewards, "🎁"),
    (ActiveView::History, "📜"),
];

/// Renderizar la app completa según la vista activa
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let active = state.view.current();
    let shell = ElementBuilder::new("div")?
        .class("app-shell")
        .id("app-shell")?
        .build();

    if active.requires_session() {
        let top_bar = render_top_bar(state)?;
        shell.append_child(&top_bar)?;
        let header = points_header::render_points_header(&state.points.points())?;
        shell.append_child(&header)?;
    }

    let view_root = ElementBuilder::new("main")?
        .class("view-root")
        .id(VIEW_ROOT_ID)?
        .child(render_active_view(state)?)?
        .build();
    shell.append_child(&view_root)?;

    if active.requires_session() {
        let tab_bar = render_tab_bar(state, active)?;
        shell.append_child(&tab_bar)?;
    }

    let toast_stack = toasts::render_toast_stack(&state.notifications.toasts())?;
    shell.append_child(&toast_stack)?;
    Ok(shell)
}

fn render_active_view(state: &AppState) -> Result<Element, JsValue> {
    match state.view.current() {
        ActiveView::Scan => scan::render_scan_view(state),
        ActiveView::Rewards => rewards::render_rewards_view(state),
        ActiveView::History => history::render_history_view(state),
        ActiveView::Login => login::render_login(state),
        ActiveView::Register => login::render_register(state),
    }
}

fn render_top_bar(state: &AppState) -> Result<Element, JsValue> {
    let saludo = match state.auth.get_nombre() {
        Some(nombre) => format!("Hola, {}", nombre),
        None => "EcoPuntos".to_string(),
    };

    let logout_state = state.clone();
    let logout = ElementBuilder::new("button")?
        .class("btn-logout")
        .attr("type", "button")?
        .text("Salir")
        .on_click(move |_| {
            logout_state.auth_vm.logout();
            logout_state.points.reset();
            logout_state.view.switch_to(ActiveView::Login);
        })?
        .build();

    let title = ElementBuilder::new("span")?
        .class("top-bar-title")
        .text(&saludo)
        .build();

    Ok(ElementBuilder::new("header")?
        .class("top-bar")
        .child(title)?
        .child(logout)?
        .build())
}

fn render_tab_bar(state: &AppState, active: ActiveView) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?.class("tab-bar").build();

    for (view, icon) in TABS {
        let class = if view == active { "tab tab--active" } else { "tab" };
        let view_state = state.view.clone();
        let tab = ElementBuilder::new("button")?
            .class(class)
            .attr("type", "button")?
            .text(&format!("{} {}", icon, view.title()))
            .on_click(move |_| view_state.switch_to(view))?
            .build();
        nav.append_child(&tab)?;
    }

    Ok(nav)
}
