// ============================================================================
// REWARDS VIEW - Catálogo con asequibilidad y canje
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{clear_children, get_element_by_id, ElementBuilder};
use crate::models::{PointsState, Reward};
use crate::services::ToastKind;
use crate::state::AppState;
use crate::views::toasts::show_toast;

const REWARDS_LIST_ID: &str = "rewards-list";

pub fn render_rewards_view(state: &AppState) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?
        .class("rewards-list")
        .id(REWARDS_LIST_ID)?
        .build();
    fill_rewards_list(&list, state, &state.points.points(), &state.points.rewards())?;

    Ok(ElementBuilder::new("section")?
        .class("view view-rewards")
        .child(ElementBuilder::new("h2")?.text("Premios").build())?
        .child(list)?
        .build())
}

/// Re-render de asequibilidad tras cambiar saldo o catálogo
pub fn update_rewards_list(state: &AppState, points: &PointsState, rewards: &[Reward]) -> Result<(), JsValue> {
    match get_element_by_id(REWARDS_LIST_ID) {
        Some(list) => fill_rewards_list(&list, state, points, rewards),
        None => Ok(()),
    }
}

fn fill_rewards_list(list: &Element, state: &AppState, points: &PointsState, rewards: &[Reward]) -> Result<(), JsValue> {
    clear_children(list);

    if rewards.is_empty() {
        let empty = ElementBuilder::new("p")?
            .class("rewards-empty")
            .text("Cargando premios…")
            .build();
        list.append_child(&empty)?;
        return Ok(());
    }

    for reward in rewards {
        let card = render_reward_card(state, reward, points.balance)?;
        list.append_child(&card)?;
    }
    Ok(())
}

fn render_reward_card(state: &AppState, reward: &Reward, balance: i64) -> Result<Element, JsValue> {
    let affordable = reward.is_affordable(balance);

    let status = if reward.is_out_of_stock() {
        "Agotado".to_string()
    } else if affordable {
        "Disponible".to_string()
    } else {
        format!("Te faltan {} puntos", reward.missing_points(balance))
    };

    let mut card = ElementBuilder::new("article")?
        .class(if affordable { "reward-card reward-card--affordable" } else { "reward-card reward-card--locked" })
        .child(ElementBuilder::new("h3")?.class("reward-name").text(&reward.nombre).build())?
        .child(
            ElementBuilder::new("span")?
                .class("reward-cost")
                .text(&format!("{} pts", reward.puntos_necesarios))
                .build(),
        )?;

    if let Some(partner) = &reward.partner {
        card = card.child(ElementBuilder::new("span")?.class("reward-partner").text(partner).build())?;
    }
    if let Some(stock) = reward.stock {
        card = card.child(
            ElementBuilder::new("span")?
                .class("reward-stock")
                .text(&format!("Stock: {}", stock.max(0)))
                .build(),
        )?;
    }

    let redeem_state = state.clone();
    let nombre = reward.nombre.clone();
    let button = ElementBuilder::new("button")?
        .class("btn-redeem")
        .attr("type", "button")?
        .attr_if(!affordable, "disabled", "true")?
        .text("Canjear")
        .on_click(move |_| redeem(&redeem_state, nombre.clone()))?
        .build();

    Ok(card
        .child(ElementBuilder::new("p")?.class("reward-status").text(&status).build())?
        .child(button)?
        .build())
}

fn redeem(state: &AppState, premio: String) {
    let state = state.clone();
    spawn_local(async move {
        let _loading = state.loading.begin();
        match state.points.redeem(&premio).await {
            Ok(mensaje) => show_toast(&state, ToastKind::Success, mensaje),
            Err(e) => {
                log::warn!("⚠️ [CANJE] '{}' falló: {}", premio, e);
                show_toast(&state, ToastKind::Error, e.user_message());
            }
        }
    });
}
