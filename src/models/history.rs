use std::cmp::Ordering;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entrada cruda de GET /historial/{correo}
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHistoryEntry {
    #[serde(default)]
    pub accion: String,
    #[serde(default)]
    pub detalle: String,
    #[serde(default)]
    pub fecha: Option<String>,
}

/// Tipo de movimiento derivado de `accion`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryKind {
    Earn,
    Redeem,
    Other,
}

impl HistoryKind {
    pub fn from_accion(accion: &str) -> Self {
        match accion {
            "escaneo" => HistoryKind::Earn,
            "canje" => HistoryKind::Redeem,
            _ => HistoryKind::Other,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            HistoryKind::Earn => "history-earn",
            HistoryKind::Redeem => "history-redeem",
            HistoryKind::Other => "history-other",
        }
    }
}

/// Momento del movimiento. `Now` es el centinela para fechas ausentes o
/// ilegibles y ordena por encima de cualquier fecha real.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccurredAt {
    At(DateTime<Utc>),
    Now,
}

impl Ord for OccurredAt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OccurredAt::Now, OccurredAt::Now) => Ordering::Equal,
            (OccurredAt::Now, OccurredAt::At(_)) => Ordering::Greater,
            (OccurredAt::At(_), OccurredAt::Now) => Ordering::Less,
            (OccurredAt::At(a), OccurredAt::At(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for OccurredAt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl OccurredAt {
    /// Texto corto para la vista
    pub fn label(&self) -> String {
        match self {
            OccurredAt::Now => "Ahora".to_string(),
            OccurredAt::At(date) => date.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Movimiento listo para mostrar (inmutable una vez construido)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    pub raw_detail: String,
    pub delta: i64,
    pub display_badge: String,
    pub occurred_at: OccurredAt,
}

impl HistoryEntry {
    pub fn new(kind: HistoryKind, raw_detail: String, delta: i64, occurred_at: OccurredAt) -> Self {
        Self {
            kind,
            raw_detail,
            delta,
            display_badge: badge_for(delta),
            occurred_at,
        }
    }
}

/// "+N" para deltas no negativos; el negativo ya trae su signo
pub fn badge_for(delta: i64) -> String {
    if delta >= 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

/// Eco local optimista de una acción recién hecha
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalActivity {
    pub label: String,
    pub points: i64,
}

impl LocalActivity {
    pub fn to_entry(&self) -> HistoryEntry {
        let kind = if self.points >= 0 { HistoryKind::Earn } else { HistoryKind::Redeem };
        HistoryEntry::new(kind, self.label.clone(), self.points, OccurredAt::Now)
    }
}
