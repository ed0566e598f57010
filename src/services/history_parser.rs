// ============================================================================
// HISTORY PARSER - Reconciliación del historial remoto
// ============================================================================
// Funciones puras: entrada cruda del backend → HistoryEntry con delta y badge.
// El backend no envía el delta estructurado, solo texto libre en `detalle`;
// cualquier texto que no encaje con su patrón da 0 y un warning.
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use crate::models::history::{HistoryEntry, HistoryKind, OccurredAt, RawHistoryEntry};

lazy_static::lazy_static! {
    // "+5 puntos", "+1 punto"
    static ref EARN_RE: Regex = Regex::new(r"(?i)\+(\d+)\s*puntos?\b").unwrap();
    // "Gastó 150 pts", "gasto 20 pts"
    static ref REDEEM_RE: Regex = Regex::new(r"(?i)gast[oó]\s+(\d+)\s*pts\b").unwrap();
    // Primer entero con signo opcional
    static ref SIGNED_INT_RE: Regex = Regex::new(r"[+-]?\d+").unwrap();
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Delta de puntos de un movimiento según su tipo
pub fn parse_delta(kind: HistoryKind, detalle: &str) -> i64 {
    let parsed = match kind {
        HistoryKind::Earn => capture_number(&EARN_RE, detalle),
        HistoryKind::Redeem => capture_number(&REDEEM_RE, detalle).map(|n| -n),
        HistoryKind::Other => SIGNED_INT_RE
            .find(detalle)
            .and_then(|m| m.as_str().parse::<i64>().ok()),
    };

    match parsed {
        Some(delta) => delta,
        None => {
            log::warn!("⚠️ [HISTORIAL] Delta ilegible ({:?}): '{}' → 0", kind, detalle);
            0
        }
    }
}

fn capture_number(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Fecha del backend; ausente o ilegible → `OccurredAt::Now`
pub fn parse_occurred_at(fecha: Option<&str>) -> OccurredAt {
    let Some(raw) = fecha.map(str::trim).filter(|s| !s.is_empty()) else {
        return OccurredAt::Now;
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return OccurredAt::At(date.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return OccurredAt::At(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return OccurredAt::At(midnight.and_utc());
    }

    log::debug!("🕒 [HISTORIAL] Fecha ilegible '{}', se usa 'ahora'", raw);
    OccurredAt::Now
}

/// Una entrada cruda → entrada de vista
pub fn derive_entry(raw: &RawHistoryEntry) -> HistoryEntry {
    let kind = HistoryKind::from_accion(&raw.accion);
    let delta = parse_delta(kind, &raw.detalle);
    HistoryEntry::new(kind, raw.detalle.clone(), delta, parse_occurred_at(raw.fecha.as_deref()))
}

/// Historial completo, ordenado del más reciente al más antiguo.
/// Orden estable: empates conservan el orden del servidor.
pub fn reconcile(raw_entries: &[RawHistoryEntry]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = raw_entries.iter().map(derive_entry).collect();
    entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(accion: &str, detalle: &str, fecha: Option<&str>) -> RawHistoryEntry {
        RawHistoryEntry {
            accion: accion.to_string(),
            detalle: detalle.to_string(),
            fecha: fecha.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_earn_delta() {
        let entry = derive_entry(&raw("escaneo", "+5 puntos por reciclaje", None));
        assert_eq!(entry.kind, HistoryKind::Earn);
        assert_eq!(entry.delta, 5);
        assert_eq!(entry.display_badge, "+5");
    }

    #[test]
    fn test_earn_singular_and_case() {
        assert_eq!(parse_delta(HistoryKind::Earn, "Lata: +1 PUNTO"), 1);
        assert_eq!(parse_delta(HistoryKind::Earn, "+12puntos"), 12);
    }

    #[test]
    fn test_earn_requires_puntos_word() {
        assert_eq!(parse_delta(HistoryKind::Earn, "+5 pts"), 0);
        assert_eq!(parse_delta(HistoryKind::Earn, "5 puntos"), 0);
    }

    #[test]
    fn test_earn_empty_detail_is_zero() {
        let entry = derive_entry(&raw("escaneo", "", None));
        assert_eq!(entry.delta, 0);
        assert_eq!(entry.display_badge, "+0");
    }

    #[test]
    fn test_redeem_delta() {
        let entry = derive_entry(&raw("canje", "Gastó 150 pts por: Entrada cine", None));
        assert_eq!(entry.kind, HistoryKind::Redeem);
        assert_eq!(entry.delta, -150);
        assert_eq!(entry.display_badge, "-150");
    }

    #[test]
    fn test_redeem_accent_and_case_insensitive() {
        assert_eq!(parse_delta(HistoryKind::Redeem, "gasto 20 pts en café"), -20);
        assert_eq!(parse_delta(HistoryKind::Redeem, "GASTÓ 7 PTS"), -7);
        assert_eq!(parse_delta(HistoryKind::Redeem, "Canje de termo"), 0);
    }

    #[test]
    fn test_other_signed_integer() {
        assert_eq!(derive_entry(&raw("otro", "ajuste -20", None)).delta, -20);
        assert_eq!(parse_delta(HistoryKind::Other, "bono +30 y 5 extra"), 30);
        assert_eq!(parse_delta(HistoryKind::Other, "sin números"), 0);
    }

    #[test]
    fn test_overflowing_number_is_zero() {
        assert_eq!(parse_delta(HistoryKind::Earn, "+99999999999999999999 puntos"), 0);
    }

    #[test]
    fn test_parse_dates() {
        let expected = OccurredAt::At(Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap());
        assert_eq!(parse_occurred_at(Some("2024-03-10T14:30:00Z")), expected);
        assert_eq!(parse_occurred_at(Some("2024-03-10T16:30:00+02:00")), expected);
        assert_eq!(parse_occurred_at(Some("2024-03-10 14:30:00")), expected);
        assert_eq!(parse_occurred_at(Some("2024-03-10T14:30:00.000")), expected);
        assert_eq!(
            parse_occurred_at(Some("2024-03-10")),
            OccurredAt::At(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_or_bad_date_is_now() {
        assert_eq!(parse_occurred_at(None), OccurredAt::Now);
        assert_eq!(parse_occurred_at(Some("")), OccurredAt::Now);
        assert_eq!(parse_occurred_at(Some("ayer por la tarde")), OccurredAt::Now);
    }

    #[test]
    fn test_reconcile_sorts_descending_with_now_first() {
        let entries = reconcile(&[
            raw("escaneo", "+1 puntos", Some("2024-01-01T10:00:00Z")),
            raw("canje", "Gastó 10 pts", Some("2024-05-01T10:00:00Z")),
            raw("escaneo", "+3 puntos", None),
            raw("otro", "ajuste 2", Some("2023-12-31")),
        ]);

        let deltas: Vec<i64> = entries.iter().map(|e| e.delta).collect();
        assert_eq!(deltas, vec![3, -10, 1, 2]);
        assert_eq!(entries[0].occurred_at, OccurredAt::Now);
    }

    #[test]
    fn test_reconcile_is_stable_for_ties() {
        let entries = reconcile(&[
            raw("escaneo", "+1 puntos", None),
            raw("escaneo", "+2 puntos", None),
            raw("escaneo", "+3 puntos", None),
        ]);
        let deltas: Vec<i64> = entries.iter().map(|e| e.delta).collect();
        assert_eq!(deltas, vec![1, 2, 3]);
    }
}
