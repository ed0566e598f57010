use serde::{Deserialize, Deserializer, Serialize};

/// Saldo y total acumulado del usuario, siempre sobrescritos juntos
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsState {
    /// Puntos gastables (espejo de "saldo" remoto)
    pub balance: i64,
    /// Puntos ganados en total; un canje no lo reduce
    pub cumulative_total: i64,
}

/// Respuesta de GET /usuarios/{correo}/puntos
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BalanceResponse {
    #[serde(default, deserialize_with = "lenient_points")]
    pub puntos: i64,
}

/// Respuesta de GET /usuarios/{correo}/puntos-acumulados
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CumulativeResponse {
    #[serde(default, deserialize_with = "lenient_points")]
    pub puntos_acumulados: i64,
}

#[derive(Serialize)]
pub struct AddPointsRequest<'a> {
    pub correo: &'a str,
    pub puntos: i64,
}

/// Convierte un valor JSON cualquiera en puntos:
/// número (truncado), string numérico, resto → 0. Nunca negativo.
pub fn points_from_value(value: &serde_json::Value) -> i64 {
    let raw = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    raw.unwrap_or(0).max(0)
}

/// Deserializador tolerante para campos de puntos (faltante/no numérico → 0)
pub fn lenient_points<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(points_from_value(&value))
}

/// Igual que `lenient_points` pero conservando "ausente" (p.ej. stock ilimitado)
pub fn lenient_optional_points<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(points_from_value(&v)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_numeric() {
        let r: BalanceResponse = serde_json::from_str(r#"{"puntos": 120}"#).unwrap();
        assert_eq!(r.puntos, 120);
    }

    #[test]
    fn test_balance_missing_or_garbage_is_zero() {
        let r: BalanceResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(r.puntos, 0);
        let r: BalanceResponse = serde_json::from_str(r#"{"puntos": "muchos"}"#).unwrap();
        assert_eq!(r.puntos, 0);
        let r: BalanceResponse = serde_json::from_str(r#"{"puntos": null}"#).unwrap();
        assert_eq!(r.puntos, 0);
    }

    #[test]
    fn test_cumulative_string_and_float() {
        let r: CumulativeResponse = serde_json::from_str(r#"{"puntos_acumulados": "340"}"#).unwrap();
        assert_eq!(r.puntos_acumulados, 340);
        let r: CumulativeResponse = serde_json::from_str(r#"{"puntos_acumulados": 12.9}"#).unwrap();
        assert_eq!(r.puntos_acumulados, 12);
    }

    #[test]
    fn test_negative_balance_clamped() {
        let r: BalanceResponse = serde_json::from_str(r#"{"puntos": -5}"#).unwrap();
        assert_eq!(r.puntos, 0);
    }
}
