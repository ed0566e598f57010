use serde::{Deserialize, Serialize};
use crate::models::points::{lenient_optional_points, lenient_points};

/// Premio del catálogo (GET /premios)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_points")]
    pub puntos_necesarios: i64,
    /// `None` = stock ilimitado
    #[serde(default, deserialize_with = "lenient_optional_points")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub partner: Option<String>,
}

impl Reward {
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self.stock, Some(n) if n <= 0)
    }

    /// Se puede canjear con el saldo dado
    pub fn is_affordable(&self, balance: i64) -> bool {
        self.puntos_necesarios <= balance && !self.is_out_of_stock()
    }

    /// Puntos que faltan para poder canjearlo
    pub fn missing_points(&self, balance: i64) -> i64 {
        (self.puntos_necesarios - balance).max(0)
    }
}

#[derive(Serialize)]
pub struct RedeemRequest<'a> {
    pub correo: &'a str,
    pub premio: &'a str,
}

/// Respuesta de POST /puntos/canjear
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RedeemResponse {
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Respuesta de POST /classify
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default, alias = "categoria", alias = "class")]
    pub clase: String,
    #[serde(default, deserialize_with = "lenient_points")]
    pub puntos: i64,
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(puntos: i64, stock: Option<i64>) -> Reward {
        Reward {
            nombre: "Entrada cine".to_string(),
            puntos_necesarios: puntos,
            stock,
            partner: None,
        }
    }

    #[test]
    fn test_affordability() {
        assert!(reward(150, None).is_affordable(150));
        assert!(!reward(150, None).is_affordable(149));
        assert!(!reward(10, Some(0)).is_affordable(500));
        assert!(reward(10, Some(3)).is_affordable(10));
    }

    #[test]
    fn test_missing_points() {
        assert_eq!(reward(150, None).missing_points(100), 50);
        assert_eq!(reward(150, None).missing_points(400), 0);
    }

    #[test]
    fn test_catalog_decoding() {
        let json = r#"[
            {"nombre":"Entrada cine","puntos_necesarios":150,"stock":4,"partner":"CineMax"},
            {"nombre":"Café","puntos_necesarios":"40"},
            {"nombre":"Termo","puntos_necesarios":90,"stock":null}
        ]"#;
        let rewards: Vec<Reward> = serde_json::from_str(json).unwrap();
        assert_eq!(rewards.len(), 3);
        assert_eq!(rewards[0].stock, Some(4));
        assert_eq!(rewards[1].puntos_necesarios, 40);
        assert_eq!(rewards[1].stock, None);
        assert_eq!(rewards[2].stock, None);
    }

    #[test]
    fn test_classify_aliases() {
        let r: ClassifyResponse = serde_json::from_str(r#"{"categoria":"plastico","puntos":5}"#).unwrap();
        assert_eq!(r.clase, "plastico");
        assert_eq!(r.puntos, 5);
    }
}
