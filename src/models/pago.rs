use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Pago {
    pub id: i64,
    pub reserva_id: i64,
    pub metodo: String,
    pub monto: f64,
    pub moneda: String,
    pub fecha: NaiveDateTime,
    pub estado: String,
    pub referencia: Option<String>,
}

fn metodo_por_defecto() -> String {
    "tarjeta".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct PagoCreate {
    pub reserva_id: i64,
    #[serde(default = "metodo_por_defecto")]
    pub metodo: String,
    #[validate(range(min = 0.0))]
    pub monto: f64,
}
