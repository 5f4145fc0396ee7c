use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vuelo {
    pub id: i64,
    pub origen: String,
    pub destino: String,
    pub salida: NaiveDateTime,
    pub llegada: NaiveDateTime,
    pub duracion: f64,
    pub precio_base: f64,
    pub asientos_disponibles: i64,
}

// Flight ids are assigned by the airline, not by the database
#[derive(Debug, Deserialize, Validate)]
pub struct VueloCreate {
    pub id: i64,
    pub origen: String,
    pub destino: String,
    pub salida: NaiveDateTime,
    pub llegada: NaiveDateTime,
    #[validate(range(min = 0.0))]
    pub duracion: f64,
    #[validate(range(min = 0.0))]
    pub precio_base: f64,
    #[validate(range(min = 0))]
    pub asientos_disponibles: i64,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Deserialize, Default)]
pub struct VueloUpdate {
    pub origen: Option<String>,
    pub destino: Option<String>,
    pub salida: Option<NaiveDateTime>,
    pub llegada: Option<NaiveDateTime>,
    pub duracion: Option<f64>,
    pub precio_base: Option<f64>,
    pub asientos_disponibles: Option<i64>,
}
