use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Servicio {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ServicioCreate {
    #[validate(length(min = 1))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(range(min = 0.0))]
    pub precio: f64,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Deserialize, Default)]
pub struct ServicioUpdate {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
}
