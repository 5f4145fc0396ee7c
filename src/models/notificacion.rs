use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notificacion {
    pub id: i64,
    pub usuario_id: i64,
    pub titulo: String,
    pub mensaje: String,
    pub tipo: String,
    pub leido: bool,
    pub fecha: NaiveDateTime,
}

fn tipo_por_defecto() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct NotificacionCreate {
    pub usuario_id: i64,
    #[validate(length(min = 1, max = 50))]
    pub titulo: String,
    #[validate(length(min = 1))]
    pub mensaje: String,
    #[serde(default = "tipo_por_defecto")]
    pub tipo: String,
}
