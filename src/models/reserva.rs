use chrono::NaiveDateTime;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use validator::Validate;

/// Reservation lifecycle: pendiente at creation, confirmada is terminal.
/// There is no cancelled state; deletion is the only reversal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Display, EnumString)]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EstadoReserva {
    Pendiente,
    Confirmada,
}

impl Serialize for EstadoReserva {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EstadoReserva {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EstadoReserva::from_str(&s)
            .map_err(|_| DeError::unknown_variant(&s, &["pendiente", "confirmada"]))
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reserva {
    pub id: i64,
    pub usuario_id: i64,
    pub vuelo_id: i64,
    pub fecha_reserva: NaiveDateTime,
    pub estado: EstadoReserva,
    pub clase: String,
    pub asiento: Option<String>,
    pub total: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReservaCreate {
    pub vuelo_id: i64,
    pub clase: String,
    pub asiento: Option<String>,
    #[validate(range(min = 0.0))]
    pub total: f64,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Deserialize, Default)]
pub struct ReservaUpdate {
    pub estado: Option<EstadoReserva>,
    pub clase: Option<String>,
    pub asiento: Option<String>,
}

/// Join row tying a priced add-on to a reservation. The subtotal is computed
/// at attach time (precio unitario x cantidad) and stored, never recomputed.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReservaServicio {
    pub id: i64,
    pub reserva_id: i64,
    pub servicio_id: i64,
    pub cantidad: i64,
    pub subtotal: f64,
}
