use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::pago::{Pago, PagoCreate};
use crate::models::reserva::Reserva;
use crate::models::usuario::Usuario;
use crate::utils::error::{AppError, AppResult};

/// Payment stub: no gateway behind it, the referencia is fabricated locally.
pub struct PagoService {
    pool: SqlitePool,
}

impl PagoService {
    pub fn new(pool: SqlitePool) -> Self {
        PagoService { pool }
    }

    pub async fn crear(&self, datos: PagoCreate, caller: &Usuario) -> AppResult<Pago> {
        let reserva = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = ?")
            .bind(datos.reserva_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".into()))?;

        if !caller.puede_acceder(reserva.usuario_id) {
            return Err(AppError::Forbidden("No autorizado".into()));
        }

        // Precheck for a friendly message; the UNIQUE constraint on
        // reserva_id is what actually guarantees one pago per reserva.
        let existente =
            sqlx::query_scalar::<_, i64>("SELECT id FROM pagos WHERE reserva_id = ?")
                .bind(datos.reserva_id)
                .fetch_optional(&self.pool)
                .await?;

        if existente.is_some() {
            return Err(AppError::Conflict(
                "La reserva ya tiene un pago registrado".into(),
            ));
        }

        let referencia = format!("PAY-{}-{}", reserva.id, caller.id);
        let fecha = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO pagos (reserva_id, metodo, monto, moneda, fecha, estado, referencia)
             VALUES (?, ?, ?, 'USD', ?, 'completado', ?)",
        )
        .bind(datos.reserva_id)
        .bind(&datos.metodo)
        .bind(datos.monto)
        .bind(fecha)
        .bind(&referencia)
        .execute(&self.pool)
        .await?;

        Ok(Pago {
            id: result.last_insert_rowid(),
            reserva_id: datos.reserva_id,
            metodo: datos.metodo,
            monto: datos.monto,
            moneda: "USD".to_string(),
            fecha,
            estado: "completado".to_string(),
            referencia: Some(referencia),
        })
    }

    pub async fn obtener(&self, id: i64, caller: &Usuario) -> AppResult<Pago> {
        let pago = sqlx::query_as::<_, Pago>("SELECT * FROM pagos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pago no encontrado".into()))?;

        self.verificar_propietario(&pago, caller).await?;
        Ok(pago)
    }

    pub async fn por_reserva(&self, reserva_id: i64, caller: &Usuario) -> AppResult<Pago> {
        let pago = sqlx::query_as::<_, Pago>("SELECT * FROM pagos WHERE reserva_id = ?")
            .bind(reserva_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("No existe un pago para esta reserva".into()))?;

        self.verificar_propietario(&pago, caller).await?;
        Ok(pago)
    }

    // Admin-only at the boundary
    pub async fn listar_por_usuario(&self, usuario_id: i64) -> AppResult<Vec<Pago>> {
        let pagos = sqlx::query_as::<_, Pago>(
            "SELECT p.* FROM pagos p
             JOIN reservas r ON p.reserva_id = r.id
             WHERE r.usuario_id = ?",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pagos)
    }

    // Ownership of a pago is ownership of its reserva
    async fn verificar_propietario(&self, pago: &Pago, caller: &Usuario) -> AppResult<()> {
        let propietario =
            sqlx::query_scalar::<_, i64>("SELECT usuario_id FROM reservas WHERE id = ?")
                .bind(pago.reserva_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Reserva no encontrada".into()))?;

        if !caller.puede_acceder(propietario) {
            return Err(AppError::Forbidden("No autorizado".into()));
        }
        Ok(())
    }
}
