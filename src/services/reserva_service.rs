use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::reserva::{
    EstadoReserva, Reserva, ReservaCreate, ReservaServicio, ReservaUpdate,
};
use crate::models::servicio::Servicio;
use crate::models::usuario::Usuario;
use crate::utils::error::{AppError, AppResult};

pub struct ReservaService {
    pool: SqlitePool,
}

impl ReservaService {
    pub fn new(pool: SqlitePool) -> Self {
        ReservaService { pool }
    }

    /// Create a reservation and take one seat from the flight, atomically.
    ///
    /// Admission is decided by the conditional decrement alone: the UPDATE
    /// only matches while seats remain, so of two racing creates against a
    /// single remaining seat exactly one sees an affected row. The other
    /// rolls back without inserting anything.
    pub async fn crear(&self, datos: ReservaCreate, usuario_id: i64) -> AppResult<Reserva> {
        let mut tx = self.pool.begin().await?;

        let vuelo_existe = sqlx::query_scalar::<_, i64>("SELECT id FROM vuelos WHERE id = ?")
            .bind(datos.vuelo_id)
            .fetch_optional(&mut *tx)
            .await?;

        if vuelo_existe.is_none() {
            return Err(AppError::NotFound("Vuelo no encontrado".into()));
        }

        let decremento = sqlx::query(
            "UPDATE vuelos
             SET asientos_disponibles = asientos_disponibles - 1
             WHERE id = ? AND asientos_disponibles > 0",
        )
        .bind(datos.vuelo_id)
        .execute(&mut *tx)
        .await?;

        if decremento.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict("No hay asientos disponibles".into()));
        }

        let fecha_reserva = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO reservas
                (usuario_id, vuelo_id, fecha_reserva, estado, clase, asiento, total)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(usuario_id)
        .bind(datos.vuelo_id)
        .bind(fecha_reserva)
        .bind(EstadoReserva::Pendiente)
        .bind(&datos.clase)
        .bind(&datos.asiento)
        .bind(datos.total)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        Ok(Reserva {
            id,
            usuario_id,
            vuelo_id: datos.vuelo_id,
            fecha_reserva,
            estado: EstadoReserva::Pendiente,
            clase: datos.clase,
            asiento: datos.asiento,
            total: datos.total,
        })
    }

    pub async fn obtener(&self, id: i64, caller: &Usuario) -> AppResult<Reserva> {
        let reserva = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".into()))?;

        if !caller.puede_acceder(reserva.usuario_id) {
            return Err(AppError::Forbidden("No autorizado".into()));
        }
        Ok(reserva)
    }

    pub async fn listar_todas(&self) -> AppResult<Vec<Reserva>> {
        let reservas = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas")
            .fetch_all(&self.pool)
            .await?;
        Ok(reservas)
    }

    pub async fn listar_por_usuario(&self, usuario_id: i64) -> AppResult<Vec<Reserva>> {
        let reservas = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE usuario_id = ?")
            .bind(usuario_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reservas)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        datos: ReservaUpdate,
        caller: &Usuario,
    ) -> AppResult<Reserva> {
        let mut reserva = self.obtener(id, caller).await?;

        if let Some(estado) = datos.estado {
            reserva.estado = estado;
        }
        if let Some(clase) = datos.clase {
            reserva.clase = clase;
        }
        if let Some(asiento) = datos.asiento {
            reserva.asiento = Some(asiento);
        }

        sqlx::query("UPDATE reservas SET estado = ?, clase = ?, asiento = ? WHERE id = ?")
            .bind(reserva.estado)
            .bind(&reserva.clase)
            .bind(&reserva.asiento)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(reserva)
    }

    // Admin-only at the boundary. Confirming twice is a conflict.
    pub async fn confirmar(&self, id: i64) -> AppResult<Reserva> {
        let mut reserva = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".into()))?;

        if reserva.estado == EstadoReserva::Confirmada {
            return Err(AppError::Conflict("La reserva ya está confirmada".into()));
        }

        sqlx::query("UPDATE reservas SET estado = ? WHERE id = ?")
            .bind(EstadoReserva::Confirmada)
            .bind(id)
            .execute(&self.pool)
            .await?;

        reserva.estado = EstadoReserva::Confirmada;
        Ok(reserva)
    }

    /// Delete a reservation and give its seat back in one transaction.
    /// The cascade removes any attached reserva_servicio rows.
    pub async fn eliminar(&self, id: i64, caller: &Usuario) -> AppResult<()> {
        let reserva = self.obtener(id, caller).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE vuelos SET asientos_disponibles = asientos_disponibles + 1 WHERE id = ?")
            .bind(reserva.vuelo_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reservas WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn agregar_servicio(
        &self,
        reserva_id: i64,
        servicio_id: i64,
        cantidad: i64,
        caller: &Usuario,
    ) -> AppResult<ReservaServicio> {
        if cantidad < 1 {
            return Err(AppError::Validation(
                "La cantidad debe ser al menos 1".into(),
            ));
        }

        let reserva = self.obtener(reserva_id, caller).await?;

        let servicio = sqlx::query_as::<_, Servicio>("SELECT * FROM servicios WHERE id = ?")
            .bind(servicio_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado".into()))?;

        let subtotal = servicio.precio * cantidad as f64;

        let result = sqlx::query(
            "INSERT INTO reserva_servicio (reserva_id, servicio_id, cantidad, subtotal)
             VALUES (?, ?, ?, ?)",
        )
        .bind(reserva.id)
        .bind(servicio_id)
        .bind(cantidad)
        .bind(subtotal)
        .execute(&self.pool)
        .await?;

        Ok(ReservaServicio {
            id: result.last_insert_rowid(),
            reserva_id: reserva.id,
            servicio_id,
            cantidad,
            subtotal,
        })
    }

    pub async fn servicios_de_reserva(
        &self,
        reserva_id: i64,
        caller: &Usuario,
    ) -> AppResult<Vec<ReservaServicio>> {
        let reserva = self.obtener(reserva_id, caller).await?;

        let filas = sqlx::query_as::<_, ReservaServicio>(
            "SELECT * FROM reserva_servicio WHERE reserva_id = ?",
        )
        .bind(reserva.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    // The delete is scoped by both ids so it can never touch another
    // reservation's row for the same servicio.
    pub async fn eliminar_servicio(
        &self,
        reserva_id: i64,
        servicio_id: i64,
        caller: &Usuario,
    ) -> AppResult<()> {
        let reserva = self.obtener(reserva_id, caller).await?;

        let result =
            sqlx::query("DELETE FROM reserva_servicio WHERE reserva_id = ? AND servicio_id = ?")
                .bind(reserva.id)
                .bind(servicio_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "El servicio no está asociado a esta reserva".into(),
            ));
        }
        Ok(())
    }
}
