use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::notificacion::{Notificacion, NotificacionCreate};
use crate::models::usuario::Usuario;
use crate::utils::error::{AppError, AppResult};

pub struct NotificacionService {
    pool: SqlitePool,
}

impl NotificacionService {
    pub fn new(pool: SqlitePool) -> Self {
        NotificacionService { pool }
    }

    // Never create a notification for a usuario that does not exist
    pub async fn crear(&self, datos: NotificacionCreate) -> AppResult<Notificacion> {
        let usuario_existe = sqlx::query_scalar::<_, i64>("SELECT id FROM usuarios WHERE id = ?")
            .bind(datos.usuario_id)
            .fetch_optional(&self.pool)
            .await?;

        if usuario_existe.is_none() {
            return Err(AppError::NotFound("Usuario no encontrado".into()));
        }

        let fecha = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO notificaciones (usuario_id, titulo, mensaje, tipo, leido, fecha)
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(datos.usuario_id)
        .bind(&datos.titulo)
        .bind(&datos.mensaje)
        .bind(&datos.tipo)
        .bind(fecha)
        .execute(&self.pool)
        .await?;

        Ok(Notificacion {
            id: result.last_insert_rowid(),
            usuario_id: datos.usuario_id,
            titulo: datos.titulo,
            mensaje: datos.mensaje,
            tipo: datos.tipo,
            leido: false,
            fecha,
        })
    }

    pub async fn listar(&self, usuario_id: i64) -> AppResult<Vec<Notificacion>> {
        let notificaciones = sqlx::query_as::<_, Notificacion>(
            "SELECT * FROM notificaciones WHERE usuario_id = ? ORDER BY fecha DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notificaciones)
    }

    pub async fn no_leidas(&self, usuario_id: i64) -> AppResult<Vec<Notificacion>> {
        let notificaciones = sqlx::query_as::<_, Notificacion>(
            "SELECT * FROM notificaciones
             WHERE usuario_id = ? AND leido = 0
             ORDER BY fecha DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notificaciones)
    }

    // Ownership is folded into the lookup: absent and not-yours are the same
    // 404, so nothing leaks about other users' notifications.
    pub async fn obtener(&self, id: i64, caller: &Usuario) -> AppResult<Notificacion> {
        sqlx::query_as::<_, Notificacion>(
            "SELECT * FROM notificaciones WHERE id = ? AND usuario_id = ?",
        )
        .bind(id)
        .bind(caller.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Notificación no encontrada".into()))
    }

    pub async fn marcar_leida(&self, id: i64, caller: &Usuario) -> AppResult<Notificacion> {
        let result =
            sqlx::query("UPDATE notificaciones SET leido = 1 WHERE id = ? AND usuario_id = ?")
                .bind(id)
                .bind(caller.id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notificación no encontrada".into()));
        }

        self.obtener(id, caller).await
    }

    pub async fn eliminar(&self, id: i64, caller: &Usuario) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM notificaciones WHERE id = ? AND usuario_id = ?")
                .bind(id)
                .bind(caller.id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notificación no encontrada".into()));
        }
        Ok(())
    }
}
