use sqlx::SqlitePool;

use crate::models::servicio::{Servicio, ServicioCreate, ServicioUpdate};
use crate::utils::error::{AppError, AppResult};

pub struct ServicioService {
    pool: SqlitePool,
}

impl ServicioService {
    pub fn new(pool: SqlitePool) -> Self {
        ServicioService { pool }
    }

    pub async fn listar(&self) -> AppResult<Vec<Servicio>> {
        let servicios = sqlx::query_as::<_, Servicio>("SELECT * FROM servicios")
            .fetch_all(&self.pool)
            .await?;
        Ok(servicios)
    }

    pub async fn obtener(&self, id: i64) -> AppResult<Servicio> {
        sqlx::query_as::<_, Servicio>("SELECT * FROM servicios WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado".into()))
    }

    pub async fn crear(&self, datos: ServicioCreate) -> AppResult<Servicio> {
        // Exact-match uniqueness on the name, backed by the UNIQUE constraint
        let existente = sqlx::query_scalar::<_, i64>("SELECT id FROM servicios WHERE nombre = ?")
            .bind(&datos.nombre)
            .fetch_optional(&self.pool)
            .await?;

        if existente.is_some() {
            return Err(AppError::Conflict(
                "Ya existe un servicio con este nombre".into(),
            ));
        }

        let result =
            sqlx::query("INSERT INTO servicios (nombre, descripcion, precio) VALUES (?, ?, ?)")
                .bind(&datos.nombre)
                .bind(&datos.descripcion)
                .bind(datos.precio)
                .execute(&self.pool)
                .await?;

        Ok(Servicio {
            id: result.last_insert_rowid(),
            nombre: datos.nombre,
            descripcion: datos.descripcion,
            precio: datos.precio,
        })
    }

    pub async fn actualizar(&self, id: i64, datos: ServicioUpdate) -> AppResult<Servicio> {
        let mut servicio = self.obtener(id).await?;

        if let Some(nombre) = datos.nombre {
            servicio.nombre = nombre;
        }
        if let Some(descripcion) = datos.descripcion {
            servicio.descripcion = Some(descripcion);
        }
        if let Some(precio) = datos.precio {
            servicio.precio = precio;
        }

        sqlx::query("UPDATE servicios SET nombre = ?, descripcion = ?, precio = ? WHERE id = ?")
            .bind(&servicio.nombre)
            .bind(&servicio.descripcion)
            .bind(servicio.precio)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(servicio)
    }

    pub async fn eliminar(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM servicios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Servicio no encontrado".into()));
        }
        Ok(())
    }
}
