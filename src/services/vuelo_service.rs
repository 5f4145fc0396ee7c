use sqlx::SqlitePool;

use crate::models::vuelo::{Vuelo, VueloCreate, VueloUpdate};
use crate::utils::error::{AppError, AppResult};

pub struct VueloService {
    pool: SqlitePool,
}

impl VueloService {
    pub fn new(pool: SqlitePool) -> Self {
        VueloService { pool }
    }

    pub async fn listar(&self) -> AppResult<Vec<Vuelo>> {
        let vuelos = sqlx::query_as::<_, Vuelo>("SELECT * FROM vuelos")
            .fetch_all(&self.pool)
            .await?;
        Ok(vuelos)
    }

    pub async fn obtener(&self, id: i64) -> AppResult<Vuelo> {
        sqlx::query_as::<_, Vuelo>("SELECT * FROM vuelos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Vuelo no encontrado".into()))
    }

    // Flights that can still be booked
    pub async fn disponibles(&self) -> AppResult<Vec<Vuelo>> {
        let vuelos =
            sqlx::query_as::<_, Vuelo>("SELECT * FROM vuelos WHERE asientos_disponibles > 0")
                .fetch_all(&self.pool)
                .await?;
        Ok(vuelos)
    }

    pub async fn crear(&self, datos: VueloCreate) -> AppResult<Vuelo> {
        let existente = sqlx::query_scalar::<_, i64>("SELECT id FROM vuelos WHERE id = ?")
            .bind(datos.id)
            .fetch_optional(&self.pool)
            .await?;

        if existente.is_some() {
            return Err(AppError::Conflict(
                "Ya existe un vuelo con este código".into(),
            ));
        }

        sqlx::query(
            "INSERT INTO vuelos
                (id, origen, destino, salida, llegada, duracion, precio_base, asientos_disponibles)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(datos.id)
        .bind(&datos.origen)
        .bind(&datos.destino)
        .bind(datos.salida)
        .bind(datos.llegada)
        .bind(datos.duracion)
        .bind(datos.precio_base)
        .bind(datos.asientos_disponibles)
        .execute(&self.pool)
        .await?;

        Ok(Vuelo {
            id: datos.id,
            origen: datos.origen,
            destino: datos.destino,
            salida: datos.salida,
            llegada: datos.llegada,
            duracion: datos.duracion,
            precio_base: datos.precio_base,
            asientos_disponibles: datos.asientos_disponibles,
        })
    }

    pub async fn actualizar(&self, id: i64, datos: VueloUpdate) -> AppResult<Vuelo> {
        let mut vuelo = self.obtener(id).await?;

        if let Some(origen) = datos.origen {
            vuelo.origen = origen;
        }
        if let Some(destino) = datos.destino {
            vuelo.destino = destino;
        }
        if let Some(salida) = datos.salida {
            vuelo.salida = salida;
        }
        if let Some(llegada) = datos.llegada {
            vuelo.llegada = llegada;
        }
        if let Some(duracion) = datos.duracion {
            vuelo.duracion = duracion;
        }
        if let Some(precio_base) = datos.precio_base {
            vuelo.precio_base = precio_base;
        }
        if let Some(asientos) = datos.asientos_disponibles {
            if asientos < 0 {
                return Err(AppError::Validation(
                    "Los asientos disponibles no pueden ser negativos".into(),
                ));
            }
            vuelo.asientos_disponibles = asientos;
        }

        sqlx::query(
            "UPDATE vuelos
             SET origen = ?, destino = ?, salida = ?, llegada = ?,
                 duracion = ?, precio_base = ?, asientos_disponibles = ?
             WHERE id = ?",
        )
        .bind(&vuelo.origen)
        .bind(&vuelo.destino)
        .bind(vuelo.salida)
        .bind(vuelo.llegada)
        .bind(vuelo.duracion)
        .bind(vuelo.precio_base)
        .bind(vuelo.asientos_disponibles)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(vuelo)
    }

    // Cascades to the flight's reservas; the seat counter dies with the row
    pub async fn eliminar(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vuelos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vuelo no encontrado".into()));
        }
        Ok(())
    }
}
