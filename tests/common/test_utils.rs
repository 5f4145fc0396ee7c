#![allow(dead_code)]

use chrono::{Duration, Utc};
use flyblue_backend::db::init_schema;
use flyblue_backend::models::usuario::{Rol, Usuario};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub struct TestDb;

impl TestDb {
    // Fresh in-memory database per test context. The pool is pinned to a
    // single connection so the :memory: database outlives individual
    // acquisitions.
    pub async fn new_pool() -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        init_schema(&pool).await?;
        Ok(pool)
    }
}

pub async fn insertar_usuario(
    pool: &SqlitePool,
    id: i64,
    rol: Rol,
) -> Result<Usuario, sqlx::Error> {
    let nombre = format!("Usuario {}", id);
    let email = format!("usuario{}@flyblue.test", id);
    // Not a real digest; these fixtures never go through login
    let contrasena = "$2b$04$fixture".to_string();
    let fecha_registro = Utc::now().naive_utc();

    sqlx::query(
        "INSERT INTO usuarios (id, nombre, email, contrasena, rol, fecha_registro)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&nombre)
    .bind(&email)
    .bind(&contrasena)
    .bind(rol)
    .bind(fecha_registro)
    .execute(pool)
    .await?;

    Ok(Usuario {
        id,
        nombre,
        email,
        contrasena,
        rol,
        fecha_registro,
    })
}

pub async fn insertar_vuelo(
    pool: &SqlitePool,
    id: i64,
    asientos_disponibles: i64,
) -> Result<(), sqlx::Error> {
    let salida = Utc::now().naive_utc() + Duration::days(10);
    let llegada = salida + Duration::hours(2);

    sqlx::query(
        "INSERT INTO vuelos
            (id, origen, destino, salida, llegada, duracion, precio_base, asientos_disponibles)
         VALUES (?, 'Bogotá (BOG)', 'Medellín (MDE)', ?, ?, 2.0, 150000.0, ?)",
    )
    .bind(id)
    .bind(salida)
    .bind(llegada)
    .bind(asientos_disponibles)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insertar_servicio(
    pool: &SqlitePool,
    nombre: &str,
    precio: f64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO servicios (nombre, precio) VALUES (?, ?)")
        .bind(nombre)
        .bind(precio)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn asientos_disponibles(pool: &SqlitePool, vuelo_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT asientos_disponibles FROM vuelos WHERE id = ?")
        .bind(vuelo_id)
        .fetch_one(pool)
        .await
}
