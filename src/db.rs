use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Database connection manager
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new connection pool and make sure the schema exists
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        init_schema(&pool).await?;

        Ok(Database { pool })
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// usuarios.id and vuelos.id are caller-assigned (a national ID, a flight
// code), everything else autoincrements. Cascades live here so a deleted
// usuario/vuelo/reserva takes its dependent rows with it.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS usuarios (
        id INTEGER PRIMARY KEY NOT NULL,
        nombre TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        contrasena TEXT NOT NULL,
        rol TEXT NOT NULL DEFAULT 'cliente',
        fecha_registro DATETIME NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS vuelos (
        id INTEGER PRIMARY KEY NOT NULL,
        origen TEXT NOT NULL,
        destino TEXT NOT NULL,
        salida DATETIME NOT NULL,
        llegada DATETIME NOT NULL,
        duracion REAL NOT NULL,
        precio_base REAL NOT NULL,
        asientos_disponibles INTEGER NOT NULL DEFAULT 100
            CHECK (asientos_disponibles >= 0)
    )",
    "CREATE TABLE IF NOT EXISTS reservas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        usuario_id INTEGER NOT NULL
            REFERENCES usuarios(id) ON DELETE CASCADE,
        vuelo_id INTEGER NOT NULL
            REFERENCES vuelos(id) ON DELETE CASCADE,
        fecha_reserva DATETIME NOT NULL,
        estado TEXT NOT NULL DEFAULT 'pendiente',
        clase TEXT NOT NULL,
        asiento TEXT NULL,
        total REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS servicios (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL UNIQUE,
        descripcion TEXT NULL,
        precio REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS reserva_servicio (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reserva_id INTEGER NOT NULL
            REFERENCES reservas(id) ON DELETE CASCADE,
        servicio_id INTEGER NOT NULL
            REFERENCES servicios(id) ON DELETE CASCADE,
        cantidad INTEGER NOT NULL DEFAULT 1 CHECK (cantidad >= 1),
        subtotal REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS pagos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reserva_id INTEGER NOT NULL UNIQUE
            REFERENCES reservas(id) ON DELETE CASCADE,
        metodo TEXT NOT NULL DEFAULT 'tarjeta',
        monto REAL NOT NULL,
        moneda TEXT NOT NULL DEFAULT 'USD',
        fecha DATETIME NOT NULL,
        estado TEXT NOT NULL DEFAULT 'completado',
        referencia TEXT NULL
    )",
    "CREATE TABLE IF NOT EXISTS notificaciones (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        usuario_id INTEGER NOT NULL
            REFERENCES usuarios(id) ON DELETE CASCADE,
        titulo TEXT NOT NULL,
        mensaje TEXT NOT NULL,
        tipo TEXT NOT NULL DEFAULT 'info',
        leido BOOLEAN NOT NULL DEFAULT 0,
        fecha DATETIME NOT NULL
    )",
];

// sqlite runs one statement per prepared query, so the DDL is applied
// statement by statement.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
