use flyblue_backend::{
    models::usuario::Rol,
    models::vuelo::{VueloCreate, VueloUpdate},
    services::reserva_service::ReservaService,
    services::vuelo_service::VueloService,
    utils::error::AppError,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{insertar_usuario, insertar_vuelo, TestDb};

struct VueloServiceContext {
    pool: SqlitePool,
    vuelo_service: VueloService,
}

#[async_trait]
impl AsyncTestContext for VueloServiceContext {
    async fn setup() -> Self {
        let pool = TestDb::new_pool()
            .await
            .expect("Failed to create test database");

        let vuelo_service = VueloService::new(pool.clone());

        VueloServiceContext {
            pool,
            vuelo_service,
        }
    }

    async fn teardown(self) {}
}

fn datos_vuelo(id: i64, asientos: i64) -> VueloCreate {
    let salida = Utc::now().naive_utc() + Duration::days(7);
    VueloCreate {
        id,
        origen: "Bogotá (BOG)".to_string(),
        destino: "Cartagena (CTG)".to_string(),
        salida,
        llegada: salida + Duration::hours(1),
        duracion: 1.25,
        precio_base: 220000.0,
        asientos_disponibles: asientos,
    }
}

#[test_context(VueloServiceContext)]
#[tokio::test]
async fn test_crear_y_obtener(ctx: &VueloServiceContext) -> Result<(), AppError> {
    let creado = ctx.vuelo_service.crear(datos_vuelo(100, 50)).await?;
    assert_eq!(creado.id, 100);

    let leido = ctx.vuelo_service.obtener(100).await?;
    assert_eq!(leido.origen, "Bogotá (BOG)");
    assert_eq!(leido.asientos_disponibles, 50);
    Ok(())
}

#[test_context(VueloServiceContext)]
#[tokio::test]
async fn test_crear_codigo_duplicado(ctx: &VueloServiceContext) -> Result<(), AppError> {
    ctx.vuelo_service.crear(datos_vuelo(100, 50)).await?;

    let err = ctx
        .vuelo_service
        .crear(datos_vuelo(100, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[test_context(VueloServiceContext)]
#[tokio::test]
async fn test_disponibles_excluye_vuelos_llenos(ctx: &VueloServiceContext) -> Result<(), AppError> {
    ctx.vuelo_service.crear(datos_vuelo(100, 5)).await?;
    ctx.vuelo_service.crear(datos_vuelo(200, 0)).await?;

    let disponibles = ctx.vuelo_service.disponibles().await?;
    assert_eq!(disponibles.len(), 1);
    assert_eq!(disponibles[0].id, 100);

    assert_eq!(ctx.vuelo_service.listar().await?.len(), 2);
    Ok(())
}

#[test_context(VueloServiceContext)]
#[tokio::test]
async fn test_actualizar_parcial(ctx: &VueloServiceContext) -> Result<(), AppError> {
    ctx.vuelo_service.crear(datos_vuelo(100, 50)).await?;

    let patch = VueloUpdate {
        precio_base: Some(199000.0),
        ..Default::default()
    };
    let actualizado = ctx.vuelo_service.actualizar(100, patch).await?;

    assert_eq!(actualizado.precio_base, 199000.0);
    assert_eq!(actualizado.destino, "Cartagena (CTG)");
    assert_eq!(actualizado.asientos_disponibles, 50);

    let err = ctx
        .vuelo_service
        .actualizar(99999, VueloUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[test_context(VueloServiceContext)]
#[tokio::test]
async fn test_eliminar_cascada_reservas(ctx: &VueloServiceContext) -> Result<(), AppError> {
    let usuario = insertar_usuario(&ctx.pool, 1, Rol::Cliente).await?;
    insertar_vuelo(&ctx.pool, 100, 10).await?;
    insertar_vuelo(&ctx.pool, 200, 10).await?;

    let reserva_service = ReservaService::new(ctx.pool.clone());
    reserva_service
        .crear(
            flyblue_backend::models::reserva::ReservaCreate {
                vuelo_id: 100,
                clase: "económica".to_string(),
                asiento: None,
                total: 100000.0,
            },
            usuario.id,
        )
        .await?;
    reserva_service
        .crear(
            flyblue_backend::models::reserva::ReservaCreate {
                vuelo_id: 200,
                clase: "económica".to_string(),
                asiento: None,
                total: 100000.0,
            },
            usuario.id,
        )
        .await?;

    ctx.vuelo_service.eliminar(100).await?;

    // Only the deleted flight's reserva goes with it
    let restantes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservas")
        .fetch_one(&ctx.pool)
        .await?;
    assert_eq!(restantes, 1);

    let err = ctx.vuelo_service.eliminar(100).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}
