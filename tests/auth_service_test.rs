use flyblue_backend::{
    models::usuario::{LoginRequest, RegisterRequest, Rol},
    services::auth_service::AuthService,
    utils::error::AppError,
    utils::jwt::TokenService,
    utils::password::PasswordService,
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{insertar_usuario, TestDb};

struct AuthServiceContext {
    pool: SqlitePool,
    auth_service: AuthService,
    tokens: TokenService,
}

#[async_trait]
impl AsyncTestContext for AuthServiceContext {
    async fn setup() -> Self {
        let pool = TestDb::new_pool()
            .await
            .expect("Failed to create test database");

        // Low bcrypt cost to keep the suite fast
        let hasher = PasswordService::new(4);
        let tokens = TokenService::new("secreto-de-prueba", 60);
        let auth_service = AuthService::new(pool.clone(), hasher, tokens.clone());

        AuthServiceContext {
            pool,
            auth_service,
            tokens,
        }
    }

    async fn teardown(self) {}
}

fn registro(id: i64, email: &str) -> RegisterRequest {
    RegisterRequest {
        id,
        nombre: "Ana Prueba".to_string(),
        email: email.to_string(),
        contrasena: "contrasena123".to_string(),
        rol: None,
    }
}

#[tokio::test]
async fn test_hash_no_deterministico_pero_verificable() -> Result<(), AppError> {
    let hasher = PasswordService::new(4);

    let primero = hasher.hash("contrasena123")?;
    let segundo = hasher.hash("contrasena123")?;

    // Fresh salt per call: different digests, both valid
    assert_ne!(primero, segundo);
    assert!(hasher.verify("contrasena123", &primero)?);
    assert!(hasher.verify("contrasena123", &segundo)?);
    assert!(!hasher.verify("otra-cosa", &primero)?);
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_registro_emite_token_valido(ctx: &AuthServiceContext) -> Result<(), AppError> {
    let token = ctx
        .auth_service
        .registrar(registro(10, "ana@flyblue.test"))
        .await?;

    assert_eq!(token.token_type, "bearer");

    let claims = ctx.tokens.verify(&token.access_token)?;
    assert_eq!(claims.sub, "ana@flyblue.test");
    assert_eq!(claims.id, 10);
    assert_eq!(claims.rol, Rol::Cliente);
    assert!(claims.exp > claims.iat);
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_registro_duplicado(ctx: &AuthServiceContext) -> Result<(), AppError> {
    ctx.auth_service
        .registrar(registro(10, "ana@flyblue.test"))
        .await?;

    let err = ctx
        .auth_service
        .registrar(registro(11, "ana@flyblue.test"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = ctx
        .auth_service
        .registrar(registro(10, "otra@flyblue.test"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_login_correcto(ctx: &AuthServiceContext) -> Result<(), AppError> {
    ctx.auth_service
        .registrar(registro(10, "ana@flyblue.test"))
        .await?;

    let token = ctx
        .auth_service
        .login(LoginRequest {
            email: "ana@flyblue.test".to_string(),
            contrasena: "contrasena123".to_string(),
        })
        .await?;

    let claims = ctx.tokens.verify(&token.access_token)?;
    assert_eq!(claims.id, 10);
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_login_no_distingue_causa(ctx: &AuthServiceContext) -> Result<(), AppError> {
    ctx.auth_service
        .registrar(registro(10, "ana@flyblue.test"))
        .await?;

    let contrasena_mala = ctx
        .auth_service
        .login(LoginRequest {
            email: "ana@flyblue.test".to_string(),
            contrasena: "incorrecta".to_string(),
        })
        .await
        .unwrap_err();

    let email_desconocido = ctx
        .auth_service
        .login(LoginRequest {
            email: "nadie@flyblue.test".to_string(),
            contrasena: "contrasena123".to_string(),
        })
        .await
        .unwrap_err();

    // Wrong password and unknown email must be indistinguishable
    assert!(matches!(contrasena_mala, AppError::Unauthenticated(_)));
    assert!(matches!(email_desconocido, AppError::Unauthenticated(_)));
    assert_eq!(contrasena_mala.to_string(), email_desconocido.to_string());
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_token_manipulado_rechazado(ctx: &AuthServiceContext) -> Result<(), AppError> {
    let usuario = insertar_usuario(&ctx.pool, 20, Rol::Cliente).await?;
    let token = ctx.tokens.issue(&usuario)?;

    // Flip the last signature character
    let mut manipulado = token.clone();
    let ultimo = manipulado.pop().expect("token is not empty");
    manipulado.push(if ultimo == 'a' { 'b' } else { 'a' });

    assert!(ctx.tokens.verify(&token).is_ok());
    let err = ctx.tokens.verify(&manipulado).unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_token_expirado_rechazado(ctx: &AuthServiceContext) -> Result<(), AppError> {
    let usuario = insertar_usuario(&ctx.pool, 20, Rol::Cliente).await?;

    // Past the validation leeway
    let vencido = ctx.tokens.issue_with_ttl(&usuario, -5)?;

    let err = ctx.tokens.verify(&vencido).unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));
    Ok(())
}

#[test_context(AuthServiceContext)]
#[tokio::test]
async fn test_usuario_desaparecido_equivale_a_token_invalido(
    ctx: &AuthServiceContext,
) -> Result<(), AppError> {
    let usuario = insertar_usuario(&ctx.pool, 20, Rol::Cliente).await?;
    let token = ctx.tokens.issue(&usuario)?;

    assert_eq!(ctx.auth_service.usuario_actual(&token).await?.id, 20);

    sqlx::query("DELETE FROM usuarios WHERE id = ?")
        .bind(usuario.id)
        .execute(&ctx.pool)
        .await?;

    let desaparecido = ctx.auth_service.usuario_actual(&token).await.unwrap_err();
    let invalido = ctx
        .auth_service
        .usuario_actual("no-es-un-token")
        .await
        .unwrap_err();

    // Same kind, same message: nothing leaks about which check failed
    assert!(matches!(desaparecido, AppError::Unauthenticated(_)));
    assert_eq!(desaparecido.to_string(), invalido.to_string());
    Ok(())
}
