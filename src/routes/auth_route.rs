use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use validator::Validate;

use crate::models::usuario::{LoginRequest, MeResponse, RegisterRequest, TokenResponse};
use crate::services::auth_service::AuthService;
use crate::utils::error::AppError;
use crate::utils::jwt::CurrentUser;

/// Register a new user; the caller supplies their own id (national ID)
#[post("/register", format = "json", data = "<payload>")]
pub async fn register(
    payload: Json<RegisterRequest>,
    auth_service: &State<AuthService>,
) -> Result<(Status, Json<TokenResponse>), AppError> {
    let payload = payload.into_inner();
    payload.validate()?;
    let token = auth_service.registrar(payload).await?;
    Ok((Status::Created, Json(token)))
}

#[post("/login", format = "json", data = "<payload>")]
pub async fn login(
    payload: Json<LoginRequest>,
    auth_service: &State<AuthService>,
) -> Result<Json<TokenResponse>, AppError> {
    let payload = payload.into_inner();
    payload.validate()?;
    let token = auth_service.login(payload).await?;
    Ok(Json(token))
}

#[get("/me")]
pub async fn me(current: CurrentUser) -> Json<MeResponse> {
    let usuario = current.usuario;
    Json(MeResponse {
        id: usuario.id,
        email: usuario.email,
        nombre: usuario.nombre,
        rol: usuario.rol,
    })
}
