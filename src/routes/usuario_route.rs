use rocket::serde::json::{json, Json, Value};
use rocket::State;
use validator::Validate;

use crate::models::usuario::{UsuarioRead, UsuarioUpdate};
use crate::services::usuario_service::UsuarioService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, CurrentUser};

#[get("/")]
pub async fn listar(
    _admin: AdminUser,
    usuario_service: &State<UsuarioService>,
) -> Result<Json<Vec<UsuarioRead>>, AppError> {
    Ok(Json(usuario_service.listar().await?))
}

#[get("/<id>")]
pub async fn obtener(
    id: i64,
    current: CurrentUser,
    usuario_service: &State<UsuarioService>,
) -> Result<Json<UsuarioRead>, AppError> {
    Ok(Json(usuario_service.obtener(id, &current.usuario).await?))
}

#[put("/<id>", format = "json", data = "<datos>")]
pub async fn actualizar(
    id: i64,
    datos: Json<UsuarioUpdate>,
    current: CurrentUser,
    usuario_service: &State<UsuarioService>,
) -> Result<Json<UsuarioRead>, AppError> {
    let datos = datos.into_inner();
    datos.validate()?;
    Ok(Json(
        usuario_service
            .actualizar(id, datos, &current.usuario)
            .await?,
    ))
}

#[delete("/<id>")]
pub async fn eliminar(
    id: i64,
    _admin: AdminUser,
    usuario_service: &State<UsuarioService>,
) -> Result<Json<Value>, AppError> {
    usuario_service.eliminar(id).await?;
    Ok(Json(json!({
        "message": format!("Usuario con id {} eliminado correctamente", id)
    })))
}
