use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use validator::Validate;

use crate::models::notificacion::{Notificacion, NotificacionCreate};
use crate::services::notificacion_service::NotificacionService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, CurrentUser};

#[get("/")]
pub async fn listar(
    current: CurrentUser,
    notificacion_service: &State<NotificacionService>,
) -> Result<Json<Vec<Notificacion>>, AppError> {
    Ok(Json(notificacion_service.listar(current.usuario.id).await?))
}

#[get("/nuevas")]
pub async fn no_leidas(
    current: CurrentUser,
    notificacion_service: &State<NotificacionService>,
) -> Result<Json<Vec<Notificacion>>, AppError> {
    Ok(Json(
        notificacion_service.no_leidas(current.usuario.id).await?,
    ))
}

#[get("/<id>")]
pub async fn obtener(
    id: i64,
    current: CurrentUser,
    notificacion_service: &State<NotificacionService>,
) -> Result<Json<Notificacion>, AppError> {
    Ok(Json(
        notificacion_service.obtener(id, &current.usuario).await?,
    ))
}

// Only admins (or the system acting as one) may create notifications
#[post("/", format = "json", data = "<datos>")]
pub async fn crear(
    datos: Json<NotificacionCreate>,
    _admin: AdminUser,
    notificacion_service: &State<NotificacionService>,
) -> Result<(Status, Json<Notificacion>), AppError> {
    let datos = datos.into_inner();
    datos.validate()?;
    let notificacion = notificacion_service.crear(datos).await?;
    Ok((Status::Created, Json(notificacion)))
}

#[put("/<id>")]
pub async fn marcar_leida(
    id: i64,
    current: CurrentUser,
    notificacion_service: &State<NotificacionService>,
) -> Result<Json<Notificacion>, AppError> {
    Ok(Json(
        notificacion_service
            .marcar_leida(id, &current.usuario)
            .await?,
    ))
}

#[delete("/<id>")]
pub async fn eliminar(
    id: i64,
    current: CurrentUser,
    notificacion_service: &State<NotificacionService>,
) -> Result<Json<Value>, AppError> {
    notificacion_service.eliminar(id, &current.usuario).await?;
    Ok(Json(json!({
        "message": "Notificación eliminada correctamente"
    })))
}
