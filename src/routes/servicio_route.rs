use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use validator::Validate;

use crate::models::servicio::{Servicio, ServicioCreate, ServicioUpdate};
use crate::services::servicio_service::ServicioService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;

#[get("/")]
pub async fn listar(
    servicio_service: &State<ServicioService>,
) -> Result<Json<Vec<Servicio>>, AppError> {
    Ok(Json(servicio_service.listar().await?))
}

#[get("/<id>")]
pub async fn obtener(
    id: i64,
    servicio_service: &State<ServicioService>,
) -> Result<Json<Servicio>, AppError> {
    Ok(Json(servicio_service.obtener(id).await?))
}

#[post("/", format = "json", data = "<datos>")]
pub async fn crear(
    datos: Json<ServicioCreate>,
    _admin: AdminUser,
    servicio_service: &State<ServicioService>,
) -> Result<(Status, Json<Servicio>), AppError> {
    let datos = datos.into_inner();
    datos.validate()?;
    let servicio = servicio_service.crear(datos).await?;
    Ok((Status::Created, Json(servicio)))
}

#[put("/<id>", format = "json", data = "<datos>")]
pub async fn actualizar(
    id: i64,
    datos: Json<ServicioUpdate>,
    _admin: AdminUser,
    servicio_service: &State<ServicioService>,
) -> Result<Json<Servicio>, AppError> {
    Ok(Json(
        servicio_service.actualizar(id, datos.into_inner()).await?,
    ))
}

#[delete("/<id>")]
pub async fn eliminar(
    id: i64,
    _admin: AdminUser,
    servicio_service: &State<ServicioService>,
) -> Result<Json<Value>, AppError> {
    servicio_service.eliminar(id).await?;
    Ok(Json(json!({
        "message": format!("Servicio {} eliminado correctamente", id)
    })))
}
