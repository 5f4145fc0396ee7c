use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use validator::Validate;

use crate::models::vuelo::{Vuelo, VueloCreate, VueloUpdate};
use crate::services::vuelo_service::VueloService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;

#[get("/")]
pub async fn listar(vuelo_service: &State<VueloService>) -> Result<Json<Vec<Vuelo>>, AppError> {
    Ok(Json(vuelo_service.listar().await?))
}

#[get("/disponibles")]
pub async fn disponibles(
    vuelo_service: &State<VueloService>,
) -> Result<Json<Vec<Vuelo>>, AppError> {
    Ok(Json(vuelo_service.disponibles().await?))
}

#[get("/<id>")]
pub async fn obtener(
    id: i64,
    vuelo_service: &State<VueloService>,
) -> Result<Json<Vuelo>, AppError> {
    Ok(Json(vuelo_service.obtener(id).await?))
}

#[post("/", format = "json", data = "<datos>")]
pub async fn crear(
    datos: Json<VueloCreate>,
    _admin: AdminUser,
    vuelo_service: &State<VueloService>,
) -> Result<(Status, Json<Vuelo>), AppError> {
    let datos = datos.into_inner();
    datos.validate()?;
    let vuelo = vuelo_service.crear(datos).await?;
    Ok((Status::Created, Json(vuelo)))
}

#[put("/<id>", format = "json", data = "<datos>")]
pub async fn actualizar(
    id: i64,
    datos: Json<VueloUpdate>,
    _admin: AdminUser,
    vuelo_service: &State<VueloService>,
) -> Result<Json<Vuelo>, AppError> {
    Ok(Json(vuelo_service.actualizar(id, datos.into_inner()).await?))
}

#[delete("/<id>")]
pub async fn eliminar(
    id: i64,
    _admin: AdminUser,
    vuelo_service: &State<VueloService>,
) -> Result<Json<Value>, AppError> {
    vuelo_service.eliminar(id).await?;
    Ok(Json(json!({
        "message": format!("Vuelo con id {} eliminado correctamente", id)
    })))
}
