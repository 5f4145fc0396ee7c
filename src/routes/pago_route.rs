use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use validator::Validate;

use crate::models::pago::{Pago, PagoCreate};
use crate::services::pago_service::PagoService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, CurrentUser};

#[post("/", format = "json", data = "<datos>")]
pub async fn crear(
    datos: Json<PagoCreate>,
    current: CurrentUser,
    pago_service: &State<PagoService>,
) -> Result<(Status, Json<Pago>), AppError> {
    let datos = datos.into_inner();
    datos.validate()?;
    let pago = pago_service.crear(datos, &current.usuario).await?;
    Ok((Status::Created, Json(pago)))
}

#[get("/<id>")]
pub async fn obtener(
    id: i64,
    current: CurrentUser,
    pago_service: &State<PagoService>,
) -> Result<Json<Pago>, AppError> {
    Ok(Json(pago_service.obtener(id, &current.usuario).await?))
}

#[get("/reserva/<id>")]
pub async fn por_reserva(
    id: i64,
    current: CurrentUser,
    pago_service: &State<PagoService>,
) -> Result<Json<Pago>, AppError> {
    Ok(Json(pago_service.por_reserva(id, &current.usuario).await?))
}

#[get("/usuario/<id>")]
pub async fn listar_por_usuario(
    id: i64,
    _admin: AdminUser,
    pago_service: &State<PagoService>,
) -> Result<Json<Vec<Pago>>, AppError> {
    Ok(Json(pago_service.listar_por_usuario(id).await?))
}
