use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use validator::Validate;

use crate::models::reserva::{Reserva, ReservaCreate, ReservaServicio, ReservaUpdate};
use crate::services::reserva_service::ReservaService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, CurrentUser};

// Admins see every reservation, everyone else only their own
#[get("/")]
pub async fn listar(
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Vec<Reserva>>, AppError> {
    let reservas = if current.usuario.es_admin() {
        reserva_service.listar_todas().await?
    } else {
        reserva_service.listar_por_usuario(current.usuario.id).await?
    };
    Ok(Json(reservas))
}

#[get("/<id>")]
pub async fn obtener(
    id: i64,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Reserva>, AppError> {
    Ok(Json(reserva_service.obtener(id, &current.usuario).await?))
}

#[post("/", format = "json", data = "<datos>")]
pub async fn crear(
    datos: Json<ReservaCreate>,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<(Status, Json<Reserva>), AppError> {
    let datos = datos.into_inner();
    datos.validate()?;
    let reserva = reserva_service.crear(datos, current.usuario.id).await?;
    Ok((Status::Created, Json(reserva)))
}

#[put("/<id>", format = "json", data = "<datos>")]
pub async fn actualizar(
    id: i64,
    datos: Json<ReservaUpdate>,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Reserva>, AppError> {
    Ok(Json(
        reserva_service
            .actualizar(id, datos.into_inner(), &current.usuario)
            .await?,
    ))
}

#[post("/<id>/confirmar")]
pub async fn confirmar(
    id: i64,
    _admin: AdminUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Reserva>, AppError> {
    Ok(Json(reserva_service.confirmar(id).await?))
}

// Owner-or-admin; gives the seat back to the flight
#[delete("/<id>")]
pub async fn eliminar(
    id: i64,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Value>, AppError> {
    reserva_service.eliminar(id, &current.usuario).await?;
    Ok(Json(json!({
        "message": format!("Reserva {} eliminada correctamente", id)
    })))
}

// cantidad defaults to one seat-worth of the servicio when omitted
#[post("/<id>/agregar-servicio?<servicio_id>&<cantidad>")]
pub async fn agregar_servicio(
    id: i64,
    servicio_id: i64,
    cantidad: Option<i64>,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<ReservaServicio>, AppError> {
    Ok(Json(
        reserva_service
            .agregar_servicio(id, servicio_id, cantidad.unwrap_or(1), &current.usuario)
            .await?,
    ))
}

#[get("/<id>/servicios")]
pub async fn servicios_de_reserva(
    id: i64,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Vec<ReservaServicio>>, AppError> {
    Ok(Json(
        reserva_service
            .servicios_de_reserva(id, &current.usuario)
            .await?,
    ))
}

#[delete("/<id>/eliminar-servicio?<servicio_id>")]
pub async fn eliminar_servicio(
    id: i64,
    servicio_id: i64,
    current: CurrentUser,
    reserva_service: &State<ReservaService>,
) -> Result<Json<Value>, AppError> {
    reserva_service
        .eliminar_servicio(id, servicio_id, &current.usuario)
        .await?;
    Ok(Json(json!({
        "message": "Servicio eliminado de la reserva"
    })))
}
