pub mod auth_route;
pub mod notificacion_route;
pub mod pago_route;
pub mod reserva_route;
pub mod servicio_route;
pub mod usuario_route;
pub mod vuelo_route;
