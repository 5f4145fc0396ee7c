pub mod auth_service;
pub mod notificacion_service;
pub mod pago_service;
pub mod reserva_service;
pub mod servicio_service;
pub mod usuario_service;
pub mod vuelo_service;
