pub mod notificacion;
pub mod pago;
pub mod reserva;
pub mod servicio;
pub mod usuario;
pub mod vuelo;
