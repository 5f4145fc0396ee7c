#[macro_use]
extern crate rocket;

use dotenv::dotenv;
use rocket::fairing::AdHoc;

use flyblue_backend::config::AppConfig;
use flyblue_backend::db::Database;
use flyblue_backend::routes;
use flyblue_backend::services::auth_service::AuthService;
use flyblue_backend::services::notificacion_service::NotificacionService;
use flyblue_backend::services::pago_service::PagoService;
use flyblue_backend::services::reserva_service::ReservaService;
use flyblue_backend::services::servicio_service::ServicioService;
use flyblue_backend::services::usuario_service::UsuarioService;
use flyblue_backend::services::vuelo_service::VueloService;
use flyblue_backend::utils::jwt::TokenService;
use flyblue_backend::utils::password::PasswordService;

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to the database and make sure the schema exists
    let db = Database::new(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let pool = db.pool.clone();

    // Credential primitives, built once and injected into the auth service
    let hasher = PasswordService::new(config.bcrypt_cost);
    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_minutes);

    let auth_service = AuthService::new(pool.clone(), hasher, tokens);
    let usuario_service = UsuarioService::new(pool.clone());
    let vuelo_service = VueloService::new(pool.clone());
    let reserva_service = ReservaService::new(pool.clone());
    let servicio_service = ServicioService::new(pool.clone());
    let pago_service = PagoService::new(pool.clone());
    let notificacion_service = NotificacionService::new(pool.clone());

    rocket::build()
        .manage(auth_service)
        .manage(usuario_service)
        .manage(vuelo_service)
        .manage(reserva_service)
        .manage(servicio_service)
        .manage(pago_service)
        .manage(notificacion_service)
        .mount(
            "/auth",
            routes![
                routes::auth_route::register,
                routes::auth_route::login,
                routes::auth_route::me,
            ],
        )
        .mount(
            "/usuarios",
            routes![
                routes::usuario_route::listar,
                routes::usuario_route::obtener,
                routes::usuario_route::actualizar,
                routes::usuario_route::eliminar,
            ],
        )
        .mount(
            "/vuelos",
            routes![
                routes::vuelo_route::listar,
                routes::vuelo_route::disponibles,
                routes::vuelo_route::obtener,
                routes::vuelo_route::crear,
                routes::vuelo_route::actualizar,
                routes::vuelo_route::eliminar,
            ],
        )
        .mount(
            "/reservas",
            routes![
                routes::reserva_route::listar,
                routes::reserva_route::obtener,
                routes::reserva_route::crear,
                routes::reserva_route::actualizar,
                routes::reserva_route::confirmar,
                routes::reserva_route::eliminar,
                routes::reserva_route::agregar_servicio,
                routes::reserva_route::servicios_de_reserva,
                routes::reserva_route::eliminar_servicio,
            ],
        )
        .mount(
            "/servicios",
            routes![
                routes::servicio_route::listar,
                routes::servicio_route::obtener,
                routes::servicio_route::crear,
                routes::servicio_route::actualizar,
                routes::servicio_route::eliminar,
            ],
        )
        .mount(
            "/pagos",
            routes![
                routes::pago_route::crear,
                routes::pago_route::obtener,
                routes::pago_route::por_reserva,
                routes::pago_route::listar_por_usuario,
            ],
        )
        .mount(
            "/notificaciones",
            routes![
                routes::notificacion_route::listar,
                routes::notificacion_route::no_leidas,
                routes::notificacion_route::obtener,
                routes::notificacion_route::crear,
                routes::notificacion_route::marcar_leida,
                routes::notificacion_route::eliminar,
            ],
        )
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
