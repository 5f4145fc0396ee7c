use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use serde::{Deserialize, Serialize};

use crate::models::usuario::{Rol, Usuario};
use crate::services::auth_service::AuthService;
use crate::utils::error::{AppError, AppResult};

/// Token payload. `sub` carries the email, `id` the caller-assigned user id.
/// All fields are required; a token missing any of them fails verification.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub id: i64,
    pub rol: Rol,
    pub iat: usize,
    pub exp: usize,
}

const CREDENCIALES_INVALIDAS: &str = "No se pudo validar las credenciales";

/// HS256 signer/verifier built once from the configured secret and TTL and
/// injected into the auth service.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    pub fn issue(&self, usuario: &Usuario) -> AppResult<String> {
        self.issue_with_ttl(usuario, self.ttl_minutes)
    }

    pub fn issue_with_ttl(&self, usuario: &Usuario, ttl_minutes: i64) -> AppResult<String> {
        let now = chrono::Utc::now();
        let expiration = now + chrono::Duration::minutes(ttl_minutes);

        let claims = Claims {
            sub: usuario.email.clone(),
            id: usuario.id,
            rol: usuario.rol,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Unauthenticated(e.to_string()))
    }

    // Invalid signature, malformed token, expiry and missing claims all
    // collapse to the same message; callers learn nothing about which check
    // failed.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthenticated(CREDENCIALES_INVALIDAS.into()))
    }
}

/// Request guard: bearer token resolved to the usuario it names.
/// A token whose usuario no longer exists fails exactly like a bad token.
#[derive(Debug)]
pub struct CurrentUser {
    pub usuario: Usuario,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match request.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => header[7..].to_string(),
            _ => return Outcome::Error((Status::Unauthorized, ())),
        };

        let auth_service = match request.rocket().state::<AuthService>() {
            Some(service) => service,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };

        match auth_service.usuario_actual(&token).await {
            Ok(usuario) => Outcome::Success(CurrentUser { usuario }),
            Err(_) => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// Request guard for admin-only routes: authentication plus the role check.
#[derive(Debug)]
pub struct AdminUser {
    pub usuario: Usuario,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let current = match CurrentUser::from_request(request).await {
            Outcome::Success(current) => current,
            Outcome::Error(e) => return Outcome::Error(e),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        if current.usuario.es_admin() {
            Outcome::Success(AdminUser {
                usuario: current.usuario,
            })
        } else {
            Outcome::Error((Status::Forbidden, ()))
        }
    }
}
