use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::usuario::{LoginRequest, RegisterRequest, Rol, TokenResponse, Usuario};
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt::TokenService;
use crate::utils::password::PasswordService;

pub struct AuthService {
    pool: SqlitePool,
    hasher: PasswordService,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(pool: SqlitePool, hasher: PasswordService, tokens: TokenService) -> Self {
        AuthService {
            pool,
            hasher,
            tokens,
        }
    }

    // Register a new user and hand back a token right away
    pub async fn registrar(&self, payload: RegisterRequest) -> AppResult<TokenResponse> {
        let email_en_uso = sqlx::query_scalar::<_, i64>("SELECT id FROM usuarios WHERE email = ?")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;

        if email_en_uso.is_some() {
            return Err(AppError::Conflict("El correo ya está registrado".into()));
        }

        let id_en_uso = sqlx::query_scalar::<_, i64>("SELECT id FROM usuarios WHERE id = ?")
            .bind(payload.id)
            .fetch_optional(&self.pool)
            .await?;

        if id_en_uso.is_some() {
            return Err(AppError::Conflict(
                "Ya existe un usuario con esta identificación".into(),
            ));
        }

        let contrasena = self.hasher.hash(&payload.contrasena)?;
        let rol = payload.rol.unwrap_or(Rol::Cliente);
        let fecha_registro = Utc::now().naive_utc();

        sqlx::query(
            "INSERT INTO usuarios (id, nombre, email, contrasena, rol, fecha_registro)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(payload.id)
        .bind(&payload.nombre)
        .bind(&payload.email)
        .bind(&contrasena)
        .bind(rol)
        .bind(fecha_registro)
        .execute(&self.pool)
        .await?;

        let usuario = Usuario {
            id: payload.id,
            nombre: payload.nombre,
            email: payload.email,
            contrasena,
            rol,
            fecha_registro,
        };

        let token = self.tokens.issue(&usuario)?;
        Ok(TokenResponse::bearer(token))
    }

    // Unknown email and wrong password produce the same error on purpose
    pub async fn login(&self, payload: LoginRequest) -> AppResult<TokenResponse> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = ?")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("Credenciales incorrectas".into()))?;

        if !self.hasher.verify(&payload.contrasena, &usuario.contrasena)? {
            return Err(AppError::Unauthenticated("Credenciales incorrectas".into()));
        }

        let token = self.tokens.issue(&usuario)?;
        Ok(TokenResponse::bearer(token))
    }

    /// Resolve a bearer token to its usuario. A verification failure and a
    /// token naming a usuario that no longer exists are indistinguishable.
    pub async fn usuario_actual(&self, token: &str) -> AppResult<Usuario> {
        let claims = self.tokens.verify(token)?;

        sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = ?")
            .bind(claims.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Unauthenticated("No se pudo validar las credenciales".into())
            })
    }
}
