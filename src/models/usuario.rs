use chrono::NaiveDateTime;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use validator::Validate;

/// Closed role set. Authorization never compares free-form strings; roles are
/// parsed once (case-insensitively) at the boundary and matched on here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Display, EnumString)]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rol {
    Cliente,
    Admin,
}

impl Serialize for Rol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rol::from_str(&s).map_err(|_| DeError::unknown_variant(&s, &["cliente", "admin"]))
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub contrasena: String,
    pub rol: Rol,
    pub fecha_registro: NaiveDateTime,
}

impl Usuario {
    pub fn es_admin(&self) -> bool {
        self.rol == Rol::Admin
    }

    /// The ownership predicate behind every per-row authorization decision:
    /// admins may touch anything, everyone else only their own rows.
    pub fn puede_acceder(&self, propietario_id: i64) -> bool {
        self.es_admin() || self.id == propietario_id
    }
}

/// Public projection of a usuario; the password digest never leaves the
/// service layer.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UsuarioRead {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: Rol,
    pub fecha_registro: NaiveDateTime,
}

impl From<Usuario> for UsuarioRead {
    fn from(u: Usuario) -> Self {
        UsuarioRead {
            id: u.id,
            nombre: u.nombre,
            email: u.email,
            rol: u.rol,
            fecha_registro: u.fecha_registro,
        }
    }
}

// id is the user's national identification number, assigned by the caller
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub id: i64,
    pub nombre: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub contrasena: String,
    pub rol: Option<Rol>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub contrasena: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub nombre: String,
    pub rol: Rol,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UsuarioUpdate {
    pub nombre: String,
    #[validate(email)]
    pub email: String,
    pub rol: Option<Rol>,
}
