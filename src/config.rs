use std::env;

use crate::utils::error::{AppError, AppResult};

/// Process-wide configuration, read once at startup and handed to the
/// services that need each piece. Nothing else reads the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Validation("DATABASE_URL must be set".into()))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::Validation("JWT_SECRET must be set".into()))?;

        let token_ttl_minutes = match env::var("TOKEN_TTL_MINUTES") {
            Ok(v) => v
                .parse()
                .map_err(|_| AppError::Validation("TOKEN_TTL_MINUTES must be an integer".into()))?,
            Err(_) => 60,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(v) => v
                .parse()
                .map_err(|_| AppError::Validation("BCRYPT_COST must be an integer".into()))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(AppConfig {
            database_url,
            jwt_secret,
            token_ttl_minutes,
            bcrypt_cost,
        })
    }
}
