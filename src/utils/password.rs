use crate::utils::error::{AppError, AppResult};

/// Bcrypt wrapper, constructed once at startup with the configured cost and
/// injected into whoever needs it. The salt is generated per call, so two
/// hashes of the same password never match each other (but both verify).
#[derive(Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        PasswordService { cost }
    }

    pub fn hash(&self, plain: &str) -> AppResult<String> {
        bcrypt::hash(plain.as_bytes(), self.cost)
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    pub fn verify(&self, plain: &str, digest: &str) -> AppResult<bool> {
        bcrypt::verify(plain.as_bytes(), digest)
            .map_err(|e| AppError::Unauthenticated(e.to_string()))
    }
}
