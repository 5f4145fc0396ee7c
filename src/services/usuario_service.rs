use sqlx::SqlitePool;

use crate::models::usuario::{Usuario, UsuarioRead, UsuarioUpdate};
use crate::utils::error::{AppError, AppResult};

pub struct UsuarioService {
    pool: SqlitePool,
}

impl UsuarioService {
    pub fn new(pool: SqlitePool) -> Self {
        UsuarioService { pool }
    }

    // Admin-only at the boundary
    pub async fn listar(&self) -> AppResult<Vec<UsuarioRead>> {
        let usuarios = sqlx::query_as::<_, UsuarioRead>(
            "SELECT id, nombre, email, rol, fecha_registro FROM usuarios",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(usuarios)
    }

    pub async fn obtener(&self, id: i64, caller: &Usuario) -> AppResult<UsuarioRead> {
        let usuario = self.buscar(id).await?;

        if !caller.puede_acceder(id) {
            return Err(AppError::Forbidden(
                "No tienes permisos para ver este usuario".into(),
            ));
        }
        Ok(usuario.into())
    }

    // nombre and email are updatable by the user themselves; only an admin
    // may change the rol.
    pub async fn actualizar(
        &self,
        id: i64,
        datos: UsuarioUpdate,
        caller: &Usuario,
    ) -> AppResult<UsuarioRead> {
        let mut usuario = self.buscar(id).await?;

        if !caller.puede_acceder(id) {
            return Err(AppError::Forbidden(
                "No tienes permisos para actualizar este usuario".into(),
            ));
        }

        usuario.nombre = datos.nombre;
        usuario.email = datos.email;
        if caller.es_admin() {
            if let Some(rol) = datos.rol {
                usuario.rol = rol;
            }
        }

        sqlx::query("UPDATE usuarios SET nombre = ?, email = ?, rol = ? WHERE id = ?")
            .bind(&usuario.nombre)
            .bind(&usuario.email)
            .bind(usuario.rol)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(usuario.into())
    }

    // Admin-only at the boundary; cascades to reservas and notificaciones
    pub async fn eliminar(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".into()));
        }
        Ok(())
    }

    async fn buscar(&self, id: i64) -> AppResult<Usuario> {
        sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".into()))
    }
}
