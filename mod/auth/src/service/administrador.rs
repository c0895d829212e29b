use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::guard::AuthEvent;
use crate::model::{AdministradorCrear, AdministradorEditar, Credencial, PerfilAdministrador};
use crate::service::login::es_email_valido;
use crate::service::{password, AuthError, AuthService};

fn validar_crear(input: &AdministradorCrear) -> Result<(), AuthError> {
    if !es_email_valido(input.email.trim()) {
        return Err(AuthError::Validation("Email inválido".into()));
    }
    if input.password.chars().count() < 8 {
        return Err(AuthError::Validation(
            "La contraseña debe tener al menos 8 caracteres".into(),
        ));
    }
    if input.nombre_completo.trim().chars().count() < 3 {
        return Err(AuthError::Validation(
            "El nombre completo debe tener al menos 3 caracteres".into(),
        ));
    }
    Ok(())
}

fn validar_editar(input: &AdministradorEditar) -> Result<(), AuthError> {
    if input.nombre_completo.trim().chars().count() < 3 {
        return Err(AuthError::Validation(
            "El nombre completo debe tener al menos 3 caracteres".into(),
        ));
    }
    if let Some(pw) = input.password_nueva() {
        if pw.chars().count() < 8 {
            return Err(AuthError::Validation(
                "La nueva contraseña debe tener al menos 8 caracteres".into(),
            ));
        }
        if input.confirm_password.as_deref() != Some(pw) {
            return Err(AuthError::Validation("Las contraseñas no coinciden".into()));
        }
    }
    Ok(())
}

impl AuthService {
    /// Create an administrator: credential first, then profile, under
    /// the same id. If the profile insert fails the credential is
    /// deleted again so no identity is left that could ever log in
    /// without a profile.
    pub fn create_administrador(
        &self,
        input: AdministradorCrear,
    ) -> Result<PerfilAdministrador, AuthError> {
        validar_crear(&input)?;

        let email = input.email.trim().to_lowercase();
        let now = now_rfc3339();
        let id = new_id();

        let credencial = Credencial {
            id: id.clone(),
            email: email.clone(),
            password_hash: password::hash_password(&input.password)?,
            confirmado: true,
            created_at: now.clone(),
            updated_at: now.clone(),
        };

        self.insert_record(
            "credenciales",
            &credencial.id,
            &credencial,
            &[
                ("email", Value::Text(email.clone())),
                ("confirmado", Value::Integer(1)),
                ("created_at", Value::Text(now.clone())),
                ("updated_at", Value::Text(now.clone())),
            ],
        )
        .map_err(|e| match e {
            AuthError::Conflict(_) => {
                AuthError::Conflict("Ya existe una cuenta con ese correo electrónico".into())
            }
            other => other,
        })?;

        let perfil = PerfilAdministrador {
            id,
            nombre_completo: input.nombre_completo.trim().to_string(),
            email,
            rol: input.rol,
            activo: true,
            ultimo_acceso: None,
            created_at: now.clone(),
            updated_at: now.clone(),
        };

        let insertado = self.insert_record(
            "administradores",
            &perfil.id,
            &perfil,
            &[
                ("email", Value::Text(perfil.email.clone())),
                ("rol", Value::Text(perfil.rol.as_str().to_string())),
                ("activo", Value::Integer(1)),
                ("created_at", Value::Text(now.clone())),
                ("updated_at", Value::Text(now)),
            ],
        );

        if let Err(e) = insertado {
            if let Err(rollback) = self.delete_record("credenciales", &perfil.id) {
                tracing::error!(
                    admin = %perfil.id,
                    error = %rollback,
                    "failed to roll back credential after profile insert error"
                );
            }
            return Err(e);
        }

        Ok(perfil)
    }

    /// Get an administrator profile by id.
    pub fn get_administrador(&self, id: &str) -> Result<PerfilAdministrador, AuthError> {
        self.get_record("administradores", id)
    }

    /// List administrator profiles, newest first.
    pub fn list_administradores(
        &self,
        params: &ListParams,
    ) -> Result<ListResult<PerfilAdministrador>, AuthError> {
        let (items, total) =
            self.list_records("administradores", &[], params.limit, params.offset)?;
        Ok(ListResult { items, total })
    }

    /// Update an administrator's profile fields. Validates the whole
    /// edit form up front, including a password change if one is
    /// requested, so nothing is written on a rejected form. The
    /// password itself is changed separately via [`Self::cambiar_password`].
    ///
    /// Deactivating a profile revokes every session it holds.
    pub fn update_administrador(
        &self,
        id: &str,
        input: &AdministradorEditar,
    ) -> Result<PerfilAdministrador, AuthError> {
        validar_editar(input)?;

        let mut perfil: PerfilAdministrador = self.get_record("administradores", id)?;
        let estaba_activo = perfil.activo;
        let now = now_rfc3339();

        perfil.nombre_completo = input.nombre_completo.trim().to_string();
        perfil.rol = input.rol;
        perfil.activo = input.activo;
        perfil.updated_at = now.clone();

        self.update_record(
            "administradores",
            id,
            &perfil,
            &[
                ("rol", Value::Text(perfil.rol.as_str().to_string())),
                ("activo", Value::Integer(if perfil.activo { 1 } else { 0 })),
                ("updated_at", Value::Text(now)),
            ],
        )?;

        if estaba_activo && !perfil.activo {
            self.revoke_all(id)?;
        }

        Ok(perfil)
    }

    /// Replace an administrator's password. This is an identity
    /// operation on the credential, separate from profile updates.
    pub fn cambiar_password(&self, id: &str, new_password: &str) -> Result<(), AuthError> {
        if new_password.chars().count() < 8 {
            return Err(AuthError::Validation(
                "La nueva contraseña debe tener al menos 8 caracteres".into(),
            ));
        }

        let mut credencial: Credencial = self.get_record("credenciales", id)?;
        credencial.password_hash = password::hash_password(new_password)?;
        credencial.updated_at = now_rfc3339();

        self.update_record(
            "credenciales",
            id,
            &credencial,
            &[("updated_at", Value::Text(credencial.updated_at.clone()))],
        )?;

        Ok(())
    }

    /// Delete an administrator. Profile, credential and sessions go
    /// together, and watchers of any of their sessions are told.
    pub fn delete_administrador(&self, id: &str) -> Result<(), AuthError> {
        // Surface NotFound before touching anything.
        let _: PerfilAdministrador = self.get_record("administradores", id)?;

        self.sql
            .exec(
                "DELETE FROM sesiones WHERE admin_id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        // A half-created pair may have no credential; that is fine.
        match self.delete_record("credenciales", id) {
            Ok(()) | Err(AuthError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        self.delete_record("administradores", id)?;

        self.publish(AuthEvent::SignedOut {
            admin_id: id.to_string(),
            session_id: None,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use panel_core::ListParams;
    use panel_sql::sqlite::SqliteStore;
    use panel_sql::{Row, SQLError, SQLStore, Value};

    use crate::model::{AdministradorCrear, AdministradorEditar, AppRole};
    use crate::service::{AuthConfig, AuthError, AuthService};

    fn test_service() -> std::sync::Arc<AuthService> {
        let sql = std::sync::Arc::new(SqliteStore::open_in_memory().unwrap());
        AuthService::new(sql, AuthConfig::default()).unwrap()
    }

    fn crear(email: &str, nombre: &str) -> AdministradorCrear {
        AdministradorCrear {
            email: email.to_string(),
            password: "secreta123".to_string(),
            nombre_completo: nombre.to_string(),
            rol: AppRole::Editor,
        }
    }

    #[test]
    fn test_administrador_crud() {
        let svc = test_service();

        let perfil = svc.create_administrador(crear("ana@fcyt.edu.bo", "Ana Rojas")).unwrap();
        assert_eq!(perfil.nombre_completo, "Ana Rojas");
        assert!(perfil.activo);
        assert!(perfil.ultimo_acceso.is_none());

        let fetched = svc.get_administrador(&perfil.id).unwrap();
        assert_eq!(fetched.email, "ana@fcyt.edu.bo");

        let updated = svc
            .update_administrador(
                &perfil.id,
                &AdministradorEditar {
                    nombre_completo: "Ana R. Quispe".to_string(),
                    rol: AppRole::Admin,
                    activo: true,
                    new_password: None,
                    confirm_password: None,
                },
            )
            .unwrap();
        assert_eq!(updated.nombre_completo, "Ana R. Quispe");
        assert_eq!(updated.rol, AppRole::Admin);
        assert_eq!(updated.created_at, perfil.created_at);

        let list = svc.list_administradores(&ListParams::default()).unwrap();
        assert_eq!(list.total, 1);

        svc.delete_administrador(&perfil.id).unwrap();
        assert!(svc.get_administrador(&perfil.id).is_err());
    }

    #[test]
    fn test_create_validations_in_order() {
        let svc = test_service();

        let mut input = crear("no-es-email", "Ana Rojas");
        let err = svc.create_administrador(input.clone()).unwrap_err();
        assert_eq!(err.to_string(), "Email inválido");

        input.email = "ana@fcyt.edu.bo".to_string();
        input.password = "corta".to_string();
        let err = svc.create_administrador(input.clone()).unwrap_err();
        assert_eq!(err.to_string(), "La contraseña debe tener al menos 8 caracteres");

        input.password = "secreta123".to_string();
        input.nombre_completo = "An".to_string();
        let err = svc.create_administrador(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "El nombre completo debe tener al menos 3 caracteres"
        );
    }

    #[test]
    fn test_create_duplicate_email() {
        let svc = test_service();
        svc.create_administrador(crear("ana@fcyt.edu.bo", "Ana Rojas")).unwrap();

        let err = svc
            .create_administrador(crear("ana@fcyt.edu.bo", "Otra Ana"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));
    }

    #[test]
    fn test_create_rolls_back_credential_on_profile_conflict() {
        let svc = test_service();

        // Occupy the profile email without a matching credential, so
        // the credential insert succeeds and the profile insert hits
        // the unique email index.
        svc.sql
            .exec(
                "INSERT INTO administradores (id, email, rol, activo, data, created_at, updated_at)
                 VALUES (?1, ?2, 'editor', 1, '{}', ?3, ?3)",
                &[
                    Value::Text("ocupado".into()),
                    Value::Text("dup@fcyt.edu.bo".into()),
                    Value::Text("2025-01-01T00:00:00Z".into()),
                ],
            )
            .unwrap();

        let err = svc
            .create_administrador(crear("dup@fcyt.edu.bo", "Ana Rojas"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));

        // The credential was rolled back; that email cannot sign in.
        let credencial = svc.credencial_por_email("dup@fcyt.edu.bo").unwrap();
        assert!(credencial.is_none());
    }

    /// Store wrapper that refuses credential deletes, to drive the
    /// rollback itself into failure.
    struct VetoCredentialDeletes(SqliteStore);

    impl SQLStore for VetoCredentialDeletes {
        fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
            self.0.query(sql, params)
        }

        fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
            if sql.starts_with("DELETE FROM credenciales") {
                return Err(SQLError::Execution("disk I/O error".into()));
            }
            self.0.exec(sql, params)
        }

        fn exec_many(&self, sql: &str, param_sets: &[Vec<Value>]) -> Result<u64, SQLError> {
            self.0.exec_many(sql, param_sets)
        }
    }

    #[test]
    fn test_failed_rollback_still_surfaces_original_error() {
        let sql = std::sync::Arc::new(VetoCredentialDeletes(
            SqliteStore::open_in_memory().unwrap(),
        ));
        let svc = AuthService::new(sql, AuthConfig::default()).unwrap();

        svc.sql
            .exec(
                "INSERT INTO administradores (id, email, rol, activo, data, created_at, updated_at)
                 VALUES (?1, ?2, 'editor', 1, '{}', ?3, ?3)",
                &[
                    Value::Text("ocupado".into()),
                    Value::Text("dup@fcyt.edu.bo".into()),
                    Value::Text("2025-01-01T00:00:00Z".into()),
                ],
            )
            .unwrap();

        // The profile insert conflicts AND the rollback delete fails;
        // the caller still sees the conflict, not the rollback failure.
        let err = svc
            .create_administrador(crear("dup@fcyt.edu.bo", "Ana Rojas"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));

        // The orphaned credential is left behind for cleanup.
        let credencial = svc.credencial_por_email("dup@fcyt.edu.bo").unwrap();
        assert!(credencial.is_some());
    }

    #[test]
    fn test_edit_password_validations() {
        let svc = test_service();
        let perfil = svc.create_administrador(crear("ana@fcyt.edu.bo", "Ana Rojas")).unwrap();

        let mut input = AdministradorEditar {
            nombre_completo: "Ana Rojas".to_string(),
            rol: AppRole::Editor,
            activo: true,
            new_password: Some("corta".to_string()),
            confirm_password: Some("corta".to_string()),
        };
        let err = svc.update_administrador(&perfil.id, &input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "La nueva contraseña debe tener al menos 8 caracteres"
        );

        input.new_password = Some("nueva-secreta".to_string());
        input.confirm_password = Some("otra-cosa".to_string());
        let err = svc.update_administrador(&perfil.id, &input).unwrap_err();
        assert_eq!(err.to_string(), "Las contraseñas no coinciden");

        // Blank password fields mean "leave it alone".
        input.new_password = Some(String::new());
        input.confirm_password = Some(String::new());
        assert!(svc.update_administrador(&perfil.id, &input).is_ok());
    }

    #[test]
    fn test_cambiar_password_changes_login() {
        let svc = test_service();
        let perfil = svc.create_administrador(crear("ana@fcyt.edu.bo", "Ana Rojas")).unwrap();

        svc.cambiar_password(&perfil.id, "nueva-secreta").unwrap();

        let err = svc.login("ana@fcyt.edu.bo", "secreta123").unwrap_err();
        assert!(matches!(err, AuthError::CredencialesInvalidas));
        assert!(svc.login("ana@fcyt.edu.bo", "nueva-secreta").is_ok());
    }

    #[test]
    fn test_deactivation_revokes_sessions() {
        let svc = test_service();
        let perfil = svc.create_administrador(crear("ana@fcyt.edu.bo", "Ana Rojas")).unwrap();

        let (tokens, _) = svc.login("ana@fcyt.edu.bo", "secreta123").unwrap();
        assert!(svc.verify_token(&tokens.access_token).is_ok());

        svc.update_administrador(
            &perfil.id,
            &AdministradorEditar {
                nombre_completo: "Ana Rojas".to_string(),
                rol: AppRole::Editor,
                activo: false,
                new_password: None,
                confirm_password: None,
            },
        )
        .unwrap();

        assert!(svc.verify_token(&tokens.access_token).is_err());
    }

    #[test]
    fn test_delete_removes_credential_and_sessions() {
        let svc = test_service();
        let perfil = svc.create_administrador(crear("ana@fcyt.edu.bo", "Ana Rojas")).unwrap();

        let (tokens, _) = svc.login("ana@fcyt.edu.bo", "secreta123").unwrap();
        svc.delete_administrador(&perfil.id).unwrap();

        assert!(svc.verify_token(&tokens.access_token).is_err());
        let err = svc.login("ana@fcyt.edu.bo", "secreta123").unwrap_err();
        assert!(matches!(err, AuthError::CredencialesInvalidas));
    }
}
