//! PostgreSQL Repository Implementation

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{Email, PrincipalId, Role, Username};
use crate::error::{AuthError, AuthResult};
use platform::password::HashedPassword;

/// PostgreSQL-backed principal repository
#[derive(Clone)]
pub struct PgPrincipalRepository {
    pool: PgPool,
}

impl PgPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PrincipalRepository for PgPrincipalRepository {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO principals (
                principal_id,
                username,
                username_canonical,
                email,
                password_hash,
                roles,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(principal.principal_id.as_uuid())
        .bind(principal.username.original())
        .bind(principal.username.canonical())
        .bind(principal.email.as_ref().map(|e| e.as_str()))
        .bind(principal.password_hash.as_phc_string())
        .bind(principal.role_codes())
        .bind(principal.created_at)
        .bind(principal.updated_at)
        .execute(&self.pool)
        .await;

        // The unique indexes are the real uniqueness enforcers; the
        // advisory pre-checks in the use case can lose a race here.
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(map_unique_violation(e)),
        }
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Principal>> {
        let row = sqlx::query(
            r#"
            SELECT principal_id, username, email, password_hash, roles,
                   created_at, updated_at
            FROM principals
            WHERE username_canonical = $1
            "#,
        )
        .bind(username.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_principal).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM principals WHERE username_canonical = $1)",
        )
        .bind(username.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM principals WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

/// Map a unique-constraint violation to the taken-variant it represents
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some(c) if c.contains("email") => AuthError::EmailTaken,
                _ => AuthError::UsernameTaken,
            };
        }
    }
    AuthError::Database(err)
}

fn row_to_principal(row: PgRow) -> AuthResult<Principal> {
    let principal_id: Uuid = row.try_get("principal_id")?;
    let username: String = row.try_get("username")?;
    let email: Option<String> = row.try_get("email")?;
    let password_hash: String = row.try_get("password_hash")?;
    let roles: Vec<String> = row.try_get("roles")?;

    let password_hash = HashedPassword::from_phc_string(password_hash)
        .map_err(|e| AuthError::Internal(format!("Corrupt password hash: {e}")))?;

    let roles: Vec<Role> = roles
        .iter()
        .filter_map(|code| Role::from_code(code))
        .collect();

    Ok(Principal {
        principal_id: PrincipalId::from_uuid(principal_id),
        username: Username::from_db(&username),
        email: email.map(Email::from_db),
        password_hash,
        roles,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
