//!
//! # Authentication Service
//!
//! Credential validation, registration, and session issuance, plus the JWT and
//! password primitives and the actix plumbing (middleware, extractor) that
//! attach a verified identity to each request.

pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{PublicUser, RegisterRequest, User};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Response after successful authentication (login or registration).
/// Carries the JWT and the user representation with the password hash stripped.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: PublicUser,
}

/// Looks up a user by email and verifies the password against the stored hash.
///
/// Returns `Ok(None)` both when the email is unknown and when the password is
/// wrong, so the two cases are indistinguishable to the caller.
pub async fn validate_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, role, created_at, updated_at \
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) if verify_password(password, &user.password_hash)? => Ok(Some(user)),
        _ => Ok(None),
    }
}

/// Registers a new user and opens a session for it.
///
/// Fails with `AppError::Conflict` when the email is already taken. The
/// pre-check gives the common case a clean 409; a registration race slipping
/// past it is caught by the `users.email` unique constraint, which maps to the
/// same Conflict error.
pub async fn register(pool: &PgPool, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
    let existing = sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&request.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
         RETURNING id, email, password_hash, role, created_at, updated_at",
    )
    .bind(&request.email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await?;

    log::info!("registered user {}", user.id);

    issue_session(user)
}

/// Builds a signed token for the user and returns it alongside the public
/// user representation. Stateless: no session record is stored.
pub fn issue_session(user: User) -> Result<AuthResponse, AppError> {
    let access_token = generate_token(&user)?;
    Ok(AuthResponse {
        access_token,
        user: user.into(),
    })
}
