use crate::{
    auth,
    error::AppError,
    models::{LoginRequest, RegisterRequest},
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account (default role `user`) and returns an access
/// token alongside the public user representation.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let response = auth::register(&pool, &register_data).await?;

    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Authenticates a user and returns an access token. Unknown email and wrong
/// password produce the same 401.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    match auth::validate_credentials(&pool, &login_data.email, &login_data.password).await? {
        Some(user) => Ok(HttpResponse::Ok().json(auth::issue_session(user)?)),
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
