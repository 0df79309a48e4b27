use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskPatch, TaskQuery},
    tasks,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves a page of tasks visible to the authenticated user.
///
/// Regular users see only their own tasks; admins see tasks across all
/// owners. Supports filtering by `status` and pagination via `page`/`limit`
/// (defaults 1/10). Tasks are ordered by creation date, descending.
///
/// ## Responses:
/// - `200 OK`: `{tasks, total, page, limit}` where `total` ignores pagination.
/// - `400 Bad Request`: If `page` or `limit` is below 1.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    identity: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    query_params.validate()?;

    let page = tasks::list(&pool, &query_params, &identity).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1-200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `dueDate` (optional): ISO 8601 timestamp.
/// - `status` (optional): `todo` | `in_progress` | `done`, defaults to `todo`.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created task.
/// - `400 Bad Request`: If input validation fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    identity: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::create(&pool, task_data.into_inner(), identity.id).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// The authenticated user must own the task or hold the admin role.
///
/// ## Responses:
/// - `200 OK`: Returns the task.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the task exists but belongs to another user.
/// - `404 Not Found`: If no task with the given ID exists.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    identity: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks::find_authorized(&pool, task_id.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task.
///
/// Only fields present in the body are changed; the owner reference never is.
/// Same authorization semantics as `get_task`.
///
/// ## Responses:
/// - `200 OK`: Returns the updated task.
/// - `400 Bad Request`: If input validation fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the task exists but belongs to another user.
/// - `404 Not Found`: If no task with the given ID exists.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskPatch>,
    identity: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::update(&pool, task_id.into_inner(), task_data.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// Same authorization semantics as `get_task`.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the task exists but belongs to another user.
/// - `404 Not Found`: If no task with the given ID exists.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    identity: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks::remove(&pool, task_id.into_inner(), &identity).await?;

    Ok(HttpResponse::NoContent().finish())
}
