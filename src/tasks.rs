//!
//! # Task Service
//!
//! Ownership/role visibility, filtered + paginated query construction, and
//! CRUD with authorization checks. The policy is uniform across
//! `find_authorized`/`update`/`remove`: ownership OR the admin role grants
//! access; a nonexistent id is NotFound for every caller, so existence is not
//! leaked differently by role.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskPage, TaskPatch, TaskQuery, TaskStatus, UserRole};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Creates a task owned by `owner_id`. Status defaults to `todo` when the
/// input leaves it unset. Any authenticated identity may create a task for
/// itself, so there is no authorization check here.
pub async fn create(pool: &PgPool, input: TaskInput, owner_id: Uuid) -> Result<Task, AppError> {
    let status = input.status.unwrap_or(TaskStatus::Todo);

    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, status, due_date, user_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, title, description, status, due_date, user_id, created_at, updated_at",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(status)
    .bind(input.due_date)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    log::info!("user {} created task {}", owner_id, task.id);

    Ok(task)
}

/// Lists tasks visible to `identity`, newest first.
///
/// Non-admin identities only ever see their own rows; admins see everything.
/// The optional status filter narrows further. `total` counts all rows
/// matching the filter, ignoring pagination, so callers can page through the
/// full result set. The `created_at DESC` ordering is part of the contract.
pub async fn list(
    pool: &PgPool,
    query: &TaskQuery,
    identity: &AuthenticatedUser,
) -> Result<TaskPage, AppError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = (page - 1) * limit;

    // Visibility is decided here, as data: admins get no ownership condition.
    let mut conditions: Vec<String> = Vec::new();
    let mut param_count = 1;

    if identity.role != UserRole::Admin {
        conditions.push(format!("user_id = ${}", param_count));
        param_count += 1;
    }
    if query.status.is_some() {
        conditions.push(format!("status = ${}", param_count));
        param_count += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM tasks{}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if identity.role != UserRole::Admin {
        count_query = count_query.bind(identity.id);
    }
    if let Some(status) = query.status {
        count_query = count_query.bind(status);
    }
    let total = count_query.fetch_one(pool).await?;

    let select_sql = format!(
        "SELECT id, title, description, status, due_date, user_id, created_at, updated_at \
         FROM tasks{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
        where_clause,
        param_count,
        param_count + 1
    );
    let mut select_query = sqlx::query_as::<_, Task>(&select_sql);
    if identity.role != UserRole::Admin {
        select_query = select_query.bind(identity.id);
    }
    if let Some(status) = query.status {
        select_query = select_query.bind(status);
    }
    let tasks = select_query.bind(limit).bind(offset).fetch_all(pool).await?;

    Ok(TaskPage {
        tasks,
        total,
        page,
        limit,
    })
}

/// Fetches a task and checks that `identity` may act on it.
///
/// NotFound when no task with that id exists, regardless of the caller's
/// role. Forbidden when the task exists but the caller is neither its owner
/// nor an admin. All read/mutate paths go through this helper so the policy
/// cannot drift between them.
pub async fn find_authorized(
    pool: &PgPool,
    id: Uuid,
    identity: &AuthenticatedUser,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, due_date, user_id, created_at, updated_at \
         FROM tasks WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let task = match task {
        Some(task) => task,
        None => return Err(AppError::NotFound(format!("Task with ID {} not found", id))),
    };

    if identity.role != UserRole::Admin && task.user_id != identity.id {
        return Err(AppError::Forbidden(
            "You do not have permission to view this task".into(),
        ));
    }

    Ok(task)
}

/// Merges the provided patch fields onto the stored task and persists the
/// result. Fields absent from the patch are left unchanged; a provided due
/// date replaces the stored value. The owner reference is immutable.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: TaskPatch,
    identity: &AuthenticatedUser,
) -> Result<Task, AppError> {
    let task = find_authorized(pool, id, identity).await?;

    // Ownership is re-verified here even though find_authorized already
    // checked it; keep both checks in sync.
    if identity.role != UserRole::Admin && task.user_id != identity.id {
        return Err(AppError::Forbidden(
            "You do not have permission to update this task".into(),
        ));
    }

    let title = patch.title.unwrap_or(task.title);
    let description = patch.description.or(task.description);
    let status = patch.status.unwrap_or(task.status);
    let due_date = patch.due_date.or(task.due_date);

    let updated = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET title = $1, description = $2, status = $3, due_date = $4, \
         updated_at = now() WHERE id = $5 \
         RETURNING id, title, description, status, due_date, user_id, created_at, updated_at",
    )
    .bind(&title)
    .bind(&description)
    .bind(status)
    .bind(due_date)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Deletes a task, with the same existence/authorization semantics as
/// `find_authorized`.
pub async fn remove(pool: &PgPool, id: Uuid, identity: &AuthenticatedUser) -> Result<(), AppError> {
    let task = find_authorized(pool, id, identity).await?;

    // Ownership is re-verified here even though find_authorized already
    // checked it; keep both checks in sync.
    if identity.role != UserRole::Admin && task.user_id != identity.id {
        return Err(AppError::Forbidden(
            "You do not have permission to delete this task".into(),
        ));
    }

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    log::info!("user {} deleted task {}", identity.id, id);

    Ok(())
}
