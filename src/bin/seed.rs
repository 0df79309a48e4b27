//! Seeds the database with a known admin, a few regular users, and sample
//! tasks. Idempotent: does nothing when users already exist.
//!
//! Usage: `cargo run --bin seed`

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use taskboard::auth::hash_password;
use taskboard::models::{TaskStatus, UserRole};

async fn seed_users(pool: &PgPool) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        log::info!("Users already exist, skipping user seeding");
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users ORDER BY created_at")
            .fetch_all(pool)
            .await?;
        return Ok(ids);
    }

    let users = [
        ("admin@example.com", "Admin123!", UserRole::Admin),
        ("user1@example.com", "User123!", UserRole::User),
        ("user2@example.com", "User123!", UserRole::User),
        ("user3@example.com", "User123!", UserRole::User),
    ];

    let mut ids = Vec::with_capacity(users.len());
    for (email, password, role) in users {
        let password_hash = hash_password(password).map_err(|e| e.to_string())?;
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }

    log::info!("Users seeded successfully");
    Ok(ids)
}

async fn seed_tasks(pool: &PgPool, user_ids: &[Uuid]) -> Result<(), Box<dyn std::error::Error>> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        log::info!("Tasks already exist, skipping task seeding");
        return Ok(());
    }
    if user_ids.is_empty() {
        log::warn!("No users found, please seed users first");
        return Ok(());
    }

    // Tasks are spread across the non-admin users.
    let owners: Vec<Uuid> = if user_ids.len() > 1 {
        user_ids[1..].to_vec()
    } else {
        user_ids.to_vec()
    };

    let tasks = [
        (
            "Setup project environment",
            "Configure development environment and install dependencies",
            TaskStatus::Done,
            "2025-11-20T00:00:00Z",
        ),
        (
            "Implement authentication system",
            "Create login and registration functionality with JWT",
            TaskStatus::Done,
            "2025-11-22T00:00:00Z",
        ),
        (
            "Design database schema",
            "Create entity models and relationships for the application",
            TaskStatus::InProgress,
            "2025-11-25T00:00:00Z",
        ),
        (
            "Implement task CRUD operations",
            "Create endpoints for creating, reading, updating, and deleting tasks",
            TaskStatus::InProgress,
            "2025-11-28T00:00:00Z",
        ),
        (
            "Add input validation",
            "Implement proper validation for all API endpoints",
            TaskStatus::Todo,
            "2025-12-01T00:00:00Z",
        ),
        (
            "Write unit tests",
            "Add comprehensive test coverage for all services and handlers",
            TaskStatus::Todo,
            "2025-12-05T00:00:00Z",
        ),
        (
            "Setup CI/CD pipeline",
            "Configure automated testing and deployment",
            TaskStatus::Todo,
            "2025-12-10T00:00:00Z",
        ),
        (
            "Add API documentation",
            "Document all endpoints",
            TaskStatus::Todo,
            "2025-12-15T00:00:00Z",
        ),
    ];

    for (i, (title, description, status, due_date)) in tasks.iter().enumerate() {
        let owner = owners[i % owners.len()];
        let due_date: chrono::DateTime<chrono::Utc> = due_date.parse()?;
        sqlx::query(
            "INSERT INTO tasks (title, description, status, due_date, user_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(due_date)
        .bind(owner)
        .execute(pool)
        .await?;
    }

    log::info!("Tasks seeded successfully");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_ids = seed_users(&pool).await?;
    seed_tasks(&pool, &user_ids).await?;

    log::info!("All seeds completed successfully");
    Ok(())
}
