/// Task model, ownership-scoped database operations
///
/// Every read, update, and delete here is filtered by the owning user id. A
/// task that exists but belongs to another user is indistinguishable from a
/// nonexistent one at this layer, so nothing about foreign records leaks
/// through the fetch path.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::query::{StatusFilter, TaskQuery};

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parses a wire string; unknown values yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Task record owned by exactly one user
///
/// `user_id` never changes after creation; the store enforces the foreign
/// key to the owning user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique numeric task id
    pub id: i64,

    /// Owning user id
    pub user_id: i64,

    /// Title (1..255 chars, validated at the request layer)
    pub title: String,

    /// Optional description; None is the single canonical "no description"
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user id
    pub user_id: i64,

    /// Title
    pub title: String,

    /// Optional description (empty normalizes to None before this point)
    pub description: Option<String>,

    /// Initial status
    pub status: TaskStatus,
}

/// Patch for updating a task
///
/// Only fields present in the patch are changed. `description` uses a double
/// `Option`: `None` leaves it untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description (use `Some(None)` to clear)
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,
}

const TASK_COLUMNS: &str = "id, user_id, title, description, status, created_at, updated_at";

impl Task {
    /// Creates a new task owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id, filtered by owner
    ///
    /// Returns `None` both when the task does not exist and when it belongs
    /// to another user.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a patch to a task, re-checking ownership in the same statement
    ///
    /// The ownership filter sits in the WHERE clause of the UPDATE itself, so
    /// the check immediately precedes the mutation. Returns `None` when no
    /// owned row matched.
    pub async fn update_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        patch: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if patch.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if patch.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if patch.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(&format!(
            " WHERE id = $1 AND user_id = $2 RETURNING {}",
            TASK_COLUMNS
        ));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(owner_id);

        if let Some(title) = patch.title {
            q = q.bind(title);
        }
        if let Some(description) = patch.description {
            q = q.bind(description);
        }
        if let Some(status) = patch.status {
            q = q.bind(status);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task after the same ownership re-check
    ///
    /// Returns the deleted row, or `None` when no owned row matched.
    pub async fn delete_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks according to a resolved query plan
    ///
    /// The owner predicate comes first; status and search predicates follow
    /// only when the plan carries them. Search matches title OR description
    /// with ILIKE.
    pub async fn list(pool: &PgPool, plan: &TaskQuery) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
        let mut bind_count = 1;

        if matches!(plan.status, StatusFilter::Only(_)) {
            bind_count += 1;
            query.push_str(&format!(" AND status = ${}", bind_count));
        }
        if plan.search.is_some() {
            bind_count += 1;
            query.push_str(&format!(
                " AND (title ILIKE ${b} OR description ILIKE ${b})",
                b = bind_count
            ));
        }

        query.push_str(&format!(
            " ORDER BY {} {} LIMIT ${} OFFSET ${}",
            plan.sort.column(),
            plan.order.as_sql(),
            bind_count + 1,
            bind_count + 2
        ));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(plan.owner_id);

        if let StatusFilter::Only(status) = plan.status {
            q = q.bind(status);
        }
        if let Some(ref search) = plan.search {
            q = q.bind(format!("%{}%", search));
        }
        q = q.bind(plan.limit).bind(plan.offset());

        let tasks = q.fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Counts tasks matching the plan's filter predicates
    ///
    /// Shares the WHERE clause with [`Task::list`] but ignores sort and
    /// pagination; used to compute total pages.
    pub async fn count(pool: &PgPool, plan: &TaskQuery) -> Result<i64, sqlx::Error> {
        let mut query = String::from("SELECT COUNT(*) FROM tasks WHERE user_id = $1");
        let mut bind_count = 1;

        if matches!(plan.status, StatusFilter::Only(_)) {
            bind_count += 1;
            query.push_str(&format!(" AND status = ${}", bind_count));
        }
        if plan.search.is_some() {
            bind_count += 1;
            query.push_str(&format!(
                " AND (title ILIKE ${b} OR description ILIKE ${b})",
                b = bind_count
            ));
        }

        let mut q = sqlx::query_as::<_, (i64,)>(&query).bind(plan.owner_id);

        if let StatusFilter::Only(status) = plan.status {
            q = q.bind(status);
        }
        if let Some(ref search) = plan.search {
            q = q.bind(format!("%{}%", search));
        }

        let (count,) = q.fetch_one(pool).await?;

        Ok(count)
    }
}
