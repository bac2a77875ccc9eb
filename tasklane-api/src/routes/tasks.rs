/// Task endpoints, all ownership-scoped
///
/// # Endpoints
///
/// - `GET /api/tasks` - List the caller's tasks (filter, search, sort, page)
/// - `POST /api/tasks` - Create a task owned by the caller
/// - `PUT /api/tasks/:id` - Partially update one of the caller's tasks
/// - `DELETE /api/tasks/:id` - Delete one of the caller's tasks
///
/// The authenticated identity arrives via the request extension installed by
/// the bearer auth layer. Ownership is enforced in the queries themselves,
/// never by a handler-level comparison, and a task belonging to another user
/// answers exactly like a task that does not exist.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::{created, ok},
    routes::collect_validation_errors,
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use tasklane_shared::{
    auth::guard::AuthUser,
    models::{
        query::{ListParams, Pagination, TaskQuery},
        task::{CreateTask, Task, TaskStatus, UpdateTask},
    },
};
use validator::Validate;

const MAX_DESCRIPTION_LEN: usize = 5000;

/// Create request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title (required, non-empty)
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,

    /// Optional description; empty strings normalize to no description
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// Initial status; defaults to pending when absent
    pub status: Option<TaskStatus>,
}

/// Update request
///
/// Every field is optional. `description` distinguishes "absent" from
/// "explicitly null": absent leaves the stored value untouched, null (or an
/// empty string) clears it.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,

    /// New description; null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,
}

/// Deserializes a field where JSON null must stay distinguishable from an
/// absent key
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Listing response payload
#[derive(Debug, Serialize)]
pub struct TaskListData {
    /// The page of tasks
    pub tasks: Vec<Task>,

    /// Pagination metadata for the full result set
    pub pagination: Pagination,
}

/// Single-task response payload
#[derive(Debug, Serialize)]
pub struct TaskData {
    /// The affected task
    pub task: Task,
}

/// Lists the caller's tasks
///
/// Unknown filter or sort values degrade to defaults rather than failing,
/// so the listing never 400s on query parameters.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListParams>,
) -> ApiResult<Response> {
    let plan = TaskQuery::build(user.user_id, &params);

    let (tasks, total) = tokio::try_join!(
        Task::list(&state.db, &plan),
        Task::count(&state.db, &plan)
    )?;

    let pagination = Pagination::new(&plan, total);

    Ok(ok(
        TaskListData { tasks, pagination },
        "Tasks retrieved successfully",
    )
    .into_response())
}

/// Creates a task owned by the caller
///
/// The owner is the authenticated identity; nothing in the payload can set
/// or change it.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Response> {
    req.validate().map_err(collect_validation_errors)?;
    let title = validated_title(&req.title)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: user.user_id,
            title,
            description: normalize_description(req.description),
            status: req.status.unwrap_or(TaskStatus::Pending),
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, task_id = task.id, "Task created");

    Ok(created(TaskData { task }, "Task created successfully").into_response())
}

/// Partially updates one of the caller's tasks
///
/// # Errors
///
/// - `400 Bad Request`: invalid id or field values
/// - `404 Not Found`: no such task owned by the caller
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Response> {
    let id = parse_task_id(&id)?;
    req.validate().map_err(collect_validation_errors)?;

    if let Some(Some(ref description)) = req.description {
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(ApiError::Validation(vec![
                "Description must be at most 5000 characters".to_string(),
            ]));
        }
    }

    let patch = UpdateTask {
        title: req
            .title
            .as_deref()
            .map(validated_title)
            .transpose()?,
        description: req.description.map(normalize_description),
        status: req.status,
    };

    // Guarded read first, so a missing or foreign task 404s before any
    // write is attempted; update_owned re-checks ownership in its WHERE
    Task::find_by_id_and_owner(&state.db, id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let task = Task::update_owned(&state.db, id, user.user_id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!(user_id = user.user_id, task_id = task.id, "Task updated");

    Ok(ok(TaskData { task }, "Task updated successfully").into_response())
}

/// Deletes one of the caller's tasks
///
/// # Errors
///
/// - `400 Bad Request`: invalid id
/// - `404 Not Found`: no such task owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_task_id(&id)?;

    let task = Task::delete_owned(&state.db, id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!(user_id = user.user_id, task_id = task.id, "Task deleted");

    Ok(ok(TaskData { task }, "Task deleted successfully").into_response())
}

/// Parses the path id; non-numeric ids are a validation failure, not a 404
fn parse_task_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::Validation(vec!["Invalid task id".to_string()]))
}

/// Trims a title and rejects it when nothing remains
///
/// The derive-level length check runs on the raw value, so a whitespace-only
/// title would otherwise pass and store as empty.
fn validated_title(raw: &str) -> Result<String, ApiError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::Validation(vec![
            "Title must be 1 to 255 characters".to_string(),
        ]));
    }
    Ok(title.to_string())
}

/// Collapses empty and whitespace-only descriptions to None
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert!(parse_task_id("abc").is_err());
        assert!(parse_task_id("").is_err());
        assert!(parse_task_id("1.5").is_err());
    }

    #[test]
    fn test_validated_title() {
        assert_eq!(validated_title("Ship it").unwrap(), "Ship it");
        assert_eq!(validated_title("  padded  ").unwrap(), "padded");
        assert!(validated_title("").is_err());
        assert!(validated_title("   ").is_err());
        assert!(validated_title("\t\n").is_err());
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some("".to_string())), None);
        assert_eq!(normalize_description(Some("   ".to_string())), None);
        assert_eq!(
            normalize_description(Some("  notes ".to_string())),
            Some("notes".to_string())
        );
    }

    #[test]
    fn test_update_request_absent_vs_null_description() {
        // Absent key: leave the stored description alone
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(req.description, None);

        // Explicit null: clear it
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(req.description, Some(None));

        // Explicit value: replace it
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"description":"details"}"#).unwrap();
        assert_eq!(req.description, Some(Some("details".to_string())));
    }

    #[test]
    fn test_create_request_status_defaults_to_pending() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title":"Ship it"}"#).unwrap();
        assert_eq!(req.status, None);
        assert_eq!(req.status.unwrap_or(TaskStatus::Pending), TaskStatus::Pending);
    }

    #[test]
    fn test_create_request_rejects_empty_title() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
