use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskQuery},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Retrieves a page of the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): exact-match filter on the status string.
/// - `page` (optional): 1-based page number, default 1.
/// - `limit` (optional): page size, default 5.
///
/// Results are ordered ascending by due date; the response is a plain array
/// with no total count or has-more indicator.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized` / `403 Forbidden`: raised by the guard.
/// - `500 Internal Server Error`: store failure.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = Task::list(&**pool, user.id, &query_params).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The body is taken as-is: `title`, `due_date` and `status` must be present
/// (typed deserialization enforces that much), `description` may be null or
/// absent. The owner is always the authenticated identity, never a
/// caller-supplied id.
///
/// ## Responses:
/// - `201 Created`: empty body.
/// - `401 Unauthorized` / `403 Forbidden`: raised by the guard.
/// - `500 Internal Server Error`: store failure.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    Task::insert(&**pool, user.id, &task_data).await?;

    Ok(HttpResponse::Created().finish())
}

/// Fully replaces a task the authenticated user owns.
///
/// A single statement matches on both the task id and the owner, so an id
/// belonging to another user and a nonexistent id produce the same 404 —
/// ownership cannot be probed through this endpoint.
///
/// ## Responses:
/// - `204 No Content`: the row was replaced.
/// - `404 Not Found`: no row matched for this owner.
/// - `401 Unauthorized` / `403 Forbidden`: raised by the guard.
/// - `500 Internal Server Error`: store failure.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let matched = Task::update(&**pool, user.id, task_id.into_inner(), &task_data).await?;

    if !matched {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Permanently deletes a task the authenticated user owns.
///
/// Same ownership-scoped matching as update; deleting an already-deleted row
/// answers 404 like any other miss.
///
/// ## Responses:
/// - `204 No Content`: the row was deleted.
/// - `404 Not Found`: no row matched for this owner.
/// - `401 Unauthorized` / `403 Forbidden`: raised by the guard.
/// - `500 Internal Server Error`: store failure.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let matched = Task::delete(&**pool, user.id, task_id.into_inner()).await?;

    if !matched {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
