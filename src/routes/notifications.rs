use crate::{auth::AuthenticatedUser, error::AppError, models::Task};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Upcoming-deadline query.
///
/// Returns every task of the authenticated user whose due date falls within
/// the closed interval `[today, today + 2 days]`, both bounds inclusive,
/// evaluated against the store's current date at query time. The full
/// matching set is returned without pagination.
#[get("/notifications")]
pub async fn upcoming(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = Task::due_soon(&**pool, user.id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}
