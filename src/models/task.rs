use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 5;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task, generated by the store.
    pub id: i32,
    /// Identifier of the user who owns the task. Every store operation on
    /// tasks is scoped by this column; rows of other owners are invisible.
    pub user_id: i32,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Calendar date the task is due. No time-of-day semantics.
    pub due_date: NaiveDate,
    /// Open-ended status string (e.g. "pending", "done"). The store accepts
    /// any value; filtering is exact-match.
    pub status: String,
}

/// Input structure for creating or fully replacing a task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub status: String,
}

/// Query parameters for filtering and paginating the task list.
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    /// Exact-match status filter.
    pub status: Option<String>,
    /// 1-based page number, default 1.
    pub page: Option<i64>,
    /// Page size, default 5.
    pub limit: Option<i64>,
}

impl TaskQuery {
    /// Resolved page number. Non-positive values fall back to the default
    /// rather than producing a negative OFFSET.
    pub fn page(&self) -> i64 {
        match self.page {
            Some(page) if page >= 1 => page,
            _ => DEFAULT_PAGE,
        }
    }

    /// Resolved page size. Non-positive values fall back to the default.
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit >= 1 => limit,
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

impl Task {
    /// Retrieves one page of the owner's tasks, ordered ascending by due date.
    ///
    /// The WHERE clause is assembled dynamically: the status condition is only
    /// appended when a filter was supplied. All values are bound parameters.
    pub async fn list(
        pool: &PgPool,
        user_id: i32,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let mut sql = String::from(
            "SELECT id, user_id, title, description, due_date, status \
             FROM tasks WHERE user_id = $1",
        );
        let mut param_count = 2;

        if query.status.is_some() {
            sql.push_str(&format!(" AND status = ${}", param_count));
            param_count += 1;
        }

        sql.push_str(&format!(
            " ORDER BY due_date LIMIT ${} OFFSET ${}",
            param_count,
            param_count + 1
        ));

        let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(user_id);

        if let Some(status) = &query.status {
            query_builder = query_builder.bind(status);
        }
        query_builder = query_builder.bind(query.limit()).bind(query.offset());

        query_builder.fetch_all(pool).await
    }

    /// Inserts a new task owned by `user_id`.
    pub async fn insert(
        pool: &PgPool,
        user_id: i32,
        input: &TaskInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tasks (user_id, title, description, due_date, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.due_date)
        .bind(&input.status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fully replaces the task matching `id` AND `user_id` in one statement.
    ///
    /// Returns `false` when no row matched — the caller cannot tell a
    /// nonexistent id from one owned by another user, by design.
    pub async fn update(
        pool: &PgPool,
        user_id: i32,
        task_id: i32,
        input: &TaskInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, due_date = $3, status = $4 \
             WHERE id = $5 AND user_id = $6",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.due_date)
        .bind(&input.status)
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permanently deletes the task matching `id` AND `user_id`.
    ///
    /// Returns `false` when no row matched, with the same ownership opacity
    /// as [`Task::update`].
    pub async fn delete(pool: &PgPool, user_id: i32, task_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns all of the owner's tasks due within the closed interval
    /// `[CURRENT_DATE, CURRENT_DATE + 2 days]`, evaluated on the store's clock.
    pub async fn due_soon(pool: &PgPool, user_id: i32) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, due_date, status \
             FROM tasks \
             WHERE user_id = $1 \
             AND due_date BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '2 days'",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
