/// Task model
///
/// # Database Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(200) NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     position INTEGER NOT NULL DEFAULT 0,
///     list_id UUID NOT NULL REFERENCES task_lists(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Tasks are ordered by `position` within their list; `created_at` breaks
/// ties for tasks created before their first reorder. Reordering rewrites
/// every position in one transaction so a failure partway through never
/// leaves a list half-shuffled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A task within a list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub position: i32,
    pub list_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub list_id: Uuid,
}

/// A task as it appears in the list view, with its comment count
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskOverview {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub position: i32,
    pub list_id: Uuid,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task at the end of its list
    ///
    /// The new position is one past the current maximum, or 0 for an
    /// empty list.
    pub async fn create(pool: &PgPool, params: CreateTask) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, list_id, position)
            VALUES (
                $1, $2,
                COALESCE((SELECT MAX(position) + 1 FROM tasks WHERE list_id = $2), 0)
            )
            RETURNING id, title, completed, position, list_id, created_at, updated_at
            "#,
        )
        .bind(&params.title)
        .bind(params.list_id)
        .fetch_one(pool)
        .await
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, completed, position, list_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Updates a task's title, returning the updated row
    pub async fn update_title(
        pool: &PgPool,
        id: Uuid,
        title: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, completed, position, list_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(pool)
        .await
    }

    /// Flips a task's completed flag, returning the updated row
    pub async fn toggle_completed(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = NOT completed, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, completed, position, list_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a task, returning true if a row was deleted
    ///
    /// Cascades to the task's comments.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns a list's tasks in display order with comment counts
    pub async fn list_for_list(
        pool: &PgPool,
        list_id: Uuid,
    ) -> Result<Vec<TaskOverview>, sqlx::Error> {
        sqlx::query_as::<_, TaskOverview>(
            r#"
            SELECT
                t.id, t.title, t.completed, t.position, t.list_id,
                (SELECT COUNT(*) FROM comments c WHERE c.task_id = t.id) AS comment_count,
                t.created_at, t.updated_at
            FROM tasks t
            WHERE t.list_id = $1
            ORDER BY t.position ASC, t.created_at ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(pool)
        .await
    }

    /// Rewrites task positions for a list in a single transaction
    ///
    /// `task_ids[i]` is assigned position `i`. Updates are scoped to
    /// `list_id`, so ids belonging to other lists are silently skipped
    /// rather than moved. Either every update commits or none do.
    pub async fn reorder(
        pool: &PgPool,
        list_id: Uuid,
        task_ids: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, task_id) in task_ids.iter().enumerate() {
            sqlx::query(
                r#"
                UPDATE tasks
                SET position = $1, updated_at = NOW()
                WHERE id = $2 AND list_id = $3
                "#,
            )
            .bind(position as i32)
            .bind(task_id)
            .bind(list_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_overview_serialization() {
        let task = TaskOverview {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            completed: false,
            position: 0,
            list_id: Uuid::new_v4(),
            comment_count: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&task).expect("Serialization should succeed");
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["comment_count"], 2);
    }
}
