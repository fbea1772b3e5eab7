/// Task list model
///
/// # Database Schema
///
/// ```sql
/// CREATE TABLE task_lists (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(100) NOT NULL,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Deleting a list cascades to its tasks, comments, and shares.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A task list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskList {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a list
#[derive(Debug, Clone)]
pub struct CreateList {
    pub title: String,
    pub owner_id: Uuid,
}

/// A list as it appears in the index view
///
/// Carries the owner's display info and a task count so the client can
/// render the overview without extra round trips.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListOverview {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub task_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    /// Creates a new list owned by `owner_id`
    pub async fn create(pool: &PgPool, params: CreateList) -> Result<TaskList, sqlx::Error> {
        sqlx::query_as::<_, TaskList>(
            r#"
            INSERT INTO task_lists (title, owner_id)
            VALUES ($1, $2)
            RETURNING id, title, owner_id, created_at, updated_at
            "#,
        )
        .bind(&params.title)
        .bind(params.owner_id)
        .fetch_one(pool)
        .await
    }

    /// Finds a list by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TaskList>, sqlx::Error> {
        sqlx::query_as::<_, TaskList>(
            r#"
            SELECT id, title, owner_id, created_at, updated_at
            FROM task_lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Updates a list's title, returning the updated row
    ///
    /// Scoped to `owner_id` so a stale caller cannot rename another
    /// user's list; returns `None` when the list is missing or not owned.
    pub async fn update_title(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        title: &str,
    ) -> Result<Option<TaskList>, sqlx::Error> {
        sqlx::query_as::<_, TaskList>(
            r#"
            UPDATE task_lists
            SET title = $3, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a list owned by `owner_id`
    ///
    /// Cascades to tasks, comments, and shares. Returns true if a row
    /// was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_lists WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns the lists owned by `user_id`, newest first
    pub async fn list_owned_by(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ListOverview>, sqlx::Error> {
        sqlx::query_as::<_, ListOverview>(
            r#"
            SELECT
                l.id, l.title, l.owner_id,
                u.name AS owner_name,
                u.email AS owner_email,
                (SELECT COUNT(*) FROM tasks t WHERE t.list_id = l.id) AS task_count,
                l.created_at, l.updated_at
            FROM task_lists l
            JOIN users u ON u.id = l.owner_id
            WHERE l.owner_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Returns the lists shared with `user_id`, newest first
    pub async fn list_shared_with(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ListOverview>, sqlx::Error> {
        sqlx::query_as::<_, ListOverview>(
            r#"
            SELECT
                l.id, l.title, l.owner_id,
                u.name AS owner_name,
                u.email AS owner_email,
                (SELECT COUNT(*) FROM tasks t WHERE t.list_id = l.id) AS task_count,
                l.created_at, l.updated_at
            FROM task_lists l
            JOIN users u ON u.id = l.owner_id
            JOIN list_shares s ON s.list_id = l.id
            WHERE s.user_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_overview_serialization() {
        let overview = ListOverview {
            id: Uuid::new_v4(),
            title: "Groceries".to_string(),
            owner_id: Uuid::new_v4(),
            owner_name: "Alice".to_string(),
            owner_email: "alice@example.com".to_string(),
            task_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&overview).expect("Serialization should succeed");
        assert_eq!(json["title"], "Groceries");
        assert_eq!(json["owner_name"], "Alice");
        assert_eq!(json["task_count"], 3);
    }
}
