/// Comment model
///
/// # Database Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content VARCHAR(500) NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Comments are immutable once posted; there is no edit or delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A comment on a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub content: String,
    pub task_id: Uuid,
    pub user_id: Uuid,
}

/// A comment with its author's display info
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Posts a comment on a task
    pub async fn create(pool: &PgPool, params: CreateComment) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, task_id, user_id, created_at
            "#,
        )
        .bind(&params.content)
        .bind(params.task_id)
        .bind(params.user_id)
        .fetch_one(pool)
        .await
    }

    /// Returns a task's comments with author info, oldest first
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT
                c.id, c.content, c.task_id, c.user_id,
                u.name AS user_name,
                u.email AS user_email,
                c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.task_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_with_author_serialization() {
        let comment = CommentWithAuthor {
            id: Uuid::new_v4(),
            content: "Looks good".to_string(),
            task_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Carol".to_string(),
            user_email: "carol@example.com".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&comment).expect("Serialization should succeed");
        assert_eq!(json["content"], "Looks good");
        assert_eq!(json["user_name"], "Carol");
    }
}
