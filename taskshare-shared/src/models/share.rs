/// List share model
///
/// # Database Schema
///
/// ```sql
/// CREATE TABLE list_shares (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     list_id UUID NOT NULL REFERENCES task_lists(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT list_shares_list_id_user_id_key UNIQUE (list_id, user_id)
/// );
/// ```
///
/// A share grants read access and task/comment rights on one list. The
/// unique constraint makes duplicate shares a database-level conflict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A grant of access to a list for one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListShare {
    pub id: Uuid,
    pub list_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a share
#[derive(Debug, Clone)]
pub struct CreateShare {
    pub list_id: Uuid,
    pub user_id: Uuid,
}

/// A share with the recipient's display info attached
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShareWithUser {
    pub id: Uuid,
    pub list_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl ListShare {
    /// Creates a share
    ///
    /// Fails with a unique-constraint violation if the list is already
    /// shared with this user.
    pub async fn create(pool: &PgPool, params: CreateShare) -> Result<ListShare, sqlx::Error> {
        sqlx::query_as::<_, ListShare>(
            r#"
            INSERT INTO list_shares (list_id, user_id)
            VALUES ($1, $2)
            RETURNING id, list_id, user_id, created_at
            "#,
        )
        .bind(params.list_id)
        .bind(params.user_id)
        .fetch_one(pool)
        .await
    }

    /// Revokes a share, returning true if one existed
    pub async fn delete(pool: &PgPool, list_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_shares WHERE list_id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns every share on a list with recipient info, oldest first
    pub async fn list_for_list(
        pool: &PgPool,
        list_id: Uuid,
    ) -> Result<Vec<ShareWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ShareWithUser>(
            r#"
            SELECT
                s.id, s.list_id, s.user_id,
                u.name AS user_name,
                u.email AS user_email,
                s.created_at
            FROM list_shares s
            JOIN users u ON u.id = s.user_id
            WHERE s.list_id = $1
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_with_user_serialization() {
        let share = ShareWithUser {
            id: Uuid::new_v4(),
            list_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Bob".to_string(),
            user_email: "bob@example.com".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&share).expect("Serialization should succeed");
        assert_eq!(json["user_name"], "Bob");
        assert_eq!(json["user_email"], "bob@example.com");
    }
}
