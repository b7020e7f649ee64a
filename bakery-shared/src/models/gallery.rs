/// Gallery photo model and database operations
///
/// Only metadata lives in the database; `image_path` is the filename of the
/// stored image inside the upload directory. Writing and unlinking that file
/// is done by the caller around these operations.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE gallery (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(100) NOT NULL,
///     description TEXT,
///     image_path VARCHAR(255) NOT NULL,
///     category VARCHAR(50),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Gallery entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,

    /// Filename inside the upload directory
    pub image_path: String,

    /// Free-form tag, e.g. "Wedding", "Birthday"
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a gallery entry
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub title: String,
    pub description: Option<String>,
    pub image_path: String,
    pub category: Option<String>,
}

/// Editable metadata. The image itself is never replaced.
#[derive(Debug, Clone)]
pub struct UpdatePhoto {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Photo {
    pub async fn create(pool: &PgPool, data: CreatePhoto) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO gallery (title, description, image_path, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image_path, category, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.image_path)
        .bind(data.category)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, title, description, image_path, category, created_at
            FROM gallery
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists photos newest first, optionally restricted to one category
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, title, description, image_path, category, created_at
            FROM gallery
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(category)
        .fetch_all(pool)
        .await
    }

    /// Distinct non-empty categories, alphabetically
    pub async fn categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM gallery
            WHERE category IS NOT NULL AND category <> ''
            ORDER BY category
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Replaces title, description and category
    ///
    /// Returns `None` if no photo has this id.
    pub async fn update_metadata(
        pool: &PgPool,
        id: i64,
        data: UpdatePhoto,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Photo>(
            r#"
            UPDATE gallery
            SET title = $2, description = $3, category = $4
            WHERE id = $1
            RETURNING id, title, description, image_path, category, created_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.category)
        .fetch_optional(pool)
        .await
    }

    /// Deletes the row. Returns false if it did not exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
