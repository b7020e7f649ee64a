/// Store contact settings
///
/// A single row holding the details shown on the contact page. It is seeded
/// from configuration the first time the server starts and read thereafter.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoreSettings {
    #[serde(skip_serializing)]
    pub id: i64,
    pub store_name: String,
    pub store_email: String,
    pub store_phone: Option<String>,
    pub store_address: Option<String>,
}

/// Values used when no settings row exists yet
#[derive(Debug, Clone)]
pub struct CreateStoreSettings {
    pub store_name: String,
    pub store_email: String,
    pub store_phone: Option<String>,
    pub store_address: Option<String>,
}

impl StoreSettings {
    pub async fn get(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, StoreSettings>(
            r#"
            SELECT id, store_name, store_email, store_phone, store_address
            FROM settings
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await
    }

    /// Returns the existing settings row, inserting `defaults` if there is none
    pub async fn get_or_create(
        pool: &PgPool,
        defaults: CreateStoreSettings,
    ) -> Result<Self, sqlx::Error> {
        if let Some(existing) = Self::get(pool).await? {
            return Ok(existing);
        }

        tracing::info!(store_name = %defaults.store_name, "Seeding store settings");

        sqlx::query_as::<_, StoreSettings>(
            r#"
            INSERT INTO settings (store_name, store_email, store_phone, store_address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, store_name, store_email, store_phone, store_address
            "#,
        )
        .bind(defaults.store_name)
        .bind(defaults.store_email)
        .bind(defaults.store_phone)
        .bind(defaults.store_address)
        .fetch_one(pool)
        .await
    }
}
