/// Customer order model and database operations
///
/// An order is a snapshot of the session cart plus the customer's contact and
/// delivery details. Orders start as `Pending`; the admin may overwrite the
/// status with any short label (`Confirmed`, `Completed`, `Cancelled`, ...).
/// There is no transition table and no history of earlier states.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE orders (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(120) NOT NULL,
///     phone VARCHAR(20) NOT NULL,
///     address TEXT,
///     delivery_date DATE NOT NULL,
///     delivery_time TIME,
///     delivery_type VARCHAR(20) NOT NULL,
///     items JSONB NOT NULL,
///     total BIGINT NOT NULL,
///     custom_requirements TEXT,
///     reference_photo VARCHAR(255),
///     status VARCHAR(20) NOT NULL DEFAULT 'Pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use bakery_shared::cart::LineItem;
/// use bakery_shared::models::order::{CreateOrder, DeliveryType, Order};
/// use chrono::NaiveDate;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let order = Order::create(
///     &pool,
///     CreateOrder {
///         name: "Asha".to_string(),
///         email: "asha@example.com".to_string(),
///         phone: "9876543210".to_string(),
///         address: None,
///         delivery_date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
///         delivery_time: None,
///         delivery_type: DeliveryType::Pickup,
///         items: vec![LineItem::new("Red Velvet Cake", 800, 1)],
///         custom_requirements: None,
///         reference_photo: None,
///     },
/// )
/// .await?;
///
/// Order::update_status(&pool, order.id, "Confirmed").await?;
/// # Ok(())
/// # }
/// ```

use crate::cart::LineItem;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgPool};
use std::fmt;
use std::str::FromStr;

/// Status assigned to every new order
pub const INITIAL_STATUS: &str = "Pending";

/// Longest status label the `status` column accepts
pub const MAX_STATUS_LEN: usize = 20;

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Delivery,
    Pickup,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Delivery => "delivery",
            DeliveryType::Pickup => "pickup",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "delivery" => Ok(DeliveryType::Delivery),
            "pickup" => Ok(DeliveryType::Pickup),
            other => Err(format!("Unknown delivery type: {}", other)),
        }
    }
}

/// Checks an admin-supplied status label
///
/// Any non-blank label of at most [`MAX_STATUS_LEN`] characters is accepted.
/// Returns the trimmed label.
pub fn normalize_status(status: &str) -> Result<&str, String> {
    let status = status.trim();
    if status.is_empty() {
        return Err("Status is required".to_string());
    }
    if status.chars().count() > MAX_STATUS_LEN {
        return Err(format!("Status must be at most {} characters", MAX_STATUS_LEN));
    }
    Ok(status)
}

/// Stored order
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Only present for home delivery
    pub address: Option<String>,

    pub delivery_date: NaiveDate,
    pub delivery_time: Option<NaiveTime>,
    pub delivery_type: String,

    /// Cart snapshot at submission time
    pub items: Json<Vec<LineItem>>,

    /// Σ price × quantity over `items`
    pub total: i64,

    pub custom_requirements: Option<String>,
    pub reference_photo: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an order
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub delivery_date: NaiveDate,
    pub delivery_time: Option<NaiveTime>,
    pub delivery_type: DeliveryType,
    pub items: Vec<LineItem>,
    pub custom_requirements: Option<String>,
    pub reference_photo: Option<String>,
}

impl CreateOrder {
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(LineItem::subtotal)
            .fold(0i64, i64::saturating_add)
    }
}

const ORDER_COLUMNS: &str = "id, name, email, phone, address, delivery_date, delivery_time, \
     delivery_type, items, total, custom_requirements, reference_photo, status, created_at";

impl Order {
    /// Inserts a new order with status [`INITIAL_STATUS`]
    ///
    /// The total is computed from `data.items`.
    pub async fn create(pool: &PgPool, data: CreateOrder) -> Result<Self, sqlx::Error> {
        let total = data.total();
        let query = format!(
            r#"
            INSERT INTO orders (name, email, phone, address, delivery_date, delivery_time,
                                delivery_type, items, total, custom_requirements,
                                reference_photo, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );

        sqlx::query_as::<_, Order>(&query)
            .bind(data.name)
            .bind(data.email)
            .bind(data.phone)
            .bind(data.address)
            .bind(data.delivery_date)
            .bind(data.delivery_time)
            .bind(data.delivery_type.as_str())
            .bind(Json(data.items))
            .bind(total)
            .bind(data.custom_requirements)
            .bind(data.reference_photo)
            .bind(INITIAL_STATUS)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);

        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists orders, latest delivery date first
    ///
    /// When `status` is given only orders with exactly that status are
    /// returned.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM orders
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY delivery_date DESC, created_at DESC
            "#,
            ORDER_COLUMNS
        );

        sqlx::query_as::<_, Order>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Overwrites the status of an order
    ///
    /// Returns the updated order, or `None` if no order has this id.
    pub async fn update_status(
        pool: &PgPool,
        id: i64,
        status: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {}",
            ORDER_COLUMNS
        );

        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
