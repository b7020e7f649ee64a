/// Order submission and status endpoints
///
/// - `POST /order/create` - Turn the session cart into a stored order
/// - `PUT /api/order/:id/status` - Overwrite an order's status (admin)
///
/// # Order request
///
/// ```json
/// {
///   "name": "Asha",
///   "email": "asha@example.com",
///   "phone": "9876543210",
///   "delivery_type": "delivery",
///   "address": "12 Baker Street",
///   "delivery_date": "2025-02-14",
///   "delivery_time": "16:30",
///   "custom_requirements": "Write 'Happy Birthday'"
/// }
/// ```

use crate::{
    app::AppState,
    error::{Ack, ApiError, ApiResult, ValidationErrorDetail},
    extract::{non_empty, ApiJson},
    session::ShopSession,
};
use axum::{
    extract::{Path, State},
    Json,
};
use bakery_shared::{
    cart::LineItem,
    models::order::{normalize_status, CreateOrder, DeliveryType, Order},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Earliest delivery date, in days from today
pub const MIN_LEAD_DAYS: i64 = 2;

/// Latest delivery date, in days from today
pub const MAX_LEAD_DAYS: i64 = 30;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name is required (at most 100 characters)"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = 20, message = "Phone is required (at most 20 characters)"),
        custom(function = "not_blank", message = "Phone is required")
    )]
    pub phone: String,

    pub delivery_type: String,
    pub address: Option<String>,

    /// `YYYY-MM-DD`
    pub delivery_date: String,

    /// `HH:MM` or `HH:MM:SS`
    pub delivery_time: Option<String>,

    pub custom_requirements: Option<String>,

    #[validate(length(max = 255, message = "Reference photo name is too long"))]
    pub reference_photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub success: bool,
    pub message: String,
    pub order_id: i64,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

impl OrderRequest {
    /// Checks the request against `today` and combines it with the cart items
    ///
    /// Field-level problems are collected and returned together as a
    /// validation error.
    pub fn into_new_order(
        self,
        items: Vec<LineItem>,
        today: NaiveDate,
    ) -> ApiResult<CreateOrder> {
        self.validate()?;

        let mut errors = Vec::new();

        let delivery_type = match self.delivery_type.parse::<DeliveryType>() {
            Ok(delivery_type) => Some(delivery_type),
            Err(_) => {
                errors.push(ValidationErrorDetail::new(
                    "delivery_type",
                    "Delivery type must be 'delivery' or 'pickup'",
                ));
                None
            }
        };

        let address = non_empty(self.address);
        if delivery_type == Some(DeliveryType::Delivery) && address.is_none() {
            errors.push(ValidationErrorDetail::new(
                "address",
                "Address is required for delivery",
            ));
        }

        let delivery_date = match NaiveDate::parse_from_str(self.delivery_date.trim(), "%Y-%m-%d") {
            Ok(date) => {
                let lead = (date - today).num_days();
                if !(MIN_LEAD_DAYS..=MAX_LEAD_DAYS).contains(&lead) {
                    errors.push(ValidationErrorDetail::new(
                        "delivery_date",
                        format!(
                            "Delivery date must be between {} and {} days from today",
                            MIN_LEAD_DAYS, MAX_LEAD_DAYS
                        ),
                    ));
                }
                Some(date)
            }
            Err(_) => {
                errors.push(ValidationErrorDetail::new(
                    "delivery_date",
                    "Delivery date must be YYYY-MM-DD",
                ));
                None
            }
        };

        let delivery_time = match non_empty(self.delivery_time) {
            Some(raw) => match parse_time(&raw) {
                Some(time) => Some(time),
                None => {
                    errors.push(ValidationErrorDetail::new(
                        "delivery_time",
                        "Delivery time must be HH:MM",
                    ));
                    None
                }
            },
            None => None,
        };

        let (Some(delivery_type), Some(delivery_date), true) =
            (delivery_type, delivery_date, errors.is_empty())
        else {
            return Err(ApiError::ValidationError(errors));
        };

        Ok(CreateOrder {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: match delivery_type {
                DeliveryType::Delivery => address,
                DeliveryType::Pickup => None,
            },
            delivery_date,
            delivery_time,
            delivery_type,
            items,
            custom_requirements: non_empty(self.custom_requirements),
            reference_photo: non_empty(self.reference_photo),
        })
    }
}

/// Stores the session cart as a new `Pending` order and empties the cart
///
/// # Errors
///
/// - `400 Bad Request`: Cart is empty or body is not valid JSON
/// - `422 Unprocessable Entity`: Field validation failed
pub async fn create_order(
    State(state): State<AppState>,
    session: ShopSession,
    ApiJson(req): ApiJson<OrderRequest>,
) -> ApiResult<Json<OrderCreated>> {
    let cart = session.cart().await?;
    if cart.is_empty() {
        return Err(ApiError::BadRequest("Cart is empty".to_string()));
    }

    let today = Utc::now().date_naive();
    let new_order = req.into_new_order(cart.into_items(), today)?;
    let order = Order::create(&state.db, new_order).await?;

    session.save_cart(&Default::default()).await?;

    tracing::info!(
        order_id = order.id,
        total = order.total,
        delivery_date = %order.delivery_date,
        delivery_type = %order.delivery_type,
        "Order created"
    );

    Ok(Json(OrderCreated {
        success: true,
        message: "Order placed successfully".to_string(),
        order_id: order.id,
        total: order.total,
    }))
}

/// Overwrites the status of an order
pub async fn set_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    ApiJson(req): ApiJson<StatusRequest>,
) -> ApiResult<Json<Ack>> {
    let status = req.status.unwrap_or_default();
    let status = normalize_status(&status).map_err(ApiError::BadRequest)?;

    apply_status(&state, order_id, status).await?;
    Ok(Json(Ack::with_message("Status updated")))
}

/// Shared by both status endpoints
pub(crate) async fn apply_status(state: &AppState, order_id: i64, status: &str) -> ApiResult<Order> {
    let order = Order::update_status(&state.db, order_id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    tracing::info!(order_id, status = %order.status, "Order status updated");
    Ok(order)
}
