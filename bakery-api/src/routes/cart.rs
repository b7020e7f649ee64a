/// Session cart endpoints
///
/// - `GET /cart` - Items and total
/// - `POST /cart/add` - `{ "name": "...", "price": 600, "quantity": 1 }` or
///   `{ "item_id": 1, "quantity": 2 }` to add a menu item at its menu price
/// - `POST /cart/update/:index` - `{ "change": -1 }`
/// - `POST /cart/remove/:index`
/// - `POST /cart/clear`
///
/// Items are addressed by their position in the cart as last shown.

use crate::{
    app::AppState,
    error::{Ack, ApiError, ApiResult},
    extract::ApiJson,
    session::ShopSession,
};
use axum::{
    extract::{Path, State},
    Json,
};
use bakery_shared::cart::{Cart, LineItem};
use serde::{Deserialize, Serialize};

/// Cart line as shown to the client
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub index: usize,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    pub subtotal: i64,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub cart_items: Vec<CartLineView>,
    pub total: i64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let cart_items = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| CartLineView {
                index,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
                subtotal: item.subtotal(),
            })
            .collect();

        Self {
            cart_items,
            total: cart.total(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Menu item id; when present, name and price come from the menu
    pub item_id: Option<u32>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub change: Option<i64>,
}

pub async fn view_cart(session: ShopSession) -> ApiResult<Json<CartView>> {
    let cart = session.cart().await?;
    Ok(Json(CartView::from(&cart)))
}

pub async fn add_item(
    State(state): State<AppState>,
    session: ShopSession,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> ApiResult<Json<Ack>> {
    let quantity = req.quantity.unwrap_or(1);

    let item = match (req.item_id, req.name, req.price) {
        (Some(id), _, _) => {
            let menu_item = state
                .catalog
                .find_item(id)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown menu item: {}", id)))?;
            LineItem::new(menu_item.name.clone(), menu_item.price, quantity)
        }
        (None, Some(name), Some(price)) => LineItem::new(name, price, quantity),
        _ => return Err(ApiError::BadRequest("Invalid data".to_string())),
    };

    let mut cart = session.cart().await?;
    tracing::debug!(name = %item.name, price = item.price, quantity = item.quantity, "Adding cart item");
    cart.add(item)?;
    session.save_cart(&cart).await?;

    Ok(Json(Ack::with_message("Item added to cart")))
}

pub async fn update_item(
    session: ShopSession,
    Path(index): Path<usize>,
    ApiJson(req): ApiJson<UpdateQuantityRequest>,
) -> ApiResult<Json<Ack>> {
    let change = req
        .change
        .ok_or_else(|| ApiError::BadRequest("Invalid data".to_string()))?;

    let mut cart = session.cart().await?;
    cart.update_quantity(index, change)?;
    session.save_cart(&cart).await?;

    Ok(Json(Ack::with_message("Quantity updated")))
}

pub async fn remove_item(
    session: ShopSession,
    Path(index): Path<usize>,
) -> ApiResult<Json<Ack>> {
    let mut cart = session.cart().await?;
    cart.remove(index)?;
    session.save_cart(&cart).await?;

    Ok(Json(Ack::with_message("Item removed from cart")))
}

pub async fn clear_cart(session: ShopSession) -> ApiResult<Json<Ack>> {
    session.save_cart(&Cart::default()).await?;
    Ok(Json(Ack::with_message("Cart cleared")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_view_indexes_and_totals() {
        let mut cart = Cart::default();
        cart.add(LineItem::new("Chocolate Cake", 600, 1)).unwrap();
        cart.add(LineItem::new("Cup Cakes", 40, 2)).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.total, 680);
        assert_eq!(view.cart_items[1].index, 1);
        assert_eq!(view.cart_items[1].subtotal, 80);
    }
}
