/// Typed access to server-side session state
///
/// Session data lives in a `tower_sessions` store keyed by the session id
/// cookie. [`ShopSession`] is extracted per request and exposes the three
/// things this application keeps there:
///
/// - the shopping cart
/// - the admin flag (the id of the logged-in admin user)
/// - one-shot flash messages
///
/// Every cart mutation is load, modify, store. Two concurrent requests on
/// the same session can therefore overwrite each other's changes.
///
/// # Example
///
/// ```no_run
/// use bakery_api::{error::ApiResult, session::ShopSession};
/// use axum::Json;
///
/// async fn cart_size(session: ShopSession) -> ApiResult<Json<usize>> {
///     Ok(Json(session.cart().await?.len()))
/// }
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use bakery_shared::cart::Cart;
use tower_sessions::{session, Session};

/// Session key holding the serialized cart
pub const CART_KEY: &str = "cart";

/// Session key holding the authenticated admin's user id
pub const ADMIN_KEY: &str = "admin_user_id";

/// Session key holding pending flash messages
pub const FLASH_KEY: &str = "flash";

/// Request-scoped handle on the caller's session
#[derive(Debug, Clone)]
pub struct ShopSession {
    session: Session,
}

#[async_trait]
impl<S> FromRequestParts<S> for ShopSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self { session })
    }
}

impl ShopSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Current cart, empty if none has been stored yet
    pub async fn cart(&self) -> Result<Cart, session::Error> {
        Ok(self.session.get::<Cart>(CART_KEY).await?.unwrap_or_default())
    }

    pub async fn save_cart(&self, cart: &Cart) -> Result<(), session::Error> {
        self.session.insert(CART_KEY, cart).await
    }

    /// Id of the logged-in admin, if any
    pub async fn admin_user_id(&self) -> Result<Option<i64>, session::Error> {
        self.session.get::<i64>(ADMIN_KEY).await
    }

    pub async fn is_admin(&self) -> Result<bool, session::Error> {
        Ok(self.admin_user_id().await?.is_some())
    }

    /// Marks the session as authenticated
    ///
    /// The session id is rotated first so a pre-login id cannot be reused.
    pub async fn login_admin(&self, user_id: i64) -> Result<(), session::Error> {
        self.session.cycle_id().await?;
        self.session.insert(ADMIN_KEY, user_id).await
    }

    /// Drops the admin flag. The cart and any flashes are kept.
    pub async fn logout_admin(&self) -> Result<(), session::Error> {
        self.session.remove::<i64>(ADMIN_KEY).await?;
        Ok(())
    }

    /// Queues a message for the next view
    pub async fn flash(&self, message: impl Into<String>) -> Result<(), session::Error> {
        let mut messages = self
            .session
            .get::<Vec<String>>(FLASH_KEY)
            .await?
            .unwrap_or_default();
        messages.push(message.into());
        self.session.insert(FLASH_KEY, messages).await
    }

    /// Returns and clears all queued messages
    pub async fn take_flashes(&self) -> Result<Vec<String>, session::Error> {
        Ok(self
            .session
            .remove::<Vec<String>>(FLASH_KEY)
            .await?
            .unwrap_or_default())
    }
}
