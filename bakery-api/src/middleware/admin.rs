/// Admin session guard
///
/// Rejects requests whose session does not carry the admin flag set by a
/// successful login. Page loads (`GET`) are redirected to `/login`; any other
/// method receives a `401` JSON error.

use crate::{error::ApiError, session::ShopSession};
use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub async fn require_admin(session: ShopSession, request: Request, next: Next) -> Response {
    let admin = match session.admin_user_id().await {
        Ok(admin) => admin,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match admin {
        Some(user_id) => {
            tracing::debug!(user_id, path = %request.uri().path(), "Admin request");
            next.run(request).await
        }
        None if request.method() == Method::GET => Redirect::to("/login").into_response(),
        None => ApiError::Unauthorized("Admin login required".to_string()).into_response(),
    }
}
