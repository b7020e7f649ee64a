/// Admin login endpoints
///
/// - `GET /login` - Login view: current state and pending flash messages
/// - `POST /login` - Form login (`username`, `password`); redirects to
///   `/admin` on success, back to `/login` with a flash on failure
/// - `GET /logout` - Clears the admin flag and redirects home

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiForm,
    session::ShopSession,
};
use axum::{extract::State, response::Redirect, Json};
use bakery_shared::{auth::password, models::user::User};
use serde::{Deserialize, Serialize};

/// Flash shown after a failed login
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub authenticated: bool,
    pub flash: Vec<String>,
}

pub async fn login_page(session: ShopSession) -> ApiResult<Json<LoginView>> {
    Ok(Json(LoginView {
        authenticated: session.is_admin().await?,
        flash: session.take_flashes().await?,
    }))
}

/// Checks a credential against the stored admin account
///
/// Returns the user only when the username exists and the password matches.
/// Unknown usernames still pay for one Argon2 verification.
async fn authenticate(state: &AppState, form: LoginForm) -> ApiResult<Option<User>> {
    let Some(user) = User::find_by_username(&state.db, form.username.trim()).await? else {
        tokio::task::spawn_blocking(move || password::verify_dummy(&form.password))
            .await
            .map_err(join_error)?;
        return Ok(None);
    };

    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || password::verify_password(&form.password, &hash))
        .await
        .map_err(join_error)??;

    Ok(valid.then_some(user))
}

fn join_error(err: tokio::task::JoinError) -> ApiError {
    ApiError::InternalError(format!("Password check panicked: {}", err))
}

pub async fn login(
    State(state): State<AppState>,
    session: ShopSession,
    ApiForm(form): ApiForm<LoginForm>,
) -> ApiResult<Redirect> {
    let username = form.username.trim().to_string();

    match authenticate(&state, form).await? {
        Some(user) => {
            session.login_admin(user.id).await?;
            tracing::info!(user_id = user.id, username = %user.username, "Admin logged in");
            Ok(Redirect::to("/admin"))
        }
        None => {
            tracing::warn!(username = %username, "Failed admin login");
            session.flash(INVALID_CREDENTIALS).await?;
            Ok(Redirect::to("/login"))
        }
    }
}

pub async fn logout(session: ShopSession) -> ApiResult<Redirect> {
    session.logout_admin().await?;
    tracing::info!("Admin logged out");
    Ok(Redirect::to("/"))
}
