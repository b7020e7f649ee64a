/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use bakery_api::{app::{build_router, AppState}, config::Config};
/// use bakery_shared::catalog::Catalog;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config, Catalog::embedded()?);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, build_router(state)).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::{AdminConfig, Config, StoreConfig},
    middleware::{
        admin::require_admin,
        security::{security_headers, SecurityHeaders},
    },
    storage::ImageStore,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use bakery_shared::{
    auth::password,
    catalog::Catalog,
    models::{
        settings::{CreateStoreSettings, StoreSettings},
        user::{CreateUser, User},
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::Level;

/// URL prefix under which uploaded gallery images are served
pub const GALLERY_URL_PREFIX: &str = "/static/uploads/gallery";

/// Shared application state
///
/// Cloned into each handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Menu loaded at startup
    pub catalog: Arc<Catalog>,

    /// Gallery image directory
    pub images: ImageStore,
}

impl AppState {
    pub fn new(db: PgPool, config: Config, catalog: Catalog) -> Self {
        let images = ImageStore::new(config.storage.upload_dir.clone());
        Self {
            db,
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            images,
        }
    }

    /// Public URL of a stored gallery image
    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}/{}", GALLERY_URL_PREFIX, image_path)
    }
}

/// Builds the complete router
///
/// # Routes
///
/// ```text
/// /                              home
/// /health                        health check
/// /menu, /customize, /contact    catalog and store views
/// /cart[/add|/update/:i|/remove/:i|/clear]
/// /login                         GET view, POST form login
/// /order/create                  submit the session cart
/// /gallery                       public gallery (?category=)
///
/// admin guard:
/// /logout
/// /admin                         orders (?status=)
/// /admin/order/:id
/// /admin/update_status
/// /api/order/:id/status          PUT
/// /admin/gallery[/upload|/:id/delete|/:id/edit]
///
/// /static/uploads/gallery/*      uploaded images
/// ```
///
/// # Middleware Stack
///
/// Innermost first: admin guard (admin routes only), tracing, CORS,
/// sessions, security headers.
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{admin, auth, cart, gallery, health, orders, pages};

    let public_routes = Router::new()
        .route("/", get(pages::home))
        .route("/health", get(health::health_check))
        .route("/menu", get(pages::menu))
        .route("/customize", get(pages::customize))
        .route("/contact", get(pages::contact))
        .route("/cart", get(cart::view_cart))
        .route("/cart/add", post(cart::add_item))
        .route("/cart/update/:index", post(cart::update_item))
        .route("/cart/remove/:index", post(cart::remove_item))
        .route("/cart/clear", post(cart::clear_cart))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/order/create", post(orders::create_order))
        .route("/gallery", get(gallery::public_gallery));

    let admin_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/admin", get(admin::dashboard))
        .route("/admin/order/:id", get(admin::get_order))
        .route("/admin/update_status", post(admin::update_status))
        .route("/api/order/:id/status", put(orders::set_order_status))
        .route("/admin/gallery", get(gallery::admin_gallery))
        .route(
            "/admin/gallery/upload",
            post(gallery::upload_photo)
                .layer(DefaultBodyLimit::max(state.config.storage.max_upload_bytes)),
        )
        .route("/admin/gallery/:id/delete", post(gallery::delete_photo))
        .route("/admin/gallery/:id/edit", post(gallery::edit_photo))
        .route_layer(middleware::from_fn(require_admin));

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.api.secure_cookies)
        .with_http_only(true);

    let cors = cors_layer(&state.config.api.cors_origins);
    let security = SecurityHeaders::new(state.config.api.production);
    let uploads = ServeDir::new(state.images.dir());

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .nest_service(GALLERY_URL_PREFIX, uploads)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(sessions)
        .layer(middleware::from_fn_with_state(security, security_headers))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Creates the admin account if it does not exist yet
///
/// An existing account is left untouched, including its password.
pub async fn seed_admin(db: &PgPool, admin: &AdminConfig) -> anyhow::Result<User> {
    if let Some(existing) = User::find_by_username(db, &admin.username).await? {
        tracing::debug!(username = %existing.username, "Admin user already exists");
        return Ok(existing);
    }

    let password_hash = password::hash_password(&admin.password)?;
    let user = User::create(
        db,
        CreateUser {
            username: admin.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(username = %user.username, "Seeded admin user");
    Ok(user)
}

/// Creates the store settings row from configuration if it does not exist
pub async fn seed_settings(db: &PgPool, store: &StoreConfig) -> anyhow::Result<StoreSettings> {
    let settings = StoreSettings::get_or_create(db, store_defaults(store)).await?;
    Ok(settings)
}

pub(crate) fn store_defaults(store: &StoreConfig) -> CreateStoreSettings {
    CreateStoreSettings {
        store_name: store.name.clone(),
        store_email: store.email.clone(),
        store_phone: store.phone.clone(),
        store_address: store.address.clone(),
    }
}
