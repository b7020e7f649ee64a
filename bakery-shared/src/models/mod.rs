/// Database models for the bakery
///
/// # Models
///
/// - `user`: Admin account used for login
/// - `order`: Submitted customer orders and their status
/// - `gallery`: Showcase photo metadata
/// - `settings`: Store contact details
///
/// # Example
///
/// ```no_run
/// use bakery_shared::models::gallery::Photo;
/// use bakery_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(PoolConfig::default()).await?;
/// let weddings = Photo::list(&pool, Some("Wedding")).await?;
/// # Ok(())
/// # }
/// ```

pub mod gallery;
pub mod order;
pub mod settings;
pub mod user;
