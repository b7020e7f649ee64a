/// Configuration management for the API server
///
/// Configuration is read from environment variables (and a `.env` file when
/// present).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST` / `API_PORT`: Bind address (default: 0.0.0.0:8080)
/// - `API_PRODUCTION`: Enables HSTS and secure cookies (default: false)
/// - `SESSION_SECURE_COOKIE`: `Secure` session cookie (default: follows
///   `API_PRODUCTION`)
/// - `CORS_ORIGINS`: Comma separated origins, `*` for any (default: `*`)
/// - `ADMIN_USERNAME` / `ADMIN_PASSWORD`: Seeded admin credential
///   (default: admin / admin123)
/// - `UPLOAD_DIR`: Gallery image directory (default: static/uploads/gallery)
/// - `MAX_UPLOAD_BYTES`: Upload request limit (default: 16 MiB)
/// - `MENU_PATH`: Menu JSON file replacing the built-in menu (optional)
/// - `STORE_NAME`, `STORE_EMAIL`, `STORE_PHONE`, `STORE_ADDRESS`: Contact
///   details seeded into the settings table
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use bakery_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Password seeded when `ADMIN_PASSWORD` is not set
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Default upload request limit (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub storage: StorageConfig,
    pub store: StoreConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Production mode: HSTS header
    pub production: bool,

    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,

    /// Allowed CORS origins (`*` = permissive)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Seeded admin credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,

    #[serde(skip_serializing)]
    pub password: String,
}

/// File storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory receiving gallery uploads
    pub upload_dir: PathBuf,

    /// Maximum accepted upload request size in bytes
    pub max_upload_bytes: usize,

    /// Menu file overriding the built-in menu
    pub menu_path: Option<PathBuf>,
}

/// Store contact details used to seed the settings table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, a numeric variable does
    /// not parse, or the admin password is empty.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = var_or("API_PORT", "8080").parse::<u16>()?;
        let production = parse_bool(&var_or("API_PRODUCTION", "false"));
        let secure_cookies = optional_var("SESSION_SECURE_COOKIE")
            .map(|v| parse_bool(&v))
            .unwrap_or(production);

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10").parse::<u32>()?;

        let admin_password = var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);
        if admin_password.is_empty() {
            anyhow::bail!("ADMIN_PASSWORD must not be empty");
        }

        let max_upload_bytes = match optional_var("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse::<usize>()?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            api: ApiConfig {
                host: var_or("API_HOST", "0.0.0.0"),
                port,
                production,
                secure_cookies,
                cors_origins: parse_origins(&var_or("CORS_ORIGINS", "*")),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            admin: AdminConfig {
                username: var_or("ADMIN_USERNAME", "admin"),
                password: admin_password,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "static/uploads/gallery")),
                max_upload_bytes,
                menu_path: optional_var("MENU_PATH").map(PathBuf::from),
            },
            store: StoreConfig {
                name: var_or("STORE_NAME", "The Bakery"),
                email: var_or("STORE_EMAIL", "hello@bakery.local"),
                phone: optional_var("STORE_PHONE"),
                address: optional_var("STORE_ADDRESS"),
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// True when the admin password was left at its built-in default
    pub fn uses_default_admin_password(&self) -> bool {
        self.admin.password == DEFAULT_ADMIN_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                production: false,
                secure_cookies: false,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/bakery_test".to_string(),
                max_connections: 5,
            },
            admin: AdminConfig {
                username: "admin".to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("static/uploads/gallery"),
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                menu_path: None,
            },
            store: StoreConfig {
                name: "The Bakery".to_string(),
                email: "hello@bakery.local".to_string(),
                phone: None,
                address: None,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_default_admin_password_detected() {
        let mut config = test_config();
        assert!(config.uses_default_admin_password());

        config.admin.password = "s3cret-bakery".to_string();
        assert!(!config.uses_default_admin_password());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" YES "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
    }

    #[test]
    fn test_admin_password_not_serialized() {
        let json = serde_json::to_value(test_config()).unwrap();
        assert!(json["admin"].get("password").is_none());
    }
}
