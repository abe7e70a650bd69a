use std::{env, fmt::Display, str::FromStr};

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and
/// immutable afterwards; handlers and middleware pull it from the state via FromRef.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and which settings are mandatory.
    pub env: Env,
    // Port the HTTP server listens on.
    pub port: u16,
    // Cookie (and client storage) key under which the session record is kept.
    pub session_key: String,
    // Path of the login view; anonymous users are sent here.
    pub login_path: String,
    // Path of the dashboard view; signed-in users visiting the login view are sent here.
    pub dashboard_path: String,
    // Upper bound on redirects followed for a single navigation.
    pub max_redirects: usize,
    // Directory holding the built single-page application.
    pub dist_dir: String,
}

/// Env
///
/// Defines the runtime context: developer-friendly defaults locally, explicit settings
/// in production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration used for test setup, so state can be built without
    /// touching environment variables.
    fn default() -> Self {
        Self {
            env: Env::Local,
            port: 3000,
            session_key: "user".to_string(),
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            max_redirects: 10,
            dist_dir: "dist".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every setting from environment variables.
    ///
    /// # Panics
    /// Panics if `SPA_DIST_DIR` is missing in production, or if a numeric setting does
    /// not parse. The server must not start half-configured.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();

        let dist_dir = match env {
            Env::Production => {
                env::var("SPA_DIST_DIR").expect("FATAL: SPA_DIST_DIR must be set in production.")
            }
            Env::Local => env::var("SPA_DIST_DIR").unwrap_or(defaults.dist_dir),
        };

        Self {
            env,
            port: try_load("PORT", defaults.port),
            session_key: env::var("SESSION_KEY").unwrap_or(defaults.session_key),
            login_path: env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
            dashboard_path: env::var("DASHBOARD_PATH").unwrap_or(defaults.dashboard_path),
            max_redirects: try_load("NAVIGATION_MAX_REDIRECTS", defaults.max_redirects),
            dist_dir,
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("FATAL: invalid {key} value {raw:?}: {e}")),
        Err(_) => {
            tracing::debug!("{key} not set, using default: {default}");
            default
        }
    }
}
