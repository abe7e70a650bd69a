use recordatorios_web::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: &[&str] = &[
    "APP_ENV",
    "PORT",
    "SESSION_KEY",
    "LOGIN_PATH",
    "DASHBOARD_PATH",
    "NAVIGATION_MAX_REDIRECTS",
    "SPA_DIST_DIR",
];

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    // Start every test from a clean slate
    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }

    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    // SPA_DIST_DIR is missing, so production loading must refuse to start.
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("APP_ENV", "production");
            }
            AppConfig::load()
        })
    });

    assert!(
        result.is_err(),
        "Production config loading should panic without SPA_DIST_DIR"
    );
}

#[test]
#[serial]
fn test_app_config_production_with_dist_dir() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("SPA_DIST_DIR", "/srv/recordatorios");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.dist_dir, "/srv/recordatorios");
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(AppConfig::load);

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.port, 3000);
    assert_eq!(config.session_key, "user");
    assert_eq!(config.login_path, "/login");
    assert_eq!(config.dashboard_path, "/dashboard");
    assert_eq!(config.max_redirects, 10);
    assert_eq!(config.dist_dir, "dist");
}

#[test]
#[serial]
fn test_app_config_overrides() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("PORT", "8080");
            env::set_var("SESSION_KEY", "currentUser");
            env::set_var("LOGIN_PATH", "/entrar");
            env::set_var("DASHBOARD_PATH", "/panel");
            env::set_var("NAVIGATION_MAX_REDIRECTS", "3");
        }
        AppConfig::load()
    });

    assert_eq!(config.port, 8080);
    assert_eq!(config.session_key, "currentUser");
    assert_eq!(config.login_path, "/entrar");
    assert_eq!(config.dashboard_path, "/panel");
    assert_eq!(config.max_redirects, 3);
}

#[test]
#[serial]
fn test_app_config_rejects_invalid_number() {
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("PORT", "not-a-port");
            }
            AppConfig::load()
        })
    });

    assert!(result.is_err(), "An unparseable PORT should panic");
}
