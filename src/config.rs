//! Application configuration loaded from environment variables.
//!
//! - `ORDERDESK_CATALOG` — path to the product catalog JSON (required)
//! - `ORDERDESK_CUSTOMERS` — path to the customer list JSON
//! - `ORDERDESK_OUTPUT` — where the submitted order payload is written
//! - `ORDERDESK_LOG_FILE` — log destination (stderr at WARN when unset)
//! - `ORDERDESK_TICK_MS` — UI tick interval in milliseconds

use std::path::PathBuf;

/// Default UI tick interval.
const DEFAULT_TICK_MS: u64 = 250;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub data: DataConfig,
    pub output: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub tick_ms: u64,
}

/// Locations of the externally supplied catalog data.
#[derive(Debug)]
pub struct DataConfig {
    pub catalog_path: PathBuf,
    pub customers_path: Option<PathBuf>,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`OrderDeskError::Config`](crate::OrderDeskError::Config) if
/// `ORDERDESK_CATALOG` is unset or `ORDERDESK_TICK_MS` is not a positive
/// integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let catalog_path = non_empty_var("ORDERDESK_CATALOG")
        .map(PathBuf::from)
        .ok_or_else(|| {
            crate::OrderDeskError::Config(
                "ORDERDESK_CATALOG must point to a product catalog JSON file".to_string(),
            )
        })?;

    let tick_ms = match non_empty_var("ORDERDESK_TICK_MS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                return Err(crate::OrderDeskError::Config(format!(
                    "ORDERDESK_TICK_MS must be a positive integer, got {raw:?}"
                )));
            }
        },
        None => DEFAULT_TICK_MS,
    };

    Ok(AppConfig {
        data: DataConfig {
            catalog_path,
            customers_path: non_empty_var("ORDERDESK_CUSTOMERS").map(PathBuf::from),
        },
        output: non_empty_var("ORDERDESK_OUTPUT").map(PathBuf::from),
        log_file: non_empty_var("ORDERDESK_LOG_FILE").map(PathBuf::from),
        tick_ms,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 5] = [
        "ORDERDESK_CATALOG",
        "ORDERDESK_CUSTOMERS",
        "ORDERDESK_OUTPUT",
        "ORDERDESK_LOG_FILE",
        "ORDERDESK_TICK_MS",
    ];

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Every `ORDERDESK_*` variable not listed in `vars` is cleared for the
    /// duration of `f`.
    ///
    /// # Safety
    ///
    /// Tests using this helper must run with `--test-threads=1` or otherwise
    /// ensure no other threads read these env vars concurrently.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        for k in ALL_VARS {
            let value = vars.iter().find(|(name, _)| *name == k).and_then(|(_, v)| *v);
            // SAFETY: config tests run single-threaded (see test runner config).
            unsafe {
                match value {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values, same single-threaded context.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_scenarios() {
        // Env vars are process-global, so the scenarios run in one test.
        with_env(&[("ORDERDESK_CATALOG", Some("catalog.json"))], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.data.catalog_path, PathBuf::from("catalog.json"));
            assert!(config.data.customers_path.is_none());
            assert!(config.output.is_none());
            assert!(config.log_file.is_none());
            assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
        });

        with_env(
            &[
                ("ORDERDESK_CATALOG", Some("catalog.json")),
                ("ORDERDESK_CUSTOMERS", Some("customers.json")),
                ("ORDERDESK_OUTPUT", Some("order.json")),
                ("ORDERDESK_TICK_MS", Some("100")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(
                    config.data.customers_path,
                    Some(PathBuf::from("customers.json"))
                );
                assert_eq!(config.output, Some(PathBuf::from("order.json")));
                assert_eq!(config.tick_ms, 100);
            },
        );

        with_env(&[], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("ORDERDESK_CATALOG"));
        });

        with_env(&[("ORDERDESK_CATALOG", Some(""))], || {
            assert!(fetch_config().is_err());
        });

        with_env(
            &[
                ("ORDERDESK_CATALOG", Some("catalog.json")),
                ("ORDERDESK_TICK_MS", Some("fast")),
            ],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("ORDERDESK_TICK_MS"));
            },
        );

        with_env(
            &[
                ("ORDERDESK_CATALOG", Some("catalog.json")),
                ("ORDERDESK_TICK_MS", Some("0")),
            ],
            || {
                assert!(fetch_config().is_err());
            },
        );
    }
}
