//! Service configuration read from the environment.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use chrono::FixedOffset;

use crate::error::AppError;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Offset of the school's local calendar from UTC. Decides what "today"
    /// is for requests without an explicit date.
    pub utc_offset: FixedOffset,
    /// Shared token attached to outbound submission payloads.
    pub submission_token: Option<String>,
    /// Browser origin allowed to call the API. Any origin when unset.
    pub cors_origin: Option<HeaderValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            utc_offset: japan_offset(),
            submission_token: None,
            cors_origin: None,
        }
    }
}

fn japan_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("+09:00 is a valid offset")
}

impl Config {
    /// Load from process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = match non_empty("ENROLLMENT_BIND_ADDR") {
            Some(value) => value.trim().parse().map_err(|_| {
                AppError::Config(format!("ENROLLMENT_BIND_ADDR '{}' is not an address", value))
            })?,
            None => defaults.bind_addr,
        };

        let utc_offset = match non_empty("ENROLLMENT_UTC_OFFSET_HOURS") {
            Some(value) => value
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|hours| FixedOffset::east_opt(hours * 3600))
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "ENROLLMENT_UTC_OFFSET_HOURS '{}' is not a valid offset",
                        value
                    ))
                })?,
            None => defaults.utc_offset,
        };

        let cors_origin = match non_empty("ENROLLMENT_CORS_ORIGIN") {
            Some(value) => Some(HeaderValue::from_str(value.trim()).map_err(|_| {
                AppError::Config(format!(
                    "ENROLLMENT_CORS_ORIGIN '{}' is not a valid origin",
                    value.escape_debug()
                ))
            })?),
            None => None,
        };

        Ok(Self {
            bind_addr,
            utc_offset,
            submission_token: non_empty("ENROLLMENT_SUBMISSION_TOKEN"),
            cors_origin,
        })
    }
}
