use std::env;
use std::sync::OnceLock;

use booker_core::{BookerCopy, WizardConfig};

/// Server settings read from the environment after `.env` is loaded.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Postgres connection string. Without it bookings live in memory.
    pub database_url: Option<String>,
    pub site_name: String,
    pub wizard: WizardConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let copy = env::var("BOOKER_COPY_JSON")
            .ok()
            .and_then(|json| match BookerCopy::from_json_overrides(&json) {
                Ok(copy) => Some(copy),
                Err(e) => {
                    tracing::warn!("Ignoring invalid BOOKER_COPY_JSON: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            site_name: env::var("BOOKER_SITE_NAME")
                .unwrap_or_else(|_| "Appointment Booking".to_string()),
            wizard: WizardConfig {
                copy,
                slot_duration_minutes: slot_minutes(
                    env::var("BOOKER_SLOT_MINUTES").ok().as_deref(),
                ),
                ..Default::default()
            },
        }
    }
}

const DEFAULT_SLOT_MINUTES: i64 = 60;
const MAX_SLOT_MINUTES: i64 = 24 * 60;

/// Appointment length for the calendar export. Anything outside
/// `1..=MAX_SLOT_MINUTES` falls back to the default.
fn slot_minutes(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_SLOT_MINUTES;
    };
    match raw.trim().parse::<i64>() {
        Ok(minutes) if (1..=MAX_SLOT_MINUTES).contains(&minutes) => minutes,
        _ => {
            tracing::warn!(
                "Ignoring BOOKER_SLOT_MINUTES={:?}, using {} minutes",
                raw,
                DEFAULT_SLOT_MINUTES
            );
            DEFAULT_SLOT_MINUTES
        }
    }
}

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn init_config(config: AppConfig) {
    if APP_CONFIG.set(config).is_err() {
        tracing::warn!("App config already initialized");
    }
}

pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_minutes_accepts_positive_values() {
        assert_eq!(slot_minutes(None), 60);
        assert_eq!(slot_minutes(Some("45")), 45);
        assert_eq!(slot_minutes(Some(" 90 ")), 90);
        assert_eq!(slot_minutes(Some("1440")), 1440);
    }

    #[test]
    fn test_slot_minutes_rejects_unusable_values() {
        for raw in ["0", "-90", "1441", "1000000000000", "an hour", ""] {
            assert_eq!(slot_minutes(Some(raw)), 60, "{raw}");
        }
    }
}
