use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    match cfg.database.as_ref() {
        None => errors.push("DATABASE_URL (database.url) must be set".to_string()),
        Some(database) => {
            if database.url.trim().is_empty() {
                errors.push("database.url must not be empty".to_string());
            }

            if database.min_idle > database.max_connections {
                errors.push(format!(
                    "database.min_idle ({}) must be <= database.max_connections ({})",
                    database.min_idle, database.max_connections
                ));
            }
        }
    }

    if cfg.translation.model.trim().is_empty() {
        errors.push("translation.model must not be empty".to_string());
    }

    if cfg.translation.timeout_secs == 0 {
        errors.push("translation.timeout_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, DatabaseConfig};

    fn valid_config() -> AppConfig {
        AppConfig {
            database: Some(DatabaseConfig::new("sqlite::memory:")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn accepts_minimal_config_with_database_url() {
        validate(&valid_config()).expect("config should be valid");
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let cfg = AppConfig::default();
        let err = validate(&cfg).expect_err("missing database should fail");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn missing_translation_key_is_not_an_error() {
        let cfg = valid_config();
        assert!(cfg.translation.api_key.is_none());
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut cfg = valid_config();
        cfg.general.host = "  ".to_string();
        if let Some(database) = cfg.database.as_mut() {
            database.min_idle = 20;
            database.max_connections = 5;
        }
        cfg.translation.timeout_secs = 0;

        let message = validate(&cfg).expect_err("config should fail").to_string();
        assert!(message.contains("general.host"));
        assert!(message.contains("database.min_idle (20)"));
        assert!(message.contains("translation.timeout_secs"));
    }
}
