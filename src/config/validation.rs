use crate::config::types::{Config, HarvesterConfig, SessionConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_harvester_config(&config.harvester)?;
    validate_session_config(&config.session)?;
    Ok(())
}

/// Validates pipeline settings
fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    if config.parse_workers < 1 || config.parse_workers > 64 {
        return Err(ConfigError::Validation(format!(
            "parse-workers must be between 1 and 64, got {}",
            config.parse_workers
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.result_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "result-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.top_n < 1 {
        return Err(ConfigError::Validation(format!(
            "top-n must be >= 1, got {}",
            config.top_n
        )));
    }

    Ok(())
}

/// Validates session settings
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
