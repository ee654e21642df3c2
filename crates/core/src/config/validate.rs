use super::{types::Config, ConfigError};

/// Largest page size the volumes API accepts.
const MAX_RESULTS_LIMIT: u32 = 40;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Google Books max_results is within 1..=40
/// - Storage key is non-empty
/// - Default search term is not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let max_results = config.source.google_books.max_results;
    if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "source.google_books.max_results must be between 1 and {}, got {}",
            MAX_RESULTS_LIMIT, max_results
        )));
    }

    if config.storage.key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.key cannot be empty".to_string(),
        ));
    }

    if config.search.default_term.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "search.default_term cannot be blank".to_string(),
        ));
    }

    Ok(())
}
