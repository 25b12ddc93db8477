//! Environment variable parsing helpers shared by the pool and service configs.

use std::str::FromStr;

/// Parse an environment variable, falling back to `default` when the
/// variable is missing or does not parse.
///
/// # Example
/// ```
/// let workers: usize = db_pool::env_utils::parse_env_with_default("UNSET_WORKERS_XYZ", 4);
/// assert_eq!(workers, 4);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, returning `None` if missing or invalid.
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Read a string variable, treating blank values as unset.
pub fn env_string_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// True when the variable is present with a non-blank value.
pub fn env_flag_set(key: &str) -> bool {
    std::env::var(key)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}
