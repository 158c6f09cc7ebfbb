//! Search configuration.
//!
//! Fixed when a [`Ranker`](crate::ranking::Ranker) is built. Accuracy below
//! [`MIN_SEARCH_ACCURACY`] is clamped, never rejected, whichever way the
//! config is constructed (direct, deserialized, env or key/value map).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest accuracy the matcher accepts. Accuracy is used as a divisor.
pub const MIN_SEARCH_ACCURACY: f64 = 1.0;

/// Accuracy tuned for the catalog search box.
pub const DEFAULT_SEARCH_ACCURACY: f64 = 1.2;

pub const ENV_ACCURACY: &str = "CATALOG_SEARCH_ACCURACY";
pub const ENV_INCLUDE_WHITESPACE: &str = "CATALOG_SEARCH_INCLUDE_WHITESPACE";

/// Matching configuration.
///
/// # Examples
///
/// ```
/// use catalog_search::SearchConfig;
///
/// let config = SearchConfig::new(false, 0.3);
/// assert_eq!(config.accuracy(), 1.0);
/// assert!(!config.include_whitespace());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSearchConfig")]
pub struct SearchConfig {
    include_whitespace: bool,
    accuracy: f64,
}

/// Unvalidated wire form, clamped on conversion.
#[derive(Deserialize)]
struct RawSearchConfig {
    #[serde(default)]
    include_whitespace: bool,
    #[serde(default = "default_accuracy")]
    accuracy: f64,
}

fn default_accuracy() -> f64 {
    DEFAULT_SEARCH_ACCURACY
}

impl From<RawSearchConfig> for SearchConfig {
    fn from(raw: RawSearchConfig) -> Self {
        Self::new(raw.include_whitespace, raw.accuracy)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            include_whitespace: false,
            accuracy: DEFAULT_SEARCH_ACCURACY,
        }
    }
}

impl SearchConfig {
    /// Build a config, clamping `accuracy` to at least 1. NaN clamps too.
    pub fn new(include_whitespace: bool, accuracy: f64) -> Self {
        // `!(a >= 1)` also catches NaN
        let accuracy = if !(accuracy >= MIN_SEARCH_ACCURACY) {
            MIN_SEARCH_ACCURACY
        } else {
            accuracy
        };

        Self {
            include_whitespace,
            accuracy,
        }
    }

    pub fn include_whitespace(&self) -> bool {
        self.include_whitespace
    }

    /// Effective (clamped) accuracy.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Creates a config from a flat key/value section, falling back to the
    /// defaults for missing or unparsable keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use catalog_search::SearchConfig;
    ///
    /// let mut section = HashMap::new();
    /// section.insert("accuracy".to_string(), "1.5".to_string());
    ///
    /// let config = SearchConfig::from_config(&section);
    /// assert_eq!(config.accuracy(), 1.5);
    /// assert!(!config.include_whitespace()); // default
    /// ```
    pub fn from_config(config: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let include_whitespace = config.get("include_whitespace").map(String::as_str);
        let accuracy = config.get("accuracy").map(String::as_str);

        Self::new(
            parse_or(include_whitespace, "include_whitespace", defaults.include_whitespace),
            parse_or(accuracy, "accuracy", defaults.accuracy),
        )
    }

    /// Creates a config from `CATALOG_SEARCH_ACCURACY` and
    /// `CATALOG_SEARCH_INCLUDE_WHITESPACE` on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies the `CATALOG_SEARCH_*` variables on top of `self`. A set
    /// variable wins; unset or unparsable ones keep the current value.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let include_whitespace = lookup(ENV_INCLUDE_WHITESPACE);
        let accuracy = lookup(ENV_ACCURACY);
        let whitespace_value = include_whitespace.as_deref();

        Self::new(
            parse_or(whitespace_value, ENV_INCLUDE_WHITESPACE, self.include_whitespace),
            parse_or(accuracy.as_deref(), ENV_ACCURACY, self.accuracy),
        )
    }
}

fn parse_or<T>(value: Option<&str>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match value.map(|v| v.trim().parse::<T>()) {
        Some(Ok(parsed)) => parsed,
        Some(Err(_)) => {
            tracing::warn!(
                "Ignoring unparsable {}={:?}, using {}",
                key,
                value.unwrap_or_default(),
                default
            );
            default
        }
        None => default,
    }
}

impl std::fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accuracy={}, include_whitespace={}",
            self.accuracy, self.include_whitespace
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SearchConfig::default();
        assert_eq!(config.accuracy(), 1.2);
        assert!(!config.include_whitespace());
    }

    #[test]
    fn test_accuracy_clamped() {
        assert_eq!(SearchConfig::new(true, 0.0).accuracy(), 1.0);
        assert_eq!(SearchConfig::new(true, -5.0).accuracy(), 1.0);
        assert_eq!(SearchConfig::new(true, 0.999).accuracy(), 1.0);
        assert_eq!(SearchConfig::new(true, f64::NAN).accuracy(), 1.0);
        assert_eq!(SearchConfig::new(true, 1.0).accuracy(), 1.0);
        assert_eq!(SearchConfig::new(true, 3.5).accuracy(), 3.5);
    }

    #[test]
    fn test_deserialize_clamps() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"include_whitespace": true, "accuracy": 0.5}"#).unwrap();
        assert_eq!(config.accuracy(), 1.0);
        assert!(config.include_whitespace());

        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_from_config_fallbacks() {
        let mut section = HashMap::new();
        section.insert("accuracy".to_string(), "not-a-number".to_string());
        section.insert("include_whitespace".to_string(), "true".to_string());

        let config = SearchConfig::from_config(&section);
        assert_eq!(config.accuracy(), DEFAULT_SEARCH_ACCURACY);
        assert!(config.include_whitespace());
    }

    #[test]
    fn test_from_config_clamps() {
        let mut section = HashMap::new();
        section.insert("accuracy".to_string(), "0.25".to_string());
        assert_eq!(SearchConfig::from_config(&section).accuracy(), 1.0);
    }

    #[test]
    fn test_overrides_win_when_set() {
        let base = SearchConfig::new(false, 1.2);

        let config = base.with_overrides(|key| match key {
            ENV_ACCURACY => Some("2.5".to_string()),
            ENV_INCLUDE_WHITESPACE => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.accuracy(), 2.5);
        assert!(config.include_whitespace());

        let config = base.with_overrides(|key| match key {
            ENV_ACCURACY => Some("0.1".to_string()),
            _ => None,
        });
        assert_eq!(config.accuracy(), 1.0);
        assert!(!config.include_whitespace());
    }

    #[test]
    fn test_overrides_keep_base_when_unset_or_bad() {
        let base = SearchConfig::new(true, 1.5);
        assert_eq!(base.with_overrides(|_| None), base);
        assert_eq!(base.with_overrides(|_| Some("junk".to_string())), base);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(ENV_ACCURACY, "1.8");
        std::env::set_var(ENV_INCLUDE_WHITESPACE, "true");
        let from_env = SearchConfig::from_env();
        let over_catalog = SearchConfig::new(false, 1.2).with_env_overrides();
        std::env::remove_var(ENV_ACCURACY);
        std::env::remove_var(ENV_INCLUDE_WHITESPACE);

        assert_eq!(from_env, SearchConfig::new(true, 1.8));
        assert_eq!(over_catalog, SearchConfig::new(true, 1.8));
        assert_eq!(SearchConfig::from_env(), SearchConfig::default());
    }

    #[test]
    fn test_display() {
        let config = SearchConfig::new(true, 2.0);
        assert_eq!(config.to_string(), "accuracy=2, include_whitespace=true");
    }
}
