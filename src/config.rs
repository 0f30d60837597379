//! Cache configuration options

use std::env;

use crate::error::{CacheError, Result};

/// Default maximum number of cached files
pub const DEFAULT_CAPACITY: usize = 100;

/// Environment variable overriding the capacity
pub const CAPACITY_ENV: &str = "FILECACHE_CAPACITY";

/// Configuration for the file cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Set the maximum number of entries
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build a configuration from `FILECACHE_CAPACITY`, falling back to
    /// defaults when it is unset
    pub fn from_env() -> Result<Self> {
        Self::from_capacity_var(env::var(CAPACITY_ENV).ok().as_deref())
    }

    fn from_capacity_var(value: Option<&str>) -> Result<Self> {
        let config = match value {
            None => Self::default(),
            Some(raw) => {
                let capacity = raw.trim().parse::<usize>().map_err(|e| {
                    CacheError::InvalidConfig(format!("{}='{}': {}", CAPACITY_ENV, raw, e))
                })?;
                Self::default().with_capacity(capacity)
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the cache cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CacheConfig::default().with_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_capacity_from_var() {
        assert_eq!(CacheConfig::from_capacity_var(None).unwrap().capacity, 100);
        assert_eq!(
            CacheConfig::from_capacity_var(Some(" 7 ")).unwrap().capacity,
            7
        );
        assert!(CacheConfig::from_capacity_var(Some("lots")).is_err());
        assert!(CacheConfig::from_capacity_var(Some("0")).is_err());
    }
}
