//! Coordinator configuration.

use std::time::Duration;

/// Configuration for the cache coordinator.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Window length used by time-windowed loads that do not supply one.
    pub default_window: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_window: Duration::from_secs(30 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default window for time-windowed loads.
    pub fn with_default_window(mut self, window: Duration) -> Self {
        self.default_window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_thirty_minutes() {
        assert_eq!(
            CacheConfig::default().default_window,
            Duration::from_secs(1800)
        );
    }

    #[test]
    fn test_builder() {
        let config = CacheConfig::new().with_default_window(Duration::from_secs(120));
        assert_eq!(config.default_window, Duration::from_secs(120));
    }
}
