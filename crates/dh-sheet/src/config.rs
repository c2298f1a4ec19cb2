//! Configuration for a character sheet.

use std::time::Duration;

/// Configuration for a character sheet.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// RNG seed for the built-in dice oracle.
    pub seed: u64,
    /// How long a dialog may stay open before it counts as timed out.
    /// `None` waits indefinitely.
    pub dialog_timeout: Option<Duration>,
    /// Whether a freshly rolled wound maximum also resets current wounds.
    pub wound_current_sync: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dialog_timeout: None,
            wound_current_sync: true,
        }
    }
}

impl SheetConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the dialog timeout. A zero duration disables it.
    pub fn with_dialog_timeout(mut self, timeout: Duration) -> Self {
        self.dialog_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Choose whether rolled wounds also reset current wounds.
    pub fn with_wound_current_sync(mut self, sync: bool) -> Self {
        self.wound_current_sync = sync;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SheetConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.dialog_timeout, None);
        assert!(cfg.wound_current_sync);
    }

    #[test]
    fn builder_methods() {
        let cfg = SheetConfig::default()
            .with_seed(123)
            .with_dialog_timeout(Duration::from_secs(30))
            .with_wound_current_sync(false);
        assert_eq!(cfg.seed, 123);
        assert_eq!(cfg.dialog_timeout, Some(Duration::from_secs(30)));
        assert!(!cfg.wound_current_sync);
    }

    #[test]
    fn zero_timeout_disables() {
        let cfg = SheetConfig::default()
            .with_dialog_timeout(Duration::from_secs(5))
            .with_dialog_timeout(Duration::ZERO);
        assert_eq!(cfg.dialog_timeout, None);
    }
}
