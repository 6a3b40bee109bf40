//! Configuration module.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

use std::time::Duration;

use crate::model::Diagnostic;

/// Default number of items rendered beyond each viewport edge.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Default quiet period before scrolling is considered finished.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Smallest settle delay the engine accepts.
pub const MIN_SETTLE_DELAY: Duration = Duration::from_millis(1);

/// Per-engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Items rendered beyond each edge of the viewport. 0 renders only visible items.
    pub overscan_count: usize,
    /// Quiet period after the last scroll notification before activity ends.
    pub settle_delay: Duration,
}

impl EngineConfig {
    /// Smart constructor: a zero settle delay is replaced with [`MIN_SETTLE_DELAY`].
    pub fn new(overscan_count: usize, settle_delay: Duration) -> (Self, Option<Diagnostic>) {
        let (settle_delay, diagnostic) = if settle_delay.is_zero() {
            (
                MIN_SETTLE_DELAY,
                Some(Diagnostic::InvalidSettleDelay {
                    used_ms: MIN_SETTLE_DELAY.as_millis() as u64,
                }),
            )
        } else {
            (settle_delay, None)
        };

        (
            Self {
                overscan_count,
                settle_delay,
            },
            diagnostic,
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overscan_count: DEFAULT_OVERSCAN,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl From<&ResolvedConfig> for EngineConfig {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            overscan_count: config.overscan_count,
            settle_delay: Duration::from_millis(config.settle_delay_ms.max(1)),
        }
    }
}
