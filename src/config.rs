//! Engine configuration.

use std::time::Duration;

/// Environment variable overriding the generator deadline, in whole seconds.
pub const GENERATOR_TIMEOUT_ENV: &str = "CASEFLOW_GENERATOR_TIMEOUT_SECS";

/// Tunable knobs for a [`crate::engine::SessionEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deadline for one feedback generator call. Text synthesis can be slow,
    /// so the default allows tens of seconds; on expiry the submit fails
    /// without committing and may be retried.
    pub generator_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generator_timeout: Duration::from_secs(30),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment (and a `.env` file if
    /// present), falling back to defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(GENERATOR_TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.generator_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    var = GENERATOR_TIMEOUT_ENV,
                    "ignoring unparsable generator timeout override"
                ),
            }
        }
        config
    }

    #[must_use]
    pub fn with_generator_timeout(mut self, timeout: Duration) -> Self {
        self.generator_timeout = timeout;
        self
    }
}
