//! Conversation history limits

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Bounds on the in-memory conversation store
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Maximum turns kept per user (0 = unbounded)
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Evict conversations idle this long (0 = never)
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,

    /// How often the idle sweeper runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl ConversationConfig {
    /// Idle TTL, or `None` when eviction is disabled
    pub fn idle_ttl(&self) -> Option<Duration> {
        (self.idle_ttl_secs > 0).then(|| Duration::from_secs(self.idle_ttl_secs))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate conversation limits
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Odd caps would split a user/assistant pair
        if self.max_turns != 0 && (self.max_turns < 2 || self.max_turns % 2 != 0) {
            return Err(ValidationError::InvalidTurnCap);
        }
        if self.idle_ttl_secs > 0 && self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            idle_ttl_secs: default_idle_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_max_turns() -> usize {
    200
}

fn default_idle_ttl() -> u64 {
    24 * 60 * 60
}

fn default_sweep_interval() -> u64 {
    300
}
