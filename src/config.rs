/*!
 * Lock Configuration
 *
 * Construction-time settings for a readers-writers lock
 */

use crate::policy::Policy;
use tracing::warn;

/// Environment variable overriding the initial policy
pub const POLICY_ENV: &str = "RWLOCK_POLICY";

/// Lock configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockConfig {
    /// Policy in force when the lock is created
    pub policy: Policy,
    /// Label attached to every log event of the lock
    pub name: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Fair,
            name: "rwlock".to_string(),
        }
    }
}

impl LockConfig {
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Default configuration with the policy taken from `RWLOCK_POLICY`
    ///
    /// An unparsable value is logged and ignored.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(POLICY_ENV) {
            Ok(value) => config.with_env_policy(&value),
            Err(_) => config,
        }
    }

    fn with_env_policy(self, value: &str) -> Self {
        match value.parse() {
            Ok(policy) => self.with_policy(policy),
            Err(e) => {
                warn!(error = %e, fallback = %self.policy, "Ignoring {}", POLICY_ENV);
                self
            }
        }
    }
}
