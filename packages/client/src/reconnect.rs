//! Bounded, fixed-delay reconnect policy.

use std::time::Duration;

/// What to do after a failed or lost connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectDecision {
    /// Wait `delay`, then make reconnect attempt number `attempt`
    Retry { attempt: u32, delay: Duration },
    /// The maximum number of attempts has been used up
    GiveUp { attempts: u32 },
}

/// Attempt counter for consecutive connection failures.
///
/// The counter resets on every successful connection, so the limit applies
/// to failures in a row, not over the lifetime of the client.
#[derive(Debug, Clone)]
pub struct ReconnectState {
    attempts: u32,
    max_attempts: u32,
    delay: Duration,
}

impl ReconnectState {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            delay,
        }
    }

    /// Reconnect attempts made since the last successful connection
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a successful connection
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Decide on the next step after a failure and count the attempt
    pub fn next_attempt(&mut self) -> ReconnectDecision {
        if self.attempts >= self.max_attempts {
            return ReconnectDecision::GiveUp {
                attempts: self.attempts,
            };
        }
        self.attempts += 1;
        ReconnectDecision::Retry {
            attempt: self.attempts,
            delay: self.delay,
        }
    }
}
