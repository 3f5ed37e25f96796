//! Fixed-window rate limiter keyed by caller token.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Window length.
    pub window: Duration,
    /// Requests allowed per token per window.
    pub max_requests: usize,
    /// Distinct tokens tracked before the oldest window is evicted.
    pub max_tokens: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_requests: 100,
            max_tokens: 500,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: usize,
    pub reset_after: Duration,
}

struct WindowState {
    count: usize,
    reset_at: Instant,
}

/// Per-token request counters over fixed windows. Explicitly constructed
/// and passed through context, never a shared global.
pub struct RateLimiter<C: Clock = SystemClock> {
    windows: HashMap<String, WindowState>,
    config: RateLimitConfig,
    clock: C,
}

impl RateLimiter<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self { windows: HashMap::new(), config, clock }
    }

    pub fn check(&mut self, token: &str) -> RateLimitDecision {
        let now = self.clock.now();

        if self
            .windows
            .get(token)
            .is_some_and(|w| now > w.reset_at)
        {
            self.windows.remove(token);
        }

        if self.windows.len() >= self.config.max_tokens && !self.windows.contains_key(token) {
            if let Some(oldest) = self
                .windows
                .iter()
                .min_by_key(|(_, w)| w.reset_at)
                .map(|(k, _)| k.clone())
            {
                debug!(token = %oldest, "evicting oldest rate-limit window");
                self.windows.remove(&oldest);
            }
        }

        match self.windows.get_mut(token) {
            None => {
                let reset_at = now + self.config.window;
                self.windows
                    .insert(token.to_string(), WindowState { count: 1, reset_at });
                RateLimitDecision {
                    allowed: true,
                    remaining: self.config.max_requests.saturating_sub(1),
                    reset_after: self.config.window,
                }
            }
            Some(window) if window.count >= self.config.max_requests => RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_after: window.reset_at.saturating_duration_since(now),
            },
            Some(window) => {
                window.count += 1;
                RateLimitDecision {
                    allowed: true,
                    remaining: self.config.max_requests.saturating_sub(window.count),
                    reset_after: window.reset_at.saturating_duration_since(now),
                }
            }
        }
    }

    pub fn reset(&mut self, token: &str) {
        self.windows.remove(token);
    }

    pub fn clear(&mut self) {
        self.windows.clear();
    }
}
