//! Explicitly-constructed in-memory components for the application layer:
//! a TTL cache and a fixed-window rate limiter, both with injected
//! configuration, lifecycle, and time source.

pub mod cache;
pub mod clock;
pub mod limiter;

pub use cache::{cache_key, MemoryCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{RateLimitConfig, RateLimitDecision, RateLimiter};

#[cfg(test)]
mod tests;
