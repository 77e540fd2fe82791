use std::time::Duration;

/// Called after every request to stay under the feed's rate limit.
pub trait Pacer {
    fn pace(&self);
}

/// Sleeps a fixed interval. 500ms keeps us under ~100 requests per minute.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval(pub Duration);

impl Pacer for FixedInterval {
    fn pace(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// No delay at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pace(&self) {}
}
