use crate::clock::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

const SHORT_WINDOW: Duration = Duration::from_secs(1);
const LONG_WINDOW: Duration = Duration::from_secs(120);
const SAFETY_MARGIN: Duration = Duration::from_millis(100);

/// Timestamps of accepted requests inside one sliding span, oldest first.
#[derive(Debug)]
struct RequestWindow {
    span: Duration,
    capacity: usize,
    stamps: VecDeque<Instant>,
}

impl RequestWindow {
    fn new(span: Duration, capacity: u32) -> Self {
        RequestWindow {
            span,
            capacity: capacity as usize,
            stamps: VecDeque::new(),
        }
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.stamps.front() {
            if now.saturating_duration_since(oldest) > self.span {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Time until the oldest entry leaves the window, if the window is full.
    fn wait_needed(&self, now: Instant) -> Option<Duration> {
        if self.stamps.len() < self.capacity {
            return None;
        }
        let oldest = *self.stamps.front()?;
        Some(self.span.saturating_sub(now.saturating_duration_since(oldest)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub in_last_second: usize,
    pub in_last_two_minutes: usize,
    pub per_second: usize,
    pub per_two_minutes: usize,
}

/// Process-wide quota of `per_second` requests per second and
/// `per_two_minutes` requests per 120 seconds.
pub struct RateLimiter {
    windows: Mutex<[RequestWindow; 2]>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(per_second: u32, per_two_minutes: u32, clock: Arc<dyn Clock>) -> Self {
        RateLimiter {
            windows: Mutex::new([
                RequestWindow::new(SHORT_WINDOW, per_second),
                RequestWindow::new(LONG_WINDOW, per_two_minutes),
            ]),
            clock,
        }
    }

    /// Blocks until one more request fits in both windows, then records it.
    ///
    /// The lock is held across the sleep so that concurrent callers queue up
    /// behind the one that is waiting instead of racing for the same slot.
    pub fn acquire(&self) {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        windows.iter_mut().for_each(|w| w.prune(now));

        let wait = windows.iter().filter_map(|w| w.wait_needed(now)).max();

        if let Some(wait) = wait {
            debug!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            self.clock.sleep(wait + SAFETY_MARGIN);
            let now = self.clock.now();
            windows.iter_mut().for_each(|w| w.prune(now));
        }

        let stamp = self.clock.now();
        for window in windows.iter_mut() {
            window.stamps.push_back(stamp);
        }
    }

    #[allow(dead_code)]
    pub fn reset(&self) {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        windows.iter_mut().for_each(|w| w.stamps.clear());
    }

    pub fn status(&self) -> RateLimitStatus {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        windows.iter_mut().for_each(|w| w.prune(now));

        let [short, long] = &*windows;
        RateLimitStatus {
            in_last_second: short.stamps.len(),
            in_last_two_minutes: long.stamps.len(),
            per_second: short.capacity,
            per_two_minutes: long.capacity,
        }
    }
}
