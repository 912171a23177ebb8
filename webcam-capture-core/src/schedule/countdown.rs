use std::time::Duration;

/// Default session budget: three minutes.
pub const DEFAULT_SESSION_BUDGET: Duration = Duration::from_secs(180);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Running { remaining: Duration },
    /// Reported by exactly one `advance` call.
    Expired,
    /// Already expired on an earlier call.
    Finished,
}

/// A wall-clock recording budget advanced by explicit ticks.
#[derive(Debug, Clone)]
pub struct Countdown {
    total: Duration,
    elapsed: Duration,
    expired: bool,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            elapsed: Duration::ZERO,
            expired: false,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Fraction of the budget used, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, delta: Duration) -> CountdownEvent {
        if self.expired {
            return CountdownEvent::Finished;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.total {
            self.expired = true;
            log::debug!("Session budget of {:?} expired", self.total);
            return CountdownEvent::Expired;
        }
        CountdownEvent::Running {
            remaining: self.remaining(),
        }
    }

    /// Start over with the full budget.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.expired = false;
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_BUDGET)
    }
}
