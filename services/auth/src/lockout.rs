//! Login attempt tracking and temporary lockout
//!
//! Five consecutive failures lock logins out for a fixed window. A spawned
//! timer clears the window on its own; every state transition that would
//! invalidate a pending timer bumps a generation counter so a stale timer
//! cannot clobber state that changed after it was scheduled.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{self, Instant};
use tracing::info;

/// Lockout configuration
#[derive(Debug, Clone)]
pub struct LockoutConfig {
    /// Maximum number of failed attempts before the lockout engages
    pub max_attempts: u32,
    /// Lockout duration in seconds
    pub lockout_seconds: u64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_seconds: 30,
        }
    }
}

/// Whether logins may currently proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutStatus {
    Unlocked,
    /// Seconds until the window elapses, rounded up
    Locked { remaining_seconds: u64 },
}

/// Outcome of recording a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Still unlocked; attempts left before the lockout engages
    AttemptsRemaining(u32),
    /// This attempt tripped the lockout; window length in seconds
    LockedOut(u64),
}

/// Lockout tracker state
#[derive(Debug)]
struct LockoutInner {
    /// Consecutive failed attempts
    failed_attempts: u32,
    /// End of the current lockout window, if one is active
    locked_until: Option<Instant>,
    /// Bumped on every transition that invalidates a scheduled clear
    generation: u64,
}

/// Tracks consecutive failed logins and enforces the lockout window
#[derive(Debug, Clone)]
pub struct LockoutTracker {
    config: LockoutConfig,
    inner: Arc<Mutex<LockoutInner>>,
}

impl LockoutTracker {
    /// Create a new lockout tracker
    pub fn new(config: LockoutConfig) -> Self {
        Self {
            config,
            inner: Arc::new(Mutex::new(LockoutInner {
                failed_attempts: 0,
                locked_until: None,
                generation: 0,
            })),
        }
    }

    /// Check whether logins may proceed
    ///
    /// An attempt made at or after the end of the window counts as unlocked;
    /// the elapsed window also resets the failure counter.
    pub async fn status(&self) -> LockoutStatus {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        if let Some(locked_until) = inner.locked_until {
            if now >= locked_until {
                // Window elapsed, reset attempts
                inner.failed_attempts = 0;
                inner.locked_until = None;
                inner.generation += 1;
                info!("Lockout window elapsed, failed attempts reset");
            } else {
                let remaining_seconds = seconds_remaining(locked_until - now);
                return LockoutStatus::Locked { remaining_seconds };
            }
        }

        LockoutStatus::Unlocked
    }

    /// Record a failed attempt, engaging the lockout once the limit is hit
    pub async fn record_failure(&self) -> FailureOutcome {
        let mut inner = self.inner.lock().await;
        inner.failed_attempts += 1;

        if inner.failed_attempts >= self.config.max_attempts {
            let locked_until = Instant::now() + Duration::from_secs(self.config.lockout_seconds);
            inner.locked_until = Some(locked_until);
            inner.generation += 1;
            info!(
                "Locked out for {} seconds after {} failed attempts",
                self.config.lockout_seconds, inner.failed_attempts
            );
            self.schedule_clear(inner.generation, locked_until);
            FailureOutcome::LockedOut(self.config.lockout_seconds)
        } else {
            FailureOutcome::AttemptsRemaining(self.config.max_attempts - inner.failed_attempts)
        }
    }

    /// Reset after a successful login; invalidates any pending clear timer
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.failed_attempts = 0;
        inner.locked_until = None;
        inner.generation += 1;
    }

    /// Current consecutive failure count
    pub async fn failed_attempts(&self) -> u32 {
        self.inner.lock().await.failed_attempts
    }

    /// Get the lockout configuration
    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// Spawn the timed clear for the window ending at `locked_until`
    ///
    /// The generation snapshot makes the task a no-op if the tracker moved
    /// on (successful login, manual reset, a newer lockout) before it fired.
    fn schedule_clear(&self, generation: u64, locked_until: Instant) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            time::sleep_until(locked_until).await;

            let mut inner = inner.lock().await;
            if inner.generation == generation {
                inner.failed_attempts = 0;
                inner.locked_until = None;
                info!("Lockout cleared by timer");
            }
        });
    }
}

/// Whole seconds left in the window, rounding partial seconds up
fn seconds_remaining(remaining: Duration) -> u64 {
    remaining.as_secs_f64().ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn drive_timers() {
        // Let any woken clear task run to completion
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_below_limit_stay_unlocked() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for expected_remaining in (1..=4).rev() {
            let outcome = tracker.record_failure().await;
            assert_eq!(outcome, FailureOutcome::AttemptsRemaining(expected_remaining));
            assert_eq!(tracker.status().await, LockoutStatus::Unlocked);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifth_failure_locks() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for _ in 0..4 {
            tracker.record_failure().await;
        }
        let outcome = tracker.record_failure().await;
        assert_eq!(outcome, FailureOutcome::LockedOut(30));

        assert_eq!(
            tracker.status().await,
            LockoutStatus::Locked {
                remaining_seconds: 30
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_seconds_strictly_decrease() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for _ in 0..5 {
            tracker.record_failure().await;
        }

        let mut previous = u64::MAX;
        for _ in 0..5 {
            time::advance(Duration::from_secs(1)).await;
            match tracker.status().await {
                LockoutStatus::Locked { remaining_seconds } => {
                    assert!(remaining_seconds < previous);
                    previous = remaining_seconds;
                }
                LockoutStatus::Unlocked => panic!("unlocked too early"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_elapses_exactly_at_deadline() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for _ in 0..5 {
            tracker.record_failure().await;
        }

        time::advance(Duration::from_secs(30)).await;

        // At or after the deadline counts as unlocked
        assert_eq!(tracker.status().await, LockoutStatus::Unlocked);
        assert_eq!(tracker.failed_attempts().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_clears_without_a_status_check() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for _ in 0..5 {
            tracker.record_failure().await;
        }

        time::advance(Duration::from_secs(31)).await;
        drive_timers().await;

        // The spawned timer already reset the counter on its own
        assert_eq!(tracker.failed_attempts().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_clobber_new_failures() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for _ in 0..5 {
            tracker.record_failure().await;
        }

        // A successful login resets state and invalidates the pending timer
        tracker.reset().await;
        for _ in 0..3 {
            tracker.record_failure().await;
        }

        time::advance(Duration::from_secs(31)).await;
        drive_timers().await;

        // The stale timer fired but must not have reset the new count
        assert_eq!(tracker.failed_attempts().await, 3);
        assert_eq!(tracker.status().await, LockoutStatus::Unlocked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_unlocks_immediately() {
        let tracker = LockoutTracker::new(LockoutConfig::default());

        for _ in 0..5 {
            tracker.record_failure().await;
        }
        assert!(matches!(
            tracker.status().await,
            LockoutStatus::Locked { .. }
        ));

        tracker.reset().await;
        assert_eq!(tracker.status().await, LockoutStatus::Unlocked);
        assert_eq!(tracker.failed_attempts().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_limits_are_honored() {
        let tracker = LockoutTracker::new(LockoutConfig {
            max_attempts: 2,
            lockout_seconds: 10,
        });

        assert_eq!(
            tracker.record_failure().await,
            FailureOutcome::AttemptsRemaining(1)
        );
        assert_eq!(
            tracker.record_failure().await,
            FailureOutcome::LockedOut(10)
        );
    }
}
