//! Scoped request throttling.
//!
//! Provides the `ThrottleService` which counts requests per (scope, caller) pair in fixed
//! windows. Counters live in memory only: a restart forgets them and every caller starts
//! with a fresh window. Each key is guarded by its map shard lock, so the reset, increment
//! and comparison for one key happen atomically even under concurrent requests.

pub mod clock;
pub mod rate;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use self::{
    clock::{Clock, SystemClock},
    rate::{ThrottleRate, ThrottleRates},
};

/// Number of tracked keys above which expired windows are pruned.
const PRUNE_THRESHOLD: usize = 10_000;

/// Sentinel stored in `last_prune` before the first prune.
const NEVER_PRUNED: i64 = i64::MIN;

/// Named throttling bucket shared by one or more operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottleScope {
    /// Root, drone categories, competitions and users.
    Default,
    /// Drone list and drone detail.
    Drones,
    /// Pilot list and pilot detail.
    Pilots,
}

impl ThrottleScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Drones => "drones",
            Self::Pilots => "pilots",
        }
    }
}

/// Who is being counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThrottleCaller {
    /// Authenticated user id.
    User(i32),
    /// Anonymous caller, identified by client address when one is known.
    Anonymous(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ThrottleKey {
    scope: ThrottleScope,
    caller: ThrottleCaller,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

impl Window {
    fn is_expired(&self, now: DateTime<Utc>, period: Duration) -> bool {
        now >= self.started_at + period
    }
}

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allow,
    /// Rejected; the window resets in `retry_after` whole seconds (at least 1).
    Throttle { retry_after: u64 },
}

/// Service counting requests per scope and caller.
///
/// Cheap to clone; clones share the same counters.
#[derive(Clone)]
pub struct ThrottleService {
    windows: Arc<DashMap<ThrottleKey, Window>>,
    rates: ThrottleRates,
    clock: Arc<dyn Clock>,
    prune_threshold: usize,
    /// Shortest configured period; the minimum spacing between prunes.
    prune_interval: Duration,
    /// Unix milliseconds of the last prune, or `NEVER_PRUNED`.
    last_prune: Arc<AtomicI64>,
}

impl ThrottleService {
    /// Creates a throttle service driven by the system clock.
    pub fn new(rates: ThrottleRates) -> Self {
        Self::with_clock(rates, Arc::new(SystemClock))
    }

    /// Creates a throttle service driven by the provided clock.
    pub fn with_clock(rates: ThrottleRates, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            rates,
            clock,
            prune_threshold: PRUNE_THRESHOLD,
            prune_interval: shortest_period(&rates),
            last_prune: Arc::new(AtomicI64::new(NEVER_PRUNED)),
        }
    }

    #[cfg(test)]
    fn with_prune_threshold(mut self, threshold: usize) -> Self {
        self.prune_threshold = threshold;
        self
    }

    /// Counts a request and decides whether it is admitted.
    ///
    /// The window for the key is reset if it has elapsed, the counter is incremented, and
    /// the request is rejected when the counter exceeds the limit for the caller kind.
    /// Rejected requests are counted too; they do not extend the window.
    ///
    /// # Arguments
    /// - `scope` - Throttle scope of the operation
    /// - `caller` - Caller identity used as the second half of the key
    ///
    /// # Returns
    /// - `ThrottleDecision::Allow` - Request admitted
    /// - `ThrottleDecision::Throttle { retry_after }` - Limit exceeded for this window
    pub fn check(&self, scope: ThrottleScope, caller: &ThrottleCaller) -> ThrottleDecision {
        let rates = self.rates.for_scope(scope);
        let rate = match caller {
            ThrottleCaller::User(_) => rates.authenticated,
            ThrottleCaller::Anonymous(_) => rates.anonymous,
        };
        let now = self.clock.now();

        self.maybe_prune(now);

        let key = ThrottleKey {
            scope,
            caller: caller.clone(),
        };

        // Entry guard holds the shard lock until the end of this function.
        let mut window = self.windows.entry(key).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if window.is_expired(now, rate.period) {
            window.started_at = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);

        if window.count <= rate.num_requests {
            return ThrottleDecision::Allow;
        }

        ThrottleDecision::Throttle {
            retry_after: retry_after_seconds(window.started_at + rate.period - now),
        }
    }

    /// Prunes when the map is over the threshold and no prune ran within the last interval.
    ///
    /// Only the thread that wins the swap on `last_prune` scans the map; concurrent checks
    /// skip straight to their own key.
    fn maybe_prune(&self, now: DateTime<Utc>) {
        if self.windows.len() <= self.prune_threshold {
            return;
        }

        let now_millis = now.timestamp_millis();
        let last = self.last_prune.load(Ordering::Acquire);
        if last != NEVER_PRUNED
            && now_millis.saturating_sub(last) < self.prune_interval.num_milliseconds()
        {
            return;
        }

        if self
            .last_prune
            .compare_exchange(last, now_millis, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let removed = self.prune_expired(now);
        tracing::debug!(removed, remaining = self.windows.len(), "pruned throttle windows");
    }

    /// Removes windows that have elapsed for every rate they could belong to.
    ///
    /// # Returns
    /// - `usize` - Number of removed keys
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.windows.len();
        let rates = self.rates;
        self.windows.retain(|key, window| {
            let scope_rates = rates.for_scope(key.scope);
            let period = longest_period(&[scope_rates.anonymous, scope_rates.authenticated]);
            !window.is_expired(now, period)
        });
        before.saturating_sub(self.windows.len())
    }
}

fn shortest_period(rates: &ThrottleRates) -> Duration {
    [rates.default, rates.drones, rates.pilots]
        .iter()
        .flat_map(|scope| [scope.anonymous.period, scope.authenticated.period])
        .min()
        .unwrap_or_else(Duration::zero)
}

fn longest_period(rates: &[ThrottleRate]) -> Duration {
    rates
        .iter()
        .map(|rate| rate.period)
        .max()
        .unwrap_or_else(Duration::zero)
}

/// Rounds a remaining duration up to whole seconds, never below one.
fn retry_after_seconds(remaining: Duration) -> u64 {
    let millis = remaining.num_milliseconds().max(0) as u64;
    millis.div_ceil(1000).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::throttle::{
        clock::ManualClock,
        rate::{ScopeRates, ThrottleRate},
    };
    use chrono::TimeZone;

    fn rates(anonymous: u32, authenticated: u32) -> ThrottleRates {
        let scope = ScopeRates {
            anonymous: ThrottleRate::new(anonymous, Duration::minutes(1)),
            authenticated: ThrottleRate::new(authenticated, Duration::minutes(1)),
        };
        ThrottleRates {
            default: scope,
            drones: scope,
            pilots: scope,
        }
    }

    fn service(anonymous: u32, authenticated: u32) -> (ThrottleService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 10, 20, 12, 0, 0).unwrap(),
        ));
        let service = ThrottleService::with_clock(rates(anonymous, authenticated), clock.clone());
        (service, clock)
    }

    fn anonymous() -> ThrottleCaller {
        ThrottleCaller::Anonymous("127.0.0.1".to_string())
    }

    /// Tests that requests beyond the limit are rejected within one window.
    ///
    /// Expected: first three admitted, fourth throttled with a positive retry hint
    #[test]
    fn throttles_after_limit() {
        let (service, _) = service(3, 10);

        for _ in 0..3 {
            assert_eq!(
                service.check(ThrottleScope::Drones, &anonymous()),
                ThrottleDecision::Allow
            );
        }

        assert_eq!(
            service.check(ThrottleScope::Drones, &anonymous()),
            ThrottleDecision::Throttle { retry_after: 60 }
        );
    }

    /// Tests that the counter resets once the window elapses.
    ///
    /// Expected: throttled before the reset, admitted after it
    #[test]
    fn resets_after_window() {
        let (service, clock) = service(1, 1);

        assert_eq!(
            service.check(ThrottleScope::Pilots, &anonymous()),
            ThrottleDecision::Allow
        );
        clock.advance(Duration::seconds(45));
        assert_eq!(
            service.check(ThrottleScope::Pilots, &anonymous()),
            ThrottleDecision::Throttle { retry_after: 15 }
        );

        clock.advance(Duration::seconds(15));
        assert_eq!(
            service.check(ThrottleScope::Pilots, &anonymous()),
            ThrottleDecision::Allow
        );
    }

    /// Tests that retry hints round partial seconds up.
    ///
    /// Expected: 500ms remaining is reported as 1 second
    #[test]
    fn rounds_retry_after_up() {
        let (service, clock) = service(1, 1);

        service.check(ThrottleScope::Default, &anonymous());
        clock.advance(Duration::milliseconds(59_500));

        assert_eq!(
            service.check(ThrottleScope::Default, &anonymous()),
            ThrottleDecision::Throttle { retry_after: 1 }
        );
    }

    /// Tests that scopes keep separate counters.
    ///
    /// Expected: exhausting the drones scope leaves the pilots scope untouched
    #[test]
    fn keeps_scopes_independent() {
        let (service, _) = service(1, 1);

        service.check(ThrottleScope::Drones, &anonymous());

        assert!(matches!(
            service.check(ThrottleScope::Drones, &anonymous()),
            ThrottleDecision::Throttle { .. }
        ));
        assert_eq!(
            service.check(ThrottleScope::Pilots, &anonymous()),
            ThrottleDecision::Allow
        );
    }

    /// Tests that authenticated callers use their own rate and counter.
    ///
    /// Expected: anonymous limit of 1, authenticated limit of 2
    #[test]
    fn applies_authenticated_rate_to_users() {
        let (service, _) = service(1, 2);
        let user = ThrottleCaller::User(7);

        assert_eq!(service.check(ThrottleScope::Drones, &user), ThrottleDecision::Allow);
        assert_eq!(service.check(ThrottleScope::Drones, &user), ThrottleDecision::Allow);
        assert!(matches!(
            service.check(ThrottleScope::Drones, &user),
            ThrottleDecision::Throttle { .. }
        ));

        assert_eq!(
            service.check(ThrottleScope::Drones, &anonymous()),
            ThrottleDecision::Allow
        );
    }

    /// Tests that concurrent checks on one key never admit more than the limit.
    ///
    /// Expected: exactly `limit` admissions across all threads
    #[test]
    fn admits_exactly_limit_under_contention() {
        let (service, _) = service(50, 50);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .filter(|_| {
                            service.check(ThrottleScope::Drones, &ThrottleCaller::User(1))
                                == ThrottleDecision::Allow
                        })
                        .count()
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(admitted, 50);
    }

    /// Tests pruning of elapsed windows.
    ///
    /// Expected: only the stale key is removed
    #[test]
    fn prunes_expired_windows() {
        let (service, clock) = service(5, 5);

        service.check(ThrottleScope::Drones, &anonymous());
        clock.advance(Duration::seconds(90));
        service.check(ThrottleScope::Pilots, &anonymous());

        let removed = service.prune_expired(clock.now());

        assert_eq!(removed, 1);
        assert_eq!(service.windows.len(), 1);
    }

    /// Tests that a map over the threshold is scanned at most once per shortest period.
    ///
    /// Expected: stale keys survive a check made soon after a prune and are removed once
    /// a full period has passed since it
    #[test]
    fn prunes_at_most_once_per_period() {
        let (service, clock) = service(5, 5);
        let service = service.with_prune_threshold(2);
        let caller = |n: u8| ThrottleCaller::Anonymous(format!("10.0.0.{}", n));

        service.check(ThrottleScope::Default, &caller(1));
        service.check(ThrottleScope::Default, &caller(2));
        clock.advance(Duration::seconds(50));
        service.check(ThrottleScope::Default, &caller(3));

        // Over the threshold: scans, but nothing has expired yet.
        service.check(ThrottleScope::Default, &caller(4));
        assert_eq!(service.windows.len(), 4);

        // Keys 1 and 2 are now expired, yet the last scan was only 15 seconds ago.
        clock.advance(Duration::seconds(15));
        service.check(ThrottleScope::Default, &caller(5));
        assert_eq!(service.windows.len(), 5);

        // A full period after the last scan, keys 1 to 4 are removed.
        clock.advance(Duration::seconds(45));
        service.check(ThrottleScope::Default, &caller(6));
        assert_eq!(service.windows.len(), 2);
    }
}
