//! Throttle rate configuration.
//!
//! Rates are written as `<count>/<period>`, for example `20/hour`. Only the first letter
//! of the period is significant: `s`econd, `m`inute, `h`our or `d`ay.

use chrono::Duration;
use std::{fmt, str::FromStr};

use super::ThrottleScope;

/// Number of requests admitted per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRate {
    pub num_requests: u32,
    pub period: Duration,
}

impl ThrottleRate {
    pub fn new(num_requests: u32, period: Duration) -> Self {
        Self {
            num_requests,
            period,
        }
    }
}

impl FromStr for ThrottleRate {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (count, period) = value
            .split_once('/')
            .ok_or_else(|| "expected <count>/<period>".to_string())?;

        let num_requests = count
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid request count: {}", e))?;

        let period = match period.trim().chars().next() {
            Some('s') => Duration::seconds(1),
            Some('m') => Duration::minutes(1),
            Some('h') => Duration::hours(1),
            Some('d') => Duration::days(1),
            _ => return Err("period must be one of second, minute, hour or day".to_string()),
        };

        Ok(Self::new(num_requests, period))
    }
}

impl fmt::Display for ThrottleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}s", self.num_requests, self.period.num_seconds())
    }
}

/// Rates of one scope, split by caller kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeRates {
    pub anonymous: ThrottleRate,
    pub authenticated: ThrottleRate,
}

/// Rates for every throttle scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRates {
    pub default: ScopeRates,
    pub drones: ScopeRates,
    pub pilots: ScopeRates,
}

impl ThrottleRates {
    pub fn for_scope(&self, scope: ThrottleScope) -> &ScopeRates {
        match scope {
            ThrottleScope::Default => &self.default,
            ThrottleScope::Drones => &self.drones,
            ThrottleScope::Pilots => &self.pilots,
        }
    }
}

impl Default for ThrottleRates {
    fn default() -> Self {
        let anonymous = ThrottleRate::new(3, Duration::hours(1));
        Self {
            default: ScopeRates {
                anonymous,
                authenticated: ThrottleRate::new(10, Duration::hours(1)),
            },
            drones: ScopeRates {
                anonymous,
                authenticated: ThrottleRate::new(20, Duration::hours(1)),
            },
            pilots: ScopeRates {
                anonymous,
                authenticated: ThrottleRate::new(15, Duration::hours(1)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_periods() {
        assert_eq!(
            "20/hour".parse::<ThrottleRate>(),
            Ok(ThrottleRate::new(20, Duration::hours(1)))
        );
        assert_eq!(
            "5/s".parse::<ThrottleRate>(),
            Ok(ThrottleRate::new(5, Duration::seconds(1)))
        );
        assert_eq!(
            "100/min".parse::<ThrottleRate>(),
            Ok(ThrottleRate::new(100, Duration::minutes(1)))
        );
        assert_eq!(
            "1/day".parse::<ThrottleRate>(),
            Ok(ThrottleRate::new(1, Duration::days(1)))
        );
    }

    #[test]
    fn rejects_malformed_rates() {
        assert!("20".parse::<ThrottleRate>().is_err());
        assert!("many/hour".parse::<ThrottleRate>().is_err());
        assert!("20/fortnight".parse::<ThrottleRate>().is_err());
        assert!("-1/hour".parse::<ThrottleRate>().is_err());
    }

    #[test]
    fn selects_rates_by_scope() {
        let rates = ThrottleRates::default();

        assert_eq!(
            rates.for_scope(ThrottleScope::Drones).authenticated.num_requests,
            20
        );
        assert_eq!(
            rates.for_scope(ThrottleScope::Pilots).authenticated.num_requests,
            15
        );
        assert_eq!(
            rates.for_scope(ThrottleScope::Default).anonymous.num_requests,
            3
        );
    }
}
