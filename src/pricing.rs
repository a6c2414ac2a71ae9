use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::space::RateSheet;

const MS_PER_HOUR: i64 = 1000 * 60 * 60;
const MS_PER_DAY: i64 = MS_PER_HOUR * 24;
const MS_PER_MONTH: i64 = MS_PER_DAY * 30;

/// A priced stay: the billable total in whole rupees and the human-readable
/// unit breakdown shown next to it ("1 Mo + 2 D", "3 H", "Short stay").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub total_amount: i64,
    pub breakdown: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("End time must be after start time.")]
    InvalidDuration,
}

/// Prices a stay against a tiered rate sheet.
///
/// The decomposition is greedy over fixed unit sizes (a month is always
/// 30 days, a day 24 hours; partial hours round up), followed by three
/// cost-collapse passes: an hour block costing more than a day becomes one
/// extra day, 30 accumulated days fold into a month, and a day/hour
/// remainder costing more than a month collapses into one extra month.
/// The passes run in exactly that order; they are not commutative, and
/// billed amounts at tier boundaries depend on this order. This is a
/// deliberate heuristic, not a minimum-cost search.
pub fn compute_quote(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rates: &RateSheet,
) -> Result<Quote, QuoteError> {
    let mut remaining = (end - start).num_milliseconds();
    if remaining <= 0 {
        return Err(QuoteError::InvalidDuration);
    }

    let mut months = remaining / MS_PER_MONTH;
    remaining %= MS_PER_MONTH;
    let mut days = remaining / MS_PER_DAY;
    remaining %= MS_PER_DAY;
    // ceiling division: a 61-minute stay bills as 2 hours
    let mut hours = (remaining + MS_PER_HOUR - 1) / MS_PER_HOUR;

    if hours > 0 && hours * rates.hourly > rates.daily {
        hours = 0;
        days += 1;
    }
    if days >= 30 {
        months += days / 30;
        days %= 30;
    }
    let remainder_cost = days * rates.daily + hours * rates.hourly;
    if remainder_cost > rates.monthly {
        days = 0;
        hours = 0;
        months += 1;
    }

    let total_amount = months * rates.monthly + days * rates.daily + hours * rates.hourly;

    let mut parts = Vec::new();
    if months > 0 {
        parts.push(format!("{} Mo", months));
    }
    if days > 0 {
        parts.push(format!("{} D", days));
    }
    if hours > 0 {
        parts.push(format!("{} H", hours));
    }
    let breakdown = if parts.is_empty() {
        "Short stay".to_string()
    } else {
        parts.join(" + ")
    };

    Ok(Quote {
        total_amount,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const RATES: RateSheet = RateSheet {
        hourly: 10,
        daily: 50,
        monthly: 1000,
    };

    fn quote_for(duration: Duration) -> Quote {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        compute_quote(start, start + duration, &RATES).unwrap()
    }

    #[test]
    fn three_hours_bills_hourly() {
        let quote = quote_for(Duration::hours(3));
        assert_eq!(quote.total_amount, 30);
        assert_eq!(quote.breakdown, "3 H");
    }

    #[test]
    fn six_hours_collapses_into_a_day() {
        // 6 * 10 = 60 exceeds the daily rate of 50
        let quote = quote_for(Duration::hours(6));
        assert_eq!(quote.total_amount, 50);
        assert_eq!(quote.breakdown, "1 D");
    }

    #[test]
    fn partial_hours_round_up() {
        let quote = quote_for(Duration::minutes(61));
        assert_eq!(quote.total_amount, 20);
        assert_eq!(quote.breakdown, "2 H");
    }

    #[test]
    fn exactly_thirty_days_is_one_month() {
        let quote = quote_for(Duration::days(30));
        assert_eq!(quote.total_amount, 1000);
        assert_eq!(quote.breakdown, "1 Mo");
    }

    #[test]
    fn thirty_two_days_is_a_month_plus_two_days() {
        let quote = quote_for(Duration::days(32));
        assert_eq!(quote.total_amount, 1100);
        assert_eq!(quote.breakdown, "1 Mo + 2 D");
    }

    #[test]
    fn expensive_remainder_collapses_into_a_month() {
        // 25 days at 50/day = 1250, above the monthly 1000
        let quote = quote_for(Duration::days(25));
        assert_eq!(quote.total_amount, 1000);
        assert_eq!(quote.breakdown, "1 Mo");
    }

    #[test]
    fn hour_collapse_can_cascade_through_the_day_fold() {
        // 29 days 23 hours: the hour block (230) beats the daily rate, the
        // extra day makes 30, and the fold lands on exactly one month.
        let quote = quote_for(Duration::days(29) + Duration::hours(23));
        assert_eq!(quote.total_amount, 1000);
        assert_eq!(quote.breakdown, "1 Mo");
    }

    #[test]
    fn collapse_order_is_hour_then_day_then_month() {
        // With a cheap monthly rate the remainder check fires even for a
        // short stay that survived the first two passes.
        let rates = RateSheet {
            hourly: 10,
            daily: 50,
            monthly: 90,
        };
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let quote = compute_quote(start, start + Duration::days(2), &rates).unwrap();
        assert_eq!(quote.total_amount, 90);
        assert_eq!(quote.breakdown, "1 Mo");
    }

    #[test]
    fn zero_or_negative_duration_is_rejected() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            compute_quote(start, start, &RATES),
            Err(QuoteError::InvalidDuration)
        );
        assert_eq!(
            compute_quote(start, start - Duration::hours(1), &RATES),
            Err(QuoteError::InvalidDuration)
        );
    }

    #[test]
    fn quoting_is_pure() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let end = start + Duration::hours(5);
        let first = compute_quote(start, end, &RATES).unwrap();
        let second = compute_quote(start, end, &RATES).unwrap();
        assert_eq!(first, second);
        assert!(first.total_amount >= 0);
    }
}
