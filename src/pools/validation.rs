use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::pool_constants::{DATE_FORMAT, MILLIS_PER_DAY};
use super::types::EarningRow;

/// Which rows may take part in the financial math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationRules {
    /// Some dashboard versions rejected loss rows as invalid, which silently drops
    /// impairments from the totals. Off by default to keep `earnings >= 0`.
    pub allow_negative_earnings: bool,
}

/// Filters an earning history down to the rows usable in metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct EarningRowValidator {
    rules: ValidationRules,
}

impl EarningRowValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> ValidationRules {
        self.rules
    }

    /// True iff both dates parse, start <= end, principal >= 0 and the earnings sign is allowed
    pub fn is_valid(&self, row: &EarningRow) -> bool {
        let Some((start, end)) = parse_row_dates(row) else {
            return false;
        };
        if start > end || row.principal < Decimal::ZERO {
            return false;
        }
        if row.earnings < Decimal::ZERO && !self.rules.allow_negative_earnings {
            debug!(row_id = %row.id, earnings = %row.earnings, "Dropping earning row with negative earnings");
            return false;
        }
        true
    }

    pub fn valid_rows<'a>(&self, rows: &'a [EarningRow]) -> Vec<&'a EarningRow> {
        rows.iter().filter(|row| self.is_valid(row)).collect()
    }
}

/// Validity under the default rules
pub fn is_valid_earning_row(row: &EarningRow) -> bool {
    EarningRowValidator::default().is_valid(row)
}

/// Parses a persisted date, accepting a plain calendar date or an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parses a persisted date as an instant: plain dates are midnight UTC, timestamps keep their time
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date.and_hms_opt(0, 0, 0)?.and_utc()),
        Err(_) => DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc)),
    }
}

pub fn parse_row_dates(row: &EarningRow) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    Some((parse_instant(&row.start_date)?, parse_instant(&row.end_date)?))
}

/// Length of a row's window in days, rounded up and never negative; zero when the dates don't parse
pub fn row_days(row: &EarningRow) -> i64 {
    let Some((start, end)) = parse_row_dates(row) else {
        return 0;
    };
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::types::Gathered;
    use rust_decimal::dec;

    fn row(start: &str, end: &str, principal: Decimal, earnings: Decimal) -> EarningRow {
        EarningRow {
            id: "r1".to_string(),
            principal,
            start_date: start.to_string(),
            end_date: end.to_string(),
            earnings,
            gathered: Gathered::No,
        }
    }

    #[test]
    fn test_complete_row_is_valid() {
        assert!(is_valid_earning_row(&row("2024-01-01", "2024-01-11", dec!(1000), dec!(10))));
    }

    #[test]
    fn test_same_day_row_is_valid() {
        assert!(is_valid_earning_row(&row("2024-01-01", "2024-01-01", dec!(1000), dec!(0))));
    }

    #[test]
    fn test_missing_or_malformed_dates_are_invalid() {
        assert!(!is_valid_earning_row(&row("", "2024-01-11", dec!(1000), dec!(10))));
        assert!(!is_valid_earning_row(&row("2024-01-01", "", dec!(1000), dec!(10))));
        assert!(!is_valid_earning_row(&row("2024-13-01", "2024-01-11", dec!(1000), dec!(10))));
        assert!(!is_valid_earning_row(&row("yesterday", "2024-01-11", dec!(1000), dec!(10))));
    }

    #[test]
    fn test_end_before_start_is_invalid() {
        assert!(!is_valid_earning_row(&row("2024-01-11", "2024-01-01", dec!(1000), dec!(10))));
    }

    #[test]
    fn test_negative_principal_is_invalid() {
        assert!(!is_valid_earning_row(&row("2024-01-01", "2024-01-11", dec!(-1), dec!(10))));
    }

    #[test]
    fn test_negative_earnings_follow_rules() {
        let loss = row("2024-01-01", "2024-01-11", dec!(1000), dec!(-5));
        assert!(!is_valid_earning_row(&loss));

        let lenient = EarningRowValidator::new(ValidationRules { allow_negative_earnings: true });
        assert!(lenient.is_valid(&loss));
    }

    #[test]
    fn test_rfc3339_dates_are_accepted() {
        let r = row("2024-01-01T00:00:00Z", "2024-01-03T00:00:00+00:00", dec!(100), dec!(1));
        assert!(is_valid_earning_row(&r));
        assert_eq!(row_days(&r), 2);
    }

    #[test]
    fn test_row_days_floors_at_zero() {
        assert_eq!(row_days(&row("2024-01-11", "2024-01-01", dec!(1), dec!(1))), 0);
        assert_eq!(row_days(&row("2024-01-01", "2024-01-01", dec!(1), dec!(1))), 0);
        assert_eq!(row_days(&row("2024-02-28", "2024-03-01", dec!(1), dec!(1))), 2);
    }

    #[test]
    fn test_timestamps_are_ordered_by_instant() {
        assert!(!is_valid_earning_row(&row("2024-01-01T18:00:00Z", "2024-01-01T06:00:00Z", dec!(100), dec!(1))));
        assert!(is_valid_earning_row(&row("2024-01-01T06:00:00Z", "2024-01-01T18:00:00Z", dec!(100), dec!(1))));
    }

    #[test]
    fn test_partial_days_round_up() {
        assert_eq!(row_days(&row("2024-01-01T06:00:00Z", "2024-01-02T18:00:00Z", dec!(1), dec!(1))), 2);
        assert_eq!(row_days(&row("2024-01-01T06:00:00Z", "2024-01-01T06:00:01Z", dec!(1), dec!(1))), 1);
        // Offsets are normalized before comparing: this start is 22:00 UTC the day before
        assert_eq!(row_days(&row("2024-01-01T00:00:00+02:00", "2024-01-01", dec!(1), dec!(1))), 1);
    }
}
