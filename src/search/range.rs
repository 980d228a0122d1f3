//! Inclusive date ranges and midpoint splitting
//!
//! Ranges are rendered as `dd.mm.yyyy` in query strings, matching the
//! portal's `publishDateFrom`/`publishDateTo` parameters.

use chrono::{Duration, NaiveDate};

/// An inclusive publication date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range; callers must ensure `from <= to` (config validation
    /// enforces this for user input).
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Number of days covered, inclusive
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Whether the range spans more than one day and can be subdivided
    pub fn can_split(&self) -> bool {
        self.from < self.to
    }

    /// Splits the range at its midpoint into two contiguous halves
    ///
    /// Returns `None` for single-day ranges. The halves partition the
    /// original: `left.to` is immediately followed by `right.from`.
    pub fn split(&self) -> Option<(DateRange, DateRange)> {
        if !self.can_split() {
            return None;
        }
        let span = (self.to - self.from).num_days();
        let mid = self.from + Duration::days(span / 2);
        let next = mid.succ_opt()?;
        Some((
            DateRange::new(self.from, mid),
            DateRange::new(next, self.to),
        ))
    }

    /// Lower bound formatted for the portal's query string
    pub fn from_param(&self) -> String {
        self.from.format("%d.%m.%Y").to_string()
    }

    /// Upper bound formatted for the portal's query string
    pub fn to_param(&self) -> String {
        self.to.format("%d.%m.%Y").to_string()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_inclusive() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 1));
        assert_eq!(range.days(), 1);

        let range = DateRange::new(date(2020, 1, 1), date(2020, 12, 31));
        assert_eq!(range.days(), 366); // 2020 is a leap year
    }

    #[test]
    fn test_split_partitions_range() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 12, 31));
        let (left, right) = range.split().unwrap();

        assert_eq!(left.from, range.from);
        assert_eq!(right.to, range.to);
        assert_eq!(left.to.succ_opt().unwrap(), right.from);
        assert_eq!(left.days() + right.days(), range.days());
    }

    #[test]
    fn test_split_two_days() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 2));
        let (left, right) = range.split().unwrap();
        assert_eq!(left, DateRange::new(date(2020, 1, 1), date(2020, 1, 1)));
        assert_eq!(right, DateRange::new(date(2020, 1, 2), date(2020, 1, 2)));
    }

    #[test]
    fn test_single_day_cannot_split() {
        let range = DateRange::new(date(2020, 6, 15), date(2020, 6, 15));
        assert!(!range.can_split());
        assert!(range.split().is_none());
    }

    #[test]
    fn test_query_params_format() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 3, 31));
        assert_eq!(range.from_param(), "01.01.2020");
        assert_eq!(range.to_param(), "31.03.2020");
    }
}
