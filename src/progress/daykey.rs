/// Calendar-day identity and time-range bucketing
///
/// This module collapses timestamps to calendar days and partitions a date
/// range into day, week, or month buckets for the progress chart.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::ProgressError;

/// Collapse an instant to its calendar day in UTC
///
/// UTC is the single day-key zone for the whole system: two instants compare
/// equal at day level iff they fall on the same UTC calendar day. All stored
/// completion days and all range endpoints use this identity.
pub fn day_key(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Granularity of a bucketed range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day
    Day,
    /// One bucket per ISO week, Monday through Sunday
    Week,
    /// One bucket per calendar month
    Month,
}

impl Granularity {
    /// Parse a granularity from its lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Some(Granularity::Day),
            "week" => Some(Granularity::Week),
            "month" => Some(Granularity::Month),
            _ => None,
        }
    }
}

/// A contiguous calendar sub-range used to group completions
///
/// Week and month buckets cover their full natural span (Monday..Sunday,
/// first..last of month) even when that spills outside the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First day of the bucket, inclusive
    pub start: NaiveDate,
    /// Last day of the bucket, inclusive
    pub end: NaiveDate,
}

impl Bucket {
    /// Check whether a day falls inside this bucket's span
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Human-readable label for chart axes
    pub fn label(&self, granularity: Granularity) -> String {
        match granularity {
            Granularity::Day => self.start.format("%Y-%m-%d").to_string(),
            Granularity::Week => self.start.format("%b %-d").to_string(),
            Granularity::Month => self.start.format("%b %Y").to_string(),
        }
    }
}

/// Partition `[start, end]` into buckets of the given granularity
///
/// Buckets are returned oldest first. Day buckets cover exactly the range;
/// week buckets are every Monday-start ISO week whose span intersects the
/// range; month buckets are every calendar month intersecting the range.
/// An inverted range is rejected rather than coerced.
pub fn bucketize(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> Result<Vec<Bucket>, ProgressError> {
    if end < start {
        return Err(ProgressError::InvalidRange { start, end });
    }

    let mut buckets = Vec::new();
    match granularity {
        Granularity::Day => {
            let mut day = start;
            while day <= end {
                buckets.push(Bucket { start: day, end: day });
                day += Duration::days(1);
            }
        }
        Granularity::Week => {
            // Back up to the Monday of the week containing `start`
            let mut monday = start - Duration::days(start.weekday().num_days_from_monday() as i64);
            while monday <= end {
                buckets.push(Bucket {
                    start: monday,
                    end: monday + Duration::days(6),
                });
                monday += Duration::days(7);
            }
        }
        Granularity::Month => {
            let mut first = start.with_day(1).unwrap_or(start);
            while first <= end {
                let next_first = first + Months::new(1);
                buckets.push(Bucket {
                    start: first,
                    end: next_first - Duration::days(1),
                });
                first = next_first;
            }
        }
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_key_collapses_same_utc_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 15, 0, 30, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 1).unwrap();

        assert_eq!(day_key(morning), day_key(night));
        assert_ne!(day_key(night), day_key(next));
        assert_eq!(day_key(morning), date(2024, 3, 15));
    }

    #[test]
    fn test_day_buckets_cover_inclusive_range() {
        let buckets = bucketize(date(2024, 1, 1), date(2024, 1, 7), Granularity::Day).unwrap();
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].start, date(2024, 1, 1));
        assert_eq!(buckets[6].end, date(2024, 1, 7));
        // Single-day range yields a single bucket
        let one = bucketize(date(2024, 1, 1), date(2024, 1, 1), Granularity::Day).unwrap();
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_week_buckets_run_monday_to_sunday() {
        // 2024-01-03 is a Wednesday; the first bucket backs up to Monday 01-01
        let buckets = bucketize(date(2024, 1, 3), date(2024, 1, 15), Granularity::Week).unwrap();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].start, date(2024, 1, 1));
        assert_eq!(buckets[0].end, date(2024, 1, 7));
        assert_eq!(buckets[1].start, date(2024, 1, 8));
        // The last bucket spills past the requested end
        assert_eq!(buckets[2].start, date(2024, 1, 15));
        assert_eq!(buckets[2].end, date(2024, 1, 21));
    }

    #[test]
    fn test_month_buckets_cover_whole_months() {
        let buckets = bucketize(date(2024, 1, 20), date(2024, 3, 5), Granularity::Month).unwrap();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].start, date(2024, 1, 1));
        assert_eq!(buckets[0].end, date(2024, 1, 31));
        // February 2024 is a leap month
        assert_eq!(buckets[1].end, date(2024, 2, 29));
        assert_eq!(buckets[2].start, date(2024, 3, 1));
        assert_eq!(buckets[2].end, date(2024, 3, 31));
    }

    #[test]
    fn test_month_buckets_cross_year_boundary() {
        let buckets = bucketize(date(2023, 12, 15), date(2024, 1, 15), Granularity::Month).unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, date(2023, 12, 1));
        assert_eq!(buckets[1].start, date(2024, 1, 1));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = bucketize(date(2024, 1, 2), date(2024, 1, 1), Granularity::Day);
        assert!(result.is_err());
    }

    #[test]
    fn test_bucket_labels() {
        let day = Bucket { start: date(2024, 1, 5), end: date(2024, 1, 5) };
        assert_eq!(day.label(Granularity::Day), "2024-01-05");

        let week = Bucket { start: date(2024, 1, 1), end: date(2024, 1, 7) };
        assert_eq!(week.label(Granularity::Week), "Jan 1");

        let month = Bucket { start: date(2024, 1, 1), end: date(2024, 1, 31) };
        assert_eq!(month.label(Granularity::Month), "Jan 2024");
    }
}
