use crate::error::{Result, StarcheckError};
use chrono::{DateTime, Utc};

/// Inter-arrival gaps in seconds between consecutive timestamps.
///
/// The series must be ascending and hold at least two points. Equal
/// neighbors produce a zero gap, which is valid (bulk events can share a
/// second).
pub fn intervals_seconds(times: &[DateTime<Utc>]) -> Result<Vec<f64>> {
    if times.len() < 2 {
        return Err(StarcheckError::InsufficientData {
            needed: 2,
            got: times.len(),
        });
    }
    let mut gaps = Vec::with_capacity(times.len() - 1);
    for (i, pair) in times.windows(2).enumerate() {
        let secs = (pair[1] - pair[0]).num_milliseconds() as f64 / 1000.0;
        if secs < 0.0 {
            return Err(StarcheckError::UnorderedTimestamps(i + 1));
        }
        gaps.push(secs);
    }
    Ok(gaps)
}

pub fn to_minutes(seconds: &[f64]) -> Vec<f64> {
    seconds.iter().map(|s| s / 60.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 13, 10, minute, second)
            .unwrap()
    }

    #[test]
    fn gaps_between_consecutive_timestamps() {
        let times = vec![at(0, 0), at(1, 30), at(5, 0)];
        let gaps = intervals_seconds(&times).expect("should extract");
        assert_eq!(gaps, vec![90.0, 210.0]);
        assert_eq!(to_minutes(&gaps), vec![1.5, 3.5]);
    }

    #[test]
    fn single_timestamp_is_insufficient() {
        let err = intervals_seconds(&[at(0, 0)]).expect_err("one point is not a series");
        assert!(matches!(
            err,
            StarcheckError::InsufficientData { needed: 2, got: 1 }
        ));
    }

    #[test]
    fn descending_timestamps_are_rejected() {
        let err = intervals_seconds(&[at(5, 0), at(0, 0)]).expect_err("must be ascending");
        assert!(matches!(err, StarcheckError::UnorderedTimestamps(1)));
    }

    #[test]
    fn equal_timestamps_give_zero_gap() {
        let gaps = intervals_seconds(&[at(0, 0), at(0, 0)]).expect("equal points are allowed");
        assert_eq!(gaps, vec![0.0]);
    }
}
