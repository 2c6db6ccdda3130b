use crate::types::config::TemporalConfig;
use crate::types::report::{HourShare, TemporalSummary};
use chrono::{DateTime, Timelike, Utc};

/// Time-of-day concentration: hour-of-day histogram plus the share of
/// events whose minute-of-hour falls in the configured boundary windows.
/// Scheduled jobs pile up at specific clock positions; organic activity
/// does not.
pub fn concentration(times: &[DateTime<Utc>], config: &TemporalConfig) -> TemporalSummary {
    let total = times.len();
    if total == 0 {
        return TemporalSummary {
            top_hours: Vec::new(),
            half_hour_pct: 0.0,
            top_of_hour_pct: 0.0,
            total_events: 0,
        };
    }

    let mut histogram = [0usize; 24];
    let mut near_half = 0usize;
    let mut near_top = 0usize;
    for t in times {
        histogram[t.hour() as usize] += 1;
        let minute = t.minute();
        if config.half_hour_window.contains(minute) {
            near_half += 1;
        }
        if config.top_of_hour_window.contains(minute) {
            near_top += 1;
        }
    }

    let mut top_hours: Vec<HourShare> = histogram
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(hour, count)| HourShare {
            hour: hour as u32,
            count: *count,
            share_pct: *count as f64 / total as f64 * 100.0,
        })
        .collect();
    top_hours.sort_by(|a, b| b.count.cmp(&a.count).then(a.hour.cmp(&b.hour)));
    top_hours.truncate(config.top_hours);

    TemporalSummary {
        top_hours,
        half_hour_pct: near_half as f64 / total as f64 * 100.0,
        top_of_hour_pct: near_top as f64 / total as f64 * 100.0,
        total_events: total,
    }
}
