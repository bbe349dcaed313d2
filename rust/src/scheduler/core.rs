//! Per-channel publication schedule generation.

use chrono::{NaiveDate, NaiveTime};
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::ScheduleConfig;
use crate::log_changes;
use crate::models::{FrequencyPolicy, ScheduleRequest, ScheduledSlot};

use super::cadence::{fill_consecutive_days, fill_spread_days};

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Unknown frequency policy: {0}")]
    UnknownPolicy(String),
    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// Parse a preferred time such as `"09:30"` (seconds are accepted too).
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
}

/// Produce chronological publication slots for every channel in `quotas`.
///
/// Daily and twice-daily policies fill consecutive days from the start date;
/// three-per-week and weekly policies spread one slot per day evenly across
/// the range. Each channel receives `min(quota, policy capacity)` slots, all
/// within `[start_date, end_date]`. Channels without preferred times use
/// `config.default_time`.
///
/// Channels are processed in sorted id order so a seeded `rng` reproduces the
/// same schedule.
///
/// # Errors
/// * `ScheduleError::InvalidRange` if `start_date > end_date`
pub fn schedule<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    quotas: &HashMap<String, u32>,
    config: &ScheduleConfig,
    rng: &mut R,
) -> Result<HashMap<String, Vec<ScheduledSlot>>, ScheduleError> {
    if request.start_date > request.end_date {
        return Err(ScheduleError::InvalidRange {
            start: request.start_date,
            end: request.end_date,
        });
    }

    let verbosity = config.verbosity;
    let total_days = request.total_days();
    let policy = request.policy;
    log_changes!(
        verbosity,
        "Scheduling {} days ({} to {}), policy {}",
        total_days,
        request.start_date,
        request.end_date,
        policy
    );

    let mut channel_ids: Vec<&String> = quotas.keys().collect();
    channel_ids.sort();

    let mut result: HashMap<String, Vec<ScheduledSlot>> = HashMap::with_capacity(quotas.len());
    for channel_id in channel_ids {
        let quota = quotas[channel_id];
        let target = quota.min(policy.capacity(total_days));

        let default_times = [config.default_time];
        let times: &[NaiveTime] = match request.preferred_times.get(channel_id) {
            Some(times) if !times.is_empty() => times.as_slice(),
            _ => &default_times[..],
        };

        let placed = match policy {
            FrequencyPolicy::Daily | FrequencyPolicy::TwiceDaily => {
                let slots_per_day = policy.slots_per_day() as u32;
                fill_consecutive_days(
                    request.start_date,
                    total_days,
                    slots_per_day,
                    target,
                    times,
                    verbosity,
                    rng,
                )
            }
            FrequencyPolicy::ThreePerWeek | FrequencyPolicy::Weekly => {
                fill_spread_days(request.start_date, total_days, target, times, verbosity, rng)
            }
        };

        let slots: Vec<ScheduledSlot> = placed
            .into_iter()
            .map(|(date, time)| ScheduledSlot {
                channel_id: channel_id.clone(),
                timestamp: date.and_time(time),
            })
            .collect();

        log_changes!(
            verbosity,
            "  {}: {} of {} requested slots",
            channel_id,
            slots.len(),
            quota
        );
        result.insert(channel_id.clone(), slots);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn quotas(entries: &[(&str, u32)]) -> HashMap<String, u32> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn run(
        request: &ScheduleRequest,
        quotas: &HashMap<String, u32>,
    ) -> HashMap<String, Vec<ScheduledSlot>> {
        let mut rng = StdRng::seed_from_u64(1234);
        schedule(request, quotas, &ScheduleConfig::default(), &mut rng).unwrap()
    }

    fn assert_within_and_ordered(request: &ScheduleRequest, slots: &[ScheduledSlot]) {
        for slot in slots {
            let date = slot.timestamp.date();
            assert!(date >= request.start_date && date <= request.end_date);
        }
        assert!(slots.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_daily_one_slot_per_day() {
        let request = ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 5), FrequencyPolicy::Daily)
            .with_times("ig", vec![t(9, 0), t(18, 0)]);
        let result = run(&request, &quotas(&[("ig", 5)]));

        let slots = &result["ig"];
        assert_eq!(slots.len(), 5);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.timestamp.date(), d(2025, 3, 1 + i as u32));
            assert_eq!(slot.channel_id, "ig");
        }
        assert_within_and_ordered(&request, slots);
    }

    #[test]
    fn test_weekly_spreads_evenly() {
        let request =
            ScheduleRequest::new(d(2025, 2, 1), d(2025, 2, 28), FrequencyPolicy::Weekly)
                .with_times("fb", vec![t(10, 0)]);
        let result = run(&request, &quotas(&[("fb", 4)]));

        let dates: Vec<NaiveDate> = result["fb"].iter().map(|s| s.timestamp.date()).collect();
        assert_eq!(
            dates,
            vec![d(2025, 2, 1), d(2025, 2, 10), d(2025, 2, 19), d(2025, 2, 28)]
        );
        assert!(result["fb"].iter().all(|s| s.timestamp.time() == t(10, 0)));
    }

    #[test]
    fn test_twice_daily_capacity_caps_quota() {
        let request =
            ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 3), FrequencyPolicy::TwiceDaily)
                .with_times("ig", vec![t(9, 0), t(13, 0), t(19, 0)]);
        let result = run(&request, &quotas(&[("ig", 50)]));

        let slots = &result["ig"];
        assert_eq!(slots.len(), 6);
        for day in slots.chunks(2) {
            assert_eq!(day[0].timestamp.date(), day[1].timestamp.date());
            assert_ne!(day[0].timestamp.time(), day[1].timestamp.time());
        }
        assert_within_and_ordered(&request, slots);
    }

    #[test]
    fn test_low_cadence_quota_above_days() {
        let request =
            ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 4), FrequencyPolicy::ThreePerWeek);
        let result = run(&request, &quotas(&[("li", 9)]));
        let dates: Vec<NaiveDate> = result["li"].iter().map(|s| s.timestamp.date()).collect();
        assert_eq!(
            dates,
            vec![d(2025, 3, 1), d(2025, 3, 2), d(2025, 3, 3), d(2025, 3, 4)]
        );
    }

    #[test]
    fn test_single_low_cadence_post_on_start_date() {
        let request =
            ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 31), FrequencyPolicy::Weekly);
        let result = run(&request, &quotas(&[("li", 1)]));
        assert_eq!(result["li"].len(), 1);
        assert_eq!(result["li"][0].timestamp.date(), d(2025, 3, 1));
    }

    #[test]
    fn test_missing_preferred_times_use_default() {
        let request = ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 2), FrequencyPolicy::Daily)
            .with_times("fb", Vec::new());
        let result = run(&request, &quotas(&[("fb", 2), ("ig", 1)]));

        for slot in result["fb"].iter().chain(&result["ig"]) {
            assert_eq!(slot.timestamp.time(), t(12, 0));
        }
        assert_eq!(result["ig"].len(), 1);
    }

    #[test]
    fn test_zero_quota_channel_is_empty() {
        let request = ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 7), FrequencyPolicy::Daily);
        let result = run(&request, &quotas(&[("fb", 0)]));
        assert!(result["fb"].is_empty());
    }

    #[test]
    fn test_counts_and_bounds_across_policies() {
        let policies = [
            FrequencyPolicy::Daily,
            FrequencyPolicy::TwiceDaily,
            FrequencyPolicy::ThreePerWeek,
            FrequencyPolicy::Weekly,
        ];
        for policy in policies {
            for days in [1u32, 2, 7, 30] {
                let start = d(2025, 1, 1);
                let end = start.checked_add_days(chrono::Days::new(u64::from(days - 1))).unwrap();
                let request = ScheduleRequest::new(start, end, policy)
                    .with_times("a", vec![t(7, 0), t(7, 0), t(21, 15)]);
                for quota in [0u32, 1, 3, 13, 100] {
                    let result = run(&request, &quotas(&[("a", quota)]));
                    let slots = &result["a"];
                    assert_eq!(
                        slots.len() as u32,
                        quota.min(policy.capacity(days)),
                        "{} days={} quota={}",
                        policy,
                        days,
                        quota
                    );
                    assert_within_and_ordered(&request, slots);
                }
            }
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let request = ScheduleRequest::new(d(2025, 3, 5), d(2025, 3, 1), FrequencyPolicy::Daily);
        let mut rng = StdRng::seed_from_u64(0);
        let err = schedule(
            &request,
            &quotas(&[("fb", 3)]),
            &ScheduleConfig::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange { .. }));
    }

    #[test]
    fn test_seeded_schedule_is_reproducible() {
        let request =
            ScheduleRequest::new(d(2025, 3, 1), d(2025, 3, 14), FrequencyPolicy::TwiceDaily)
                .with_times("fb", vec![t(8, 0), t(12, 0), t(17, 0), t(21, 0)])
                .with_times("ig", vec![t(11, 0), t(19, 0)]);
        let q = quotas(&[("fb", 20), ("ig", 9)]);
        assert_eq!(run(&request, &q), run(&request, &q));
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("09:30").unwrap(), t(9, 30));
        assert_eq!(parse_time_of_day(" 18:05:00 ").unwrap(), t(18, 5));
        assert_eq!(
            parse_time_of_day("25:00"),
            Err(ScheduleError::InvalidTime("25:00".to_string()))
        );
        assert!(parse_time_of_day("noon").is_err());
    }
}
