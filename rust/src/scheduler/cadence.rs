//! Day and time-of-day placement for the two cadence families.

use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;

use crate::{log_checks, log_debug};

/// Times of day emitted for one channel on consecutive days.
///
/// Fills `slots_per_day` slots per day from `start` until `target` slots are
/// placed or `total_days` run out. Same-day slots get distinct times while the
/// preferred list has more than one distinct value: a random start index is
/// probed forward until an unused time is found. Each day's times are sorted
/// so the output stays chronological.
pub fn fill_consecutive_days<R: Rng + ?Sized>(
    start: NaiveDate,
    total_days: u32,
    slots_per_day: u32,
    target: u32,
    times: &[NaiveTime],
    verbosity: u8,
    rng: &mut R,
) -> Vec<(NaiveDate, NaiveTime)> {
    let mut placed: Vec<(NaiveDate, NaiveTime)> = Vec::with_capacity(target as usize);

    for day in 0..total_days {
        let emitted = placed.len() as u32;
        if emitted >= target {
            break;
        }
        let date = start
            .checked_add_days(Days::new(u64::from(day)))
            .unwrap_or(start);
        let today = slots_per_day.min(target - emitted);

        let mut day_times: Vec<NaiveTime> = Vec::with_capacity(today as usize);
        for _ in 0..today {
            let mut index = rng.gen_range(0..times.len());
            let mut attempts = 0;
            while attempts < times.len() && day_times.contains(&times[index]) {
                index = (index + 1) % times.len();
                attempts += 1;
            }
            if attempts == times.len() {
                log_checks!(verbosity, "  {}: no unused preferred time, reusing", date);
            }
            log_debug!(verbosity, "  {}: probe settled on index {}", date, index);
            day_times.push(times[index]);
        }

        day_times.sort();
        placed.extend(day_times.into_iter().map(|time| (date, time)));
    }

    placed
}

/// Day offsets spreading `count` single slots evenly over `total_days`.
///
/// The first slot lands on day 0 and, for more than one slot, the last on
/// day `total_days - 1`; offsets are `round(k * interval)` with
/// `interval = (total_days - 1) / (count - 1)`. `count` must not exceed
/// `total_days`, which keeps every interval at least one day and the offsets
/// strictly increasing.
pub fn spread_day_offsets(total_days: u32, count: u32) -> Vec<u32> {
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let last = total_days.saturating_sub(1);
            let interval = f64::from(last) / f64::from(count - 1);
            (0..count)
                .map(|k| ((f64::from(k) * interval).round() as u32).min(last))
                .collect()
        }
    }
}

/// One slot per spread day, each at a uniformly drawn preferred time.
pub fn fill_spread_days<R: Rng + ?Sized>(
    start: NaiveDate,
    total_days: u32,
    target: u32,
    times: &[NaiveTime],
    verbosity: u8,
    rng: &mut R,
) -> Vec<(NaiveDate, NaiveTime)> {
    let offsets = spread_day_offsets(total_days, target.min(total_days));
    log_debug!(verbosity, "  spread offsets {:?}", offsets);

    offsets
        .into_iter()
        .map(|offset| {
            let date = start
                .checked_add_days(Days::new(u64::from(offset)))
                .unwrap_or(start);
            (date, times[rng.gen_range(0..times.len())])
        })
        .collect()
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

    #[test]
    fn test_spread_offsets() {
        assert_eq!(spread_day_offsets(28, 4), vec![0, 9, 18, 27]);
        assert_eq!(spread_day_offsets(7, 3), vec![0, 3, 6]);
        // interval 2.5: 0, 2.5 -> 3, 5
        assert_eq!(spread_day_offsets(6, 3), vec![0, 3, 5]);
        assert_eq!(spread_day_offsets(5, 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(spread_day_offsets(10, 1), vec![0]);
        assert!(spread_day_offsets(10, 0).is_empty());
    }

    #[test]
    fn test_spread_offsets_strictly_increasing() {
        for total_days in 1..60 {
            for count in 1..=total_days {
                let offsets = spread_day_offsets(total_days, count);
                assert_eq!(offsets.len(), count as usize);
                assert!(offsets.windows(2).all(|w| w[0] < w[1]));
                assert!(offsets.iter().all(|&o| o < total_days));
            }
        }
    }

    #[test]
    fn test_twice_daily_uses_distinct_times() {
        let mut rng = StdRng::seed_from_u64(17);
        let times = [t(9, 0), t(18, 30)];
        let placed = fill_consecutive_days(d(2025, 3, 1), 10, 2, 20, &times, 0, &mut rng);

        assert_eq!(placed.len(), 20);
        for pair in placed.chunks(2) {
            assert_eq!(pair[0].0, pair[1].0);
            assert_eq!(pair[0].1, t(9, 0));
            assert_eq!(pair[1].1, t(18, 30));
        }
    }

    #[test]
    fn test_single_preferred_time_repeats_same_day() {
        let mut rng = StdRng::seed_from_u64(5);
        let placed = fill_consecutive_days(d(2025, 3, 1), 2, 2, 4, &[t(12, 0)], 0, &mut rng);
        assert_eq!(placed.len(), 4);
        assert!(placed.iter().all(|(_, time)| *time == t(12, 0)));
    }

    #[test]
    fn test_consecutive_stops_at_target() {
        let mut rng = StdRng::seed_from_u64(5);
        let times = [t(8, 0), t(12, 0), t(20, 0)];
        let placed = fill_consecutive_days(d(2025, 3, 1), 10, 2, 5, &times, 0, &mut rng);
        assert_eq!(placed.len(), 5);
        // Third day only carries the fifth slot
        assert_eq!(placed[4].0, d(2025, 3, 3));
        assert_eq!(placed.iter().filter(|(date, _)| *date == d(2025, 3, 3)).count(), 1);
    }
}
