//! Marketing key dates (holidays, seasonal events) relevant to a campaign.

use chrono::{Datelike, NaiveDate};

/// Country code matching every country.
pub const ALL_COUNTRIES: &str = "ALL";

/// A recurring or one-off event worth themed content.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyDate {
    pub name: String,
    pub description: String,
    /// Country codes; `ALL` matches any country
    pub countries: Vec<String>,
    pub start: NaiveDate,
    /// Inclusive; `None` for single-day events
    pub end: Option<NaiveDate>,
    /// Movable events (e.g. lunar calendar) are stored with their actual year
    /// and never re-anchored
    pub movable: bool,
    /// 1-5
    pub importance: u8,
    pub suggested_themes: Vec<String>,
}

impl KeyDate {
    pub fn fixed(name: impl Into<String>, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            countries: vec![ALL_COUNTRIES.to_string()],
            start,
            end,
            movable: false,
            importance: 3,
            suggested_themes: Vec::new(),
        }
    }

    pub fn movable(name: impl Into<String>, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self {
            movable: true,
            ..Self::fixed(name, start, end)
        }
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn applies_to(&self, country: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c == ALL_COUNTRIES || c.eq_ignore_ascii_case(country))
    }

    fn end_or_start(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    /// The event's dates anchored to `year`.
    ///
    /// An event whose end month precedes its start month runs into the next
    /// year.
    fn anchored(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let end = self.end_or_start();
        let start = with_year(self.start, year)?;
        let end_year = if self.start.month() > end.month() {
            year + 1
        } else {
            year
        };
        Some((start, with_year(end, end_year)?))
    }

    /// The first occurrence of this event overlapping `[from, to]`.
    pub fn occurrence_in(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let overlaps = |(start, end): &(NaiveDate, NaiveDate)| *start <= to && *end >= from;

        if self.movable {
            return Some((self.start, self.end_or_start())).filter(overlaps);
        }
        // Start one year early for events spanning the new year
        (from.year() - 1..=to.year())
            .filter_map(|year| self.anchored(year))
            .find(overlaps)
    }
}

/// Same month and day in another year; 29 February maps to the 28th.
fn with_year(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day().saturating_sub(1)))
}

/// Collection of key dates.
#[derive(Clone, Debug, Default)]
pub struct KeyDateCalendar {
    events: Vec<KeyDate>,
}

impl KeyDateCalendar {
    pub fn new(events: Vec<KeyDate>) -> Self {
        Self { events }
    }

    pub fn push(&mut self, event: KeyDate) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events for `country` overlapping `[start, end]`.
    pub fn for_period(&self, country: &str, start: NaiveDate, end: NaiveDate) -> Vec<&KeyDate> {
        self.events
            .iter()
            .filter(|e| e.applies_to(country) && e.occurrence_in(start, end).is_some())
            .collect()
    }

    /// Events active on `date`, regardless of country.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&KeyDate> {
        self.events
            .iter()
            .filter(|e| e.occurrence_in(date, date).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn calendar() -> KeyDateCalendar {
        KeyDateCalendar::new(vec![
            KeyDate::fixed("Valentine's Day", d(2020, 2, 14), None),
            KeyDate::fixed("Holiday season", d(2020, 12, 20), Some(d(2021, 1, 5))),
            KeyDate::fixed("Fête de la musique", d(2020, 6, 21), None).with_countries(["FR"]),
            KeyDate::movable("Ramadan", d(2025, 3, 1), Some(d(2025, 3, 30)))
                .with_countries(["DZ", "MA"]),
        ])
    }

    #[test]
    fn test_fixed_dates_reanchor_to_period_year() {
        let calendar = calendar();
        let found = calendar.for_period("US", d(2025, 2, 1), d(2025, 2, 28));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Valentine's Day");
    }

    #[test]
    fn test_new_year_spanning_event() {
        let calendar = calendar();
        let january = calendar.for_period("US", d(2026, 1, 2), d(2026, 1, 10));
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].name, "Holiday season");

        let december = calendar.for_period("US", d(2025, 12, 24), d(2025, 12, 26));
        assert_eq!(december[0].name, "Holiday season");
    }

    #[test]
    fn test_country_filter() {
        let calendar = calendar();
        let june = (d(2025, 6, 1), d(2025, 6, 30));
        assert_eq!(calendar.for_period("fr", june.0, june.1).len(), 1);
        assert!(calendar.for_period("DE", june.0, june.1).is_empty());
    }

    #[test]
    fn test_movable_dates_keep_their_year() {
        let calendar = calendar();
        assert_eq!(calendar.for_period("DZ", d(2025, 3, 10), d(2025, 3, 12)).len(), 1);
        assert!(calendar.for_period("DZ", d(2026, 3, 10), d(2026, 3, 12)).is_empty());
        assert!(calendar.for_period("FR", d(2025, 3, 10), d(2025, 3, 12)).is_empty());
    }

    #[test]
    fn test_on_date() {
        let calendar = calendar();
        let names: Vec<&str> = calendar
            .on_date(d(2027, 1, 1))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Holiday season"]);
        assert!(calendar.on_date(d(2027, 2, 15)).is_empty());
    }

    #[test]
    fn test_leap_day_reanchors_to_28th() {
        let event = KeyDate::fixed("Leap promo", d(2024, 2, 29), None);
        assert_eq!(
            event.occurrence_in(d(2025, 2, 1), d(2025, 2, 28)),
            Some((d(2025, 2, 28), d(2025, 2, 28)))
        );
    }
}
