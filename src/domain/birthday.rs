//! Upcoming birthday computation.
//!
//! Birthdays are re-anchored onto their next occurrence relative to `today`
//! and partitioned into four mutually exclusive buckets. All comparisons are
//! done on calendar dates (`NaiveDate`), never on wall-clock instants.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::Serialize;

/// Current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn next_day() -> NaiveDate {
    next_day_from(today())
}

pub fn next_week() -> NaiveDate {
    next_week_from(today())
}

pub fn next_month() -> NaiveDate {
    next_month_from(today())
}

pub fn next_day_from(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

pub fn next_week_from(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX)
}

/// Same day of the following month, clamped to that month's last day
/// (31 January becomes 28 or 29 February).
pub fn next_month_from(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

/// Range boundaries computed once per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub today: NaiveDate,
    pub next_day: NaiveDate,
    pub next_week: NaiveDate,
    pub next_month: NaiveDate,
}

impl DateRange {
    pub fn from_today(today: NaiveDate) -> Self {
        Self {
            today,
            next_day: next_day_from(today),
            next_week: next_week_from(today),
            next_month: next_month_from(today),
        }
    }

    pub fn classify(&self, occurrence: NaiveDate) -> BucketKind {
        if occurrence == self.today {
            BucketKind::Today
        } else if occurrence == self.next_day {
            BucketKind::NextDay
        } else if occurrence < self.next_week {
            BucketKind::NextWeek
        } else {
            BucketKind::NextMonth
        }
    }
}

/// Named range an upcoming birthday falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketKind {
    Today,
    NextDay,
    NextWeek,
    NextMonth,
}

impl BucketKind {
    /// Fixed display order.
    pub const ALL: [BucketKind; 4] = [
        BucketKind::Today,
        BucketKind::NextDay,
        BucketKind::NextWeek,
        BucketKind::NextMonth,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BucketKind::Today => "today",
            BucketKind::NextDay => "nextDay",
            BucketKind::NextWeek => "nextWeek",
            BucketKind::NextMonth => "nextMonth",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BucketKind::Today => "Aujourd'hui",
            BucketKind::NextDay => "Demain",
            BucketKind::NextWeek => "Cette semaine",
            BucketKind::NextMonth => "Ce mois-ci",
        }
    }

    fn index(self) -> usize {
        match self {
            BucketKind::Today => 0,
            BucketKind::NextDay => 1,
            BucketKind::NextWeek => 2,
            BucketKind::NextMonth => 3,
        }
    }
}

/// Projection returned by the upcoming birthdays endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthdayPerson {
    pub name: String,
    pub birth_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayEntry {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Birthday re-anchored onto its next occurrence.
    pub next_occurrence: NaiveDate,
    /// Age reached on `next_occurrence`; `None` when the recorded birth date
    /// is not before it.
    pub turning: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BirthdayBucket {
    pub kind: BucketKind,
    pub key: &'static str,
    pub label: &'static str,
    pub entries: Vec<BirthdayEntry>,
}

impl BirthdayBucket {
    fn new(kind: BucketKind) -> Self {
        Self {
            kind,
            key: kind.key(),
            label: kind.label(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Projects `month`/`day` onto `year`. 29 February falls back to
/// 28 February in non-leap years.
fn anchor(year: i32, birth_date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day() - 1))
}

/// Next date on or after `today` on which `birth_date` is celebrated.
pub fn next_occurrence(birth_date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anchor(today.year(), birth_date)?;
    if this_year < today {
        anchor(today.year() + 1, birth_date)
    } else {
        Some(this_year)
    }
}

fn age_on(birth_date: NaiveDate, occurrence: NaiveDate) -> Option<u32> {
    u32::try_from(occurrence.year() - birth_date.year())
        .ok()
        .filter(|age| *age > 0)
}

/// Partitions `people` into the four buckets, in display order, each sorted
/// by next occurrence then by name.
pub fn bucket_birthdays(people: Vec<BirthdayPerson>, today: NaiveDate) -> Vec<BirthdayBucket> {
    let range = DateRange::from_today(today);
    let mut buckets = BucketKind::ALL.map(BirthdayBucket::new);

    for person in people {
        let Some(occurrence) = next_occurrence(person.birth_date, today) else {
            log::warn!(
                "Skipping birthday of {} that cannot be anchored near {today}",
                person.name
            );
            continue;
        };
        let kind = range.classify(occurrence);
        buckets[kind.index()].entries.push(BirthdayEntry {
            turning: age_on(person.birth_date, occurrence),
            name: person.name,
            birth_date: person.birth_date,
            next_occurrence: occurrence,
        });
    }

    for bucket in &mut buckets {
        bucket.entries.sort_by(|a, b| {
            a.next_occurrence
                .cmp(&b.next_occurrence)
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    buckets.into()
}
