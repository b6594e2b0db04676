use crate::models::{
    Choice, Column, DATE_FORMAT, FieldKind, FormEntry, Fluid, Mood, PregnancyTest, RawEntry,
    Record, SexMethod, YesNo,
};
use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Why a submission did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The form has not been submitted yet (click count is zero).
    #[error("not submitted")]
    NotSubmitted,

    #[error("Date is required (DD-MM-YYYY)")]
    MissingDate,

    #[error("invalid Date '{0}': expected DD-MM-YYYY")]
    InvalidDate(String),

    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: u8,
    },

    #[error("unknown {field} value '{value}'")]
    UnknownChoice { field: &'static str, value: String },

    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },
}

impl Rejection {
    pub fn is_idle(&self) -> bool {
        matches!(self, Rejection::NotSubmitted)
    }
}

pub fn normalize(raw: &RawEntry, first_date: Option<NaiveDate>) -> Result<Record, Rejection> {
    normalize_at(raw, first_date, Local::now().date_naive())
}

/// Validates one submission against the log's first date and the given day.
pub fn normalize_at(
    raw: &RawEntry,
    first_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Record, Rejection> {
    if raw.clicks == 0 {
        return Err(Rejection::NotSubmitted);
    }

    let date = parse_date(raw.date.as_deref())?;
    let day_of_cycle = raw
        .day_of_cycle
        .unwrap_or_else(|| default_day_of_cycle(first_date, today));

    Ok(Record {
        date,
        day_of_cycle,
        note: text(raw.note.as_deref()),
        sex: choice::<SexMethod>(Column::Sex, raw.sex.as_deref())?,
        bleeding: scale(Column::Bleeding, raw.bleeding)?,
        fluid: choice::<Fluid>(Column::Fluid, raw.fluid.as_deref())?,
        cramps: scale(Column::Cramps, raw.cramps)?,
        mood: choice::<Mood>(Column::Mood, raw.mood.as_deref())?,
        acne: scale(Column::Acne, raw.acne)?,
        stress_level: scale(Column::StressLevel, raw.stress_level)?,
        presumed_ovulation: YesNo::from_toggles(&raw.presumed_ovulation),
        sleep_duration: text(raw.sleep_duration.as_deref()),
        weight: text(raw.weight.as_deref()),
        exercise: YesNo::from_toggles(&raw.exercise),
        pregnancy_test: choice::<PregnancyTest>(Column::PregnancyTest, raw.pregnancy_test.as_deref())?,
    })
}

/// Counts from the first logged date, not the most recent one.
pub fn default_day_of_cycle(first_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match first_date {
        None => 1,
        Some(first) => (today - first).num_days() + 1,
    }
}

pub fn parse_date(value: Option<&str>) -> Result<NaiveDate, Rejection> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(Rejection::MissingDate);
    }
    if !is_day_month_year(value) {
        return Err(Rejection::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| Rejection::InvalidDate(value.to_string()))
}

/// Exactly `dd-dd-dddd` in ASCII digits; chrono alone also takes short or signed fields.
fn is_day_month_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn scale(column: Column, value: Option<i64>) -> Result<u8, Rejection> {
    let FieldKind::Scale { max } = column.kind() else {
        unreachable!("{} is not a scale column", column.name());
    };
    let value = value.unwrap_or(0);
    if (0..=i64::from(max)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(Rejection::OutOfRange {
            field: column.name(),
            value,
            max,
        })
    }
}

fn choice<T: Choice>(column: Column, value: Option<&str>) -> Result<Option<T>, Rejection> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    T::from_label(value)
        .map(Some)
        .ok_or_else(|| Rejection::UnknownChoice {
            field: column.name(),
            value: value.to_string(),
        })
}

fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl TryFrom<FormEntry> for RawEntry {
    type Error = Rejection;

    fn try_from(form: FormEntry) -> Result<Self, Self::Error> {
        let clicks = form
            .clicks
            .as_deref()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);
        if clicks == 0 {
            return Ok(RawEntry::default());
        }

        Ok(RawEntry {
            clicks,
            day_of_cycle: integer(Column::DayOfCycle, form.day_of_cycle.as_deref())?,
            bleeding: integer(Column::Bleeding, form.bleeding.as_deref())?,
            cramps: integer(Column::Cramps, form.cramps.as_deref())?,
            acne: integer(Column::Acne, form.acne.as_deref())?,
            stress_level: integer(Column::StressLevel, form.stress_level.as_deref())?,
            presumed_ovulation: form.presumed_ovulation.into_iter().collect(),
            exercise: form.exercise.into_iter().collect(),
            date: form.date,
            note: form.note,
            sex: form.sex,
            fluid: form.fluid,
            mood: form.mood,
            sleep_duration: form.sleep_duration,
            weight: form.weight,
            pregnancy_test: form.pregnancy_test,
        })
    }
}

fn integer(column: Column, value: Option<&str>) -> Result<Option<i64>, Rejection> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| Rejection::NotAnInteger {
            field: column.name(),
            value: v.to_string(),
        }),
    }
}
