use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Day format used on input, in storage and in every rendered table.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Checkbox value that turns a flag field on.
pub const FLAG_SENTINEL: &str = "True";

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    Integer,
    /// Symptom intensity, `0..=max`.
    Scale { max: u8 },
    Text,
    Choice(&'static [&'static str]),
    /// Stored as Yes/No, submitted as a toggle set.
    Flag,
}

/// Display columns in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    DayOfCycle,
    Note,
    Sex,
    Bleeding,
    Fluid,
    Cramps,
    Mood,
    Acne,
    StressLevel,
    PresumedOvulation,
    SleepDuration,
    Weight,
    Exercise,
    PregnancyTest,
}

impl Column {
    pub const ALL: [Column; 15] = [
        Column::Date,
        Column::DayOfCycle,
        Column::Note,
        Column::Sex,
        Column::Bleeding,
        Column::Fluid,
        Column::Cramps,
        Column::Mood,
        Column::Acne,
        Column::StressLevel,
        Column::PresumedOvulation,
        Column::SleepDuration,
        Column::Weight,
        Column::Exercise,
        Column::PregnancyTest,
    ];

    /// The narrower form kept for older clients.
    pub const LEGACY: [Column; 8] = [
        Column::Date,
        Column::DayOfCycle,
        Column::Note,
        Column::Sex,
        Column::Bleeding,
        Column::Fluid,
        Column::Cramps,
        Column::Mood,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::DayOfCycle => "Day of Cycle",
            Column::Note => "Note",
            Column::Sex => "Sex",
            Column::Bleeding => "Bleeding",
            Column::Fluid => "Fluid",
            Column::Cramps => "Cramps",
            Column::Mood => "Mood",
            Column::Acne => "Acne",
            Column::StressLevel => "Stress Level",
            Column::PresumedOvulation => "Presumed Ovulation",
            Column::SleepDuration => "Sleep Duration",
            Column::Weight => "Weight",
            Column::Exercise => "Exercise",
            Column::PregnancyTest => "Pregnancy Test",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Column::Date => FieldKind::Date,
            Column::DayOfCycle => FieldKind::Integer,
            Column::Note | Column::SleepDuration | Column::Weight => FieldKind::Text,
            Column::Sex => FieldKind::Choice(SexMethod::LABELS),
            Column::Fluid => FieldKind::Choice(Fluid::LABELS),
            Column::Mood => FieldKind::Choice(Mood::LABELS),
            Column::PregnancyTest => FieldKind::Choice(PregnancyTest::LABELS),
            Column::Bleeding => FieldKind::Scale { max: 4 },
            Column::Cramps | Column::Acne | Column::StressLevel => FieldKind::Scale { max: 3 },
            Column::PresumedOvulation | Column::Exercise => FieldKind::Flag,
        }
    }
}

/// An enumerated field with a fixed list of labels.
pub trait Choice: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];
    const LABELS: &'static [&'static str];

    fn label(self) -> &'static str;

    fn from_label(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SexMethod {
    Unprotected,
    Condom,
    Withdrawal,
    Other,
}

impl Choice for SexMethod {
    const VARIANTS: &'static [Self] = &[
        SexMethod::Unprotected,
        SexMethod::Condom,
        SexMethod::Withdrawal,
        SexMethod::Other,
    ];
    const LABELS: &'static [&'static str] = &["Unprotected", "Condom", "Withdrawal", "Other"];

    fn label(self) -> &'static str {
        match self {
            SexMethod::Unprotected => "Unprotected",
            SexMethod::Condom => "Condom",
            SexMethod::Withdrawal => "Withdrawal",
            SexMethod::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fluid {
    Baseline,
    Fertile,
    #[serde(rename = "Super Fertile")]
    SuperFertile,
    Dry,
}

impl Choice for Fluid {
    const VARIANTS: &'static [Self] = &[
        Fluid::Baseline,
        Fluid::Fertile,
        Fluid::SuperFertile,
        Fluid::Dry,
    ];
    const LABELS: &'static [&'static str] = &["Baseline", "Fertile", "Super Fertile", "Dry"];

    fn label(self) -> &'static str {
        match self {
            Fluid::Baseline => "Baseline",
            Fluid::Fertile => "Fertile",
            Fluid::SuperFertile => "Super Fertile",
            Fluid::Dry => "Dry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
}

impl Choice for Mood {
    const VARIANTS: &'static [Self] = &[Mood::Happy, Mood::Sad, Mood::Angry];
    const LABELS: &'static [&'static str] = &["Happy", "Sad", "Angry"];

    fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PregnancyTest {
    Positive,
    Negative,
    Other,
}

impl Choice for PregnancyTest {
    const VARIANTS: &'static [Self] = &[
        PregnancyTest::Positive,
        PregnancyTest::Negative,
        PregnancyTest::Other,
    ];
    const LABELS: &'static [&'static str] = &["Positive", "Negative", "Other"];

    fn label(self) -> &'static str {
        match self {
            PregnancyTest::Positive => "Positive",
            PregnancyTest::Negative => "Negative",
            PregnancyTest::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn from_toggles(toggles: &[String]) -> Self {
        if toggles.iter().any(|value| value == FLAG_SENTINEL) {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

/// One day's validated observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Date", serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "Day of Cycle")]
    pub day_of_cycle: i64,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Sex")]
    pub sex: Option<SexMethod>,
    #[serde(rename = "Bleeding")]
    pub bleeding: u8,
    #[serde(rename = "Fluid")]
    pub fluid: Option<Fluid>,
    #[serde(rename = "Cramps")]
    pub cramps: u8,
    #[serde(rename = "Mood")]
    pub mood: Option<Mood>,
    #[serde(rename = "Acne")]
    pub acne: u8,
    #[serde(rename = "Stress Level")]
    pub stress_level: u8,
    #[serde(rename = "Presumed Ovulation")]
    pub presumed_ovulation: YesNo,
    #[serde(rename = "Sleep Duration")]
    pub sleep_duration: Option<String>,
    #[serde(rename = "Weight")]
    pub weight: Option<String>,
    #[serde(rename = "Exercise")]
    pub exercise: YesNo,
    #[serde(rename = "Pregnancy Test")]
    pub pregnancy_test: Option<PregnancyTest>,
}

impl Record {
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Display text for one column; absent values render empty.
    pub fn cell(&self, column: Column) -> String {
        fn opt_label<T: Choice>(value: Option<T>) -> String {
            value.map(|v| v.label().to_string()).unwrap_or_default()
        }

        match column {
            Column::Date => self.date_string(),
            Column::DayOfCycle => self.day_of_cycle.to_string(),
            Column::Note => self.note.clone().unwrap_or_default(),
            Column::Sex => opt_label(self.sex),
            Column::Bleeding => self.bleeding.to_string(),
            Column::Fluid => opt_label(self.fluid),
            Column::Cramps => self.cramps.to_string(),
            Column::Mood => opt_label(self.mood),
            Column::Acne => self.acne.to_string(),
            Column::StressLevel => self.stress_level.to_string(),
            Column::PresumedOvulation => self.presumed_ovulation.as_str().to_string(),
            Column::SleepDuration => self.sleep_duration.clone().unwrap_or_default(),
            Column::Weight => self.weight.clone().unwrap_or_default(),
            Column::Exercise => self.exercise.as_str().to_string(),
            Column::PregnancyTest => opt_label(self.pregnancy_test),
        }
    }
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

/// Unvalidated input for one submission attempt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub clicks: u64,
    #[serde(alias = "Date")]
    pub date: Option<String>,
    #[serde(alias = "Day of Cycle")]
    pub day_of_cycle: Option<i64>,
    #[serde(alias = "Note")]
    pub note: Option<String>,
    #[serde(alias = "Sex")]
    pub sex: Option<String>,
    #[serde(alias = "Bleeding")]
    pub bleeding: Option<i64>,
    #[serde(alias = "Fluid")]
    pub fluid: Option<String>,
    #[serde(alias = "Cramps")]
    pub cramps: Option<i64>,
    #[serde(alias = "Mood")]
    pub mood: Option<String>,
    #[serde(alias = "Acne")]
    pub acne: Option<i64>,
    #[serde(alias = "Stress Level", alias = "stress")]
    pub stress_level: Option<i64>,
    #[serde(alias = "Presumed Ovulation")]
    pub presumed_ovulation: Vec<String>,
    #[serde(alias = "Sleep Duration")]
    pub sleep_duration: Option<String>,
    #[serde(alias = "Weight")]
    pub weight: Option<String>,
    #[serde(alias = "Exercise")]
    pub exercise: Vec<String>,
    #[serde(alias = "Pregnancy Test")]
    pub pregnancy_test: Option<String>,
}

/// The same submission as an urlencoded HTML form posts it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormEntry {
    pub clicks: Option<String>,
    pub date: Option<String>,
    pub day_of_cycle: Option<String>,
    pub note: Option<String>,
    pub sex: Option<String>,
    pub bleeding: Option<String>,
    pub fluid: Option<String>,
    pub cramps: Option<String>,
    pub mood: Option<String>,
    pub acne: Option<String>,
    pub stress_level: Option<String>,
    pub presumed_ovulation: Option<String>,
    pub sleep_duration: Option<String>,
    pub weight: Option<String>,
    pub exercise: Option<String>,
    pub pregnancy_test: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Full,
    Legacy,
}

impl View {
    pub fn columns(self) -> &'static [Column] {
        match self {
            View::Full => &Column::ALL,
            View::Legacy => &Column::LEGACY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsResponse {
    pub date: String,
    pub day_of_cycle: i64,
}
