use crate::date::{day_name, iso_week_number, weekday_from_day_name};
use chrono::prelude::*;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};
use thiserror::Error;

pub const DEFAULT_BUCKET: &str = "default";

/// Key of a bucket in an `AvailabilityDocument`.
///
/// Serialized as `S<iso week number>` for calendar weeks and `default` for the
/// recurring weekly template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Week(u32),
    Default,
}

impl BucketKey {
    pub fn for_date(date: NaiveDate) -> Self {
        Self::Week(iso_week_number(date))
    }
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week(week) => write!(f, "S{}", week),
            Self::Default => write!(f, "{}", DEFAULT_BUCKET),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidBucketKeyError {
    #[error("Bucket key: {0} is malformed")]
    Malformed(String),
}

impl FromStr for BucketKey {
    type Err = InvalidBucketKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == DEFAULT_BUCKET {
            return Ok(Self::Default);
        }
        match s.strip_prefix('S').map(|week| week.parse::<u32>()) {
            Some(Ok(week)) if (1..=53).contains(&week) => Ok(Self::Week(week)),
            _ => Err(InvalidBucketKeyError::Malformed(s.to_string())),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BucketKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BucketKeyVisitor;

        impl<'de> Visitor<'de> for BucketKeyVisitor {
            type Value = BucketKey;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bucket key like `S12` or `default`")
            }

            fn visit_str<E>(self, value: &str) -> Result<BucketKey, E>
            where
                E: serde::de::Error,
            {
                value.parse::<BucketKey>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(BucketKeyVisitor)
    }
}

/// Time of day with minute precision, serialized as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    hours: u32,
    minutes: u32,
}

pub const WORKING_DAY_START: SlotTime = SlotTime {
    hours: 8,
    minutes: 0,
};
pub const WORKING_DAY_END: SlotTime = SlotTime {
    hours: 19,
    minutes: 30,
};

impl SlotTime {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self { hours, minutes })
        } else {
            None
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or_default()
    }
}

impl From<NaiveTime> for SlotTime {
    fn from(time: NaiveTime) -> Self {
        Self {
            hours: time.hour(),
            minutes: time.minute(),
        }
    }
}

impl Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeError {
    #[error("Time: {0} is not a valid HH:MM time")]
    Malformed(String),
}

impl FromStr for SlotTime {
    type Err = InvalidTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidTimeError::Malformed(s.to_string());
        let (hours, minutes) = s.split_once(':').ok_or_else(malformed)?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(malformed());
        }
        let hours = hours.parse::<u32>().map_err(|_| malformed())?;
        let minutes = minutes.parse::<u32>().map_err(|_| malformed())?;
        Self::new(hours, minutes).ok_or_else(malformed)
    }
}

impl Serialize for SlotTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SlotTimeVisitor;

        impl<'de> Visitor<'de> for SlotTimeVisitor {
            type Value = SlotTime;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a time formatted as HH:MM")
            }

            fn visit_str<E>(self, value: &str) -> Result<SlotTime, E>
            where
                E: serde::de::Error,
            {
                value.parse::<SlotTime>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(SlotTimeVisitor)
    }
}

/// How the `days` field of a stored `Slot` is compared against a day name.
///
/// Older documents were matched with substring containment (`slot.days` contains
/// the day name), a leftover from when `days` could list several days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMatching {
    Exact,
    Containment,
}

impl Default for DayMatching {
    fn default() -> Self {
        Self::Exact
    }
}

impl FromStr for DayMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "containment" => Ok(Self::Containment),
            other => Err(format!("Unknown day matching policy: {}", other)),
        }
    }
}

impl DayMatching {
    pub fn matches(&self, slot_days: &str, day: &str) -> bool {
        match self {
            Self::Exact => slot_days == day,
            Self::Containment => slot_days.contains(day),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub days: String,
    pub from: SlotTime,
    pub to: SlotTime,
}

impl Slot {
    pub fn new<T: Into<String>>(days: T, from: SlotTime, to: SlotTime) -> Self {
        Self {
            days: days.into(),
            from,
            to,
        }
    }

    /// Slot covering `start` to `end`, keyed by the day of `start`
    pub fn from_range(start: &NaiveDateTime, end: &NaiveDateTime) -> Self {
        Self::new(day_name(start.date()), start.time().into(), end.time().into())
    }

    pub fn matches(&self, other: &Slot, day_matching: DayMatching) -> bool {
        self.from == other.from && self.to == other.to && day_matching.matches(&self.days, &other.days)
    }

    pub fn is_within_working_window(&self) -> bool {
        self.from >= WORKING_DAY_START && self.to <= WORKING_DAY_END && self.from < self.to
    }

    fn violations(&self) -> Vec<ViolationKind> {
        let mut violations = Vec::new();
        if self.from >= self.to {
            violations.push(ViolationKind::EmptyRange);
        }
        match weekday_from_day_name(&self.days) {
            None => violations.push(ViolationKind::UnknownDay),
            Some(Weekday::Sat) | Some(Weekday::Sun) => violations.push(ViolationKind::NotAWorkingDay),
            Some(_) => (),
        }
        if self.from < WORKING_DAY_START || self.to > WORKING_DAY_END {
            violations.push(ViolationKind::OutsideWorkingWindow);
        }
        violations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// `from` is not before `to`
    EmptyRange,
    /// `days` is not a known day name
    UnknownDay,
    NotAWorkingDay,
    OutsideWorkingWindow,
    /// More than one slot for the same day in one bucket
    DuplicateDay,
}

impl ViolationKind {
    /// Violations that make a slot unusable, as opposed to the working hours
    /// conventions that older documents do not always follow.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::EmptyRange | Self::UnknownDay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotViolation {
    pub bucket: BucketKey,
    pub index: usize,
    pub kind: ViolationKind,
}

/// Availabilities of an `Intervenant`: slots grouped by week bucket.
///
/// Persisted as the JSON object `{ "S12": [{ "days": "lundi", "from": "09:00", "to": "10:00" }], "default": [...] }`.
/// Documents are equal when they only differ by empty buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityDocument {
    buckets: BTreeMap<BucketKey, Vec<Slot>>,
}

impl AvailabilityDocument {
    pub fn empty() -> Self {
        Default::default()
    }

    pub fn slots(&self, bucket: &BucketKey) -> &[Slot] {
        self.buckets.get(bucket).map(|s| s.as_slice()).unwrap_or(&[])
    }

    pub fn bucket_mut(&mut self, bucket: BucketKey) -> &mut Vec<Slot> {
        self.buckets.entry(bucket).or_default()
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&BucketKey, &Vec<Slot>)> {
        self.buckets.iter()
    }

    pub fn slot_count(&self) -> usize {
        self.buckets.values().map(|slots| slots.len()).sum()
    }

    /// Checks every slot against the intended document invariants. Nothing is
    /// enforced here, it is up to the caller to decide what to reject.
    pub fn validate(&self) -> Vec<SlotViolation> {
        let mut violations = Vec::new();
        for (bucket, slots) in &self.buckets {
            for (index, slot) in slots.iter().enumerate() {
                for kind in slot.violations() {
                    violations.push(SlotViolation {
                        bucket: *bucket,
                        index,
                        kind,
                    });
                }
                if slots[..index].iter().any(|prev| prev.days == slot.days) {
                    violations.push(SlotViolation {
                        bucket: *bucket,
                        index,
                        kind: ViolationKind::DuplicateDay,
                    });
                }
            }
        }
        violations
    }

    fn non_empty_buckets(&self) -> impl Iterator<Item = (&BucketKey, &Vec<Slot>)> {
        self.buckets.iter().filter(|(_, slots)| !slots.is_empty())
    }
}

impl PartialEq for AvailabilityDocument {
    fn eq(&self, other: &Self) -> bool {
        self.non_empty_buckets().eq(other.non_empty_buckets())
    }
}

impl Eq for AvailabilityDocument {}
