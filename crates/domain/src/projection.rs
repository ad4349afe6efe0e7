use crate::{
    availability::{AvailabilityDocument, BucketKey, Slot},
    date::{monday_of_week, weekday_from_day_name, DAY_NAMES},
    reconciliation::{Gesture, GestureScope},
};
use chrono::{prelude::*, Duration};

/// Year, month and day of the Monday the `default` template is drawn on.
/// Template slots carry no real date, this week only exists for rendering.
pub const TEMPLATE_WEEK_MONDAY: (i32, u32, u32) = (2024, 1, 1);

/// The calendar view events are projected onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSelector {
    /// The week containing the given date
    Week(NaiveDate),
    Template,
}

impl BucketSelector {
    pub fn bucket(&self) -> BucketKey {
        match self {
            Self::Week(date) => BucketKey::for_date(*date),
            Self::Template => BucketKey::Default,
        }
    }

    pub fn monday(&self) -> NaiveDate {
        match self {
            Self::Week(date) => monday_of_week(*date),
            Self::Template => {
                let (year, month, day) = TEMPLATE_WEEK_MONDAY;
                NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
            }
        }
    }
}

/// A `Slot` placed on a concrete week of the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub day_label: String,
    pub bucket: BucketKey,
}

/// What happened to a rendered `SlotEvent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Moved {
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    },
    Removed,
}

/// Projects the slots of the selected bucket onto the displayed week.
///
/// The returned iterator borrows the document and is computed lazily, calling
/// this again after the document changed gives the fresh projection. Slots whose
/// `days` do not name a day are skipped.
pub fn to_events<'a>(
    document: &'a AvailabilityDocument,
    selector: BucketSelector,
) -> impl Iterator<Item = SlotEvent> + 'a {
    let bucket = selector.bucket();
    let monday = selector.monday();
    document
        .slots(&bucket)
        .iter()
        .filter_map(move |slot| to_event(slot, monday, bucket))
}

fn to_event(slot: &Slot, monday: NaiveDate, bucket: BucketKey) -> Option<SlotEvent> {
    let weekday = resolve_weekday(&slot.days)?;
    let date = monday + Duration::days(i64::from(weekday.num_days_from_monday()));
    Some(SlotEvent {
        start: date.and_time(slot.from.as_naive_time()),
        end: date.and_time(slot.to.as_naive_time()),
        day_label: slot.days.clone(),
        bucket,
    })
}

/// Legacy multi day values like `lundi mardi` are drawn on their first named day
fn resolve_weekday(days: &str) -> Option<Weekday> {
    weekday_from_day_name(days).or_else(|| {
        DAY_NAMES
            .iter()
            .filter_map(|name| days.find(name).map(|index| (index, *name)))
            .min_by_key(|(index, _)| *index)
            .and_then(|(_, name)| weekday_from_day_name(name))
    })
}

/// The `Gesture` corresponding to an action on a rendered event
pub fn from_event(event: &SlotEvent, action: EventAction) -> Gesture {
    let scope = match event.bucket {
        BucketKey::Default => GestureScope::Template,
        BucketKey::Week(_) => GestureScope::Week,
    };
    match action {
        EventAction::Moved { new_start, new_end } => Gesture::Update {
            old_start: event.start,
            old_end: event.end,
            new_start,
            new_end,
            scope,
        },
        EventAction::Removed => Gesture::Delete {
            start: event.start,
            end: event.end,
            scope,
        },
    }
}
