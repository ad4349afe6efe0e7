use crate::{
    availability::{AvailabilityDocument, BucketKey, DayMatching, Slot},
    date::is_summer_recess,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which part of the `AvailabilityDocument` a `Gesture` edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureScope {
    /// The calendar week containing the gesture's date
    Week,
    /// The recurring `default` template
    Template,
}

impl GestureScope {
    fn bucket(&self, start: &NaiveDateTime) -> BucketKey {
        match self {
            Self::Week => BucketKey::for_date(start.date()),
            Self::Template => BucketKey::Default,
        }
    }
}

/// A calendar interaction. All datetimes are wall clock times of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// A range was selected on the calendar
    Create {
        start: NaiveDateTime,
        end: NaiveDateTime,
        scope: GestureScope,
    },
    /// An existing block was dragged or resized
    Update {
        old_start: NaiveDateTime,
        old_end: NaiveDateTime,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
        scope: GestureScope,
    },
    Delete {
        start: NaiveDateTime,
        end: NaiveDateTime,
        scope: GestureScope,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    #[error("Availabilities cannot be scheduled in July or August")]
    SummerRecess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Gesture rejected: {reason}")]
pub struct RejectedGesture {
    pub reason: RejectReason,
}

impl From<RejectReason> for RejectedGesture {
    fn from(reason: RejectReason) -> Self {
        Self { reason }
    }
}

/// Applies `Gesture`s to `AvailabilityDocument`s.
///
/// Every operation is pure: the input document is never modified, and a gesture
/// that does not match any slot yields an unchanged copy instead of an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    day_matching: DayMatching,
}

impl Reconciler {
    pub fn new(day_matching: DayMatching) -> Self {
        Self { day_matching }
    }

    pub fn day_matching(&self) -> DayMatching {
        self.day_matching
    }

    pub fn apply(
        &self,
        document: &AvailabilityDocument,
        gesture: &Gesture,
    ) -> Result<AvailabilityDocument, RejectedGesture> {
        match gesture {
            Gesture::Create { start, end, scope } => self.create(document, start, end, *scope),
            Gesture::Update {
                old_start,
                old_end,
                new_start,
                new_end,
                scope,
            } => self.update(document, (old_start, old_end), (new_start, new_end), *scope),
            Gesture::Delete { start, end, scope } => Ok(self.delete(document, start, end, *scope)),
        }
    }

    fn create(
        &self,
        document: &AvailabilityDocument,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
        scope: GestureScope,
    ) -> Result<AvailabilityDocument, RejectedGesture> {
        if is_summer_recess(start.date()) {
            return Err(RejectReason::SummerRecess.into());
        }

        let mut document = document.clone();
        let slot = Slot::from_range(start, end);
        self.push_unique(&mut document, scope.bucket(start), slot);
        Ok(document)
    }

    fn update(
        &self,
        document: &AvailabilityDocument,
        (old_start, old_end): (&NaiveDateTime, &NaiveDateTime),
        (new_start, new_end): (&NaiveDateTime, &NaiveDateTime),
        scope: GestureScope,
    ) -> Result<AvailabilityDocument, RejectedGesture> {
        if is_summer_recess(new_start.date()) {
            return Err(RejectReason::SummerRecess.into());
        }

        let mut document = document.clone();
        let old_bucket = scope.bucket(old_start);
        let new_bucket = scope.bucket(new_start);
        let old_slot = Slot::from_range(old_start, old_end);
        let new_slot = Slot::from_range(new_start, new_end);

        let position = match self.position_of(&document, &old_bucket, &old_slot) {
            Some(position) => position,
            None => return Ok(document),
        };

        if old_bucket == new_bucket {
            let day_matching = self.day_matching;
            let slots = document.bucket_mut(old_bucket);
            // Moving onto an identical slot merges the two
            let duplicate = slots
                .iter()
                .enumerate()
                .any(|(i, existing)| i != position && existing.matches(&new_slot, day_matching));
            if duplicate {
                slots.remove(position);
            } else {
                slots[position] = new_slot;
            }
        } else {
            document.bucket_mut(old_bucket).remove(position);
            self.push_unique(&mut document, new_bucket, new_slot);
        }
        Ok(document)
    }

    fn delete(
        &self,
        document: &AvailabilityDocument,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
        scope: GestureScope,
    ) -> AvailabilityDocument {
        let mut document = document.clone();
        let bucket = scope.bucket(start);
        let slot = Slot::from_range(start, end);

        if let Some(position) = self.position_of(&document, &bucket, &slot) {
            document.bucket_mut(bucket).remove(position);
        }
        document
    }

    fn position_of(
        &self,
        document: &AvailabilityDocument,
        bucket: &BucketKey,
        slot: &Slot,
    ) -> Option<usize> {
        document
            .slots(bucket)
            .iter()
            .position(|existing| existing.matches(slot, self.day_matching))
    }

    fn push_unique(&self, document: &mut AvailabilityDocument, bucket: BucketKey, slot: Slot) {
        if self.position_of(document, &bucket, &slot).is_none() {
            document.bucket_mut(bucket).push(slot);
        }
    }
}
