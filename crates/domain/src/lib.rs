mod availability;
pub mod date;
mod intervenant;
mod projection;
mod reconciliation;
mod shared;
mod user;

pub use availability::{
    AvailabilityDocument, BucketKey, DayMatching, InvalidBucketKeyError, InvalidTimeError, Slot,
    SlotTime, SlotViolation, ViolationKind, DEFAULT_BUCKET, WORKING_DAY_END, WORKING_DAY_START,
};
pub use chrono_tz::Tz;
pub use intervenant::{Intervenant, KeyAccessError};
pub use projection::{from_event, to_events, BucketSelector, EventAction, SlotEvent};
pub use reconciliation::{Gesture, GestureScope, RejectReason, RejectedGesture, Reconciler};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
