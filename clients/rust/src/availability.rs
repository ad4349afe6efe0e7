use crate::{APIResponse, BaseClient};
use chrono::NaiveDate;
use dispo_api_structs::*;
use dispo_domain::GestureScope;
use reqwest::StatusCode;
use std::sync::Arc;

/// Calls made by the holder of an access key, no admin token is needed
#[derive(Clone)]
pub struct AvailabilityClient {
    base: Arc<BaseClient>,
}

/// Which week of the calendar to render
pub enum CalendarView {
    /// The week containing the date
    Week(NaiveDate),
    Template,
}

/// A calendar interaction, timestamps are UTC millis
pub enum GestureInput {
    Create {
        start_ts: i64,
        end_ts: i64,
        scope: GestureScope,
    },
    Update {
        old_start_ts: i64,
        old_end_ts: i64,
        new_start_ts: i64,
        new_end_ts: i64,
        scope: GestureScope,
    },
    Delete {
        start_ts: i64,
        end_ts: i64,
        scope: GestureScope,
    },
}

impl From<GestureInput> for apply_gesture::RequestBody {
    fn from(input: GestureInput) -> Self {
        match input {
            GestureInput::Create {
                start_ts,
                end_ts,
                scope,
            } => Self::Create {
                start_ts,
                end_ts,
                scope,
            },
            GestureInput::Update {
                old_start_ts,
                old_end_ts,
                new_start_ts,
                new_end_ts,
                scope,
            } => Self::Update {
                old_start_ts,
                old_end_ts,
                new_start_ts,
                new_end_ts,
                scope,
            },
            GestureInput::Delete {
                start_ts,
                end_ts,
                scope,
            } => Self::Delete {
                start_ts,
                end_ts,
                scope,
            },
        }
    }
}

impl AvailabilityClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, key: &str) -> APIResponse<get_availability::APIResponse> {
        self.base
            .get(format!("availability?key={}", key), StatusCode::OK)
            .await
    }

    pub async fn get_events(
        &self,
        key: &str,
        view: CalendarView,
    ) -> APIResponse<get_availability_events::APIResponse> {
        let view = match view {
            CalendarView::Week(date) => format!("week={}", date.format("%Y-%m-%d")),
            CalendarView::Template => "template=true".to_string(),
        };
        self.base
            .get(
                format!("availability/events?key={}&{}", key, view),
                StatusCode::OK,
            )
            .await
    }

    pub async fn apply_gesture(
        &self,
        key: &str,
        gesture: GestureInput,
    ) -> APIResponse<apply_gesture::APIResponse> {
        let body = apply_gesture::RequestBody::from(gesture);
        self.base
            .post(
                body,
                format!("availability/gesture?key={}", key),
                StatusCode::OK,
            )
            .await
    }
}
