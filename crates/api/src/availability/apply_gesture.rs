use super::project;
use crate::{
    error::DispoError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDateTime;
use dispo_api_structs::apply_gesture::*;
use dispo_api_structs::dtos::SlotEventDTO;
use dispo_domain::{
    date, AvailabilityDocument, BucketSelector, Gesture, GestureScope, Reconciler,
    RejectedGesture, Tz,
};
use dispo_infra::DispoContext;

pub async fn apply_gesture_controller(
    query: web::Query<QueryParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    let gesture = to_gesture(&body.0, &ctx.config.timezone)?;
    let usecase = ApplyGestureUseCase {
        key: query.0.key,
        gesture,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                availabilities: res.availabilities,
                events: res.events,
            })
        })
        .map_err(DispoError::from)
}

fn localize(timestamp_millis: i64, tz: &Tz) -> Result<NaiveDateTime, DispoError> {
    date::localize(timestamp_millis, tz).ok_or_else(|| {
        DispoError::BadClientData(format!("Invalid timestamp: {}", timestamp_millis))
    })
}

fn to_gesture(body: &RequestBody, tz: &Tz) -> Result<Gesture, DispoError> {
    let gesture = match *body {
        RequestBody::Create {
            start_ts,
            end_ts,
            scope,
        } => Gesture::Create {
            start: localize(start_ts, tz)?,
            end: localize(end_ts, tz)?,
            scope,
        },
        RequestBody::Update {
            old_start_ts,
            old_end_ts,
            new_start_ts,
            new_end_ts,
            scope,
        } => Gesture::Update {
            old_start: localize(old_start_ts, tz)?,
            old_end: localize(old_end_ts, tz)?,
            new_start: localize(new_start_ts, tz)?,
            new_end: localize(new_end_ts, tz)?,
            scope,
        },
        RequestBody::Delete {
            start_ts,
            end_ts,
            scope,
        } => Gesture::Delete {
            start: localize(start_ts, tz)?,
            end: localize(end_ts, tz)?,
            scope,
        },
    };
    Ok(gesture)
}

/// The view to re-project once a gesture has been applied
fn selector_after(gesture: &Gesture) -> BucketSelector {
    let (date, scope) = match gesture {
        Gesture::Create { start, scope, .. } | Gesture::Delete { start, scope, .. } => {
            (start.date(), scope)
        }
        Gesture::Update {
            new_start, scope, ..
        } => (new_start.date(), scope),
    };
    match scope {
        GestureScope::Week => BucketSelector::Week(date),
        GestureScope::Template => BucketSelector::Template,
    }
}

/// Applies one calendar gesture to the availabilities of the key holder.
///
/// The document is read, reconciled and written back without any locking, so
/// two concurrent gestures on the same intervenant race and the last write wins.
pub struct ApplyGestureUseCase {
    pub key: String,
    pub gesture: Gesture,
}

impl std::fmt::Debug for ApplyGestureUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplyGestureUseCase")
            .field("gesture", &self.gesture)
            .finish()
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub availabilities: AvailabilityDocument,
    pub events: Vec<SlotEventDTO>,
}

#[derive(Debug)]
pub enum UseCaseError {
    AccessDenied(DispoError),
    Rejected(RejectedGesture),
    StorageError,
}

impl From<UseCaseError> for DispoError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AccessDenied(e) => e,
            UseCaseError::Rejected(rejected) => Self::RejectedGesture(rejected.reason),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ApplyGestureUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "ApplyGesture";

    async fn execute(&mut self, ctx: &DispoContext) -> Result<Self::Response, Self::Error> {
        let intervenant = Guard::against_invalid_key(&self.key, ctx)
            .await
            .map_err(UseCaseError::AccessDenied)?;

        let engine = Reconciler::new(ctx.config.day_matching);
        let availabilities = engine
            .apply(&intervenant.availabilities, &self.gesture)
            .map_err(UseCaseError::Rejected)?;

        ctx.repos
            .intervenants
            .update_availabilities(&intervenant.id, &availabilities, ctx.sys.now())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let events = project(
            &availabilities,
            selector_after(&self.gesture),
            &ctx.config.timezone,
        );
        Ok(UseCaseRes {
            availabilities,
            events,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use dispo_domain::{BucketKey, Intervenant};
    use serde_json::json;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    async fn setup() -> (DispoContext, Intervenant) {
        let mut ctx = DispoContext::create_inmemory();
        ctx.config.timezone = Tz::Europe__Paris;
        let now = ctx.sys.now();
        let intervenant = Intervenant::new(
            "Ada".into(),
            "Lovelace".into(),
            "ada@example.com".into(),
            now + Duration::days(1),
            now,
        );
        ctx.repos.intervenants.insert(&intervenant).await.unwrap();
        (ctx, intervenant)
    }

    #[actix_web::test]
    async fn it_creates_then_deletes_slot() {
        let (ctx, intervenant) = setup().await;
        let (start, end) = (dt(2025, 3, 3, 9, 0), dt(2025, 3, 3, 10, 0));

        let mut usecase = ApplyGestureUseCase {
            key: intervenant.key.clone(),
            gesture: Gesture::Create {
                start,
                end,
                scope: GestureScope::Week,
            },
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(
            serde_json::to_value(&res.availabilities).unwrap(),
            json!({ "S10": [{ "days": "lundi", "from": "09:00", "to": "10:00" }] })
        );
        assert_eq!(res.events.len(), 1);
        assert_eq!(res.events[0].start_ts, 1_740_988_800_000);

        let mut usecase = ApplyGestureUseCase {
            key: intervenant.key.clone(),
            gesture: Gesture::Delete {
                start,
                end,
                scope: GestureScope::Week,
            },
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.events.is_empty());

        let stored = ctx.repos.intervenants.find(&intervenant.id).await.unwrap();
        assert_eq!(
            serde_json::to_value(&stored.availabilities).unwrap(),
            json!({ "S10": [] })
        );
    }

    #[actix_web::test]
    async fn it_rejects_summer_gestures_without_saving() {
        let (ctx, intervenant) = setup().await;
        let mut usecase = ApplyGestureUseCase {
            key: intervenant.key.clone(),
            gesture: Gesture::Create {
                start: dt(2025, 7, 14, 9, 0),
                end: dt(2025, 7, 14, 10, 0),
                scope: GestureScope::Week,
            },
        };
        let err = usecase.execute(&ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::Rejected(_)));
        assert!(matches!(
            DispoError::from(err),
            DispoError::RejectedGesture(dispo_domain::RejectReason::SummerRecess)
        ));

        let stored = ctx.repos.intervenants.find(&intervenant.id).await.unwrap();
        assert_eq!(stored.availabilities, AvailabilityDocument::empty());
    }

    #[actix_web::test]
    async fn it_denies_expired_keys() {
        let (ctx, mut intervenant) = setup().await;
        intervenant.expires_at = ctx.sys.now() - Duration::minutes(1);
        ctx.repos.intervenants.save(&intervenant).await.unwrap();

        let mut usecase = ApplyGestureUseCase {
            key: intervenant.key.clone(),
            gesture: Gesture::Create {
                start: dt(2025, 3, 3, 9, 0),
                end: dt(2025, 3, 3, 10, 0),
                scope: GestureScope::Week,
            },
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(
            res,
            Err(UseCaseError::AccessDenied(DispoError::KeyExpired(_)))
        ));
    }

    #[actix_web::test]
    async fn template_gestures_land_in_default_bucket() {
        let (ctx, intervenant) = setup().await;
        let mut usecase = ApplyGestureUseCase {
            key: intervenant.key.clone(),
            gesture: Gesture::Create {
                start: dt(2024, 1, 3, 8, 0),
                end: dt(2024, 1, 3, 12, 0),
                scope: GestureScope::Template,
            },
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.availabilities.slots(&BucketKey::Default).len(), 1);
        assert_eq!(res.events.len(), 1);
        assert_eq!(res.events[0].bucket, BucketKey::Default);
    }

    #[test]
    fn it_converts_timestamps_to_calendar_time() {
        let body = RequestBody::Create {
            start_ts: 1_740_988_800_000,
            end_ts: 1_740_992_400_000,
            scope: GestureScope::Week,
        };
        let gesture = to_gesture(&body, &Tz::Europe__Paris).unwrap();
        assert_eq!(
            gesture,
            Gesture::Create {
                start: dt(2025, 3, 3, 9, 0),
                end: dt(2025, 3, 3, 10, 0),
                scope: GestureScope::Week,
            }
        );
    }
}
