mod helpers;

use chrono::{Duration, NaiveDate, Utc};
use dispo_sdk::{
    APIErrorVariant, BucketKey, CalendarView, CreateIntervenantInput, DispoSDK, GestureInput,
    GestureScope, Intervenant, RejectReason,
};
use helpers::{
    setup::{spawn_admin_sdk, spawn_app},
    utils::*,
};
use serde_json::json;

async fn create_intervenant(sdk: &DispoSDK, expires_in: Duration) -> Intervenant {
    sdk.intervenant
        .create(CreateIntervenantInput {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: unique_email(),
            expires_at: Some(Utc::now() + expires_in),
        })
        .await
        .expect("Expected to create intervenant")
        .intervenant
}

#[actix_web::main]
#[test]
async fn test_key_gate() {
    let (app, sdk) = spawn_app().await;
    let admin = spawn_admin_sdk(&app, &sdk).await;

    let active = create_intervenant(&admin, Duration::days(30)).await;
    let res = sdk
        .availability
        .get(&active.key)
        .await
        .expect("Expected key to open the calendar");
    assert_eq!(res.intervenant.id, active.id);
    assert_eq!(res.intervenant.firstname, "Ada");

    let res = sdk.availability.get("ik_doesnotexist").await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    // The intervenant exists but the key can no longer be used
    let expired = create_intervenant(&admin, Duration::days(-1)).await;
    let res = sdk.availability.get(&expired.key).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Forbidden);
    let res = sdk
        .availability
        .apply_gesture(
            &expired.key,
            GestureInput::Create {
                start_ts: MONDAY_S10_9AM,
                end_ts: MONDAY_S10_10AM,
                scope: GestureScope::Week,
            },
        )
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Forbidden);
}

#[actix_web::main]
#[test]
async fn test_create_and_delete_slot() {
    let (app, sdk) = spawn_app().await;
    let admin = spawn_admin_sdk(&app, &sdk).await;
    let intervenant = create_intervenant(&admin, Duration::days(30)).await;

    let res = sdk
        .availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Create {
                start_ts: MONDAY_S10_9AM,
                end_ts: MONDAY_S10_10AM,
                scope: GestureScope::Week,
            },
        )
        .await
        .expect("Expected to create slot");
    assert_eq!(
        serde_json::to_value(&res.availabilities).unwrap(),
        json!({ "S10": [{ "days": "lundi", "from": "09:00", "to": "10:00" }] })
    );
    assert_eq!(res.events.len(), 1);
    assert_eq!(res.events[0].start_ts, MONDAY_S10_9AM);
    assert_eq!(res.events[0].end_ts, MONDAY_S10_10AM);
    assert_eq!(res.events[0].day_label, "lundi");

    // Creating the same slot twice keeps a single slot
    let res = sdk
        .availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Create {
                start_ts: MONDAY_S10_9AM,
                end_ts: MONDAY_S10_10AM,
                scope: GestureScope::Week,
            },
        )
        .await
        .unwrap();
    assert_eq!(res.availabilities.slots(&BucketKey::Week(10)).len(), 1);

    let events = sdk
        .availability
        .get_events(
            &intervenant.key,
            CalendarView::Week(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()),
        )
        .await
        .unwrap()
        .events;
    assert_eq!(events, res.events);

    let res = sdk
        .availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Delete {
                start_ts: MONDAY_S10_9AM,
                end_ts: MONDAY_S10_10AM,
                scope: GestureScope::Week,
            },
        )
        .await
        .expect("Expected to delete slot");
    assert!(res.events.is_empty());

    let stored = admin.intervenant.get(intervenant.id).await.unwrap();
    assert_eq!(
        serde_json::to_value(&stored.intervenant.availabilities).unwrap(),
        json!({ "S10": [] })
    );
}

#[actix_web::main]
#[test]
async fn test_move_slot() {
    let (app, sdk) = spawn_app().await;
    let admin = spawn_admin_sdk(&app, &sdk).await;
    let intervenant = create_intervenant(&admin, Duration::days(30)).await;

    sdk.availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Create {
                start_ts: MONDAY_S10_9AM,
                end_ts: MONDAY_S10_10AM,
                scope: GestureScope::Week,
            },
        )
        .await
        .unwrap();

    // Dragged to Tuesday of the same week, one hour later
    let day = Duration::days(1).num_milliseconds();
    let hour = Duration::hours(1).num_milliseconds();
    let res = sdk
        .availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Update {
                old_start_ts: MONDAY_S10_9AM,
                old_end_ts: MONDAY_S10_10AM,
                new_start_ts: MONDAY_S10_9AM + day + hour,
                new_end_ts: MONDAY_S10_10AM + day + hour,
                scope: GestureScope::Week,
            },
        )
        .await
        .expect("Expected to move slot");
    assert_eq!(
        serde_json::to_value(&res.availabilities).unwrap(),
        json!({ "S10": [{ "days": "mardi", "from": "10:00", "to": "11:00" }] })
    );
    assert_eq!(res.events[0].start_ts, MONDAY_S10_9AM + day + hour);
}

#[actix_web::main]
#[test]
async fn test_summer_recess_is_rejected() {
    let (app, sdk) = spawn_app().await;
    let admin = spawn_admin_sdk(&app, &sdk).await;
    let intervenant = create_intervenant(&admin, Duration::days(30)).await;

    let res = sdk
        .availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Create {
                start_ts: SUMMER_MONDAY_9AM,
                end_ts: SUMMER_MONDAY_10AM,
                scope: GestureScope::Week,
            },
        )
        .await;
    let err = res.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::UnprocessableEntity);
    assert_eq!(err.rejection, Some(RejectReason::SummerRecess));

    let stored = sdk.availability.get(&intervenant.key).await.unwrap();
    assert_eq!(
        serde_json::to_value(&stored.intervenant.availabilities).unwrap(),
        json!({})
    );
}

#[actix_web::main]
#[test]
async fn test_template_week() {
    let (app, sdk) = spawn_app().await;
    let admin = spawn_admin_sdk(&app, &sdk).await;
    let intervenant = create_intervenant(&admin, Duration::days(30)).await;

    let res = sdk
        .availability
        .apply_gesture(
            &intervenant.key,
            GestureInput::Create {
                start_ts: MONDAY_S10_9AM,
                end_ts: MONDAY_S10_10AM,
                scope: GestureScope::Template,
            },
        )
        .await
        .expect("Expected to create template slot");
    assert_eq!(
        serde_json::to_value(&res.availabilities).unwrap(),
        json!({ "default": [{ "days": "lundi", "from": "09:00", "to": "10:00" }] })
    );

    let events = sdk
        .availability
        .get_events(&intervenant.key, CalendarView::Template)
        .await
        .unwrap()
        .events;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].bucket, BucketKey::Default);
    assert_eq!(events, res.events);

    let events = sdk
        .availability
        .get_events(
            &intervenant.key,
            CalendarView::Week(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()),
        )
        .await
        .unwrap()
        .events;
    assert!(events.is_empty());
}
