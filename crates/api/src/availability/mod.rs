mod apply_gesture;
mod get_availability;
mod get_availability_events;

use actix_web::web;
use apply_gesture::apply_gesture_controller;
use dispo_api_structs::dtos::SlotEventDTO;
use dispo_domain::{date, to_events, AvailabilityDocument, BucketSelector, Tz};
use get_availability::get_availability_controller;
use get_availability_events::get_availability_events_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/availability", web::get().to(get_availability_controller));
    cfg.route(
        "/availability/events",
        web::get().to(get_availability_events_controller),
    );
    cfg.route(
        "/availability/gesture",
        web::post().to(apply_gesture_controller),
    );
}

/// Projects the selected week and converts the wall clock times back to UTC millis
fn project(
    document: &AvailabilityDocument,
    selector: BucketSelector,
    tz: &Tz,
) -> Vec<SlotEventDTO> {
    to_events(document, selector)
        .map(|event| SlotEventDTO {
            start_ts: date::to_timestamp_millis(&event.start, tz),
            end_ts: date::to_timestamp_millis(&event.end, tz),
            day_label: event.day_label,
            bucket: event.bucket,
        })
        .collect()
}
