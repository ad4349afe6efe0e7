use actix_web::{web, HttpResponse};
use dispo_api_structs::get_service_health::*;
use dispo_infra::DispoContext;

async fn status(ctx: web::Data<DispoContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        timezone: ctx.config.timezone.name().into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
