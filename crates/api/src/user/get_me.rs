use crate::{error::DispoError, shared::auth::protect_admin_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dispo_api_structs::get_me::*;
use dispo_infra::DispoContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<DispoContext>,
) -> Result<HttpResponse, DispoError> {
    let user = protect_admin_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
