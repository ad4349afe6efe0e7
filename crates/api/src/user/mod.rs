mod get_me;
mod register_user;
mod sign_in;

use actix_web::web;
use get_me::get_me_controller;
use register_user::register_user_controller;
use sign_in::sign_in_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/register", web::post().to(register_user_controller));
    cfg.route("/auth/signin", web::post().to(sign_in_controller));
    cfg.route("/me", web::get().to(get_me_controller));
}
