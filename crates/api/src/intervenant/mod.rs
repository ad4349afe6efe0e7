mod create_intervenant;
mod delete_intervenant;
mod get_intervenant;
mod get_intervenants;
mod regenerate_key;
mod regenerate_keys;
mod set_availabilities;
mod update_intervenant;

use actix_web::web;
use create_intervenant::create_intervenant_controller;
use delete_intervenant::delete_intervenant_controller;
use get_intervenant::get_intervenant_controller;
use get_intervenants::get_intervenants_controller;
use regenerate_key::regenerate_key_controller;
use regenerate_keys::regenerate_keys_controller;
use set_availabilities::set_availabilities_controller;
use update_intervenant::update_intervenant_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/intervenants",
        web::get().to(get_intervenants_controller),
    );
    cfg.route(
        "/admin/intervenants/keys",
        web::post().to(regenerate_keys_controller),
    );
    cfg.route(
        "/admin/intervenant",
        web::post().to(create_intervenant_controller),
    );
    cfg.route(
        "/admin/intervenant/{intervenant_id}",
        web::get().to(get_intervenant_controller),
    );
    cfg.route(
        "/admin/intervenant/{intervenant_id}",
        web::put().to(update_intervenant_controller),
    );
    cfg.route(
        "/admin/intervenant/{intervenant_id}",
        web::delete().to(delete_intervenant_controller),
    );
    cfg.route(
        "/admin/intervenant/{intervenant_id}/key",
        web::post().to(regenerate_key_controller),
    );
    cfg.route(
        "/admin/intervenant/{intervenant_id}/availabilities",
        web::put().to(set_availabilities_controller),
    );
}
