mod route_guards;

pub use route_guards::{create_token, protect_admin_route, protect_create_user_route};
