use actix_web::web;

use crate::handlers;

pub mod members;

/// Register every route. Expects `web::Data<MemberRepository>` and
/// `web::Data<Config>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health).configure(members::configure);
}
