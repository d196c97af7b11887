use actix_web::web;

use crate::handlers::members;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/members", web::get().to(members::search_members))
        .route(
            "/v2/members",
            web::get().to(members::search_members_page_with_count),
        )
        .route("/v3/members", web::get().to(members::search_members_page));
}
