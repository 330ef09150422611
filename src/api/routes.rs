//! Route table.

use actix_web::web;

use crate::api::handlers;

/// Register every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .name("home")
            .route(web::get().to(handlers::home)),
    )
    .service(web::resource("/detect").route(web::get().to(handlers::detection_form)))
    .service(web::resource("/details").route(web::get().to(handlers::details)))
    .service(web::resource("/predict").route(web::post().to(handlers::predict)))
    .service(web::resource("/result").route(web::get().to(handlers::result)))
    .service(web::resource("/back").route(web::post().to(handlers::go_back)))
    .service(web::resource("/new").route(web::post().to(handlers::new_prediction)));
}
