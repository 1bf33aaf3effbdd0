use actix_web::{web, HttpResponse, Responder};
use log::{info, warn};
use serde_json::json;

use crate::middleware::RateLimit;
use crate::services::validate::{screen, Rejection};
use crate::store::{MessageStore, NewMessage};

pub async fn submit_message(
    store: web::Data<dyn MessageStore>,
    body: web::Json<NewMessage>,
) -> impl Responder {
    let submission = body.into_inner();

    if let Err(rejection) = screen(&submission) {
        if rejection == Rejection::BotDetected {
            warn!("🤖 Blocked bot submission (honeypot was filled)");
        }
        return HttpResponse::BadRequest().json(json!({ "error": rejection.message() }));
    }

    let saved = store.append(&submission);
    info!("✅ Message received from: {}", saved.email);
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Message saved!",
        "data": saved
    }))
}

pub async fn get_messages(store: web::Data<dyn MessageStore>) -> impl Responder {
    HttpResponse::Ok().json(store.pending())
}

pub fn init(cfg: &mut web::ServiceConfig, limiter: &RateLimit) {
    cfg.service(
        web::resource("/messages")
            .wrap(limiter.clone())
            .route(web::get().to(get_messages))
            .route(web::post().to(submit_message)),
    );
}
