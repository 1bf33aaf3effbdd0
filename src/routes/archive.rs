use actix_web::{web, HttpResponse, Responder};
use log::{info, warn};
use serde_json::json;

use crate::store::MessageStore;

pub async fn archive_message(
    store: web::Data<dyn MessageStore>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();

    match store.archive(id) {
        Some(archived) => {
            info!("📦 Archived message ID: {}", id);
            HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Message archived",
                "data": archived
            }))
        }
        None => {
            warn!("❌ Archive failed: message {} not found", id);
            HttpResponse::NotFound().json(json!({ "error": "Message not found" }))
        }
    }
}

pub async fn get_archived(store: web::Data<dyn MessageStore>) -> impl Responder {
    HttpResponse::Ok().json(store.archived())
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.route("/archive/{id}", web::post().to(archive_message));
    cfg.route("/archived", web::get().to(get_archived));
}
