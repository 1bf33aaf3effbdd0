pub mod archive;
pub mod messages;

use actix_web::{HttpRequest, HttpResponse};
use log::warn;

// Catch-all for anything no route or static file matched.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    warn!("❌ Not found: {} {}", req.method(), req.path());
    HttpResponse::NotFound()
        .content_type("text/plain; charset=utf-8")
        .body("404 - Page Not Found")
}
