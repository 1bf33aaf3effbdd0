use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use local_ip_address::local_ip;

use veltron_backend::config::Config;
use veltron_backend::middleware::RateLimit;
use veltron_backend::routes;
use veltron_backend::store::{InMemoryStore, MessageStore};

const MAX_SUBMISSIONS_PER_WINDOW: usize = 3;
const SUBMISSION_WINDOW: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let store: Arc<dyn MessageStore> = Arc::new(InMemoryStore::new());
    let store = web::Data::from(store);
    let limiter = RateLimit::new(MAX_SUBMISSIONS_PER_WINDOW, SUBMISSION_WINDOW);
    let public_dir = config.public_dir.clone();

    match local_ip() {
        Ok(ip) => println!("✅ Veltron backend running on http://{}:{}", ip, config.port),
        Err(_) => println!("✅ Veltron backend running on http://localhost:{}", config.port),
    }

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(|cfg| routes::messages::init(cfg, &limiter))
            .configure(routes::archive::init)
            .service(
                Files::new("/", public_dir.as_str())
                    .index_file("index.html")
                    .default_handler(fn_service(|req: ServiceRequest| async {
                        let (req, _) = req.into_parts();
                        let response = routes::not_found(req.clone()).await;
                        Ok(ServiceResponse::new(req, response))
                    })),
            )
            .default_service(web::route().to(routes::not_found))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;

    Ok(())
}
