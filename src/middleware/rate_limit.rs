use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use log::warn;
use serde_json::json;

/// Sliding-window limiter for the contact form. Wraps the submit resource
/// and answers the fourth POST from one client address inside the window
/// with a 429 before the body is parsed. Reads pass through untouched.
#[derive(Clone)]
pub struct RateLimit {
    windows: Arc<Windows>,
}

struct Windows {
    max_hits: usize,
    window: Duration,
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimit {
    pub fn new(max_hits: usize, window: Duration) -> Self {
        Self {
            windows: Arc::new(Windows {
                max_hits,
                window,
                hits: Mutex::new(HashMap::new()),
            }),
        }
    }
}

impl Windows {
    fn admit(&self, client: &str) -> bool {
        self.admit_at(client, Instant::now())
    }

    // Rejected attempts do not consume window budget, so a client cannot
    // extend its own lockout by retrying.
    fn admit_at(&self, client: &str, now: Instant) -> bool {
        let mut hits = self
            .hits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let window = hits.entry(client.to_string()).or_default();

        while let Some(&oldest) = window.front() {
            if now.duration_since(oldest) >= self.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() >= self.max_hits {
            return false;
        }
        window.push_back(now);
        true
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            windows: self.windows.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: S,
    windows: Arc<Windows>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            let client = req
                .peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            if !self.windows.admit(&client) {
                warn!("⏳ Rate limit exceeded for {}", client);
                let (req, _) = req.into_parts();
                let response = HttpResponse::TooManyRequests()
                    .json(json!({ "error": "Too many messages, try again later" }));
                return Box::pin(ready(Ok(
                    ServiceResponse::new(req, response).map_into_right_body()
                )));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
