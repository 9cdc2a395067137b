//! Per-request access log.
//!
//! Every request gets an id: the caller's `x-request-id` when it is a short
//! printable token, otherwise a fresh v7 UUID. The id is logged with the
//! request line and echoed back on the response.

use std::future::{Ready, ready};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, info, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
const MAX_REQUEST_ID_LEN: usize = 64;

/// Access log middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

/// What gets logged on completion.
struct RequestLine {
    id: String,
    method: String,
    path: String,
    query: String,
    peer: String,
    user_agent: String,
    started: Instant,
}

impl RequestLine {
    fn finish(&self, status: StatusCode) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let status = status.as_u16();

        if status >= 400 {
            warn!(
                target: "api",
                request_id = %self.id,
                method = %self.method,
                path = %self.path,
                query = %self.query,
                peer = %self.peer,
                user_agent = %self.user_agent,
                status,
                elapsed_ms,
                "Request failed"
            );
        } else {
            info!(
                target: "api",
                request_id = %self.id,
                method = %self.method,
                path = %self.path,
                query = %self.query,
                peer = %self.peer,
                user_agent = %self.user_agent,
                status,
                elapsed_ms,
                "Request handled"
            );
        }
    }
}

/// Reuse a caller-supplied id only if it is safe to log and echo.
fn request_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| {
            !v.is_empty()
                && v.len() <= MAX_REQUEST_ID_LEN
                && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
        .map(String::from)
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = RequestLine {
            id: request_id(&req),
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            peer: req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("-")
                .to_string(),
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string(),
            started: Instant::now(),
        };

        // Uploads are the only large bodies; their size is worth seeing.
        let content_length = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        debug!(
            target: "api",
            request_id = %line.id,
            method = %line.method,
            path = %line.path,
            content_length,
            "Request received"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            line.finish(res.status());

            if let Ok(value) = HeaderValue::from_str(&line.id) {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Ok(res)
        })
    }
}
