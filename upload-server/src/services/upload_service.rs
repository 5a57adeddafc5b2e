use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use crate::errors::HandlerError;
use crate::handler::{UploadHandler, UploadRequest, UploadResponse};

pub const APP_TYPE_JSON: &str = "application/json";
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub struct AppState {
    pub(crate) handler: UploadHandler,
}

impl AppState {
    pub fn new(handler: UploadHandler) -> Self {
        Self { handler }
    }
}

/// Accepted request bodies: the bare payload, or the callable-function
/// envelope `{"data": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CallPayload {
    Envelope { data: UploadRequest },
    Plain(UploadRequest),
}

#[derive(Serialize)]
struct CallableResult {
    result: UploadResponse,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Registers the upload routes with the default body limit.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_with_limit(DEFAULT_MAX_BODY_BYTES)(cfg)
}

/// Registers the upload routes; bodies over `max_body_bytes` get a 413.
pub fn configure_with_limit(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::PayloadConfig::new(max_body_bytes))
            .service(upload_image)
            .service(health);
    }
}

#[post("/uploadImage")]
async fn upload_image(
    request_json_bytes: web::Bytes,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, HandlerError> {
    let payload: CallPayload = serde_json::from_slice(&request_json_bytes).map_err(|parse_err| {
        tracing::debug!("unparseable upload body: {}", parse_err);
        HandlerError::InvalidArgument(parse_err.to_string())
    })?;

    let resp = match payload {
        CallPayload::Envelope { data } => {
            let result = shared_state.handler.invoke(data).await?;
            HttpResponse::Ok().content_type(APP_TYPE_JSON).json(CallableResult { result })
        }
        CallPayload::Plain(req) => {
            let result = shared_state.handler.invoke(req).await?;
            HttpResponse::Ok().content_type(APP_TYPE_JSON).json(result)
        }
    };
    Ok(resp)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(Health { status: "ok" })
}
