use actix_web::{
    error::BlockingError,
    get,
    http::{header, StatusCode},
    post,
    web::{self, Data},
    HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    consts::consts::{ActivityName, ParticipantEmail, ParticipantEmailError},
    database::{
        request_manager::{RequestManager, RequestManagerError},
        table::table::ApplyErrors,
    },
};

#[derive(Deserialize, Debug)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

/// Every error is rendered as `{"detail": "..."}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] RequestManagerError),

    #[error(transparent)]
    InvalidEmail(#[from] ParticipantEmailError),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Service unavailable: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(RequestManagerError::Rejected(ApplyErrors::ActivityNotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Database(RequestManagerError::Rejected(_)) => StatusCode::BAD_REQUEST,
            ApiError::Database(RequestManagerError::UnexpectedResponse(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Database(
                RequestManagerError::DatabaseTimeout | RequestManagerError::DatabaseExited,
            )
            | ApiError::Blocking(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidEmail(_) | ApiError::InvalidQuery(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("Request failed: {}", self);
        }

        HttpResponse::build(self.status_code()).json(DetailResponse {
            detail: self.to_string(),
        })
    }
}

/// The front end lives elsewhere, the root points callers at the catalog
#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, "/activities"))
        .finish()
}

#[get("/health")]
async fn health(request_manager: Data<RequestManager>) -> Result<HttpResponse, ApiError> {
    let request_manager = request_manager.get_ref().clone();

    web::block(move || request_manager.send_ping()).await??;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    }))
}

#[get("/activities")]
async fn list_activities(
    request_manager: Data<RequestManager>,
) -> Result<HttpResponse, ApiError> {
    let request_manager = request_manager.get_ref().clone();

    let catalog = web::block(move || request_manager.send_list()).await??;

    Ok(HttpResponse::Ok().json(catalog))
}

/// Activity names arrive percent-decoded, "Chess%20Club" matches "Chess Club"
#[post("/activities/{activity_name}/signup")]
async fn signup(
    request_manager: Data<RequestManager>,
    activity_name: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let name = ActivityName(activity_name.into_inner());
    let email = ParticipantEmail::try_from(query.into_inner().email)?;

    let request_manager = request_manager.get_ref().clone();

    let message = web::block(move || request_manager.send_signup(name, email)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse { message }))
}

#[post("/activities/{activity_name}/unregister")]
async fn unregister(
    request_manager: Data<RequestManager>,
    activity_name: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let name = ActivityName(activity_name.into_inner());
    let email = ParticipantEmail::try_from(query.into_inner().email)?;

    let request_manager = request_manager.get_ref().clone();

    let message = web::block(move || request_manager.send_unregister(name, email)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse { message }))
}

/// Registers every route, the caller provides the `RequestManager` as app data
pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::InvalidQuery(err.to_string()).into());

    cfg.app_data(query_config)
        .service(index)
        .service(health)
        .service(list_activities)
        .service(signup)
        .service(unregister);
}
