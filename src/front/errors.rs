use derive_more::{Display, Error};
use log::{error, warn};
use ntex::{http, web};

#[derive(Debug, Display, Error)]
pub enum WebhookError {
    #[display("Forbidden")]
    Forbidden,
    #[display("Bad Request: {_0}")]
    MalformedPayload(#[error(not(source))] String),
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        warn!("{:#?}", self);

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/plain; charset=utf-8")
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            WebhookError::Forbidden => http::StatusCode::FORBIDDEN,
            WebhookError::MalformedPayload(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    #[display("Not Found")]
    UrlNotFound,
    #[display("Internal Server Error")]
    InternalServerError(#[error(not(source))] String),
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        match self {
            ServerError::InternalServerError(msg) => error!("[InternalServerError] {msg}"),
            ServerError::UrlNotFound => warn!("[UrlNotFound]"),
        }

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/plain; charset=utf-8")
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ServerError::UrlNotFound => http::StatusCode::NOT_FOUND,
            ServerError::InternalServerError(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
