//! Handlers not linked to the webhook

use ntex::web;
use ntex_files::NamedFile;
use std::io;

use crate::front::{AppState, errors};

/// Return a [UrlNotFound](errors::ServerError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::ServerError::UrlNotFound.into())
}

/// Endpoint to serve the static index page
#[web::get("/")]
pub async fn index(
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let index_page_path = &app_state.config.index_page_path;

    let page = NamedFile::open(index_page_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => web::Error::from(errors::ServerError::UrlNotFound),
        _ => web::Error::from(errors::ServerError::InternalServerError(format!(
            "at / endpoint the page {index_page_path} couldnt be opened: {e}"
        ))),
    })?;

    Ok(page)
}
