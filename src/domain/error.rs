use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post with ID {0} not found.")]
    PostNotFound(u64),
    #[error("Missing title and/or content")]
    MissingTitleOrContent,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::PostNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::MissingTitleOrContent => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: message.as_str(),
        })
    }
}
