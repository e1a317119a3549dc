use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced by the user endpoints.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("malformed user payload: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("user {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Encode(#[source] serde_json::Error),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            UserError::Encode(_) => error!(error = %self, "failed to encode response"),
            UserError::MalformedInput(_) => warn!(error = %self, "rejected payload"),
            UserError::NotFound(_) => {}
        }
        (status, self.to_string()).into_response()
    }
}

/// Fatal errors raised while bringing the server up.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to set tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            UserError::MalformedInput(json_error()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::NotFound("7".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::Encode(json_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_names_the_id() {
        assert_eq!(UserError::NotFound("7".into()).to_string(), "user 7 not found");
    }

    #[test]
    fn into_response_keeps_status() {
        let res = UserError::MalformedInput(json_error()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
