use thiserror::Error;

use super::respond;
use crate::http::{Response, StatusCode};
use crate::sheets::FetchError;

/// Everything that can stop a sheet request from producing rows.
///
/// The status code is the only thing a client can tell these apart by.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The path does not name exactly one spreadsheet and one sheet.
    #[error("URL format is /spreadsheet_id/sheet_name")]
    PathFormat,

    /// Upstream answered with an error object; the message is passed through.
    #[error("{0}")]
    Upstream(String),

    /// Upstream could not be reached or did not answer with JSON.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to encode rows: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SheetError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PathFormat => StatusCode::NotFound,
            Self::Upstream(_) => StatusCode::BadRequest,
            Self::Fetch(_) | Self::Encode(_) => StatusCode::InternalServerError,
        }
    }

    /// Text shown to the client. Internal faults are not described.
    pub fn public_message(&self) -> String {
        match self {
            Self::PathFormat | Self::Upstream(_) => self.to_string(),
            Self::Fetch(_) | Self::Encode(_) => {
                StatusCode::InternalServerError.canonical_reason().to_owned()
            }
        }
    }

    pub fn into_response(self) -> Response {
        respond::error(&self.public_message(), self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_format_is_404_with_fixed_message() {
        let err = SheetError::PathFormat;
        assert_eq!(err.status(), StatusCode::NotFound);
        assert_eq!(err.public_message(), "URL format is /spreadsheet_id/sheet_name");
    }

    #[test]
    fn upstream_message_passes_through() {
        let err = SheetError::Upstream("API key not valid.".to_owned());
        assert_eq!(err.status(), StatusCode::BadRequest);
        assert_eq!(err.public_message(), "API key not valid.");
    }

    #[test]
    fn internal_faults_are_generic() {
        let err = SheetError::Fetch(FetchError::InvalidBase("mailto:x".to_owned()));
        assert_eq!(err.status(), StatusCode::InternalServerError);
        assert_eq!(err.public_message(), "Internal Server Error");

        let response = err.into_response();
        assert_eq!(response.content(), br#"{"error":"Internal Server Error"}"#);
    }
}
