//! HTTP mapping for `InkwellError`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use inkwell_core::InkwellError;
use serde_json::json;

/// Wraps core errors so they can be returned from handlers
#[derive(Debug)]
pub struct ApiError(pub InkwellError);

impl From<InkwellError> for ApiError {
    fn from(err: InkwellError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            InkwellError::AuthenticationRequired
            | InkwellError::InvalidToken
            | InkwellError::UnknownIdentity
            | InkwellError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            InkwellError::Forbidden => StatusCode::FORBIDDEN,
            InkwellError::DuplicateIdentity => StatusCode::CONFLICT,
            InkwellError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InkwellError::Config(_) | InkwellError::Database(_) | InkwellError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({
            "error": self.0.code(),
            "detail": detail,
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            let challenge = match self.0 {
                InkwellError::InvalidToken => r#"Bearer error="invalid_token""#,
                _ => "Bearer",
            };
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (InkwellError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
            (InkwellError::InvalidToken, StatusCode::UNAUTHORIZED),
            (InkwellError::UnknownIdentity, StatusCode::UNAUTHORIZED),
            (InkwellError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (InkwellError::Forbidden, StatusCode::FORBIDDEN),
            (InkwellError::DuplicateIdentity, StatusCode::CONFLICT),
            (InkwellError::InvalidInput("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (InkwellError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError(InkwellError::InvalidToken).into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            r#"Bearer error="invalid_token""#
        );
        let response = ApiError(InkwellError::Forbidden).into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
