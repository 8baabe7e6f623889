//! Bearer-token authentication for the API routes

use actix_web::HttpRequest;

use crate::core::error::ServiceError;

/// Check the Authorization header against the configured API token.
///
/// Handlers call this first and bubble the error, which renders as a 401.
pub fn require_bearer(req: &HttpRequest, expected_token: &str) -> Result<(), ServiceError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServiceError::AuthError("missing bearer token".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ServiceError::AuthError("malformed Authorization header".to_string()))?;

    if token != expected_token {
        return Err(ServiceError::AuthError("invalid bearer token".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    // Test a valid token passes
    #[test]
    fn test_valid_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer secret"))
            .to_http_request();
        assert!(require_bearer(&req, "secret").is_ok());
    }

    // Test a missing header is rejected
    #[test]
    fn test_missing_header() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            require_bearer(&req, "secret"),
            Err(ServiceError::AuthError(_))
        ));
    }

    // Test a non-bearer scheme is rejected
    #[test]
    fn test_wrong_scheme() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwdw=="))
            .to_http_request();
        assert!(matches!(
            require_bearer(&req, "secret"),
            Err(ServiceError::AuthError(_))
        ));
    }

    // Test a wrong token is rejected
    #[test]
    fn test_wrong_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer nope"))
            .to_http_request();
        assert!(matches!(
            require_bearer(&req, "secret"),
            Err(ServiceError::AuthError(_))
        ));
    }
}
