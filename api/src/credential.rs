use axum::{http::StatusCode, Json};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use prospector::openai_service::mask_api_key;
use prospector::ErrorResponse;

pub type CredentialError = (StatusCode, Json<ErrorResponse>);

/// Pulls the caller's OpenAI key out of `Authorization: Bearer <key>`.
/// The key lives only for the request; it is never stored.
pub fn bearer_api_key(
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<String, CredentialError> {
    let Some(TypedHeader(auth)) = auth else {
        return Err(unauthorized("Authorization Bearer token with an OpenAI API key is required"));
    };

    check_api_key(auth.token())
}

/// Only rejects an empty key; OpenAI decides whether a key is valid.
pub fn check_api_key(key: &str) -> Result<String, CredentialError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(unauthorized("API key is missing"));
    }

    log::info!("Using API key {}", mask_api_key(key));
    Ok(key.to_string())
}

fn unauthorized(message: &str) -> CredentialError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            status: "error".to_string(),
            error: message.to_string(),
            hint: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_header_is_unauthorized() {
        let (status, Json(body)) = bearer_api_key(None).unwrap_err();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.error.contains("Bearer"));
    }

    #[test]
    fn test_bearer_key_is_returned() {
        let header = TypedHeader(Authorization::bearer("sk-test-key-123456").unwrap());

        assert_eq!(bearer_api_key(Some(header)).unwrap(), "sk-test-key-123456");
    }

    #[test]
    fn test_only_empty_keys_are_rejected() {
        assert!(check_api_key("   ").is_err());
        assert_eq!(check_api_key(" sk-1 ").unwrap(), "sk-1");
    }
}
