//! Bearer token extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};

/// Error when extracting a bearer token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,
    #[error("Malformed Authorization header")]
    Malformed,
}

/// Extract the bearer token from request headers.
///
/// The scheme is matched case-insensitively; surrounding whitespace
/// around the token is ignored. An empty token is malformed.
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(BearerError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::Malformed);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(extract_bearer(&headers("bearer  abc ")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_malformed_header() {
        assert_eq!(extract_bearer(&headers("Basic abc")), Err(BearerError::Malformed));
        assert_eq!(extract_bearer(&headers("Bearer")), Err(BearerError::Malformed));
        assert_eq!(extract_bearer(&headers("Bearer   ")), Err(BearerError::Malformed));
    }
}
