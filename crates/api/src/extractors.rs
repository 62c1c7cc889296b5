//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};

/// Uid of the authenticated caller.
///
/// Taken from the `x-auth-uid` header, which the edge proxy sets after
/// verifying the caller's token. Requests arriving without it are
/// rejected.
#[derive(Debug, Clone)]
pub struct AuthUid(pub String);

impl<S> FromRequestParts<S> for AuthUid
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-auth-uid")
            .and_then(|value| value.to_str().ok())
            .filter(|uid| !uid.is_empty())
            .map(|uid| Self(uid.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Optional caller uid for routes that serve both signed-in and
/// anonymous viewers.
#[derive(Debug, Clone)]
pub struct MaybeAuthUid(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeAuthUid
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uid = parts
            .headers
            .get("x-auth-uid")
            .and_then(|value| value.to_str().ok())
            .filter(|uid| !uid.is_empty())
            .map(ToString::to_string);
        Ok(Self(uid))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header("x-auth-uid", v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_auth_uid_present() {
        let mut parts = parts_with_header(Some("user1"));

        let AuthUid(uid) = AuthUid::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(uid, "user1");
    }

    #[tokio::test]
    async fn test_auth_uid_missing_is_rejected() {
        let mut parts = parts_with_header(None);

        let result = AuthUid::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_auth_uid_empty_is_rejected() {
        let mut parts = parts_with_header(Some(""));

        let result = AuthUid::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_maybe_auth_uid_absent() {
        let mut parts = parts_with_header(None);

        let MaybeAuthUid(uid) = MaybeAuthUid::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert!(uid.is_none());
    }

    #[tokio::test]
    async fn test_maybe_auth_uid_present() {
        let mut parts = parts_with_header(Some("viewer1"));

        let MaybeAuthUid(uid) = MaybeAuthUid::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(uid.as_deref(), Some("viewer1"));
    }
}
