//! JSON extractor with content-type enforcement and validation.

use crate::errors::{AppError, ErrorCode};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Rejections, in the order they are checked:
/// - missing or non-JSON `Content-Type` → [`AppError::UnsupportedMediaType`] (415)
/// - unreadable body → [`AppError::BadRequest`] (400)
/// - body that does not deserialize into `T` → [`AppError::InvalidJson`] (400)
/// - failed `validator` rules → [`AppError::ValidationError`] (400)
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct NewProduct {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<NewProduct>) -> String {
///     format!("Creating: {}", payload.name)
/// }
///
/// let app = Router::new().route("/products", post(create));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = JsonBody::from_request(req, state).await?;
        body.parse().map(ValidatedJson)
    }
}

/// Raw JSON request body whose parsing is left to the handler.
///
/// Checks `Content-Type` and reads the body like [`ValidatedJson`], but
/// defers deserialization so a handler can resolve the target resource
/// (and answer 404) before looking at the payload.
#[derive(Debug, Clone, Default)]
pub struct JsonBody(pub Bytes);

impl JsonBody {
    /// Deserialize and validate the body
    pub fn parse<T>(&self) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let data: T =
            serde_json::from_slice(&self.0).map_err(|e| AppError::InvalidJson(e.to_string()))?;

        data.validate()?;

        Ok(data)
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(AppError::UnsupportedMediaType(
                ErrorCode::UnsupportedMediaType.default_message().to_string(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(JsonBody(bytes))
    }
}

/// Matches on the media type only, so `application/json; charset=utf-8` passes.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, max = 10))]
        name: String,
    }

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    async fn extract(req: Request) -> Result<ValidatedJson<Payload>, AppError> {
        ValidatedJson::<Payload>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_accepts_valid_json() {
        let ValidatedJson(payload) = extract(request(Some("application/json"), r#"{"name":"Hat"}"#))
            .await
            .unwrap();
        assert_eq!(payload.name, "Hat");
    }

    #[tokio::test]
    async fn test_accepts_charset_parameter() {
        let result = extract(request(
            Some("Application/JSON; charset=utf-8"),
            r#"{"name":"Hat"}"#,
        ))
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let err = extract(request(None, r#"{"name":"Hat"}"#)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_415() {
        let err = extract(request(Some("text/html"), r#"{"name":"Hat"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_json() {
        let err = extract(request(Some("application/json"), "{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidJson(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_rule_is_validation_error() {
        let err = extract(request(Some("application/json"), r#"{"name":""}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_json_body_checks_content_type_before_parsing() {
        let err = JsonBody::from_request(request(Some("text/plain"), "{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = JsonBody::from_request(request(Some("application/json"), "{not json"), &())
            .await
            .unwrap();
        let err = body.parse::<Payload>().unwrap_err();
        assert!(matches!(err, AppError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_json_body_parses_and_validates() {
        let body = JsonBody::from_request(request(Some("application/json"), r#"{"name":"Hat"}"#), &())
            .await
            .unwrap();
        assert_eq!(body.parse::<Payload>().unwrap().name, "Hat");

        let body = JsonBody::from_request(request(Some("application/json"), r#"{"name":""}"#), &())
            .await
            .unwrap();
        assert!(matches!(
            body.parse::<Payload>(),
            Err(AppError::ValidationError(_))
        ));
    }
}
