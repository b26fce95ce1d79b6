use super::types::{ErrorResponse, FieldError, ValidationErrorResponse};
use crate::Error;
use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error::Segment;
use tracing::{error, warn};

/// A request body checked against its expected shape.
///
/// `Raw` is what the wire decodes into; `validate` turns it into the typed
/// value or names the first required field that was left out.
pub trait Payload: Sized {
    type Raw: DeserializeOwned;

    fn validate(raw: Self::Raw) -> Result<Self, &'static str>;
}

/// JSON body extractor. A request without a content type is read as JSON.
pub struct JsonBody<T>(pub T);

/// `application/x-www-form-urlencoded` body extractor. The content type is not
/// checked: whatever does not decode to the expected fields is a validation error.
pub struct FormBody<T>(pub T);

/// Everything a handler can answer with besides success.
#[derive(Debug)]
pub enum ApiError {
    /// The request body does not match the expected shape.
    Validation(FieldError),
    /// The model failed while predicting.
    Prediction(Error),
}

impl ApiError {
    fn validation(loc: Vec<String>, kind: &str, msg: impl Into<String>) -> Self {
        Self::Validation(FieldError {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        })
    }

    fn missing(source: &str, field: &str) -> Self {
        Self::validation(
            vec![source.to_string(), field.to_string()],
            "missing",
            "Field required",
        )
    }
}

fn is_json_content_type(req: &Request) -> bool {
    let Some(value) = req.headers().get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

async fn read_body<S: Send + Sync>(
    req: Request,
    state: &S,
    source: &str,
) -> Result<Bytes, ApiError> {
    Bytes::from_request(req, state)
        .await
        .map_err(|e| ApiError::validation(vec![source.to_string()], "invalid", e.body_text()))
}

fn json_error(err: serde_path_to_error::Error<serde_json::Error>) -> ApiError {
    let mut loc = vec!["body".to_string()];
    loc.extend(err.path().iter().filter_map(|segment| match segment {
        Segment::Map { key } => Some(key.clone()),
        Segment::Seq { index } => Some(index.to_string()),
        Segment::Enum { variant } => Some(variant.clone()),
        Segment::Unknown => None,
    }));

    let inner = err.into_inner();
    let kind = match inner.classify() {
        Category::Data => "invalid",
        Category::Syntax | Category::Eof | Category::Io => "json_invalid",
    };

    ApiError::validation(loc, kind, inner.to_string())
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(json_error)?;
    de.end().map_err(|e| {
        ApiError::validation(vec!["body".to_string()], "json_invalid", e.to_string())
    })?;
    Ok(value)
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: Payload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(&req) {
            return Err(ApiError::validation(
                vec!["body".to_string()],
                "invalid",
                "Expected a JSON request body",
            ));
        }

        let bytes = read_body(req, state, "body").await?;
        let raw = decode_json::<T::Raw>(&bytes)?;

        T::validate(raw)
            .map(JsonBody)
            .map_err(|field| ApiError::missing("body", field))
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: Payload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = read_body(req, state, "form").await?;
        let raw = serde_urlencoded::from_bytes::<T::Raw>(&bytes).map_err(|e| {
            ApiError::validation(vec!["form".to_string()], "invalid", e.to_string())
        })?;

        T::validate(raw)
            .map(FormBody)
            .map_err(|field| ApiError::missing("form", field))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(field) => {
                warn!("Rejected input at {:?}: {}", field.loc, field.msg);
                let body = ValidationErrorResponse {
                    detail: vec![field],
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Prediction(e) => {
                error!("Prediction failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal Server Error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
