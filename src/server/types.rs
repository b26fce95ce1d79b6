use super::extract::Payload;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /predict` and the form fields of `POST /submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextIn {
    pub text: String,
}

/// `TextIn` as decoded from the wire, before the required field is checked.
#[derive(Debug, Deserialize)]
pub struct RawTextIn {
    #[serde(default, deserialize_with = "present")]
    text: Option<String>,
}

// Absent stays `None`; an explicit `null` or non-string is a type error.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    String::deserialize(deserializer).map(Some)
}

impl Payload for TextIn {
    type Raw = RawTextIn;

    fn validate(raw: RawTextIn) -> Result<Self, &'static str> {
        raw.text.map(|text| TextIn { text }).ok_or("text")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOut {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub health_check: String,
    pub model_version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub detail: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldError>,
}

/// One rejected input. `loc` starts with the body kind (`body` or `form`)
/// followed by the offending field when it is known.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}
