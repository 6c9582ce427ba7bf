use serde_json::Value;

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::transport::HttpResponse;

/// A successful body: parsed JSON, or raw text for other content types.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Text bodies carry no named fields, so they normalize as an empty object.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(_) => Value::Object(serde_json::Map::new()),
        }
    }
}

/// Map a raw response to a body or an `ApiError` chosen by status code.
///
/// # Errors
///
/// Returns `ApiError` for non-2xx statuses and for JSON bodies that fail to parse.
pub fn decode_response(response: HttpResponse) -> Result<ResponseBody, ApiError> {
    if !(200..300).contains(&response.status) {
        return Err(status_error(&response));
    }

    if !is_json(response.content_type.as_deref()) {
        return Ok(ResponseBody::Text(response.body));
    }
    if response.body.trim().is_empty() {
        return Ok(ResponseBody::Json(Value::Null));
    }
    serde_json::from_str(&response.body)
        .map(ResponseBody::Json)
        .map_err(|e| ApiError::Decode {
            detail: e.to_string(),
        })
}

fn status_error(response: &HttpResponse) -> ApiError {
    match response.status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        500 => ApiError::Server,
        status => ApiError::Status {
            status,
            message: body_message(response).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        },
    }
}

// Prefer a `message` or `error` field; fall back to a plain-text body.
fn body_message(response: &HttpResponse) -> Option<String> {
    let body = response.body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return ["message", "error"]
            .iter()
            .filter_map(|field| value.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string);
    }

    if is_json(response.content_type.as_deref()) {
        return None;
    }
    Some(body.to_string())
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| {
        let mime = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        mime == "application/json" || mime.ends_with("+json")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FORBIDDEN_MESSAGE, UNAUTHORIZED_MESSAGE};
    use serde_json::json;

    #[test]
    fn success_json_parses() {
        let body = decode_response(HttpResponse::json(200, r#"{"jobs":[]}"#)).unwrap();
        assert_eq!(body, ResponseBody::Json(json!({"jobs": []})));
    }

    #[test]
    fn success_with_charset_is_still_json() {
        let response = HttpResponse {
            status: 200,
            content_type: Some("application/json; charset=utf-8".into()),
            body: "{}".into(),
        };
        assert_eq!(decode_response(response).unwrap(), ResponseBody::Json(json!({})));
    }

    #[test]
    fn non_json_passes_through_as_text() {
        let body = decode_response(HttpResponse::text(200, "ok")).unwrap();
        assert_eq!(body, ResponseBody::Text("ok".into()));
        assert_eq!(body.into_json(), json!({}));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_response(HttpResponse::json(200, "{not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn known_statuses_map_to_fixed_messages() {
        let err = decode_response(HttpResponse::json(401, r#"{"message":"nope"}"#)).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);

        let err = decode_response(HttpResponse::text(403, "")).unwrap_err();
        assert_eq!(err.to_string(), FORBIDDEN_MESSAGE);

        assert_eq!(
            decode_response(HttpResponse::json(404, "")).unwrap_err(),
            ApiError::NotFound
        );
        assert_eq!(
            decode_response(HttpResponse::json(500, "")).unwrap_err(),
            ApiError::Server
        );
    }

    #[test]
    fn other_statuses_use_body_message() {
        let err =
            decode_response(HttpResponse::json(422, r#"{"error":"Prompt too long"}"#)).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                message: "Prompt too long".into()
            }
        );

        let err = decode_response(HttpResponse::text(502, "Bad gateway")).unwrap_err();
        assert_eq!(err.to_string(), "Bad gateway");
    }

    #[test]
    fn other_statuses_without_message_are_generic() {
        let err = decode_response(HttpResponse::json(429, r#"{"retry":true}"#)).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), Some(429));
    }
}
