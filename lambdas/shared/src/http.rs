//! Response shaping shared by the todo Lambdas

use lambda_http::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN, VARY,
};
use lambda_http::{Body, Error as LambdaError, Request, RequestExt, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::{Error, Result};
use crate::models::ErrorResponse;

fn builder(status: u16) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
}

/// Attach CORS headers for the calling origin
///
/// Credentialed requests need the origin echoed back; browsers refuse `*`
/// alongside `Access-Control-Allow-Credentials`.
pub fn with_cors(request: &Request, mut response: Response<Body>) -> Response<Body> {
    let headers = response.headers_mut();
    match request.headers().get(ORIGIN) {
        Some(origin) => {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
            headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
            headers.append(VARY, HeaderValue::from_static("Origin"));
        }
        None => {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        }
    }
    response
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> std::result::Result<Response<Body>, LambdaError> {
    Ok(builder(status).body(Body::from(serde_json::to_string(body)?))?)
}

/// Response without a body, e.g. 204
pub fn empty_response(status: u16) -> std::result::Result<Response<Body>, LambdaError> {
    Ok(builder(status).body(Body::Empty)?)
}

pub fn error_response(e: Error) -> std::result::Result<Response<Body>, LambdaError> {
    let status = e.status_code();
    if status >= 500 {
        error!(error = %e, code = e.code(), "Request failed");
    } else {
        warn!(error = %e, code = e.code(), "Request rejected");
    }
    let body = ErrorResponse::new(e.code(), e.to_string());
    json_response(status, &body)
}

/// Required path parameter, e.g. `todoId` of `/todos/{todoId}`
pub fn path_param(request: &Request, name: &str) -> Result<String> {
    request
        .path_parameters_ref()
        .and_then(|params| params.first(name))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Validation(format!("missing path parameter {}", name)))
}

/// Raw request body bytes
pub fn body_bytes(request: &Request) -> &[u8] {
    request.body()
}
