//! Caller identity and ownership checks
//!
//! The API Gateway custom authorizer verifies the bearer token before any
//! handler runs, so here the JWT payload is only decoded to read `sub`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use lambda_http::http::header::AUTHORIZATION;
use lambda_http::Request;
use serde::Deserialize;

use crate::errors::{Error, Result};
use crate::models::TodoItem;

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
}

/// Identity of the caller, taken from the `sub` claim of the bearer token
pub fn user_id(request: &Request) -> Result<String> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| Error::Unauthorized("authorization header is not valid text".to_string()))?;

    let token = bearer_token(header)?;
    user_id_from_token(token)
}

fn bearer_token(header: &str) -> Result<&str> {
    match header.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(Error::Unauthorized("expected a bearer token".to_string())),
    }
}

/// Read `sub` from an (already verified) JWT
pub fn user_id_from_token(token: &str) -> Result<String> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(Error::Unauthorized("malformed token".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| Error::Unauthorized("token payload is not base64url".to_string()))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|_| Error::Unauthorized("token payload is not JSON".to_string()))?;

    claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or_else(|| Error::Unauthorized("token has no subject".to_string()))
}

/// Only the owner of a todo may change or delete it
pub fn ensure_owner(user_id: &str, todo: &TodoItem) -> Result<()> {
    if todo.owner_id == user_id {
        Ok(())
    } else {
        Err(Error::Forbidden(todo.todo_id.clone()))
    }
}
