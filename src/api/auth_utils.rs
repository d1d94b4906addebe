use actix_web::http::header::HeaderValue;
use argon2::Config;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{from_value, Value};

use crate::config::{JWT_SECRET_KEY, SECRET_KEY};

use super::{
    errors::{AuthError, TodoApiError},
    middlewares::auth::Claims,
};

// Hashing

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, TodoApiError> {
    let config = Config {
        secret: SECRET_KEY.as_bytes(),
        ..Default::default()
    };

    let salt = uuid::Uuid::new_v4();

    argon2::hash_encoded(password.as_bytes(), salt.as_bytes(), &config).map_err(|err| {
        log::error!("Failed to hash password: {}", err);
        TodoApiError::InternalServerError
    })
}

/// Verify password and hash are equal
pub fn verify_hash(hash: &str, password: &str) -> Result<bool, TodoApiError> {
    argon2::verify_encoded_ext(hash, password.as_bytes(), SECRET_KEY.as_bytes(), &[]).map_err(
        |err| {
            log::error!("Stored password hash is unusable: {}", err);
            TodoApiError::InternalServerError
        },
    )
}

// JWT STUFF

/// Decodes the `Bearer` token of an `Authorization` header, the scheme name
/// is case-insensitive
pub fn decode_token(auth_header: &HeaderValue) -> Result<Claims, AuthError> {
    let auth_header_string = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationHeader)?;

    let (scheme, token) = auth_header_string
        .trim()
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthorizationHeader)?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::InvalidAuthorizationHeader);
    }

    let token = token.trim();

    let raw_token = decode::<Value>(
        token,
        &DecodingKey::from_secret(JWT_SECRET_KEY.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    from_value::<Claims>(raw_token.claims).map_err(AuthError::Claims)
}

/// Create a jwt token, the issuer lives outside of this service
#[cfg(test)]
pub fn encode_token(claims: &Claims) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(JWT_SECRET_KEY.as_bytes()),
    )
    .unwrap()
}
