use futures::future::{ok, LocalBoxFuture, Ready};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    HttpMessage,
};
use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::{auth_utils::decode_token, errors::AuthError},
    models::user_model::Role,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub id: i32,
    pub role: Role,
    #[serde(with = "ts_seconds")]
    pub exp: DateTime<Utc>,
}

#[cfg(test)]
impl Claims {
    pub fn new(username: &str, id: i32, role: Role) -> Self {
        Claims {
            sub: username.to_string(),
            id,
            role,
            exp: Utc::now() + chrono::Duration::days(1),
        }
    }
}

/// Caller resolved from a valid token
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub user_role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.user_role == Role::Admin
    }
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Identity {
            id: c.id,
            username: c.sub,
            user_role: c.role,
        }
    }
}

/// Resolves the caller from the `Authorization` header.
///
/// On success the [`Identity`] is stored in the request extensions. Requests
/// without a usable credential pass through untouched, handlers decide what
/// an absent identity means for them.
pub struct ResolveIdentity;

pub struct ResolveIdentityMiddleware<S> {
    service: S,
}

impl<S, B> Transform<S, ServiceRequest> for ResolveIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;

    type Error = actix_web::Error;

    type InitError = ();

    type Transform = ResolveIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ResolveIdentityMiddleware { service })
    }
}

impl<S, B> Service<ServiceRequest> for ResolveIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;

    type Error = actix_web::Error;

    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let resolved = match req.headers().get(AUTHORIZATION) {
            Some(auth_header) => decode_token(auth_header),
            None => Err(AuthError::NoAuthorizationHeader),
        };

        match resolved {
            Ok(claims) => {
                req.extensions_mut().insert::<Identity>(claims.into());
            }
            Err(err) => {
                log::debug!("No identity for {} {}: {}", req.method(), req.path(), err);
            }
        }

        Box::pin(self.service.call(req))
    }
}
