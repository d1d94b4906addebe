use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

use super::{errors::TodoApiError, middlewares::auth::Identity};
use crate::models::session::Store;

/// Everything a handler needs about its request: who is calling and where
/// the data lives.
///
/// Extraction fails with `Authentication Failed` when the
/// [`ResolveIdentity`](super::middlewares::auth::ResolveIdentity) middleware
/// found no identity, before any other extractor of the handler is consulted
/// as long as the context is the first argument.
pub struct RequestContext<S: Store> {
    pub identity: Identity,
    store: web::Data<S>,
}

impl<S: Store> RequestContext<S> {
    fn from_parts(req: &HttpRequest) -> Result<Self, TodoApiError> {
        let identity = req
            .extensions()
            .get::<Identity>()
            .cloned()
            .ok_or_else(TodoApiError::authentication_failed)?;

        let store = req.app_data::<web::Data<S>>().cloned().ok_or_else(|| {
            log::error!("No store registered for {}", req.path());
            TodoApiError::InternalServerError
        })?;

        Ok(RequestContext { identity, store })
    }

    /// Runs `f` against a session that exists only for this call.
    ///
    /// The session is opened on the blocking pool and dropped before this
    /// returns, whatever `f` does. Uncommitted work is discarded on drop.
    pub async fn with_session<T, F>(&self, f: F) -> Result<T, TodoApiError>
    where
        F: FnOnce(&mut S::Session) -> Result<T, TodoApiError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();

        web::block(move || {
            let mut session = store.open_session()?;
            f(&mut session)
        })
        .await?
    }
}

impl<S: Store> FromRequest for RequestContext<S> {
    type Error = TodoApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_parts(req))
    }
}

/// [`RequestContext`] of a caller holding the admin role
pub struct AdminContext<S: Store>(RequestContext<S>);

impl<S: Store> FromRequest for AdminContext<S> {
    type Error = TodoApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = RequestContext::<S>::from_parts(req).and_then(|ctx| {
            if ctx.identity.is_admin() {
                Ok(AdminContext(ctx))
            } else {
                log::warn!(
                    "User {} tried to reach admin route {}",
                    ctx.identity.id,
                    req.path()
                );
                Err(TodoApiError::authentication_failed())
            }
        });

        ready(result)
    }
}

impl<S: Store> std::ops::Deref for AdminContext<S> {
    type Target = RequestContext<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
