//! Bearer-token extraction so handlers stay free of header parsing.
//!
//! [`AuthContext`] is an Actix extractor: it reads the `Authorization`
//! header, verifies the token through the auth service, and hands the
//! handler a domain [`Actor`]. Handlers then enforce their own scope
//! requirements via [`AuthContext::require_scope`].

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};

use crate::domain::auth::Actor;
use crate::domain::role::RoleScope;
use crate::domain::{AuthService, DomainError};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Authenticated request context carrying the verified actor.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    actor: Actor,
}

impl AuthContext {
    /// The verified actor behind the bearer token.
    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// Require a staff actor whose role scope is in `allowed`.
    ///
    /// Guests and staff outside the allowed scopes receive `403 Forbidden`.
    pub fn require_scope(&self, allowed: &[RoleScope]) -> Result<Actor, DomainError> {
        if self.actor.has_scope(allowed) {
            Ok(self.actor)
        } else {
            Err(DomainError::forbidden(
                "insufficient permissions for this operation",
            ))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, DomainError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| DomainError::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| DomainError::unauthorized("malformed authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| DomainError::unauthorized("authorization header must use bearer scheme"))
}

fn authenticate(req: &HttpRequest, auth: &AuthService) -> Result<AuthContext, DomainError> {
    let token = bearer_token(req)?;
    let actor = auth.verify_token(token)?;
    Ok(AuthContext { actor })
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<HttpState>>() {
            Some(state) => authenticate(req, &state.auth).map_err(ApiError::from),
            None => Err(ApiError::from(DomainError::internal(
                "http state not configured",
            ))),
        };
        ready(result)
    }
}
