//! HS256 JWT bearer-token adapter.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::Actor;
use crate::domain::ports::{IssuedToken, TokenError, TokenService};
use crate::domain::role::RoleScope;

const KIND_STAFF: &str = "staff";
const KIND_GUEST: &str = "guest";

/// JWT claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject: actor account id (UUID string).
    sub: String,
    /// Actor kind: `staff` or `guest`.
    kind: String,
    /// Role scope label, staff tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    /// Room id, guest tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    room_id: Option<String>,
    /// Issuer.
    iss: String,
    /// Issued-at (Unix timestamp).
    iat: i64,
    /// Expiration (Unix timestamp).
    exp: i64,
    /// Unique token id.
    jti: String,
}

/// [`TokenService`] signing HS256 JWTs with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_secs: u64,
}

impl JwtTokenService {
    /// Build a token service from the shared secret.
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl_secs,
        }
    }

    fn claims_for(&self, actor: &Actor, now: i64) -> Claims {
        let (kind, scope, room_id) = match actor {
            Actor::Staff { scope, .. } => {
                (KIND_STAFF, Some(scope.as_str().to_owned()), None)
            }
            Actor::Guest { room_id, .. } => (KIND_GUEST, None, Some(room_id.to_string())),
        };
        Claims {
            sub: actor.id().to_string(),
            kind: kind.to_owned(),
            scope,
            room_id,
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX)),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

fn actor_from_claims(claims: &Claims) -> Result<Actor, TokenError> {
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|err| TokenError::verify(format!("bad subject: {err}")))?;
    match claims.kind.as_str() {
        KIND_STAFF => {
            let scope = claims
                .scope
                .as_deref()
                .ok_or_else(|| TokenError::verify("staff token missing scope"))?
                .parse::<RoleScope>()
                .map_err(|err| TokenError::verify(err.to_string()))?;
            Ok(Actor::Staff { id, scope })
        }
        KIND_GUEST => {
            let room_id = claims
                .room_id
                .as_deref()
                .ok_or_else(|| TokenError::verify("guest token missing room"))?;
            let room_id = Uuid::parse_str(room_id)
                .map_err(|err| TokenError::verify(format!("bad room id: {err}")))?;
            Ok(Actor::Guest { id, room_id })
        }
        other => Err(TokenError::verify(format!("unknown actor kind: {other}"))),
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, actor: &Actor) -> Result<IssuedToken, TokenError> {
        let claims = self.claims_for(actor, Utc::now().timestamp());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::issue(err.to_string()))?;
        Ok(IssuedToken {
            token,
            expires_in: self.ttl_secs,
        })
    }

    fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| TokenError::verify(err.to_string()))?;
        actor_from_claims(&data.claims)
    }
}
