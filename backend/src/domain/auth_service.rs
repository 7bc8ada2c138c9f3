//! Login and token verification flows for staff and guests.

use std::sync::Arc;

use tracing::warn;

use crate::domain::auth::{Actor, LoginCredentials};
use crate::domain::error::DomainError;
use crate::domain::ports::{
    GuestRepository, IssuedToken, PasswordHasher, RoleRepository, RoomRepository, StaffRepository,
    TokenService,
};
use crate::domain::role::RoleScope;
use crate::domain::room::RoomNumber;

/// Authentication use-cases over the repository and security ports.
#[derive(Clone)]
pub struct AuthService {
    staff: Arc<dyn StaffRepository>,
    guests: Arc<dyn GuestRepository>,
    rooms: Arc<dyn RoomRepository>,
    roles: Arc<dyn RoleRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

fn invalid_credentials() -> DomainError {
    // One message for every failure mode so login probes learn nothing.
    DomainError::unauthorized("invalid credentials")
}

impl AuthService {
    /// Wire the service to its ports.
    pub fn new(
        staff: Arc<dyn StaffRepository>,
        guests: Arc<dyn GuestRepository>,
        rooms: Arc<dyn RoomRepository>,
        roles: Arc<dyn RoleRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            staff,
            guests,
            rooms,
            roles,
            hasher,
            tokens,
        }
    }

    /// Authenticate an employee and issue a bearer token.
    pub async fn staff_login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IssuedToken, DomainError> {
        let staff = self
            .staff
            .find_by_username(credentials.username())
            .await?
            .ok_or_else(invalid_credentials)?;
        if !staff.active {
            return Err(invalid_credentials());
        }
        if !self
            .hasher
            .verify(credentials.password(), &staff.password_hash)?
        {
            return Err(invalid_credentials());
        }

        let scope = match staff.role_id {
            Some(role_id) => match self.roles.find_by_id(role_id).await? {
                Some(role) => role.scope,
                None => {
                    warn!(staff_id = %staff.id, %role_id, "staff references missing role");
                    RoleScope::Staff
                }
            },
            None => RoleScope::Staff,
        };

        let actor = Actor::Staff {
            id: staff.id,
            scope,
        };
        Ok(self.tokens.issue(&actor)?)
    }

    /// Authenticate a checked-in guest and issue a bearer token.
    ///
    /// Rejected when the room is unknown, the guest does not match, or the
    /// guest account has been deactivated by check-out.
    pub async fn guest_login(
        &self,
        room_number: &RoomNumber,
        credentials: &LoginCredentials,
    ) -> Result<IssuedToken, DomainError> {
        let room = self
            .rooms
            .find_by_number(room_number)
            .await?
            .ok_or_else(invalid_credentials)?;
        let guest = self
            .guests
            .find_by_room_and_username(room.id, credentials.username())
            .await?
            .ok_or_else(invalid_credentials)?;
        if !guest.active {
            return Err(invalid_credentials());
        }
        if !self
            .hasher
            .verify(credentials.password(), &guest.password_hash)?
        {
            return Err(invalid_credentials());
        }

        let actor = Actor::Guest {
            id: guest.id,
            room_id: room.id,
        };
        Ok(self.tokens.issue(&actor)?)
    }

    /// Verify a presented bearer token and recover the actor.
    pub fn verify_token(&self, token: &str) -> Result<Actor, DomainError> {
        Ok(self.tokens.verify(token)?)
    }
}
