//! Room and stay lifecycle transitions.
//!
//! Every mutation of room status funnels through this service so the
//! transition table in [`RoomStatus`] is enforced in one place.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::guest::{GeneratedCredentials, Guest};
use crate::domain::ports::{GuestRepository, PasswordHasher, RoomRepository, StayRepository};
use crate::domain::room::{Room, RoomNumber, RoomStatus, RoomType};
use crate::domain::stay::Stay;

/// Outcome of a check-in: the opened stay, the provisioned guest, and the
/// plaintext credentials, returned exactly once.
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    /// The newly opened stay.
    pub stay: Stay,
    /// The provisioned guest account.
    pub guest: Guest,
    /// One-time plaintext credentials for the guest.
    pub credentials: GeneratedCredentials,
}

/// Room lifecycle use-cases over the repository ports.
#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
    stays: Arc<dyn StayRepository>,
    guests: Arc<dyn GuestRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RoomService {
    /// Wire the service to its ports.
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        stays: Arc<dyn StayRepository>,
        guests: Arc<dyn GuestRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            rooms,
            stays,
            guests,
            hasher,
        }
    }

    /// Create a room with a unique number and an existing room type.
    pub async fn create_room(
        &self,
        number: RoomNumber,
        room_type_id: Uuid,
    ) -> Result<Room, DomainError> {
        if self.rooms.find_type_by_id(room_type_id).await?.is_none() {
            return Err(DomainError::invalid_request("unknown room type"));
        }
        if self.rooms.find_by_number(&number).await?.is_some() {
            return Err(DomainError::conflict("room number already in use")
                .with_details(json!({ "number": number.as_ref() })));
        }
        let room = Room::new(number, room_type_id);
        self.rooms.create(&room).await?;
        info!(room_id = %room.id, number = %room.number, "room created");
        Ok(room)
    }

    /// Update a room's number and type, re-checking number uniqueness.
    pub async fn update_room(
        &self,
        id: Uuid,
        number: RoomNumber,
        room_type_id: Uuid,
    ) -> Result<Room, DomainError> {
        let mut room = self.require_room(id).await?;
        if self.rooms.find_type_by_id(room_type_id).await?.is_none() {
            return Err(DomainError::invalid_request("unknown room type"));
        }
        if let Some(existing) = self.rooms.find_by_number(&number).await?
            && existing.id != id
        {
            return Err(DomainError::conflict("room number already in use")
                .with_details(json!({ "number": number.as_ref() })));
        }
        room.number = number;
        room.room_type_id = room_type_id;
        room.updated_at = Utc::now();
        self.rooms.update(&room).await?;
        Ok(room)
    }

    /// Earmark an available room for an incoming guest.
    pub async fn select_room(&self, id: Uuid) -> Result<Room, DomainError> {
        self.transition(id, RoomStatus::Selected).await
    }

    /// Withdraw a room from service.
    pub async fn set_maintenance(&self, id: Uuid) -> Result<Room, DomainError> {
        self.transition(id, RoomStatus::Maintenance).await
    }

    /// Return a room under maintenance to service.
    pub async fn set_ready(&self, id: Uuid) -> Result<Room, DomainError> {
        self.transition(id, RoomStatus::Available).await
    }

    /// Check a guest into a selected room.
    ///
    /// Opens the stay, provisions the guest account, and marks the room
    /// occupied. The plaintext guest password appears only in the returned
    /// outcome.
    pub async fn check_in(
        &self,
        room_id: Uuid,
        guest_name: &str,
        expected_checkout: NaiveDate,
    ) -> Result<CheckInOutcome, DomainError> {
        let mut room = self.require_room(room_id).await?;
        if room.status != RoomStatus::Selected {
            return Err(DomainError::invalid_request(
                "room must be selected before check-in",
            ));
        }
        if guest_name.trim().is_empty() {
            return Err(DomainError::invalid_request("guest name must not be empty"));
        }
        if self.stays.find_active_by_room(room_id).await?.is_some() {
            return Err(DomainError::conflict("room already has an active stay"));
        }

        let credentials = GeneratedCredentials::for_room(&room.number);
        let password_hash = self.hasher.hash(&credentials.password)?;
        let guest = Guest::provision(&credentials.username, password_hash, guest_name, room.id);
        self.guests.create(&guest).await?;

        let stay = Stay::open(guest.id, room.id, expected_checkout);
        self.stays.create(&stay).await?;

        room.status = RoomStatus::Occupied;
        room.updated_at = Utc::now();
        self.rooms.update(&room).await?;

        info!(room_id = %room.id, stay_id = %stay.id, "guest checked in");
        Ok(CheckInOutcome {
            stay,
            guest,
            credentials,
        })
    }

    /// Check the current guest out of a room.
    ///
    /// Closes the active stay, deactivates the guest account, and returns
    /// the room to `available`.
    pub async fn check_out(&self, room_id: Uuid) -> Result<Stay, DomainError> {
        let mut room = self.require_room(room_id).await?;
        let mut stay = self
            .stays
            .find_active_by_room(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("no active stay for this room"))?;

        stay.close(Utc::now());
        self.stays.update(&stay).await?;
        self.guests.set_active(stay.guest_id, false).await?;

        room.status = RoomStatus::Available;
        room.updated_at = Utc::now();
        self.rooms.update(&room).await?;

        info!(room_id = %room.id, stay_id = %stay.id, "guest checked out");
        Ok(stay)
    }

    /// Fetch a room by identifier.
    pub async fn get(&self, id: Uuid) -> Result<Room, DomainError> {
        self.require_room(id).await
    }

    /// List rooms, optionally restricted to a status.
    pub async fn list(&self, status: Option<RoomStatus>) -> Result<Vec<Room>, DomainError> {
        Ok(self.rooms.list(status).await?)
    }

    /// Register a new room type.
    pub async fn create_type(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<RoomType, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::invalid_request(
                "room type name must not be empty",
            ));
        }
        let room_type = RoomType::new(name, description);
        self.rooms.create_type(&room_type).await?;
        Ok(room_type)
    }

    /// List all room types.
    pub async fn list_types(&self) -> Result<Vec<RoomType>, DomainError> {
        Ok(self.rooms.list_types().await?)
    }

    /// Delete a room that has no active stay.
    pub async fn delete_room(&self, id: Uuid) -> Result<(), DomainError> {
        self.require_room(id).await?;
        if self.stays.find_active_by_room(id).await?.is_some() {
            return Err(DomainError::conflict(
                "room with an active stay cannot be deleted",
            ));
        }
        self.rooms.delete(id).await?;
        Ok(())
    }

    async fn require_room(&self, id: Uuid) -> Result<Room, DomainError> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("room not found"))
    }

    async fn transition(&self, id: Uuid, next: RoomStatus) -> Result<Room, DomainError> {
        let mut room = self.require_room(id).await?;
        if !room.status.can_transition(next) {
            return Err(DomainError::invalid_request(format!(
                "room cannot move from {} to {}",
                room.status, next
            ))
            .with_details(json!({ "from": room.status, "to": next })));
        }
        room.status = next;
        room.updated_at = Utc::now();
        self.rooms.update(&room).await?;
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::room::RoomType;
    use crate::domain::stay::StayStatus;
    use crate::test_support::{
        InMemoryGuestRepository, InMemoryRoomRepository, InMemoryStayRepository,
        PlainPasswordHasher,
    };
    use rstest::rstest;

    struct Fixture {
        rooms: Arc<InMemoryRoomRepository>,
        guests: Arc<InMemoryGuestRepository>,
        service: RoomService,
        room_type: RoomType,
    }

    async fn fixture() -> Fixture {
        let rooms = Arc::new(InMemoryRoomRepository::default());
        let stays = Arc::new(InMemoryStayRepository::default());
        let guests = Arc::new(InMemoryGuestRepository::default());
        let service = RoomService::new(
            rooms.clone(),
            stays.clone(),
            guests.clone(),
            Arc::new(PlainPasswordHasher),
        );
        let room_type = RoomType::new("Double", None);
        rooms.create_type(&room_type).await.expect("seed type");
        Fixture {
            rooms,
            guests,
            service,
            room_type,
        }
    }

    fn number(raw: &str) -> RoomNumber {
        RoomNumber::new(raw).expect("valid number")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[tokio::test]
    async fn create_room_rejects_duplicate_numbers() {
        let fx = fixture().await;
        fx.service
            .create_room(number("101"), fx.room_type.id)
            .await
            .expect("first create");

        let err = fx
            .service
            .create_room(number("101"), fx.room_type.id)
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn create_room_rejects_unknown_type() {
        let fx = fixture().await;
        let err = fx
            .service
            .create_room(number("101"), Uuid::new_v4())
            .await
            .expect_err("unknown type rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn full_lifecycle_select_check_in_check_out() {
        let fx = fixture().await;
        let room = fx
            .service
            .create_room(number("204"), fx.room_type.id)
            .await
            .expect("create");

        fx.service.select_room(room.id).await.expect("select");
        let outcome = fx
            .service
            .check_in(room.id, "Grace Hopper", date(2026, 9, 2))
            .await
            .expect("check in");

        assert_eq!(outcome.guest.room_id, room.id);
        assert!(outcome.stay.is_active());
        let occupied = fx
            .rooms
            .find_by_id(room.id)
            .await
            .expect("query")
            .expect("room");
        assert_eq!(occupied.status, RoomStatus::Occupied);

        let stay = fx.service.check_out(room.id).await.expect("check out");
        assert_eq!(stay.status, StayStatus::CheckedOut);

        let guest = fx
            .guests
            .find_by_id(outcome.guest.id)
            .await
            .expect("query")
            .expect("guest");
        assert!(!guest.active, "guest deactivated at check-out");

        let available = fx
            .rooms
            .find_by_id(room.id)
            .await
            .expect("query")
            .expect("room");
        assert_eq!(available.status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn check_in_requires_selected_room() {
        let fx = fixture().await;
        let room = fx
            .service
            .create_room(number("301"), fx.room_type.id)
            .await
            .expect("create");

        let err = fx
            .service
            .check_in(room.id, "Grace Hopper", date(2026, 9, 2))
            .await
            .expect_err("available room rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn check_out_without_active_stay_is_not_found() {
        let fx = fixture().await;
        let room = fx
            .service
            .create_room(number("302"), fx.room_type.id)
            .await
            .expect("create");

        let err = fx
            .service
            .check_out(room.id)
            .await
            .expect_err("nothing to check out");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn occupied_room_cannot_be_deleted_or_put_in_maintenance() {
        let fx = fixture().await;
        let room = fx
            .service
            .create_room(number("303"), fx.room_type.id)
            .await
            .expect("create");
        fx.service.select_room(room.id).await.expect("select");
        fx.service
            .check_in(room.id, "Grace Hopper", date(2026, 9, 2))
            .await
            .expect("check in");

        let delete_err = fx
            .service
            .delete_room(room.id)
            .await
            .expect_err("delete refused");
        assert_eq!(delete_err.code(), ErrorCode::Conflict);

        let maintenance_err = fx
            .service
            .set_maintenance(room.id)
            .await
            .expect_err("maintenance refused");
        assert_eq!(maintenance_err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn maintenance_round_trip() {
        let fx = fixture().await;
        let room = fx
            .service
            .create_room(number("401"), fx.room_type.id)
            .await
            .expect("create");

        let in_maintenance = fx
            .service
            .set_maintenance(room.id)
            .await
            .expect("to maintenance");
        assert_eq!(in_maintenance.status, RoomStatus::Maintenance);

        let ready = fx.service.set_ready(room.id).await.expect("back to ready");
        assert_eq!(ready.status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn update_room_rejects_number_held_by_other_room() {
        let fx = fixture().await;
        fx.service
            .create_room(number("501"), fx.room_type.id)
            .await
            .expect("create");
        let second = fx
            .service
            .create_room(number("502"), fx.room_type.id)
            .await
            .expect("create");

        let err = fx
            .service
            .update_room(second.id, number("501"), fx.room_type.id)
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code(), ErrorCode::Conflict);

        // Keeping its own number is fine.
        fx.service
            .update_room(second.id, number("502"), fx.room_type.id)
            .await
            .expect("self update");
    }
}
