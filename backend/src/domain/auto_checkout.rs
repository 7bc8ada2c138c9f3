//! Daily auto-checkout batch.
//!
//! Closes every active stay whose expected check-out date has passed. The
//! batch converges on re-run: only still-active stays are selected, and a
//! failure on one stay never blocks the rest.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::ports::{GuestRepository, RoomRepository, StayRepository};
use crate::domain::room::RoomStatus;

/// A stay the batch failed to close, with the reason.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoCheckoutFailure {
    /// Stay that could not be closed.
    pub stay_id: Uuid,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Result of one auto-checkout run.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoCheckoutReport {
    /// Stays closed by this run.
    pub closed: Vec<Uuid>,
    /// Stays that failed to close; they stay active for the next run.
    pub failed: Vec<AutoCheckoutFailure>,
}

/// Batch service closing overdue stays.
#[derive(Clone)]
pub struct AutoCheckoutService {
    stays: Arc<dyn StayRepository>,
    guests: Arc<dyn GuestRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl AutoCheckoutService {
    /// Wire the service to its ports.
    pub fn new(
        stays: Arc<dyn StayRepository>,
        guests: Arc<dyn GuestRepository>,
        rooms: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            stays,
            guests,
            rooms,
        }
    }

    /// Close every stay overdue as of `today`.
    pub async fn run(&self, today: NaiveDate) -> Result<AutoCheckoutReport, DomainError> {
        let overdue = self.stays.list_overdue(today).await?;
        info!(count = overdue.len(), %today, "auto-checkout run starting");

        let mut report = AutoCheckoutReport::default();
        for mut stay in overdue {
            let stay_id = stay.id;
            let result: Result<(), DomainError> = async {
                stay.close(Utc::now());
                self.stays.update(&stay).await?;
                self.guests.set_active(stay.guest_id, false).await?;
                if let Some(mut room) = self.rooms.find_by_id(stay.room_id).await? {
                    room.status = RoomStatus::Available;
                    room.updated_at = Utc::now();
                    self.rooms.update(&room).await?;
                }
                Ok(())
            }
            .await;

            match result {
                Ok(()) => report.closed.push(stay_id),
                Err(err) => {
                    error!(stay_id = %stay_id, error = %err, "auto-checkout failed for stay");
                    report.failed.push(AutoCheckoutFailure {
                        stay_id,
                        reason: err.message().to_owned(),
                    });
                }
            }
        }

        info!(
            closed = report.closed.len(),
            failed = report.failed.len(),
            "auto-checkout run finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::guest::Guest;
    use crate::domain::room::{Room, RoomNumber};
    use crate::domain::stay::{Stay, StayStatus};
    use crate::test_support::{
        InMemoryGuestRepository, InMemoryRoomRepository, InMemoryStayRepository,
    };

    struct Fixture {
        stays: Arc<InMemoryStayRepository>,
        guests: Arc<InMemoryGuestRepository>,
        rooms: Arc<InMemoryRoomRepository>,
        service: AutoCheckoutService,
    }

    fn fixture() -> Fixture {
        let stays = Arc::new(InMemoryStayRepository::default());
        let guests = Arc::new(InMemoryGuestRepository::default());
        let rooms = Arc::new(InMemoryRoomRepository::default());
        let service = AutoCheckoutService::new(stays.clone(), guests.clone(), rooms.clone());
        Fixture {
            stays,
            guests,
            rooms,
            service,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    async fn seed_occupied_room(fx: &Fixture, number: &str, expected: NaiveDate) -> Stay {
        let mut room = Room::new(
            RoomNumber::new(number).expect("valid number"),
            Uuid::new_v4(),
        );
        room.status = RoomStatus::Occupied;
        fx.rooms.create(&room).await.expect("seed room");
        let guest = Guest::provision(format!("guest-{number}"), "hash", "Guest", room.id);
        fx.guests.create(&guest).await.expect("seed guest");
        let stay = Stay::open(guest.id, room.id, expected);
        fx.stays.create(&stay).await.expect("seed stay");
        stay
    }

    #[tokio::test]
    async fn closes_only_overdue_stays() {
        let fx = fixture();
        let today = date(2026, 8, 30);
        let overdue = seed_occupied_room(&fx, "101", date(2026, 8, 29)).await;
        let current = seed_occupied_room(&fx, "102", date(2026, 9, 2)).await;

        let report = fx.service.run(today).await.expect("run");

        assert_eq!(report.closed, vec![overdue.id]);
        assert!(report.failed.is_empty());

        let closed = fx
            .stays
            .find_by_id(overdue.id)
            .await
            .expect("query")
            .expect("stay");
        assert_eq!(closed.status, StayStatus::CheckedOut);

        let untouched = fx
            .stays
            .find_by_id(current.id)
            .await
            .expect("query")
            .expect("stay");
        assert_eq!(untouched.status, StayStatus::Active);
    }

    #[tokio::test]
    async fn releases_room_and_deactivates_guest() {
        let fx = fixture();
        let stay = seed_occupied_room(&fx, "201", date(2026, 8, 1)).await;

        fx.service.run(date(2026, 8, 30)).await.expect("run");

        let room = fx
            .rooms
            .find_by_id(stay.room_id)
            .await
            .expect("query")
            .expect("room");
        assert_eq!(room.status, RoomStatus::Available);

        let guest = fx
            .guests
            .find_by_id(stay.guest_id)
            .await
            .expect("query")
            .expect("guest");
        assert!(!guest.active);
    }

    #[tokio::test]
    async fn rerun_converges_to_empty_report() {
        let fx = fixture();
        seed_occupied_room(&fx, "301", date(2026, 8, 1)).await;
        let today = date(2026, 8, 30);

        let first = fx.service.run(today).await.expect("first run");
        assert_eq!(first.closed.len(), 1);

        let second = fx.service.run(today).await.expect("second run");
        assert!(second.closed.is_empty());
        assert!(second.failed.is_empty());
    }
}
