//! In-memory port implementations for unit and integration tests.
//!
//! These adapters back the domain services in tests without a database.
//! They are compiled into the crate only for tests or when the
//! `test-support` feature is enabled.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::ports::{
    DepartmentRepository, GuestRepository, HashError, IssueRepository, IssuedToken, PasswordHasher,
    PersistenceError, PropertyRepository, RoleRepository, RoomRepository, StaffRepository,
    StayRepository, TokenError, TokenService,
};
use crate::domain::{
    Actor, Department, Guest, Issue, IssueFilter, Property, Role, Room, RoomNumber, RoomStatus,
    RoomType, Staff, Stay, StayStatus,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().expect("test repository lock poisoned")
}

/// In-memory [`StaffRepository`].
#[derive(Default)]
pub struct InMemoryStaffRepository {
    records: Mutex<HashMap<Uuid, Staff>>,
}

#[async_trait]
impl StaffRepository for InMemoryStaffRepository {
    async fn create(&self, staff: &Staff) -> Result<(), PersistenceError> {
        lock(&self.records).insert(staff.id, staff.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, PersistenceError> {
        Ok(lock(&self.records).get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .find(|s| s.username == username)
            .cloned())
    }

    async fn find_by_role(&self, role_id: Uuid) -> Result<Option<Staff>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .find(|s| s.role_id == Some(role_id))
            .cloned())
    }

    async fn set_role(
        &self,
        staff_id: Uuid,
        role_id: Option<Uuid>,
    ) -> Result<(), PersistenceError> {
        let mut records = lock(&self.records);
        let staff = records
            .get_mut(&staff_id)
            .ok_or_else(|| PersistenceError::query("staff not found"))?;
        staff.role_id = role_id;
        Ok(())
    }
}

/// In-memory [`GuestRepository`].
#[derive(Default)]
pub struct InMemoryGuestRepository {
    records: Mutex<HashMap<Uuid, Guest>>,
}

#[async_trait]
impl GuestRepository for InMemoryGuestRepository {
    async fn create(&self, guest: &Guest) -> Result<(), PersistenceError> {
        lock(&self.records).insert(guest.id, guest.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Guest>, PersistenceError> {
        Ok(lock(&self.records).get(&id).cloned())
    }

    async fn find_by_room_and_username(
        &self,
        room_id: Uuid,
        username: &str,
    ) -> Result<Option<Guest>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .find(|g| g.room_id == room_id && g.username == username)
            .cloned())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), PersistenceError> {
        let mut records = lock(&self.records);
        let guest = records
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::query("guest not found"))?;
        guest.active = active;
        Ok(())
    }
}

/// In-memory [`RoomRepository`] covering rooms and room types.
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<Uuid, Room>>,
    types: Mutex<HashMap<Uuid, RoomType>>,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: &Room) -> Result<(), PersistenceError> {
        let mut rooms = lock(&self.rooms);
        if rooms.values().any(|r| r.number == room.number) {
            return Err(PersistenceError::conflict("duplicate room number"));
        }
        rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), PersistenceError> {
        lock(&self.rooms).insert(room.id, room.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        lock(&self.rooms).remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, PersistenceError> {
        Ok(lock(&self.rooms).get(&id).cloned())
    }

    async fn find_by_number(&self, number: &RoomNumber) -> Result<Option<Room>, PersistenceError> {
        Ok(lock(&self.rooms)
            .values()
            .find(|r| &r.number == number)
            .cloned())
    }

    async fn list(&self, status: Option<RoomStatus>) -> Result<Vec<Room>, PersistenceError> {
        let mut rooms: Vec<Room> = lock(&self.rooms)
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.number.as_ref().cmp(b.number.as_ref()));
        Ok(rooms)
    }

    async fn find_type_by_id(&self, id: Uuid) -> Result<Option<RoomType>, PersistenceError> {
        Ok(lock(&self.types).get(&id).cloned())
    }

    async fn create_type(&self, room_type: &RoomType) -> Result<(), PersistenceError> {
        lock(&self.types).insert(room_type.id, room_type.clone());
        Ok(())
    }

    async fn list_types(&self) -> Result<Vec<RoomType>, PersistenceError> {
        let mut types: Vec<RoomType> = lock(&self.types).values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }
}

/// In-memory [`StayRepository`].
#[derive(Default)]
pub struct InMemoryStayRepository {
    records: Mutex<HashMap<Uuid, Stay>>,
}

#[async_trait]
impl StayRepository for InMemoryStayRepository {
    async fn create(&self, stay: &Stay) -> Result<(), PersistenceError> {
        lock(&self.records).insert(stay.id, stay.clone());
        Ok(())
    }

    async fn update(&self, stay: &Stay) -> Result<(), PersistenceError> {
        lock(&self.records).insert(stay.id, stay.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Stay>, PersistenceError> {
        Ok(lock(&self.records).get(&id).cloned())
    }

    async fn find_active_by_room(&self, room_id: Uuid) -> Result<Option<Stay>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .find(|s| s.room_id == room_id && s.is_active())
            .cloned())
    }

    async fn list(&self, status: Option<StayStatus>) -> Result<Vec<Stay>, PersistenceError> {
        let mut stays: Vec<Stay> = lock(&self.records)
            .values()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .cloned()
            .collect();
        stays.sort_by_key(|s| std::cmp::Reverse(s.checked_in_at));
        Ok(stays)
    }

    async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<Stay>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .filter(|s| s.is_overdue(today))
            .cloned()
            .collect())
    }
}

/// In-memory [`IssueRepository`].
#[derive(Default)]
pub struct InMemoryIssueRepository {
    records: Mutex<HashMap<Uuid, Issue>>,
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn create(&self, issue: &Issue) -> Result<(), PersistenceError> {
        lock(&self.records).insert(issue.id, issue.clone());
        Ok(())
    }

    async fn update(&self, issue: &Issue) -> Result<(), PersistenceError> {
        lock(&self.records).insert(issue.id, issue.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Issue>, PersistenceError> {
        Ok(lock(&self.records).get(&id).cloned())
    }

    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, PersistenceError> {
        let mut issues: Vec<Issue> = lock(&self.records)
            .values()
            .filter(|i| filter.status.is_none_or(|s| i.status == s))
            .filter(|i| filter.department_id.is_none_or(|d| i.department_id == d))
            .filter(|i| filter.priority.is_none_or(|p| i.priority == p))
            .filter(|i| filter.reporter.is_none_or(|r| i.reporter == r))
            .cloned()
            .collect();
        issues.sort_by_key(|i| std::cmp::Reverse(i.created_at));
        Ok(issues)
    }

    async fn any_for_department(&self, department_id: Uuid) -> Result<bool, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .any(|i| i.department_id == department_id))
    }
}

/// In-memory [`DepartmentRepository`].
#[derive(Default)]
pub struct InMemoryDepartmentRepository {
    records: Mutex<HashMap<Uuid, Department>>,
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn create(&self, department: &Department) -> Result<(), PersistenceError> {
        let mut records = lock(&self.records);
        if records.values().any(|d| d.name == department.name) {
            return Err(PersistenceError::conflict("duplicate department name"));
        }
        records.insert(department.id, department.clone());
        Ok(())
    }

    async fn update(&self, department: &Department) -> Result<(), PersistenceError> {
        lock(&self.records).insert(department.id, department.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        lock(&self.records).remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, PersistenceError> {
        Ok(lock(&self.records).get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Department>, PersistenceError> {
        let mut departments: Vec<Department> = lock(&self.records).values().cloned().collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }
}

/// In-memory [`RoleRepository`].
#[derive(Default)]
pub struct InMemoryRoleRepository {
    records: Mutex<HashMap<Uuid, Role>>,
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, role: &Role) -> Result<(), PersistenceError> {
        let mut records = lock(&self.records);
        if records.values().any(|r| r.name == role.name) {
            return Err(PersistenceError::conflict("duplicate role name"));
        }
        records.insert(role.id, role.clone());
        Ok(())
    }

    async fn update(&self, role: &Role) -> Result<(), PersistenceError> {
        lock(&self.records).insert(role.id, role.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        lock(&self.records).remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, PersistenceError> {
        Ok(lock(&self.records).get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, PersistenceError> {
        Ok(lock(&self.records)
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, PersistenceError> {
        let mut roles: Vec<Role> = lock(&self.records).values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}

/// In-memory [`PropertyRepository`].
#[derive(Default)]
pub struct InMemoryPropertyRepository {
    record: Mutex<Option<Property>>,
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn get(&self) -> Result<Option<Property>, PersistenceError> {
        Ok(lock(&self.record).clone())
    }

    async fn upsert(&self, property: &Property) -> Result<(), PersistenceError> {
        *lock(&self.record) = Some(property.clone());
        Ok(())
    }
}

/// Password "hasher" that stores plaintext; fast and deterministic for tests.
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(password.to_owned())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(password == hash)
    }
}

/// Token service handing out opaque tokens backed by a map.
#[derive(Default)]
pub struct FakeTokenService {
    issued: Mutex<HashMap<String, Actor>>,
}

impl TokenService for FakeTokenService {
    fn issue(&self, actor: &Actor) -> Result<IssuedToken, TokenError> {
        let token = format!("test-token-{}", Uuid::new_v4());
        lock(&self.issued).insert(token.clone(), *actor);
        Ok(IssuedToken {
            token,
            expires_in: 3600,
        })
    }

    fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        lock(&self.issued)
            .get(token)
            .copied()
            .ok_or_else(|| TokenError::verify("unknown test token"))
    }
}
