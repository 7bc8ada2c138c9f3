//! Diesel row types and their conversions to and from domain models.
//!
//! Status, priority, scope, and reporter-kind columns are stored as their
//! lowercase labels; loading a row with an unrecognised label surfaces as a
//! [`PersistenceError::Query`].

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::department::Department;
use crate::domain::guest::Guest;
use crate::domain::issue::{Issue, IssueReference, IssueReporter, IssueTitle};
use crate::domain::ports::PersistenceError;
use crate::domain::property::Property;
use crate::domain::role::Role;
use crate::domain::room::{Room, RoomNumber, RoomType};
use crate::domain::staff::Staff;
use crate::domain::stay::Stay;

use super::schema::{departments, guests, issues, property, roles, room_types, rooms, staff, stays};

fn bad_column(table: &str, column: &str, err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::query(format!("{table}.{column} holds an invalid value: {err}"))
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoomRow {
    pub id: Uuid,
    pub number: String,
    pub room_type_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Room> for RoomRow {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            number: room.number.as_ref().to_owned(),
            room_type_id: room.room_type_id,
            status: room.status.as_str().to_owned(),
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

impl TryFrom<RoomRow> for Room {
    type Error = PersistenceError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            number: RoomNumber::new(row.number)
                .map_err(|err| bad_column("rooms", "number", err))?,
            room_type_id: row.room_type_id,
            status: row
                .status
                .parse()
                .map_err(|err| bad_column("rooms", "status", err))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = room_types)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoomTypeRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<&RoomType> for RoomTypeRow {
    fn from(room_type: &RoomType) -> Self {
        Self {
            id: room_type.id,
            name: room_type.name.clone(),
            description: room_type.description.clone(),
        }
    }
}

impl From<RoomTypeRow> for RoomType {
    fn from(row: RoomTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = departments)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DepartmentRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Department> for DepartmentRow {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
            description: department.description.clone(),
        }
    }
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub scope: String,
}

impl From<&Role> for RoleRow {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            scope: role.scope.as_str().to_owned(),
        }
    }
}

impl TryFrom<RoleRow> for Role {
    type Error = PersistenceError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            scope: row
                .scope
                .parse()
                .map_err(|err| bad_column("roles", "scope", err))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = staff)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Staff> for StaffRow {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id,
            username: staff.username.clone(),
            password_hash: staff.password_hash.clone(),
            full_name: staff.full_name.clone(),
            role_id: staff.role_id,
            department_id: staff.department_id,
            active: staff.active,
            created_at: staff.created_at,
            updated_at: staff.updated_at,
        }
    }
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role_id: row.role_id,
            department_id: row.department_id,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GuestRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub room_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Guest> for GuestRow {
    fn from(guest: &Guest) -> Self {
        Self {
            id: guest.id,
            username: guest.username.clone(),
            password_hash: guest.password_hash.clone(),
            full_name: guest.full_name.clone(),
            room_id: guest.room_id,
            active: guest.active,
            created_at: guest.created_at,
        }
    }
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            room_id: row.room_id,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = stays)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StayRow {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
    pub expected_checkout: NaiveDate,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub status: String,
}

impl From<&Stay> for StayRow {
    fn from(stay: &Stay) -> Self {
        Self {
            id: stay.id,
            guest_id: stay.guest_id,
            room_id: stay.room_id,
            checked_in_at: stay.checked_in_at,
            expected_checkout: stay.expected_checkout,
            checked_out_at: stay.checked_out_at,
            status: stay.status.as_str().to_owned(),
        }
    }
}

impl TryFrom<StayRow> for Stay {
    type Error = PersistenceError;

    fn try_from(row: StayRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            guest_id: row.guest_id,
            room_id: row.room_id,
            checked_in_at: row.checked_in_at,
            expected_checkout: row.expected_checkout,
            checked_out_at: row.checked_out_at,
            status: row
                .status
                .parse()
                .map_err(|err| bad_column("stays", "status", err))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = issues)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueRow {
    pub id: Uuid,
    pub reference: String,
    pub title: String,
    pub description: String,
    pub department_id: Uuid,
    pub room_id: Option<Uuid>,
    pub reporter_kind: String,
    pub reporter_id: Uuid,
    pub status: String,
    pub priority: String,
    pub resolution_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            reference: issue.reference.as_ref().to_owned(),
            title: issue.title.as_ref().to_owned(),
            description: issue.description.clone(),
            department_id: issue.department_id,
            room_id: issue.room_id,
            reporter_kind: issue.reporter.kind_str().to_owned(),
            reporter_id: issue.reporter.reporter_id(),
            status: issue.status.as_str().to_owned(),
            priority: issue.priority.as_str().to_owned(),
            resolution_remarks: issue.resolution_remarks.clone(),
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}

impl TryFrom<IssueRow> for Issue {
    type Error = PersistenceError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            reference: IssueReference::from_stored(row.reference),
            title: IssueTitle::new(row.title).map_err(|err| bad_column("issues", "title", err))?,
            description: row.description,
            department_id: row.department_id,
            room_id: row.room_id,
            reporter: IssueReporter::from_stored(&row.reporter_kind, row.reporter_id)
                .map_err(|err| bad_column("issues", "reporter_kind", err))?,
            status: row
                .status
                .parse()
                .map_err(|err| bad_column("issues", "status", err))?,
            priority: row
                .priority
                .parse()
                .map_err(|err| bad_column("issues", "priority", err))?,
            resolution_remarks: row.resolution_remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// The branding table holds exactly one row with this id.
pub const PROPERTY_ROW_ID: i32 = 1;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset, Identifiable)]
#[diesel(table_name = property)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PropertyRow {
    pub id: i32,
    pub name: String,
    pub logo_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Property> for PropertyRow {
    fn from(value: &Property) -> Self {
        Self {
            id: PROPERTY_ROW_ID,
            name: value.name.clone(),
            logo_url: value.logo_url.clone(),
            contact_email: value.contact_email.clone(),
            contact_phone: value.contact_phone.clone(),
            address: value.address.clone(),
            updated_at: value.updated_at,
        }
    }
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Self {
            name: row.name,
            logo_url: row.logo_url,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            address: row.address,
            updated_at: row.updated_at,
        }
    }
}
