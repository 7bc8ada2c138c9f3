//! Diesel table definitions for the hotel schema.
//!
//! Kept in lockstep with the SQL migrations under `migrations/`.

diesel::table! {
    room_types (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    rooms (id) {
        id -> Uuid,
        number -> Varchar,
        room_type_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    departments (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    roles (id) {
        id -> Uuid,
        name -> Varchar,
        scope -> Varchar,
    }
}

diesel::table! {
    staff (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Varchar,
        full_name -> Varchar,
        role_id -> Nullable<Uuid>,
        department_id -> Nullable<Uuid>,
        active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    guests (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Varchar,
        full_name -> Varchar,
        room_id -> Uuid,
        active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    stays (id) {
        id -> Uuid,
        guest_id -> Uuid,
        room_id -> Uuid,
        checked_in_at -> Timestamptz,
        expected_checkout -> Date,
        checked_out_at -> Nullable<Timestamptz>,
        status -> Varchar,
    }
}

diesel::table! {
    issues (id) {
        id -> Uuid,
        reference -> Varchar,
        title -> Varchar,
        description -> Text,
        department_id -> Uuid,
        room_id -> Nullable<Uuid>,
        reporter_kind -> Varchar,
        reporter_id -> Uuid,
        status -> Varchar,
        priority -> Varchar,
        resolution_remarks -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    property (id) {
        id -> Int4,
        name -> Varchar,
        logo_url -> Nullable<Varchar>,
        contact_email -> Nullable<Varchar>,
        contact_phone -> Nullable<Varchar>,
        address -> Nullable<Varchar>,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(rooms -> room_types (room_type_id));
diesel::joinable!(staff -> roles (role_id));
diesel::joinable!(staff -> departments (department_id));
diesel::joinable!(guests -> rooms (room_id));
diesel::joinable!(stays -> guests (guest_id));
diesel::joinable!(stays -> rooms (room_id));
diesel::joinable!(issues -> departments (department_id));
diesel::joinable!(issues -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(
    room_types,
    rooms,
    departments,
    roles,
    staff,
    guests,
    stays,
    issues,
    property,
);
