//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    customers (id) {
        id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        middle_initial -> Nullable<Text>,
        address -> Text,
        phone_number -> Text,
        email -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    units (id) {
        id -> Uuid,
        customer_id -> Uuid,
        brand -> Text,
        model -> Text,
        year -> Int4,
        plate_number -> Text,
        intake_position -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    jobs (id) {
        id -> Uuid,
        customer_id -> Uuid,
        unit_id -> Uuid,
        work_date -> Date,
        duration_hours -> Float8,
        remarks -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
    }
}

diesel::table! {
    job_items (id) {
        id -> Uuid,
        job_id -> Uuid,
        description -> Text,
        products_used -> Nullable<Text>,
        intake_position -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_roles (id) {
        id -> Uuid,
        role -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(units -> customers (customer_id));
diesel::joinable!(jobs -> units (unit_id));
diesel::joinable!(job_items -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(customers, units, jobs, job_items, user_roles);
