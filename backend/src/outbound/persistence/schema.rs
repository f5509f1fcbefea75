//! Diesel table definitions mirroring `migrations/`.
//!
//! Keep these in step with the SQL; `diesel print-schema` against a migrated
//! database regenerates them.

diesel::table! {
    /// Capsule lifecycle labels (`draft`, `sealed`, `opened`).
    capsule_statuses (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Capsule categories (`personal`, `public`, `collaborative`).
    capsule_types (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Prediction lifecycle labels (`pending`, `verified`, `disproved`).
    verification_statuses (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Payload kinds for capsule content.
    content_types (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Access levels for access control entries.
    permission_levels (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Login accounts. `username` is unique.
    accounts (id) {
        id -> Int8,
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One profile per account.
    user_profiles (id) {
        id -> Int8,
        account_id -> Int8,
        bio -> Text,
        location_x -> Float8,
        location_y -> Float8,
    }
}

diesel::table! {
    /// At most one token per account.
    auth_tokens (key) {
        key -> Varchar,
        account_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    time_capsules (id) {
        id -> Int8,
        creator_id -> Int8,
        status_id -> Int8,
        type_id -> Int8,
        title -> Varchar,
        descriptions -> Text,
        opening_date -> Timestamptz,
        location_x -> Float8,
        location_y -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    capsule_contents (id) {
        id -> Int8,
        capsule_id -> Int8,
        content_type_id -> Int8,
        content -> Text,
        media_url -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    predictions (id) {
        id -> Int8,
        capsule_content_id -> Int8,
        prediction_text -> Text,
        category -> Nullable<Varchar>,
        verification_status_id -> Int8,
        verification_date -> Nullable<Timestamptz>,
        /// Cleared when the verifying profile is deleted.
        verification_user_id -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    story_nodes (id) {
        id -> Int8,
        capsule_content_id -> Int8,
        parent_node_id -> Nullable<Int8>,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    story_choices (id) {
        id -> Int8,
        node_id -> Int8,
        choice_text -> Text,
        next_node_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    discussion_threads (id) {
        id -> Int8,
        capsule_id -> Int8,
        title -> Varchar,
        created_by_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    discussion_comments (id) {
        id -> Int8,
        thread_id -> Int8,
        content -> Text,
        author_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user capsule grants. Stored only; no request path consults them.
    access_controls (id) {
        id -> Int8,
        capsule_id -> Int8,
        user_id -> Int8,
        permission_level_id -> Int8,
        expires_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Geographic zones. Stored only; no request path consults them.
    location_zones (id) {
        id -> Int8,
        name -> Varchar,
        boundary_data -> Jsonb,
        restrictions -> Nullable<Jsonb>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_profiles -> accounts (account_id));
diesel::joinable!(auth_tokens -> accounts (account_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    auth_tokens,
    user_profiles,
);
